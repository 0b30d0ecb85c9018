use serde::{Deserialize, Serialize};

use super::FeedFilter;

/// Direction of the creation-time sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

/// Map a filter keyword to its sort direction.
pub fn resolve_order(keyword: &str) -> SortOrder {
    FeedFilter::parse(keyword).order()
}
