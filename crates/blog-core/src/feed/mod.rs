//! Home feed: time windows, ordering, pagination and the query engine that
//! composes them.

mod engine;
mod order;
mod pagination;
mod window;

pub use engine::{FeedEngine, FeedPage, attach_authors};
pub use order::{SortOrder, resolve_order};
pub use pagination::{HOME_FEED_PAGE_SIZE, Page, paginate, parse_page};
pub use window::{FeedFilter, Window, resolve_window};
