use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::SortOrder;

/// Named feed filters accepted in `/articles/{filter}/{page}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFilter {
    /// Last 15 days.
    Latest,
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    /// No time bound.
    All,
}

impl FeedFilter {
    /// Parse a filter keyword. Matching is exact and case-sensitive;
    /// anything unrecognized reads as `All`.
    pub fn parse(keyword: &str) -> Self {
        match keyword {
            "latest" => FeedFilter::Latest,
            "week" => FeedFilter::Week,
            "month" => FeedFilter::Month,
            _ => FeedFilter::All,
        }
    }

    /// How far back the filter reaches, if at all.
    pub fn lookback(self) -> Option<TimeDelta> {
        match self {
            FeedFilter::Latest => Some(TimeDelta::days(15)),
            FeedFilter::Week => Some(TimeDelta::days(7)),
            FeedFilter::Month => Some(TimeDelta::days(30)),
            FeedFilter::All => None,
        }
    }

    pub fn window(self, now: DateTime<Utc>) -> Window {
        match self.lookback() {
            Some(span) => Window::Since(now - span),
            None => Window::Unbounded,
        }
    }

    /// Only the unbounded feed lists oldest first.
    pub fn order(self) -> SortOrder {
        match self {
            FeedFilter::All => SortOrder::Ascending,
            FeedFilter::Latest | FeedFilter::Week | FeedFilter::Month => SortOrder::Descending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedFilter::Latest => "latest",
            FeedFilter::Week => "week",
            FeedFilter::Month => "month",
            FeedFilter::All => "all",
        }
    }
}

/// Constraint on article creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Created at or after the cutoff.
    Since(DateTime<Utc>),
    Unbounded,
}

impl Window {
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        match self {
            Window::Since(cutoff) => Some(*cutoff),
            Window::Unbounded => None,
        }
    }

    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        match self {
            Window::Since(cutoff) => created_at >= *cutoff,
            Window::Unbounded => true,
        }
    }
}

/// Map a filter keyword to the creation-time window it selects.
pub fn resolve_window(keyword: &str, now: DateTime<Utc>) -> Window {
    FeedFilter::parse(keyword).window(now)
}
