//! Application services - use cases composed from domain entities and ports.
//!
//! Every collaborator is injected as an `Arc<dyn Port>` so the services can
//! run against real infrastructure or in-memory fakes alike.

mod accounts;
mod articles;
mod engagement;
mod read_time;

pub use accounts::{AccountLinks, AccountService, NewAccount, SignedIn};
pub use articles::{ArticleService, PublishedArticle, RemovedArticle};
pub use engagement::{EngagementService, Profile};
pub use read_time::WordsPerMinute;
