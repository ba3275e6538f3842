//! Incremental paginated loading.
//!
//! One generic pagination state machine shared by every "pick from a remote
//! list" dropdown, replacing a copy of the same logic per collection. The
//! pieces are:
//! - `page`: request/result types, the `ScopeKey`, and the `PageFetcher` trait
//! - `state`: the `PagedLoader` state machine that accumulates pages
//! - `trigger`: the sentinel-row visibility trigger that asks for more

mod page;
mod state;
mod trigger;

pub use page::{FetchEvent, ListEntry, PageFetcher, PageRequest, PageResult, ScopeKey};
pub use state::PagedLoader;
pub use trigger::SentinelTrigger;
