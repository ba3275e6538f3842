//! Page fetch contract: scope keys, requests, results, and the fetcher trait.

use std::fmt;

use futures::future::BoxFuture;

use crate::error::FetchResult;

/// Identifies one remote collection plus any active filters.
///
/// Two keys are equal only when the resource and every filter pair match;
/// changing a filter (e.g. the department a team list is scoped to) yields a
/// different key and invalidates all accumulated pagination state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeKey {
    resource: String,
    filters: Vec<(String, String)>,
}

impl ScopeKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            filters: Vec::new(),
        }
    }

    /// Add a filter pair to the key. Filter order is significant.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (i, (k, v)) in self.filters.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, k, v)?;
        }
        Ok(())
    }
}

/// A request for one page of a scoped collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub scope: ScopeKey,
    /// 1-based page index
    pub page: u32,
    pub page_size: u32,
}

/// One page of a paginated collection, in server order.
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

/// Minimal view the loader needs of a list item.
///
/// Everything else about the record is opaque; `id` must be unique within one
/// scope's full result set (duplicates across pages are filtered defensively).
pub trait ListEntry {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

/// A source of pages for one or more collections.
///
/// Implementations must not retry internally and must be safe to call
/// repeatedly with the same request; retry policy belongs to the caller.
pub trait PageFetcher<T>: Send + Sync {
    fn fetch_page(&self, request: PageRequest) -> BoxFuture<'static, FetchResult<PageResult<T>>>;
}

/// Completion of a dispatched page fetch, delivered back to the event loop.
///
/// Carries the `(scope, page)` tag the request was issued with so the store
/// can discard results that no longer match its expectations.
#[derive(Debug)]
pub struct FetchEvent<T> {
    pub scope: ScopeKey,
    pub page: u32,
    pub outcome: FetchResult<PageResult<T>>,
}
