//! Pagination state machine.
//!
//! `PagedLoader` accumulates pages of one scoped collection into a single
//! growing list. It serializes fetches (at most one outstanding request per
//! scope), discards stale responses, deduplicates items by id, and never
//! resurrects `has_more` once a page reported exhaustion.
//!
//! State transitions:
//!
//! ```text
//! INIT --request_page--> LOADING(page=1)
//! LOADING(page=n) --page_arrived, more pages--> IDLE(cursor=n+1)
//! LOADING(page=n) --page_arrived, last page---> EXHAUSTED
//! LOADING(page=n) --page_failed-------------->  IDLE(cursor=n)   retry point
//! IDLE --request_page--> LOADING(page=cursor)
//! EXHAUSTED: terminal until reset()
//! ```

use std::collections::HashSet;

use crate::error::FetchError;
use crate::log;

use super::page::{ListEntry, PageRequest, PageResult, ScopeKey};

/// Accumulating loader for one scoped collection.
///
/// Owned by exactly one dropdown instance; all mutation goes through the
/// transition methods below.
#[derive(Debug)]
pub struct PagedLoader<T: ListEntry> {
    scope: ScopeKey,
    page_size: u32,
    items: Vec<T>,
    /// Ids already present in `items`; first occurrence wins.
    seen: HashSet<String>,
    /// Next page index to request, 1-based. Only grows short of a reset.
    cursor: u32,
    loading: bool,
    has_more: bool,
    last_error: Option<FetchError>,
}

impl<T: ListEntry> PagedLoader<T> {
    pub fn new(scope: ScopeKey, page_size: u32) -> Self {
        Self {
            scope,
            page_size,
            items: Vec::new(),
            seen: HashSet::new(),
            cursor: 1,
            loading: false,
            has_more: true,
            last_error: None,
        }
    }

    pub fn scope(&self) -> &ScopeKey {
        &self.scope
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Most recent fetch failure, cleared by the next successful page.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Find an accumulated item by id.
    pub fn item_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Discard everything and point the loader at `scope`, back at page 1.
    ///
    /// Any in-flight fetch for the old scope will fail the staleness guard
    /// when it lands.
    pub fn reset(&mut self, scope: ScopeKey) {
        self.scope = scope;
        self.items.clear();
        self.seen.clear();
        self.cursor = 1;
        self.loading = false;
        self.has_more = true;
        self.last_error = None;
    }

    /// Ask for the next page.
    ///
    /// Returns the request to dispatch, or `None` while a fetch is already
    /// outstanding or the collection is exhausted. This no-op guard is what
    /// lets the viewport trigger over-fire harmlessly.
    pub fn request_page(&mut self) -> Option<PageRequest> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        log::log_fetch(&self.scope.to_string(), self.cursor);
        Some(PageRequest {
            scope: self.scope.clone(),
            page: self.cursor,
            page_size: self.page_size,
        })
    }

    /// Apply a successful page fetch tagged with `(scope, page)`.
    ///
    /// A result for another scope, or for a page other than the one the
    /// cursor is waiting on, is stale and is dropped without touching state.
    pub fn page_arrived(&mut self, scope: &ScopeKey, page: u32, result: PageResult<T>) {
        if let Some(reason) = self.staleness(scope, page) {
            log::log_stale_discard(&scope.to_string(), page, reason);
            return;
        }

        if result.items.is_empty() && result.total_pages > page {
            // Advancing anyway avoids refetching the same empty page forever.
            log::log_empty_page_anomaly(&scope.to_string(), page, result.total_pages);
        }

        for item in result.items {
            if self.seen.insert(item.id().to_string()) {
                self.items.push(item);
            }
        }
        self.cursor = page + 1;
        self.has_more = result.total_pages > page;
        self.loading = false;
        self.last_error = None;
    }

    /// Apply a failed page fetch tagged with `(scope, page)`.
    ///
    /// Cursor and `has_more` are left untouched so the identical page can be
    /// retried by the next trigger signal.
    pub fn page_failed(&mut self, scope: &ScopeKey, page: u32, err: FetchError) {
        if let Some(reason) = self.staleness(scope, page) {
            log::log_stale_discard(&scope.to_string(), page, reason);
            return;
        }
        log::log(&format!("fetch {} page {} failed: {}", scope, page, err));
        self.loading = false;
        self.last_error = Some(err);
    }

    fn staleness(&self, scope: &ScopeKey, page: u32) -> Option<&'static str> {
        if *scope != self.scope {
            Some("scope changed")
        } else if page != self.cursor {
            Some("page does not match cursor")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: String,
        label: String,
    }

    impl Entry {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                label: format!("entry {}", id),
            }
        }
    }

    impl ListEntry for Entry {
        fn id(&self) -> &str {
            &self.id
        }

        fn label(&self) -> &str {
            &self.label
        }
    }

    fn entries(ids: &[&str]) -> Vec<Entry> {
        ids.iter().map(|id| Entry::new(id)).collect()
    }

    fn loader() -> PagedLoader<Entry> {
        PagedLoader::new(ScopeKey::new("departments"), 10)
    }

    /// Drive one successful request/arrival cycle.
    fn load_page(loader: &mut PagedLoader<Entry>, ids: &[&str], total_pages: u32) {
        let req = loader.request_page().unwrap();
        loader.page_arrived(
            &req.scope,
            req.page,
            PageResult {
                items: entries(ids),
                total_pages,
            },
        );
    }

    #[test]
    fn test_initial_state() {
        let loader = loader();
        assert!(loader.items().is_empty());
        assert_eq!(loader.cursor(), 1);
        assert!(!loader.is_loading());
        assert!(loader.has_more());
        assert!(loader.last_error().is_none());
    }

    #[test]
    fn test_no_second_fetch_while_loading() {
        let mut loader = loader();
        assert!(loader.request_page().is_some());
        assert!(loader.is_loading());
        // Trigger over-fires; the guard absorbs it
        assert!(loader.request_page().is_none());
        assert!(loader.request_page().is_none());
    }

    #[test]
    fn test_cursor_advances_per_page() {
        let mut loader = loader();
        load_page(&mut loader, &["a"], 3);
        assert_eq!(loader.cursor(), 2);
        load_page(&mut loader, &["b"], 3);
        assert_eq!(loader.cursor(), 3);
        load_page(&mut loader, &["c"], 3);
        assert_eq!(loader.cursor(), 4);
    }

    #[test]
    fn test_three_page_scenario() {
        // Backend reports 3 pages of page_size 10, returning 10/10/4 items
        let mut loader = loader();
        let page1: Vec<String> = (0..10).map(|i| format!("p1-{}", i)).collect();
        let page2: Vec<String> = (0..10).map(|i| format!("p2-{}", i)).collect();
        let page3: Vec<String> = (0..4).map(|i| format!("p3-{}", i)).collect();

        for ids in [&page1, &page2, &page3] {
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            load_page(&mut loader, &refs, 3);
        }

        assert_eq!(loader.items().len(), 24);
        assert!(!loader.has_more());
        assert_eq!(loader.cursor(), 4);
    }

    #[test]
    fn test_duplicates_across_pages_filtered() {
        let mut loader = loader();
        load_page(&mut loader, &["a", "b", "c"], 2);
        // Backend shifted under us; "c" shows up again on page 2
        load_page(&mut loader, &["c", "d"], 2);

        let ids: Vec<&str> = loader.items().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_duplicate_within_page_first_wins() {
        let mut loader = loader();
        let req = loader.request_page().unwrap();
        let mut items = entries(&["a", "b"]);
        items.push(Entry {
            id: "a".to_string(),
            label: "later duplicate".to_string(),
        });
        loader.page_arrived(&req.scope, req.page, PageResult { items, total_pages: 1 });

        assert_eq!(loader.items().len(), 2);
        assert_eq!(loader.items()[0].label, "entry a");
    }

    #[test]
    fn test_exhaustion_is_terminal() {
        let mut loader = loader();
        load_page(&mut loader, &["a"], 1);
        assert!(!loader.has_more());
        assert!(loader.request_page().is_none());

        // A stale late success for a higher page must not resurrect has_more
        loader.page_arrived(
            &ScopeKey::new("departments"),
            2,
            PageResult {
                items: entries(&["b"]),
                total_pages: 5,
            },
        );
        assert!(!loader.has_more());
        assert_eq!(loader.items().len(), 1);
    }

    #[test]
    fn test_failure_leaves_retry_point() {
        let mut loader = loader();
        let req = loader.request_page().unwrap();
        loader.page_failed(
            &req.scope,
            req.page,
            FetchError::Network("connection refused".to_string()),
        );

        assert!(!loader.is_loading());
        assert_eq!(loader.cursor(), 1);
        assert!(loader.has_more());
        assert!(loader.items().is_empty());
        assert!(matches!(loader.last_error(), Some(FetchError::Network(_))));

        // Same page retried, this time successfully
        load_page(&mut loader, &["a", "b"], 1);
        assert_eq!(loader.items().len(), 2);
        assert_eq!(loader.cursor(), 2);
        assert!(loader.last_error().is_none());
    }

    #[test]
    fn test_stale_scope_discarded() {
        let mut loader = loader();
        let old_req = loader.request_page().unwrap();

        // Scope changes while page 1 of "departments" is in flight
        loader.reset(ScopeKey::new("teams").with_filter("department", "d-1"));

        loader.page_arrived(
            &old_req.scope,
            old_req.page,
            PageResult {
                items: entries(&["zombie"]),
                total_pages: 9,
            },
        );

        assert!(loader.items().is_empty());
        assert_eq!(loader.cursor(), 1);
        assert!(loader.has_more());
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_stale_page_discarded() {
        let mut loader = loader();
        load_page(&mut loader, &["a"], 3);
        assert_eq!(loader.cursor(), 2);

        // A reordered duplicate delivery of page 1 must not reapply
        loader.page_arrived(
            &ScopeKey::new("departments"),
            1,
            PageResult {
                items: entries(&["x", "y"]),
                total_pages: 3,
            },
        );
        assert_eq!(loader.items().len(), 1);
        assert_eq!(loader.cursor(), 2);
    }

    #[test]
    fn test_stale_failure_discarded() {
        let mut loader = loader();
        let old_req = loader.request_page().unwrap();
        loader.reset(ScopeKey::new("services"));
        let fresh_req = loader.request_page().unwrap();

        loader.page_failed(
            &old_req.scope,
            old_req.page,
            FetchError::Network("timed out".to_string()),
        );

        // The fresh scope's fetch is still outstanding and untouched
        assert!(loader.is_loading());
        assert!(loader.last_error().is_none());
        assert_eq!(fresh_req.page, 1);
    }

    #[test]
    fn test_empty_page_with_more_advances_cursor() {
        let mut loader = loader();
        let req = loader.request_page().unwrap();
        loader.page_arrived(
            &req.scope,
            req.page,
            PageResult {
                items: vec![],
                total_pages: 3,
            },
        );

        assert_eq!(loader.cursor(), 2);
        assert!(loader.has_more());
        assert!(!loader.is_loading());
        assert!(loader.items().is_empty());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut loader = loader();
        load_page(&mut loader, &["a", "b"], 1);
        assert!(!loader.has_more());

        loader.reset(ScopeKey::new("departments"));
        assert!(loader.items().is_empty());
        assert_eq!(loader.cursor(), 1);
        assert!(loader.has_more());

        // Previously seen ids load again after a reset
        load_page(&mut loader, &["a", "b"], 1);
        assert_eq!(loader.items().len(), 2);
    }

    #[test]
    fn test_item_by_id() {
        let mut loader = loader();
        load_page(&mut loader, &["a", "b"], 1);
        assert_eq!(loader.item_by_id("b").map(|e| e.id()), Some("b"));
        assert!(loader.item_by_id("missing").is_none());
    }
}
