//! Dropdown state: one loader, one highlight cursor, one sentinel trigger.

use crate::loader::{ListEntry, PageRequest, PagedLoader, ScopeKey, SentinelTrigger};

/// State for one open dropdown.
///
/// Created when the dropdown opens and dropped when it closes; the trigger
/// dies with it, so no "near end" signal can reach a closed dropdown. Never
/// shared between fields, even for the same scope.
#[derive(Debug)]
pub struct DropdownState<T: ListEntry> {
    pub loader: PagedLoader<T>,
    /// Index of the highlighted row within the loaded items
    pub highlighted: usize,
    /// First visible row of the scroll window
    pub offset: usize,
    /// Rows shown at once before scrolling starts
    pub visible_rows: usize,
    trigger: SentinelTrigger,
}

impl<T: ListEntry> DropdownState<T> {
    /// Open a dropdown on `scope` and return the initial page-1 request.
    pub fn open(scope: ScopeKey, page_size: u32, visible_rows: usize) -> (Self, Option<PageRequest>) {
        let mut state = Self {
            loader: PagedLoader::new(scope, page_size),
            highlighted: 0,
            offset: 0,
            visible_rows: visible_rows.max(1),
            trigger: SentinelTrigger::new(),
        };
        let request = state.loader.request_page();
        (state, request)
    }

    /// Rows currently inside the scroll window.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.visible_rows).min(self.loader.items().len());
        self.offset..end
    }

    /// Move the highlight down one row. Does not wrap: the list grows at the
    /// bottom, and walking past the end is what scrolls the sentinel into
    /// view.
    pub fn select_next(&mut self) {
        let len = self.loader.items().len();
        if len == 0 {
            return;
        }
        self.highlighted = (self.highlighted + 1).min(len - 1);
        self.scroll_to_highlight();
    }

    /// Move the highlight up one row. Does not wrap.
    pub fn select_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
        self.scroll_to_highlight();
    }

    fn scroll_to_highlight(&mut self) {
        if self.highlighted < self.offset {
            self.offset = self.highlighted;
        } else if self.highlighted >= self.offset + self.visible_rows {
            self.offset = self.highlighted + 1 - self.visible_rows;
        }
    }

    /// Check whether the sentinel (last loaded) row has scrolled into view
    /// and, if so, ask the loader for the next page.
    ///
    /// Call after every state change that can move the scroll window or grow
    /// the list. Over-firing is harmless; `request_page` is a no-op while a
    /// fetch is outstanding or the collection is exhausted.
    pub fn poll_more(&mut self) -> Option<PageRequest> {
        let len = self.loader.items().len();
        if len == 0 {
            return None;
        }
        let visible = self.visible_range();
        if self.trigger.observe(len - 1, visible) {
            return self.loader.request_page();
        }
        None
    }

    /// Reload the current scope from page 1.
    ///
    /// Exposed for hosts that mutated the backing collection elsewhere (a new
    /// record was just created) and for manual retry after a failure.
    pub fn refresh(&mut self) -> Option<PageRequest> {
        let scope = self.loader.scope().clone();
        self.retarget(scope)
    }

    /// Point the dropdown at a different scope, discarding everything
    /// accumulated for the old one. In-flight results for the old scope die
    /// in the loader's staleness guard.
    pub fn retarget(&mut self, scope: ScopeKey) -> Option<PageRequest> {
        self.loader.reset(scope);
        self.highlighted = 0;
        self.offset = 0;
        self.trigger.detach();
        self.loader.request_page()
    }

    /// Id of the highlighted entry, for the host's change event.
    pub fn choose(&self) -> Option<&str> {
        self.loader.items().get(self.highlighted).map(|item| item.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{ListEntry, PageResult};

    #[derive(Debug)]
    struct Entry(String);

    impl ListEntry for Entry {
        fn id(&self) -> &str {
            &self.0
        }

        fn label(&self) -> &str {
            &self.0
        }
    }

    fn entries(range: std::ops::Range<usize>) -> Vec<Entry> {
        range.map(|i| Entry(format!("id-{}", i))).collect()
    }

    fn open() -> DropdownState<Entry> {
        let (mut state, request) = DropdownState::open(ScopeKey::new("departments"), 10, 4);
        let req = request.unwrap();
        state.loader.page_arrived(
            &req.scope,
            req.page,
            PageResult {
                items: entries(0..10),
                total_pages: 3,
            },
        );
        state
    }

    #[test]
    fn test_open_requests_first_page() {
        let (_, request) = DropdownState::<Entry>::open(ScopeKey::new("departments"), 10, 4);
        let req = request.unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 10);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut state = open();
        state.select_prev();
        assert_eq!(state.highlighted, 0);

        for _ in 0..20 {
            state.select_next();
        }
        assert_eq!(state.highlighted, 9);
    }

    #[test]
    fn test_scroll_window_follows_highlight() {
        let mut state = open();
        for _ in 0..5 {
            state.select_next();
        }
        assert_eq!(state.highlighted, 5);
        assert_eq!(state.visible_range(), 2..6);

        for _ in 0..5 {
            state.select_prev();
        }
        assert_eq!(state.visible_range(), 0..4);
    }

    #[test]
    fn test_poll_more_fires_when_sentinel_visible() {
        let mut state = open();
        // Sentinel row 9 is below the 4-row window
        assert!(state.poll_more().is_none());

        for _ in 0..9 {
            state.select_next();
        }
        let req = state.poll_more().expect("sentinel reached, page requested");
        assert_eq!(req.page, 2);

        // Still loading: repeated polls stay quiet
        assert!(state.poll_more().is_none());
    }

    #[test]
    fn test_poll_more_rearms_for_next_page() {
        let mut state = open();
        for _ in 0..9 {
            state.select_next();
        }
        let req = state.poll_more().unwrap();
        state.loader.page_arrived(
            &req.scope,
            req.page,
            PageResult {
                items: entries(10..20),
                total_pages: 3,
            },
        );

        // New sentinel (row 19) is off screen; no fire until reached
        assert!(state.poll_more().is_none());
        for _ in 0..10 {
            state.select_next();
        }
        let req = state.poll_more().unwrap();
        assert_eq!(req.page, 3);
    }

    #[test]
    fn test_choose_returns_highlighted_id() {
        let mut state = open();
        state.select_next();
        state.select_next();
        assert_eq!(state.choose(), Some("id-2"));
    }

    #[test]
    fn test_refresh_rewinds_to_page_one() {
        let mut state = open();
        for _ in 0..9 {
            state.select_next();
        }
        let req = state.refresh().expect("refresh requests page 1");
        assert_eq!(req.page, 1);
        assert_eq!(state.highlighted, 0);
        assert_eq!(state.offset, 0);
        assert!(state.loader.items().is_empty());
    }

    #[test]
    fn test_retarget_discards_old_scope() {
        let mut state = open();
        let req = state
            .retarget(ScopeKey::new("teams").with_filter("department", "id-3"))
            .unwrap();
        assert_eq!(req.scope.resource(), "teams");
        assert_eq!(req.page, 1);
        assert!(state.loader.items().is_empty());
    }
}
