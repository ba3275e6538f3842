//! Sentinel-row visibility trigger.
//!
//! Watches the last loaded row of a dropdown and fires once each time it
//! scrolls into view, asking the loader for the next page. The trigger knows
//! nothing about loading or exhaustion; `PagedLoader::request_page` absorbs
//! any over-firing, which keeps this type a plain edge detector.

use std::ops::Range;

/// Edge detector for "the sentinel row became visible".
///
/// Watches one row index at a time. When the watched index changes (a new
/// page made a different row the last one) the old watch is dropped and
/// visibility memory is cleared, so the new sentinel gets its own
/// not-visible-to-visible transition.
#[derive(Debug, Default)]
pub struct SentinelTrigger {
    watched: Option<usize>,
    was_visible: bool,
}

impl SentinelTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the sentinel row against the currently visible row range.
    ///
    /// Returns `true` exactly once per not-visible → visible transition of
    /// the watched row.
    pub fn observe(&mut self, sentinel: usize, visible: Range<usize>) -> bool {
        if self.watched != Some(sentinel) {
            // Reattach to the new last row
            self.watched = Some(sentinel);
            self.was_visible = false;
        }

        let visible_now = visible.contains(&sentinel);
        let fired = visible_now && !self.was_visible;
        self.was_visible = visible_now;
        fired
    }

    /// Stop watching. The next `observe` starts a fresh transition.
    pub fn detach(&mut self) {
        self.watched = None;
        self.was_visible = false;
    }
}
