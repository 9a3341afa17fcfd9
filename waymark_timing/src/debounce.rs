// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge coalescing of repeated requests.

/// A trailing-edge debouncer driven by caller timestamps.
///
/// [`Debounce::note`] records a request and restarts the quiet window;
/// [`Debounce::fire`] consumes the pending request once the window has
/// elapsed. However many notes land inside one window, exactly one fire
/// succeeds — the required coalescing behavior for high-frequency inputs
/// like raw scroll events.
///
/// A window of `0` makes the pending request due immediately, which is how a
/// burst of notifications is collapsed into a single reaction on the next
/// pump without waiting.
#[derive(Clone, Debug)]
pub struct Debounce {
    window: u64,
    due: Option<u64>,
}

impl Debounce {
    /// Creates a debouncer with the given quiet window in milliseconds.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            window: window_ms,
            due: None,
        }
    }

    /// Returns the quiet window in milliseconds.
    #[must_use]
    #[inline]
    pub fn window(&self) -> u64 {
        self.window
    }

    /// Replaces the quiet window.
    ///
    /// A pending request keeps its already-computed deadline; only later
    /// notes use the new window.
    pub fn set_window(&mut self, window_ms: u64) {
        self.window = window_ms;
    }

    /// Records a request at `now`, restarting the quiet window.
    pub fn note(&mut self, now: u64) {
        self.due = Some(now.saturating_add(self.window));
    }

    /// Returns the instant the pending request becomes due, if any.
    #[must_use]
    #[inline]
    pub fn deadline(&self) -> Option<u64> {
        self.due
    }

    /// Returns `true` while a request is pending.
    #[must_use]
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Consumes the pending request if its quiet window has elapsed.
    ///
    /// Returns `true` at most once per coalesced burst.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending request.
    pub fn cancel(&mut self) {
        self.due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_one_fire() {
        let mut debounce = Debounce::new(100);
        for t in [0, 10, 20, 30, 90] {
            debounce.note(t);
        }

        assert!(!debounce.fire(189));
        assert!(debounce.fire(190));
        assert!(!debounce.fire(500));
    }

    #[test]
    fn each_note_restarts_the_window() {
        let mut debounce = Debounce::new(100);
        debounce.note(0);
        assert_eq!(debounce.deadline(), Some(100));

        debounce.note(60);
        assert_eq!(debounce.deadline(), Some(160));
        assert!(!debounce.fire(100));
        assert!(debounce.fire(160));
    }

    #[test]
    fn zero_window_is_due_immediately() {
        let mut debounce = Debounce::new(0);
        debounce.note(42);
        assert_eq!(debounce.deadline(), Some(42));
        assert!(debounce.fire(42));
    }

    #[test]
    fn fire_without_note_is_false() {
        let mut debounce = Debounce::new(100);
        assert!(!debounce.is_pending());
        assert!(!debounce.fire(1000));
    }

    #[test]
    fn cancel_drops_the_pending_request() {
        let mut debounce = Debounce::new(100);
        debounce.note(0);
        debounce.cancel();

        assert!(!debounce.is_pending());
        assert!(!debounce.fire(1000));
    }

    #[test]
    fn set_window_applies_to_later_notes_only() {
        let mut debounce = Debounce::new(100);
        debounce.note(0);
        debounce.set_window(10);
        assert_eq!(debounce.window(), 10);

        // The in-flight request keeps its original deadline.
        assert_eq!(debounce.deadline(), Some(100));
        assert!(debounce.fire(100));

        debounce.note(200);
        assert_eq!(debounce.deadline(), Some(210));
    }

    #[test]
    fn saturating_deadline_near_the_end_of_time() {
        let mut debounce = Debounce::new(u64::MAX);
        debounce.note(10);
        assert_eq!(debounce.deadline(), Some(u64::MAX));
        assert!(debounce.fire(u64::MAX));
    }
}
