// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator configuration.

use waymark_anchors::MetaTags;

/// How the host should animate a coordinator-initiated scroll.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Animated scrolling.
    #[default]
    Smooth,
    /// Jump without animation.
    Auto,
}

/// Configuration for [`SectionSync`](crate::SectionSync).
///
/// `Default` gives the stock behavior: replace-style history updates, a
/// 100 ms scroll debounce window, hash cleared when scrolled above every
/// anchor, no fixed-header offset, smooth scrolling with no extra delay, no
/// images gate, and no page default metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// Push a history entry on scroll-driven URL updates instead of
    /// replacing the current one.
    pub affect_history: bool,
    /// Quiet window for coalescing raw scroll events, in milliseconds.
    pub debounce_ms: u64,
    /// Keep the last anchor's hash when the page scrolls above every anchor.
    pub keep_last_anchor_hash: bool,
    /// Fixed header height: anchors become current once their top passes
    /// this line, and navigation scrolls stop short of it.
    pub offset: f64,
    /// Animation mode for coordinator-initiated scrolls.
    pub scroll_behavior: ScrollBehavior,
    /// Delay before acting on an external hash change, in milliseconds.
    pub scroll_delay_ms: u64,
    /// Defer hash-driven navigation until the one-shot images-loaded signal.
    pub scroll_on_images_load: bool,
    /// Page default metadata, applied on (re)configuration and inherited by
    /// exact or unnamed fragment anchors.
    pub meta: Option<MetaTags>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            affect_history: false,
            debounce_ms: 100,
            keep_last_anchor_hash: false,
            offset: 0.0,
            scroll_behavior: ScrollBehavior::default(),
            scroll_delay_ms: 0,
            scroll_on_images_load: false,
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_stock_behavior() {
        let config = SyncConfig::default();
        assert!(!config.affect_history);
        assert_eq!(config.debounce_ms, 100);
        assert!(!config.keep_last_anchor_hash);
        assert_eq!(config.offset, 0.0);
        assert_eq!(config.scroll_behavior, ScrollBehavior::Smooth);
        assert_eq!(config.scroll_delay_ms, 0);
        assert!(!config.scroll_on_images_load);
        assert!(config.meta.is_none());
    }
}
