// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waymark_sync --heading-base-level=0

//! Waymark Sync: the scroll ⇄ URL synchronization coordinator.
//!
//! ## Overview
//!
//! [`SectionSync`] keeps three signals mutually consistent without feedback
//! loops: the page's scroll position, the URL hash/path, and programmatic
//! navigation requests. Scrolling past a section rewrites the URL to that
//! section's path and fires a section-change notification; an external URL
//! change (back/forward, a link click, a manual edit) scrolls the page to the
//! addressed section. The coordinator's own URL writes are marked and the
//! matching change notification is consumed once, so a scroll-driven write is
//! never re-interpreted as user navigation (echo suppression).
//!
//! ## Hosts
//!
//! The coordinator performs no I/O. Browsers, webviews, and test harnesses
//! plug in through the capability traits in [`host`]: scrolling, URL/history
//! access, element measurement, metadata application, and scroll-observation
//! toggling. [`host::SyncHost`] bundles them for single-object hosts.
//!
//! ## Pumping
//!
//! Nothing here owns a timer. Raw events only *note* work
//! ([`SectionSync::on_scroll`], [`SectionSync::on_hash_change`]); the due
//! instant is available from [`SectionSync::deadline`], and the host runs the
//! work by calling [`SectionSync::pump`] with the current monotonic
//! millisecond timestamp. Scroll storms are debounced to one selection cycle
//! per quiet window, hash-change bursts coalesce, and delayed navigation
//! waits in a cancellable queue. See `waymark_timing` for the primitives.
//!
//! ## Ordering
//!
//! Within one synchronization cycle the URL write always precedes the
//! section-change notification, and the notification carries fully resolved
//! [`SectionState`] values — path strings built from the current base path,
//! never partial state. The section handler is the only place user code runs
//! inside the coordinator's control flow.
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_anchors::Anchor;
//! use waymark_sync::{SectionSync, SyncConfig};
//! # use waymark_sync::host::*;
//! # use waymark_anchors::MetaTags;
//! # use waymark_sync::ScrollBehavior;
//! # use alloc::string::{String, ToString};
//! # extern crate alloc;
//! # #[derive(Default)]
//! # struct Page;
//! # impl ScrollHost for Page {
//! #     fn scroll_top(&self) -> f64 { 850.0 }
//! #     fn scroll_to(&mut self, _top: f64, _behavior: ScrollBehavior) {}
//! # }
//! # impl LocationHost for Page {
//! #     fn origin_path(&self) -> String { "https://example.com/".to_string() }
//! #     fn pathname(&self) -> String { "/".to_string() }
//! #     fn fragment(&self) -> Option<String> { None }
//! #     fn write(&mut self, _path: &str, _fragment: Option<&str>, _affect_history: bool) {}
//! #     fn clear_fragment(&mut self) {}
//! # }
//! # impl MeasureHost<u32> for Page {
//! #     fn element_top(&self, element: &u32) -> Option<f64> { Some(f64::from(*element) * 800.0) }
//! #     fn margin_top(&self, _element: &u32) -> f64 { 0.0 }
//! #     fn top_by_raw_id(&self, _raw_id: &str) -> Option<(f64, f64)> { None }
//! # }
//! # impl MetaHost for Page { fn apply_meta(&mut self, _meta: &MetaTags) {} }
//! # impl ObserverHost for Page { fn set_observing(&mut self, _observing: bool) {} }
//!
//! let mut page = Page::default();
//! let mut sync = SectionSync::<u32, u32>::new();
//! sync.configure(SyncConfig::default(), &mut page);
//!
//! // Elements 0 and 1 sit at document tops 0 and 800.
//! sync.add_anchor(Anchor::new(10, 0).with_name("intro"), 0, &mut page).unwrap();
//! sync.add_anchor(Anchor::new(11, 1).with_name("features"), 0, &mut page).unwrap();
//!
//! // A debounced scroll cycle at offset 850 selects "features".
//! sync.on_scroll(0);
//! let due = sync.deadline().unwrap();
//! sync.pump(due, &mut page);
//! assert_eq!(sync.current(), Some(11));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod coordinator;
pub mod host;
mod section;

pub use config::{ScrollBehavior, SyncConfig};
pub use coordinator::{SectionHandler, SectionSync};
pub use section::{SectionState, resolve_path};

pub use waymark_anchors::{Anchor, AnchorRegistry, DuplicateIdError, MetaTags};
