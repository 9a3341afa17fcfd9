// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capability traits.
//!
//! The coordinator never touches a DOM, a history API, or a clock. Every
//! externally visible action goes through one of these traits, and every
//! measurement comes back through them, so the whole state machine runs
//! against synthetic data in tests exactly as it runs against a real page.
//!
//! A browser host typically implements all five traits on one object and
//! passes it everywhere; [`SyncHost`] is the blanket bundle for that shape.
//! Splitting the traits keeps each capability mockable on its own.

use alloc::string::String;

use waymark_anchors::MetaTags;

use crate::config::ScrollBehavior;

/// Vertical scroll access.
pub trait ScrollHost {
    /// Current vertical scroll offset in document space.
    fn scroll_top(&self) -> f64;

    /// Scrolls the viewport so the document offset `top` sits at its top
    /// edge.
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// URL and history access.
///
/// `write` receives an already resolved path (see
/// [`resolve_path`](crate::resolve_path)) plus the fragment to append;
/// `affect_history` distinguishes push from replace. Writes issued through
/// this trait echo back to the coordinator as change notifications — that
/// echo is what the coordinator's forced-write discipline suppresses.
pub trait LocationHost {
    /// Origin plus pathname (no fragment), e.g. `https://example.com/docs`.
    fn origin_path(&self) -> String;

    /// Pathname only, e.g. `/docs`.
    fn pathname(&self) -> String;

    /// The current fragment, without the leading `#`.
    fn fragment(&self) -> Option<String>;

    /// Writes a new path and fragment, pushing a history entry when
    /// `affect_history` is `true` and replacing otherwise.
    fn write(&mut self, path: &str, fragment: Option<&str>, affect_history: bool);

    /// Removes the fragment, replace-style.
    fn clear_fragment(&mut self);
}

/// Element position measurement.
///
/// Positions are document-space tops, re-queried on every cycle; the
/// coordinator caches nothing across calls because layout moves anchors.
pub trait MeasureHost<R> {
    /// Document-space top of an anchor's element, or `None` once the
    /// element is gone.
    fn element_top(&self, element: &R) -> Option<f64>;

    /// The element's own top margin.
    fn margin_top(&self, element: &R) -> f64;

    /// Fallback measurement for a fragment with no registered anchor,
    /// looked up by raw id. Returns `(top, margin_top)`.
    fn top_by_raw_id(&self, raw_id: &str) -> Option<(f64, f64)>;
}

/// Document metadata sink (title/meta tags).
pub trait MetaHost {
    /// Applies a metadata object to the document.
    fn apply_meta(&mut self, meta: &MetaTags);
}

/// Scroll-observation toggle.
///
/// Driven exactly at the registry's empty/occupied boundary: observation
/// starts when the first anchor registers and stops when the last one
/// leaves.
pub trait ObserverHost {
    /// Attaches or detaches the host's scroll listener.
    fn set_observing(&mut self, observing: bool);
}

/// Blanket bundle of every capability, for single-object hosts.
pub trait SyncHost<R>:
    ScrollHost + LocationHost + MeasureHost<R> + MetaHost + ObserverHost
{
}

impl<R, T> SyncHost<R> for T where
    T: ScrollHost + LocationHost + MeasureHost<R> + MetaHost + ObserverHost
{
}
