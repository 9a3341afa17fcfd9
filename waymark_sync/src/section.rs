// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved section states carried by change notifications.

use alloc::format;
use alloc::string::{String, ToString};

use waymark_anchors::MetaTags;

/// Resolves an anchor's URL path against the current base path.
///
/// - A named, exact anchor resolves to `/name` regardless of nesting.
/// - A named, non-exact anchor is prefixed by the base path (a bare `/`
///   base collapses so the result never doubles slashes).
/// - An unnamed anchor resolves to the base path itself.
///
/// ## Minimal example
///
/// ```
/// use waymark_sync::resolve_path;
///
/// assert_eq!(resolve_path("/docs", Some("pricing"), false), "/docs/pricing");
/// assert_eq!(resolve_path("/docs", Some("pricing"), true), "/pricing");
/// assert_eq!(resolve_path("/", Some("pricing"), false), "/pricing");
/// assert_eq!(resolve_path("/docs", None, false), "/docs");
/// ```
#[must_use]
pub fn resolve_path(base_path_name: &str, name: Option<&str>, exact: bool) -> String {
    match name {
        Some(name) if exact => format!("/{name}"),
        Some(name) => {
            let base = if base_path_name == "/" {
                ""
            } else {
                base_path_name
            };
            format!("{base}/{name}")
        }
        None => base_path_name.to_string(),
    }
}

/// A fully resolved snapshot of one side of a section transition.
///
/// Both arguments of a section-change notification are `SectionState`s: the
/// anchor being entered and the one being left. When no anchor is active on a
/// side, the state is *vacant*: `id` is `None` and `path` falls back to the
/// base path. The `meta` field carries the anchor's effective metadata, own
/// or inherited, so hosts can apply it without another registry lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionState<K> {
    /// The anchor's id, or `None` for the vacant state.
    pub id: Option<K>,
    /// The anchor's path segment name.
    pub name: Option<String>,
    /// The anchor's URL fragment.
    pub hash: Option<String>,
    /// Whether the anchor's path ignores the base path.
    pub exact: bool,
    /// The anchor's effective metadata.
    pub meta: Option<MetaTags>,
    /// The resolved URL path, never partial.
    pub path: String,
}

impl<K> SectionState<K> {
    /// The no-active-anchor state, pointing at the base path.
    #[must_use]
    pub fn vacant(base_path_name: &str) -> Self {
        Self {
            id: None,
            name: None,
            hash: None,
            exact: false,
            meta: None,
            path: base_path_name.to_string(),
        }
    }

    /// Returns `true` when this side of the transition has no anchor.
    #[must_use]
    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_exact_paths_are_prefixed_by_the_base_path() {
        assert_eq!(resolve_path("/docs", Some("pricing"), false), "/docs/pricing");
    }

    #[test]
    fn exact_paths_ignore_the_base_path() {
        assert_eq!(resolve_path("/docs", Some("pricing"), true), "/pricing");
    }

    #[test]
    fn root_base_path_does_not_double_slashes() {
        assert_eq!(resolve_path("/", Some("intro"), false), "/intro");
    }

    #[test]
    fn unnamed_anchors_resolve_to_the_base_path() {
        assert_eq!(resolve_path("/docs", None, false), "/docs");
        assert_eq!(resolve_path("/", None, true), "/");
    }

    #[test]
    fn vacant_state_points_at_the_base_path() {
        let state = SectionState::<u32>::vacant("/docs");
        assert!(state.is_vacant());
        assert_eq!(state.path, "/docs");
        assert!(state.meta.is_none());
    }
}
