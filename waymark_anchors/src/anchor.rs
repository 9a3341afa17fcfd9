// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The anchor value type.

use alloc::string::{String, ToString};

use crate::meta::MetaTags;

/// A registered, possibly hash-addressable page section.
///
/// - `id` is an opaque, caller-generated key; the registry enforces its
///   uniqueness.
/// - `name` is the optional URL path segment (`/name`); `None` means the
///   root/base path.
/// - `hash` is the optional URL fragment used while this anchor is active.
/// - `exact` anchors resolve to `/name` regardless of nesting; non-exact
///   anchors are prefixed by the current base path.
/// - `meta` is the anchor's *own* metadata. Anchors with a `hash` but no
///   own metadata receive an effective value through
///   [`AnchorRegistry::resolve_meta`](crate::AnchorRegistry::resolve_meta).
/// - `element` is an opaque handle to the underlying visual element, used
///   only by the host's measurement capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor<K, R> {
    /// Caller-generated unique key.
    pub id: K,
    /// URL path segment, or `None` for the root/base path.
    pub name: Option<String>,
    /// URL fragment used while this anchor is active.
    pub hash: Option<String>,
    /// Whether the anchor's path ignores the base path.
    pub exact: bool,
    /// The anchor's own metadata, if any.
    pub meta: Option<MetaTags>,
    /// Opaque element handle for position measurement.
    pub element: R,
}

impl<K, R> Anchor<K, R> {
    /// Creates an anchor with neither name, hash, nor metadata.
    #[must_use]
    pub fn new(id: K, element: R) -> Self {
        Self {
            id,
            name: None,
            hash: None,
            exact: false,
            meta: None,
            element,
        }
    }

    /// Sets the path segment name, consuming and returning `self`.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the URL fragment, consuming and returning `self`.
    #[must_use]
    pub fn with_hash(mut self, hash: &str) -> Self {
        self.hash = Some(hash.to_string());
        self
    }

    /// Sets the anchor's own metadata, consuming and returning `self`.
    #[must_use]
    pub fn with_meta(mut self, meta: MetaTags) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Marks the anchor's path as absolute, consuming and returning `self`.
    #[must_use]
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }
}
