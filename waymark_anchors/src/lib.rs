// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waymark_anchors --heading-base-level=0

//! Waymark Anchors: anchor registry and metadata inheritance.
//!
//! This crate holds the bookkeeping side of scroll/URL synchronization: the
//! set of registered page anchors and the rule that assigns *effective*
//! document metadata to anchors that address a URL fragment but declare no
//! metadata of their own.
//!
//! The core types are:
//!
//! - [`Anchor`]: a registered, possibly hash-addressable page section. Keys
//!   are an application-chosen `K: Copy + Eq + Hash`; the element handle `R`
//!   is opaque to this crate and only ever handed back to the host for
//!   position measurement.
//! - [`AnchorRegistry`]: insertion-ordered storage with unique-id
//!   enforcement, first-match name lookup, and [`Occupancy`] transitions that
//!   tell a coordinator when to attach or detach scroll observation.
//! - [`MetaTags`]: a small title/description/extra-pairs value applied to the
//!   document by a host-side sink.
//!
//! This crate knows nothing about scrolling, URLs, or timing; see
//! `waymark_sync` for the coordinator that drives it.
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_anchors::{Anchor, AnchorRegistry, MetaTags, Occupancy};
//!
//! // Using u32 as a stand-in for an application-specific ID, and () as the
//! // element handle.
//! let mut registry = AnchorRegistry::<u32, ()>::new();
//!
//! let first = registry
//!     .insert(Anchor::new(1, ()).with_name("intro").with_meta(MetaTags::titled("Intro")))
//!     .unwrap();
//! assert_eq!(first, Occupancy::BecameOccupied);
//!
//! // A fragment-addressed anchor with no metadata of its own inherits from
//! // the anchor sharing its name.
//! registry
//!     .insert(Anchor::new(2, ()).with_name("intro").with_hash("intro-details"))
//!     .unwrap();
//! registry.resolve_meta(&MetaTags::default());
//!
//! assert_eq!(
//!     registry.effective_meta(&2).and_then(|m| m.title.as_deref()),
//!     Some("Intro"),
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod meta;
mod registry;

pub use anchor::Anchor;
pub use meta::MetaTags;
pub use registry::{AnchorRegistry, DuplicateIdError, Occupancy};
