// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waymark_select --heading-base-level=0

//! Waymark Select: scroll-offset → anchor selection primitives.
//!
//! This crate answers one question: given the current vertical scroll
//! position and the measured top positions of a set of anchors, which anchor
//! is the *current* one? The answer is the floor element of the position set:
//! the last anchor whose top has been scrolled past, or none when the page is
//! above every anchor.
//!
//! It deliberately does **not** measure anything. Like the rest of Waymark,
//! measurement belongs to the host; feed [`best_anchor`] freshly measured
//! `(key, top)` pairs on every call, because anchors move when layout
//! changes. There is no caching here.
//!
//! [`target_offset`] is the companion for the opposite direction: where to
//! scroll so that a given anchor lands below a fixed header.
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_select::best_anchor;
//!
//! let tops = [("intro", 0.0), ("features", 800.0)];
//!
//! assert_eq!(best_anchor(tops, 850.0, 0.0), Some("features"));
//! assert_eq!(best_anchor(tops, 400.0, 0.0), Some("intro"));
//! // Scrolled above every anchor.
//! assert_eq!(best_anchor(tops, -10.0, 0.0), None);
//! ```
//!
//! All positions live in a caller-chosen 1D coordinate space (typically
//! document-space logical pixels). This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod position;

pub use position::{best_anchor, target_offset};
