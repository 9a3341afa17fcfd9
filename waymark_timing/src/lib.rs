// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waymark_timing --heading-base-level=0

//! Waymark Timing: host-agnostic debounce and delay-queue state machines.
//!
//! Waymark never owns a timer and never reads a clock. Everything
//! time-dependent — coalescing scroll-event storms, absorbing hash-change
//! bursts, delayed scroll-to-section — is expressed against caller-supplied
//! monotonic millisecond timestamps. The two primitives here make that
//! explicit:
//!
//! - [`Debounce`]: "defer until no new request arrives for a quiet window,
//!   then run once." Each [`Debounce::note`] pushes the deadline out; a
//!   single [`Debounce::fire`] succeeds once the window has elapsed, however
//!   many notes were absorbed.
//! - [`DelayQueue`]: one-shot scheduled values for "do this in N
//!   milliseconds," with cancellation for teardown.
//!
//! Both expose a [`Debounce::deadline`]/[`DelayQueue::deadline`] instant so a
//! host can schedule exactly one wake-up with whatever timer facility it has,
//! then pump the primitive with `now` when the wake-up arrives.
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_timing::Debounce;
//!
//! let mut debounce = Debounce::new(100);
//!
//! // A storm of requests inside the quiet window...
//! debounce.note(0);
//! debounce.note(40);
//! debounce.note(80);
//!
//! // ...collapses into a single firing once the window elapses.
//! assert_eq!(debounce.deadline(), Some(180));
//! assert!(!debounce.fire(170));
//! assert!(debounce.fire(180));
//! assert!(!debounce.fire(400));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod debounce;
mod delay_queue;

pub use debounce::Debounce;
pub use delay_queue::DelayQueue;
