// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The synchronization state machine.
//!
//! ## States
//!
//! Conceptually the coordinator is always in one of four states: idle,
//! scroll-driven (a debounced scroll cycle is rewriting the URL),
//! hash-driven (an external URL change is navigating the page), or
//! awaiting-images (a hash-driven navigation parked behind the one-shot
//! readiness gate). None of these are literal enum values; the state lives
//! in a flag set plus the pending entries of the timing primitives, which
//! keeps every transition observable from tests.
//!
//! ## Echo suppression
//!
//! Writing the URL makes the host report a hash change right back. The
//! `FORCED_HASH` flag is raised immediately before every self-induced write
//! and lowered by the next consumed change notification, so exactly one
//! echo is swallowed and everything after it is treated as real user
//! navigation again. This is a re-entrancy guard, not a lock — everything
//! here runs on one thread.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use bitflags::bitflags;
use waymark_anchors::{Anchor, AnchorRegistry, DuplicateIdError, MetaTags, Occupancy};
use waymark_select::{best_anchor, target_offset};
use waymark_timing::{Debounce, DelayQueue};

use crate::config::SyncConfig;
use crate::host::SyncHost;
use crate::section::{SectionState, resolve_path};

/// Quiet window for collapsing a burst of hash-change notifications into
/// one observed change.
const HASH_COALESCE_MS: u64 = 1;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct SyncFlags: u8 {
        /// A self-induced URL write is in flight; the next consumed
        /// hash-change notification is its echo.
        const FORCED_HASH = 1 << 0;
        /// The one-shot images gate has opened. It never re-arms.
        const IMAGES_LOADED = 1 << 1;
        /// The host's scroll listener is attached.
        const OBSERVING = 1 << 2;
        /// Base paths have been seeded from the host.
        const BASE_SEEDED = 1 << 3;
    }
}

/// Section-change callback, invoked as `(next, previous)`.
pub type SectionHandler<K> = Box<dyn FnMut(&SectionState<K>, &SectionState<K>)>;

/// A scheduled navigation: either a registered anchor or a raw fragment
/// that is resolved (registry first, then host lookup) at fire time, since
/// anchors may register or leave in the meantime.
enum NavTarget<K> {
    Anchor(K),
    Fragment(String),
}

/// The scroll ⇄ URL synchronization coordinator.
///
/// One instance per page session. It owns the anchor registry, the
/// configuration, and all synchronization state; every externally visible
/// action flows through the [`host`](crate::host) capability traits.
///
/// See the crate docs for the event/pump protocol and a minimal example.
pub struct SectionSync<K, R>
where
    K: Copy + Eq + Hash,
{
    registry: AnchorRegistry<K, R>,
    config: SyncConfig,
    default_meta: MetaTags,
    flags: SyncFlags,
    /// Origin + pathname with any active non-exact anchor segment stripped.
    base_path: String,
    /// Pathname-only counterpart used to build notification paths.
    base_path_name: String,
    current: Option<K>,
    scroll_debounce: Debounce,
    hash_debounce: Debounce,
    nav_queue: DelayQueue<NavTarget<K>>,
    /// Fragment parked behind the images gate.
    deferred_nav: Option<String>,
    on_section_enter: Option<SectionHandler<K>>,
}

impl<K, R> Default for SectionSync<K, R>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R> SectionSync<K, R>
where
    K: Copy + Eq + Hash,
{
    /// Creates a coordinator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SyncConfig::default())
    }

    /// Creates a coordinator with the given configuration.
    ///
    /// Base paths are seeded from the host on the first call that receives
    /// one ([`Self::configure`] or [`Self::add_anchor`]).
    #[must_use]
    pub fn with_config(config: SyncConfig) -> Self {
        let scroll_debounce = Debounce::new(config.debounce_ms);
        let default_meta = config.meta.clone().unwrap_or_default();
        Self {
            registry: AnchorRegistry::new(),
            config,
            default_meta,
            flags: SyncFlags::empty(),
            base_path: String::new(),
            base_path_name: String::from("/"),
            current: None,
            scroll_debounce,
            hash_debounce: Debounce::new(HASH_COALESCE_MS),
            nav_queue: DelayQueue::new(),
            deferred_nav: None,
            on_section_enter: None,
        }
    }

    /// Replaces the configuration and re-applies the page default metadata.
    pub fn configure<H>(&mut self, config: SyncConfig, host: &mut H)
    where
        H: SyncHost<R>,
    {
        self.seed_base_paths(host);
        self.scroll_debounce.set_window(config.debounce_ms);
        self.default_meta = config.meta.clone().unwrap_or_default();
        self.config = config;
        host.apply_meta(&self.default_meta);
        self.registry.resolve_meta(&self.default_meta);
    }

    /// Installs the section-change handler.
    pub fn set_section_handler(
        &mut self,
        handler: impl FnMut(&SectionState<K>, &SectionState<K>) + 'static,
    ) {
        self.on_section_enter = Some(Box::new(handler));
    }

    /// Removes the section-change handler.
    pub fn clear_section_handler(&mut self) {
        self.on_section_enter = None;
    }

    /// Registers an anchor.
    ///
    /// The first anchor attaches the host's scroll listener. If the current
    /// location already ends with the anchor's name (and fragment) — a
    /// deep-linked initial URL — the name segment is trimmed off the base
    /// paths and a coalesced hash replay is queued so the addressed section
    /// is scrolled to once the host pumps. Metadata inheritance is
    /// re-resolved afterwards.
    pub fn add_anchor<H>(
        &mut self,
        anchor: Anchor<K, R>,
        now: u64,
        host: &mut H,
    ) -> Result<(), DuplicateIdError<K>>
    where
        H: SyncHost<R>,
    {
        self.seed_base_paths(host);
        let name = anchor.name.clone();
        let hash = anchor.hash.clone();
        let occupancy = self.registry.insert(anchor)?;
        if occupancy == Occupancy::BecameOccupied {
            self.set_observing(true, host);
        }
        if let Some(name) = &name {
            let suffix = match &hash {
                Some(hash) => format!("{name}#{hash}"),
                None => name.clone(),
            };
            let href = match host.fragment() {
                Some(fragment) => format!("{}#{fragment}", host.origin_path()),
                None => host.origin_path(),
            };
            if href.ends_with(&suffix) {
                self.base_path = self.base_path.replacen(&format!("/{name}"), "", 1);
                self.hash_debounce.note(now);
            }
            if host.pathname().ends_with(&format!("/{name}")) {
                self.base_path_name = self.base_path_name.replacen(&format!("/{name}"), "", 1);
                if self.base_path_name.is_empty() {
                    self.base_path_name.push('/');
                }
            }
        }
        self.registry.resolve_meta(&self.default_meta);
        Ok(())
    }

    /// Removes an anchor; unknown ids are a silent no-op.
    ///
    /// Removing the last anchor detaches the scroll listener and cancels
    /// every pending or deferred navigation, so nothing acts on a stale
    /// registry.
    pub fn remove_anchor<H>(&mut self, id: &K, host: &mut H)
    where
        H: SyncHost<R>,
    {
        if self.registry.remove(id) == Occupancy::BecameEmpty {
            self.set_observing(false, host);
            self.scroll_debounce.cancel();
            self.nav_queue.cancel_all();
            self.deferred_nav = None;
        }
        if self.current == Some(*id) {
            self.current = None;
        }
        self.registry.resolve_meta(&self.default_meta);
    }

    /// Records a raw scroll event at `now`.
    ///
    /// Only notes the debouncer — the selection cycle runs from
    /// [`Self::pump`] once the quiet window elapses. Returns the updated
    /// [`Self::deadline`]. Events arriving while no anchor is registered
    /// are ignored.
    pub fn on_scroll(&mut self, now: u64) -> Option<u64> {
        if self.flags.contains(SyncFlags::OBSERVING) {
            self.scroll_debounce.note(now);
        }
        self.deadline()
    }

    /// Records a hash-change notification at `now`.
    ///
    /// Bursts within the coalescing window collapse into one observed
    /// change, read from the host at fire time. Returns the updated
    /// [`Self::deadline`].
    pub fn on_hash_change(&mut self, now: u64) -> Option<u64> {
        self.hash_debounce.note(now);
        self.deadline()
    }

    /// Opens the one-shot images gate and releases any navigation parked
    /// behind it. Later calls are no-ops; the gate never re-arms.
    pub fn on_images_loaded(&mut self, now: u64) -> Option<u64> {
        if !self.flags.contains(SyncFlags::IMAGES_LOADED) {
            self.flags.insert(SyncFlags::IMAGES_LOADED);
            if let Some(fragment) = self.deferred_nav.take() {
                // The released navigation runs on the next pump without the
                // configured scroll delay.
                self.nav_queue.schedule(now, NavTarget::Fragment(fragment));
            }
        }
        self.deadline()
    }

    /// Schedules programmatic navigation to a registered anchor.
    ///
    /// Same offset and margin rules as hash-driven navigation; if the
    /// anchor or its element is gone by fire time the scroll is silently
    /// skipped. Returns the updated [`Self::deadline`].
    pub fn go_to_section(&mut self, id: K, delay_ms: u64, now: u64) -> Option<u64> {
        self.nav_queue
            .schedule(now.saturating_add(delay_ms), NavTarget::Anchor(id));
        self.deadline()
    }

    /// Scrolls to the top of the page.
    ///
    /// No-op when already there; otherwise the resulting scroll (and the
    /// hash clear its selection cycle may issue) is marked self-induced.
    pub fn go_to_top<H>(&mut self, host: &mut H)
    where
        H: SyncHost<R>,
    {
        if host.scroll_top() == 0.0 {
            return;
        }
        self.flags.insert(SyncFlags::FORCED_HASH);
        host.scroll_to(0.0, self.config.scroll_behavior);
    }

    /// The earliest instant any pending work becomes due, for host timer
    /// scheduling.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        [
            self.hash_debounce.deadline(),
            self.scroll_debounce.deadline(),
            self.nav_queue.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Runs every piece of pending work that is due at `now`.
    ///
    /// Hosts call this when the [`Self::deadline`] wake-up arrives and
    /// re-read the deadline afterwards, since handling one event can
    /// schedule another (an external hash change schedules a delayed
    /// scroll, for example).
    pub fn pump<H>(&mut self, now: u64, host: &mut H)
    where
        H: SyncHost<R>,
    {
        if self.hash_debounce.fire(now) {
            self.handle_hash_change(now, host);
        }
        if self.scroll_debounce.fire(now) {
            self.scroll_cycle(host);
        }
        for target in self.nav_queue.fire_due(now) {
            self.navigate(&target, host);
        }
    }

    /// Returns the active anchor, if any.
    #[must_use]
    #[inline]
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Returns the anchor registry.
    #[must_use]
    #[inline]
    pub fn registry(&self) -> &AnchorRegistry<K, R> {
        &self.registry
    }

    /// Returns the active configuration.
    #[must_use]
    #[inline]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the page default metadata.
    #[must_use]
    #[inline]
    pub fn default_meta(&self) -> &MetaTags {
        &self.default_meta
    }

    /// Re-applies the page default metadata through the host sink.
    pub fn apply_default_meta<H>(&self, host: &mut H)
    where
        H: SyncHost<R>,
    {
        host.apply_meta(&self.default_meta);
    }

    /// Returns `true` while the host's scroll listener is attached.
    #[must_use]
    #[inline]
    pub fn is_observing(&self) -> bool {
        self.flags.contains(SyncFlags::OBSERVING)
    }

    /// The pathname-only base path used to build notification paths.
    #[must_use]
    #[inline]
    pub fn base_path_name(&self) -> &str {
        &self.base_path_name
    }

    /// The origin-full base path (origin + pathname with any active
    /// non-exact anchor segment stripped), for hosts that build absolute
    /// URLs. Trimmed when a deep-linked anchor registers and recomputed
    /// against the live registry on every hash change.
    #[must_use]
    #[inline]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Builds the fully resolved state for one side of a transition.
    #[must_use]
    pub fn section_state(&self, id: Option<K>) -> SectionState<K> {
        let Some(anchor) = id.and_then(|key| self.registry.get(&key)) else {
            return SectionState::vacant(&self.base_path_name);
        };
        SectionState {
            id: Some(anchor.id),
            name: anchor.name.clone(),
            hash: anchor.hash.clone(),
            exact: anchor.exact,
            meta: self.registry.effective_meta(&anchor.id).cloned(),
            path: resolve_path(&self.base_path_name, anchor.name.as_deref(), anchor.exact),
        }
    }

    /// One debounced selection cycle: measure, select, and reconcile the
    /// URL with the anchor under the (offset-adjusted) scroll position.
    fn scroll_cycle<H>(&mut self, host: &mut H)
    where
        H: SyncHost<R>,
    {
        let positions: Vec<(K, f64)> = self
            .registry
            .iter()
            .filter_map(|anchor| {
                host.element_top(&anchor.element)
                    .map(|top| (anchor.id, top))
            })
            .collect();
        let next = best_anchor(positions, host.scroll_top(), -self.config.offset);
        let previous = self.current;

        match next {
            Some(next_id) if previous != Some(next_id) => {
                let Some(anchor) = self.registry.get(&next_id) else {
                    return;
                };
                let path =
                    resolve_path(&self.base_path_name, anchor.name.as_deref(), anchor.exact);
                let fragment = anchor.hash.clone();
                self.flags.insert(SyncFlags::FORCED_HASH);
                host.write(&path, fragment.as_deref(), self.config.affect_history);
                self.current = Some(next_id);
                self.notify(Some(next_id), previous);
            }
            Some(_) => {}
            None => {
                // Scrolled above every anchor. Only clear when something was
                // active, so the suppression flag is never raised for a
                // write that cannot produce an echo.
                if !self.config.keep_last_anchor_hash && previous.is_some() {
                    self.flags.insert(SyncFlags::FORCED_HASH);
                    host.clear_fragment();
                    self.current = None;
                    self.notify(None, previous);
                }
            }
        }
    }

    /// Reacts to the coalesced hash change: swallow the echo of a
    /// self-induced write, or resolve and schedule user navigation.
    fn handle_hash_change<H>(&mut self, now: u64, host: &mut H)
    where
        H: SyncHost<R>,
    {
        self.refresh_base_path(host);
        if self.flags.contains(SyncFlags::FORCED_HASH) {
            self.flags.remove(SyncFlags::FORCED_HASH);
            return;
        }
        let Some(fragment) = host.fragment() else {
            return;
        };
        if let Some(anchor) = self.registry.find_by_hash(&fragment) {
            // Track the addressed anchor so the selection cycle after the
            // navigation scroll does not re-announce it.
            self.current = Some(anchor.id);
        }
        if self.config.scroll_on_images_load && !self.flags.contains(SyncFlags::IMAGES_LOADED) {
            self.deferred_nav = Some(fragment);
        } else {
            self.nav_queue.schedule(
                now.saturating_add(self.config.scroll_delay_ms),
                NavTarget::Fragment(fragment),
            );
        }
    }

    /// Performs a due navigation. Targets are resolved now, not at
    /// scheduling time; a missing anchor or element is a transient state
    /// and skips the scroll quietly.
    fn navigate<H>(&self, target: &NavTarget<K>, host: &mut H)
    where
        H: SyncHost<R>,
    {
        let measured = match target {
            NavTarget::Anchor(id) => self.registry.get(id).and_then(|anchor| {
                host.element_top(&anchor.element)
                    .map(|top| (top, host.margin_top(&anchor.element)))
            }),
            NavTarget::Fragment(fragment) => self
                .registry
                .find_by_hash(fragment)
                .and_then(|anchor| {
                    host.element_top(&anchor.element)
                        .map(|top| (top, host.margin_top(&anchor.element)))
                })
                .or_else(|| host.top_by_raw_id(fragment)),
        };
        let Some((top, margin_top)) = measured else {
            return;
        };
        host.scroll_to(
            target_offset(top, self.config.offset, margin_top),
            self.config.scroll_behavior,
        );
    }

    /// Emits the section-change notification. The URL write has already
    /// been issued by the time this runs, so a throwing handler cannot
    /// leave the two out of sync.
    fn notify(&mut self, next: Option<K>, previous: Option<K>) {
        if self.on_section_enter.is_none() {
            return;
        }
        let next_state = self.section_state(next);
        let previous_state = self.section_state(previous);
        if let Some(handler) = self.on_section_enter.as_mut() {
            handler(&next_state, &previous_state);
        }
    }

    /// Strips any trailing non-exact anchor-name segment from the live
    /// origin + pathname.
    fn refresh_base_path<H>(&mut self, host: &mut H)
    where
        H: SyncHost<R>,
    {
        let mut base = host.origin_path();
        if base.ends_with('/') {
            base.pop();
        }
        for anchor in self.registry.iter() {
            if anchor.exact {
                continue;
            }
            let Some(name) = anchor.name.as_deref() else {
                continue;
            };
            if base.ends_with(name) {
                base = base.replacen(&format!("/{name}"), "", 1);
            }
        }
        self.base_path = base;
    }

    fn seed_base_paths<H>(&mut self, host: &mut H)
    where
        H: SyncHost<R>,
    {
        if self.flags.contains(SyncFlags::BASE_SEEDED) {
            return;
        }
        self.flags.insert(SyncFlags::BASE_SEEDED);
        let mut base = host.origin_path();
        if base.ends_with('/') {
            base.pop();
        }
        self.base_path = base;
        let pathname = host.pathname();
        self.base_path_name = if pathname.is_empty() {
            String::from("/")
        } else {
            pathname
        };
    }

    fn set_observing<H>(&mut self, observing: bool, host: &mut H)
    where
        H: SyncHost<R>,
    {
        if self.flags.contains(SyncFlags::OBSERVING) != observing {
            self.flags.toggle(SyncFlags::OBSERVING);
            host.set_observing(observing);
        }
    }
}

impl<K, R> fmt::Debug for SectionSync<K, R>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionSync")
            .field("current", &self.current)
            .field("flags", &self.flags)
            .field("anchors", &self.registry.len())
            .field("base_path_name", &self.base_path_name)
            .finish_non_exhaustive()
    }
}
