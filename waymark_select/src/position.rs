// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floor selection over measured anchor positions and scroll target math.

/// Selects the anchor whose top is the greatest value at or above which the
/// page has scrolled.
///
/// `positions` are freshly measured `(key, document_top)` pairs; `scroll_top`
/// is the current scroll offset; `adjustment` shifts the effective scroll
/// position before comparison. A fixed sticky-header height `h` is passed as
/// `-h`, so an anchor counts as current once its top passes under the header
/// line rather than the viewport edge.
///
/// Returns `None` when every anchor's top is below the effective position
/// (the page is scrolled above all sections). Anchors with equal tops
/// resolve to the earliest in iteration order; non-finite tops never match.
///
/// Selection is a pure function of its arguments — callers re-measure and
/// re-invoke on every cycle so layout changes are always honored.
pub fn best_anchor<K, I>(positions: I, scroll_top: f64, adjustment: f64) -> Option<K>
where
    K: Copy,
    I: IntoIterator<Item = (K, f64)>,
{
    let effective = scroll_top + adjustment;
    let mut best: Option<(K, f64)> = None;
    for (key, top) in positions {
        if !top.is_finite() || top > effective {
            continue;
        }
        match best {
            Some((_, best_top)) if top <= best_top => {}
            _ => best = Some((key, top)),
        }
    }
    best.map(|(key, _)| key)
}

/// Computes the scroll destination that puts an anchor's margin box at the
/// configured offset line.
///
/// `element_top` is the element's document-space top, `offset` the fixed
/// header height to clear, and `margin_top` the element's own top margin,
/// which is pulled out so the visual gap above the section is not double
/// counted.
#[must_use]
pub fn target_offset(element_top: f64, offset: f64, margin_top: f64) -> f64 {
    element_top - offset - margin_top
}
