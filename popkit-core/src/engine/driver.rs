// SPDX-License-Identifier: LGPL-3.0-only

//! The placement passes: one overlay, all overlays, and tick restacking.

use crate::engine::{PlacementFilter, PopoverEngine, PopoverId};
use crate::host::{Host, PositionMode, StackingWrite};
use crate::placement::descriptor::OverflowPolicy;
use crate::placement::flip;
use crate::placement::position::place;

/// Stacking offsets assigned by tick restacking start above the flip
/// marker and backdrop slots of the shared base.
const STACKING_BASE_OFFSET: u32 = 3;

impl<H: Host> PopoverEngine<H> {
    /// Re-place a single overlay.
    ///
    /// A no-op when the id is unknown, the content is not open, the anchor
    /// geometry cannot be measured, or `filter` excludes the overlay.
    /// Geometry is re-measured on every pass; nothing is cached, since the
    /// triggering condition is precisely "something may have moved".
    pub fn place_one(&mut self, id: &PopoverId, filter: Option<PlacementFilter>) {
        let Some(instance) = self.registry.get(id) else {
            return;
        };
        let anchor_key = instance.anchor_key.clone();
        let content_key = instance.content_key.clone();
        let declaration = instance.declaration;
        let cached_flip = instance.flip.resolved();

        if !self.host.is_open(&content_key) {
            return;
        }
        match filter {
            Some(PlacementFilter::Fixed) if !declaration.fixed => return,
            Some(PlacementFilter::FlipAlways)
                if declaration.policy != OverflowPolicy::FlipAlways =>
            {
                return
            },
            _ => {},
        }

        let Some(anchor_rect) = self.host.parent_bounding_rect(&anchor_key) else {
            return;
        };

        // Two-pass measurement: constrain first, then measure the final box.
        if declaration.relative_width {
            self.host.write_max_width(&content_key, anchor_rect.width);
        }
        let Some(overlay_rect) = self.host.bounding_rect(&content_key) else {
            return;
        };

        let viewport = self.host.viewport();
        let mut position = place(&anchor_rect, &overlay_rect, &declaration.descriptor);

        let mut freeze = None;
        if declaration.policy != OverflowPolicy::None {
            let selector = match cached_flip {
                Some(selector) => selector,
                None => flip::resolve(
                    &declaration.descriptor,
                    &position,
                    &overlay_rect,
                    viewport.size(),
                    self.config.flip_margin,
                ),
            };

            if selector.is_flip() {
                let flipped = selector.apply(&declaration.descriptor);
                position = place(&anchor_rect, &overlay_rect, &flipped);
                self.host.write_flip_marker(&content_key, true);
                log::trace!("Popover {}: flipped {:?}", id, selector);
            } else {
                self.host.write_flip_marker(&content_key, false);
            }

            if declaration.policy == OverflowPolicy::FlipOnOpen && cached_flip.is_none() {
                freeze = Some(selector);
            }
        }

        let mut offset_x = position.offset_x;
        let mut offset_y = position.offset_y;
        if declaration.fixed {
            // Declared fixed: the computed position is already
            // viewport-relative.
        } else if self.host.position_mode(&anchor_key) == PositionMode::Fixed {
            self.host.write_position_mode(&content_key, PositionMode::Fixed);
        } else {
            offset_x += viewport.scroll_x;
            offset_y += viewport.scroll_y;
        }

        let left = position.left + offset_x;
        let top = (position.top + offset_y).max(self.config.top_clamp);
        self.host.write_position(&content_key, left, top);

        let inherited = self.host.stacking_order(&anchor_key);
        if let Some(value) = inherited {
            self.host
                .write_stacking(&content_key, StackingWrite::Explicit(value));
        }

        if let Some(instance) = self.registry.get_mut(id) {
            if let Some(selector) = freeze {
                instance.flip.freeze(selector);
            }
            if inherited.is_some() {
                instance.skip_stacking = true;
            }
        }
    }

    /// Re-place every registered overlay, optionally scoped by `filter`.
    ///
    /// Window resize runs unfiltered; window scroll runs a Fixed pass and
    /// a FlipAlways pass, since only those overlays are scroll-sensitive.
    pub fn place_all(&mut self, filter: Option<PlacementFilter>) {
        for id in self.registry.ids() {
            self.place_one(&id, filter);
        }
    }

    /// Recompute deterministic stacking offsets for the content's siblings
    /// from their tick ordering hints.
    ///
    /// Distinct non-zero ticks are ranked ascending and each non-skipped
    /// sibling gets `rank + 3` relative to the shared stacking base, so
    /// nested overlays stack by opening order, not tree insertion order.
    pub(crate) fn restack_siblings(&mut self, id: &PopoverId) {
        let Some(instance) = self.registry.get(id) else {
            return;
        };
        let content_key = instance.content_key.clone();

        let ticks = self.host.sibling_ticks(&content_key);
        let mut distinct: Vec<i64> = ticks
            .iter()
            .map(|(_, tick)| *tick)
            .filter(|tick| *tick != 0)
            .collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.is_empty() {
            return;
        }

        for (sibling, tick) in &ticks {
            if *tick == 0 {
                continue;
            }
            let skip = self
                .registry
                .find_by_content(sibling)
                .is_some_and(|sibling_instance| sibling_instance.skip_stacking);
            if skip {
                continue;
            }
            if let Ok(rank) = distinct.binary_search(tick) {
                self.host
                    .write_stacking(sibling, StackingWrite::Relative(rank as u32 + STACKING_BASE_OFFSET));
            }
        }
    }
}
