// SPDX-License-Identifier: LGPL-3.0-only

//! Overflow-flip resolution.
//!
//! When an overlay's base placement would leave the viewport, a
//! [FlipSelector] names the substituted direction. The selector is decided
//! from signed overflow margins keyed by the *base* overlay corner, and is
//! then applied as a corner replacement table over the whole descriptor, so
//! one resolved direction transforms any corner pair without a
//! combinatorial explosion of special cases.

use crate::placement::corner::Corner;
use crate::placement::descriptor::PlacementDescriptor;
use crate::placement::position::{PopoverPosition, Rect};
use nalgebra::Vector2;

/// The alternate placement direction substituted when the base placement
/// would overflow the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipSelector {
    /// No flip; the base placement stands.
    #[default]
    None,
    /// Mirror vertically above the anchor.
    Top,
    /// Mirror horizontally to the left.
    Left,
    /// Mirror horizontally to the right.
    Right,
    /// Mirror vertically below the anchor.
    Bottom,
    /// Compound diagonal: above and to the left.
    TopAndLeft,
    /// Compound diagonal: above and to the right.
    TopAndRight,
    /// Compound diagonal: below and to the left.
    BottomAndLeft,
    /// Compound diagonal: below and to the right.
    BottomAndRight,
}

impl FlipSelector {
    /// Whether this selector substitutes an alternate placement.
    pub fn is_flip(&self) -> bool {
        !matches!(self, FlipSelector::None)
    }

    /// Apply this selector's corner replacement table to a descriptor.
    ///
    /// Tokens without a replacement row pass through unchanged; compound
    /// selectors replace only their single diagonal overlay corner.
    pub fn apply(&self, descriptor: &PlacementDescriptor) -> PlacementDescriptor {
        PlacementDescriptor {
            anchor: descriptor.anchor.map(|c| self.replace_anchor(c)),
            overlay: descriptor.overlay.map(|c| self.replace_overlay(c)),
        }
    }

    fn replace_overlay(&self, corner: Corner) -> Corner {
        match (self, corner) {
            (FlipSelector::Top, Corner::TopLeft) => Corner::BottomLeft,
            (FlipSelector::Top, Corner::TopCenter) => Corner::BottomCenter,
            (FlipSelector::Top, Corner::TopRight) => Corner::BottomRight,

            (FlipSelector::Left, Corner::TopLeft) => Corner::TopRight,
            (FlipSelector::Left, Corner::CenterLeft) => Corner::CenterRight,
            (FlipSelector::Left, Corner::BottomLeft) => Corner::BottomRight,

            (FlipSelector::Right, Corner::TopRight) => Corner::TopLeft,
            (FlipSelector::Right, Corner::CenterRight) => Corner::CenterLeft,
            (FlipSelector::Right, Corner::BottomRight) => Corner::BottomLeft,

            (FlipSelector::Bottom, Corner::BottomLeft) => Corner::TopLeft,
            (FlipSelector::Bottom, Corner::BottomCenter) => Corner::TopCenter,
            (FlipSelector::Bottom, Corner::BottomRight) => Corner::TopRight,

            (FlipSelector::TopAndLeft, Corner::TopLeft) => Corner::BottomRight,
            (FlipSelector::TopAndRight, Corner::TopRight) => Corner::BottomLeft,
            (FlipSelector::BottomAndLeft, Corner::BottomLeft) => Corner::TopRight,
            (FlipSelector::BottomAndRight, Corner::BottomRight) => Corner::TopLeft,

            (_, other) => other,
        }
    }

    fn replace_anchor(&self, corner: Corner) -> Corner {
        match (self, corner) {
            (FlipSelector::Top, Corner::BottomCenter) => Corner::TopCenter,
            (FlipSelector::Left, Corner::CenterRight) => Corner::CenterLeft,
            (FlipSelector::Right, Corner::CenterLeft) => Corner::CenterRight,
            (FlipSelector::Bottom, Corner::TopCenter) => Corner::BottomCenter,
            (_, other) => other,
        }
    }
}

/// Per-overlay flip memory.
///
/// Under flip-on-open the first resolved selector (including
/// [FlipSelector::None]) is frozen here until the overlay's open → closed
/// transition resets it. Under flip-always nothing is ever cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlipState {
    resolved: Option<FlipSelector>,
}

impl FlipState {
    /// The cached selector, if one has been frozen.
    pub fn resolved(&self) -> Option<FlipSelector> {
        self.resolved
    }

    /// Freeze the first resolved selector; later calls are no-ops until
    /// [FlipState::reset].
    pub fn freeze(&mut self, selector: FlipSelector) {
        self.resolved.get_or_insert(selector);
    }

    /// Clear the cached selector (open → closed transition).
    pub fn reset(&mut self) {
        self.resolved = None;
    }
}

/// Signed distances between the unflipped placement and the viewport edges.
#[derive(Debug, Clone, Copy)]
struct OverflowMargins {
    /// Space consumed left of the anchor point (`left + offset_x`).
    delta_to_left: f64,
    /// Space remaining right of the anchor point.
    delta_to_right: f64,
    /// Space above the anchor point after subtracting the overlay height.
    delta_top: f64,
    /// Raw distance from the anchor point to the viewport top.
    space_to_top: f64,
    /// Space remaining below the overlay.
    delta_bottom: f64,
}

impl OverflowMargins {
    fn new(position: &PopoverPosition, overlay: &Rect, viewport_size: Vector2<f64>) -> Self {
        Self {
            delta_to_left: position.left + position.offset_x,
            delta_to_right: viewport_size.x - position.left - overlay.width,
            delta_top: position.top - overlay.height,
            space_to_top: position.top,
            delta_bottom: viewport_size.y - position.top - overlay.height,
        }
    }
}

/// Decide the flip selector for one placement pass.
///
/// Keyed by the *base* overlay corner; compound (diagonal) flips are
/// preferred when both axes overflow and the opposite quadrant has room,
/// then single-axis flips, then [FlipSelector::None]. Corners with no
/// flip-eligible row (center-center, or a missing corner) never flip.
pub fn resolve(
    descriptor: &PlacementDescriptor,
    position: &PopoverPosition,
    overlay: &Rect,
    viewport_size: Vector2<f64>,
    flip_margin: f64,
) -> FlipSelector {
    let m = OverflowMargins::new(position, overlay, viewport_size);
    let grace = flip_margin;
    let w = overlay.width;
    let h = overlay.height;

    match descriptor.overlay {
        Some(Corner::TopLeft) => {
            if m.delta_bottom < grace
                && m.delta_to_right < grace
                && m.space_to_top >= h
                && m.delta_to_left >= w
            {
                FlipSelector::TopAndLeft
            } else if m.delta_bottom < grace && m.space_to_top >= h {
                FlipSelector::Top
            } else if m.delta_to_right < grace && m.delta_to_left >= w {
                FlipSelector::Left
            } else {
                FlipSelector::None
            }
        },
        Some(Corner::TopCenter) => {
            if m.delta_bottom < grace && m.space_to_top >= h {
                FlipSelector::Top
            } else {
                FlipSelector::None
            }
        },
        Some(Corner::TopRight) => {
            if m.delta_bottom < grace
                && m.delta_to_left < grace
                && m.space_to_top >= h
                && m.delta_to_right >= w
            {
                FlipSelector::TopAndRight
            } else if m.delta_bottom < grace && m.space_to_top >= h {
                FlipSelector::Top
            } else if m.delta_to_left < grace && m.delta_to_right >= w {
                FlipSelector::Right
            } else {
                FlipSelector::None
            }
        },
        Some(Corner::CenterLeft) => {
            if m.delta_to_right < grace && m.delta_to_left >= w {
                FlipSelector::Left
            } else {
                FlipSelector::None
            }
        },
        Some(Corner::CenterRight) => {
            if m.delta_to_left < grace && m.delta_to_right >= w {
                FlipSelector::Right
            } else {
                FlipSelector::None
            }
        },
        Some(Corner::BottomLeft) => {
            if m.delta_top < grace
                && m.delta_to_right < grace
                && m.delta_bottom >= 0.0
                && m.delta_to_left >= w
            {
                FlipSelector::BottomAndLeft
            } else if m.delta_top < grace && m.delta_bottom >= 0.0 {
                FlipSelector::Bottom
            } else if m.delta_to_right < grace && m.delta_to_left >= w {
                FlipSelector::Left
            } else {
                FlipSelector::None
            }
        },
        Some(Corner::BottomCenter) => {
            if m.delta_top < grace && m.delta_bottom >= 0.0 {
                FlipSelector::Bottom
            } else {
                FlipSelector::None
            }
        },
        Some(Corner::BottomRight) => {
            if m.delta_top < grace
                && m.delta_to_left < grace
                && m.delta_bottom >= 0.0
                && m.delta_to_right >= w
            {
                FlipSelector::BottomAndRight
            } else if m.delta_top < grace && m.delta_bottom >= 0.0 {
                FlipSelector::Bottom
            } else if m.delta_to_left < grace && m.delta_to_right >= w {
                FlipSelector::Right
            } else {
                FlipSelector::None
            }
        },
        Some(Corner::CenterCenter) | None => FlipSelector::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::position::place;

    fn viewport(w: f64, h: f64) -> Vector2<f64> {
        Vector2::new(w, h)
    }

    #[test]
    fn no_overflow_means_no_flip() {
        let anchor = Rect::new(100.0, 100.0, 50.0, 20.0);
        let overlay = Rect::new(0.0, 0.0, 200.0, 100.0);
        let descriptor = PlacementDescriptor::new(Corner::BottomLeft, Corner::TopLeft);
        let position = place(&anchor, &overlay, &descriptor);

        let selector = resolve(&descriptor, &position, &overlay, viewport(1000.0, 1000.0), 0.0);
        assert_eq!(selector, FlipSelector::None);
    }

    #[test]
    fn bottom_overflow_flips_to_top() {
        // Worked example: anchor at y=500 in a 550-high viewport, overlay
        // 100 tall hanging below from top-left. Bottom space is -50.
        let anchor = Rect::new(100.0, 500.0, 50.0, 20.0);
        let overlay = Rect::new(0.0, 0.0, 200.0, 100.0);
        let descriptor = PlacementDescriptor::new(Corner::TopLeft, Corner::TopLeft);
        let position = place(&anchor, &overlay, &descriptor);

        let selector = resolve(&descriptor, &position, &overlay, viewport(1000.0, 550.0), 0.0);
        assert_eq!(selector, FlipSelector::Top);

        let flipped = selector.apply(&descriptor);
        assert_eq!(flipped.overlay, Some(Corner::BottomLeft));
        assert_eq!(flipped.anchor, Some(Corner::TopLeft));

        let position = place(&anchor, &overlay, &flipped);
        assert_eq!(position.resolved(), Vector2::new(100.0, 400.0));
    }

    #[test]
    fn compound_flip_beats_single_axis() {
        // Anchor near the bottom-right viewport corner; no room below or to
        // the right, plenty above and to the left.
        let anchor = Rect::new(700.0, 500.0, 50.0, 20.0);
        let overlay = Rect::new(0.0, 0.0, 200.0, 100.0);
        let descriptor = PlacementDescriptor::new(Corner::BottomRight, Corner::TopLeft);
        let position = place(&anchor, &overlay, &descriptor);

        let selector = resolve(&descriptor, &position, &overlay, viewport(800.0, 550.0), 0.0);
        assert_eq!(selector, FlipSelector::TopAndLeft);

        let flipped = selector.apply(&descriptor);
        assert_eq!(flipped.overlay, Some(Corner::BottomRight));
        // Compound selectors leave the anchor corner untouched.
        assert_eq!(flipped.anchor, Some(Corner::BottomRight));
    }

    #[test]
    fn flip_rejected_without_clearance_on_the_far_side() {
        // Bottom overflow, but the overlay is too tall to fit above the
        // anchor point, so the top flip is rejected as well.
        let anchor = Rect::new(100.0, 80.0, 50.0, 20.0);
        let overlay = Rect::new(0.0, 0.0, 200.0, 150.0);
        let descriptor = PlacementDescriptor::new(Corner::TopLeft, Corner::TopLeft);
        let position = place(&anchor, &overlay, &descriptor);

        let selector = resolve(&descriptor, &position, &overlay, viewport(1000.0, 150.0), 0.0);
        assert_eq!(selector, FlipSelector::None);
    }

    #[test]
    fn center_left_pair_flips_horizontally() {
        let anchor = Rect::new(700.0, 300.0, 50.0, 20.0);
        let overlay = Rect::new(0.0, 0.0, 200.0, 100.0);
        let descriptor = PlacementDescriptor::new(Corner::CenterRight, Corner::CenterLeft);
        let position = place(&anchor, &overlay, &descriptor);

        let selector = resolve(&descriptor, &position, &overlay, viewport(800.0, 600.0), 0.0);
        assert_eq!(selector, FlipSelector::Left);

        let flipped = selector.apply(&descriptor);
        assert_eq!(flipped.anchor, Some(Corner::CenterLeft));
        assert_eq!(flipped.overlay, Some(Corner::CenterRight));
    }

    #[test]
    fn flip_state_freezes_first_selector() {
        let mut state = FlipState::default();
        assert_eq!(state.resolved(), None);

        state.freeze(FlipSelector::Top);
        state.freeze(FlipSelector::Left);
        assert_eq!(state.resolved(), Some(FlipSelector::Top));

        state.reset();
        assert_eq!(state.resolved(), None);
    }

    #[test]
    fn frozen_none_is_still_frozen() {
        let mut state = FlipState::default();
        state.freeze(FlipSelector::None);
        assert_eq!(state.resolved(), Some(FlipSelector::None));
    }
}
