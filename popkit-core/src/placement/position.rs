// SPDX-License-Identifier: LGPL-3.0-only

use crate::placement::descriptor::PlacementDescriptor;
use nalgebra::Vector2;

/// An axis-aligned rectangle in viewport coordinates.
///
/// Snapshots taken at computation time; never cached across placement
/// passes, since the triggering condition is precisely "something moved".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge in viewport coordinates.
    pub left: f64,
    /// Top edge in viewport coordinates.
    pub top: f64,
    /// Width in device-independent pixels.
    pub width: f64,
    /// Height in device-independent pixels.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The size of this rectangle as a vector.
    pub fn size(&self) -> Vector2<f64> {
        Vector2::new(self.width, self.height)
    }
}

/// Raw placement result: the anchor point plus the overlay's own offset.
///
/// Callers add `left + offset_x` / `top + offset_y` (plus any scroll or
/// flip adjustment) before writing the final style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopoverPosition {
    /// X coordinate of the resolved anchor point.
    pub left: f64,
    /// Y coordinate of the resolved anchor point.
    pub top: f64,
    /// Horizontal overlay offset (zero or negative).
    pub offset_x: f64,
    /// Vertical overlay offset (zero or negative).
    pub offset_y: f64,
}

impl PopoverPosition {
    /// The final top-left corner implied by this position, before scroll
    /// adjustment and clamping.
    pub fn resolved(&self) -> Vector2<f64> {
        Vector2::new(self.left + self.offset_x, self.top + self.offset_y)
    }
}

/// Compute the raw placement of an overlay against its anchor.
///
/// Pure and total: a descriptor with a missing corner contributes zero on
/// that side, degrading to the legacy absolute-origin placement instead of
/// failing.
pub fn place(
    anchor_rect: &Rect,
    overlay_rect: &Rect,
    descriptor: &PlacementDescriptor,
) -> PopoverPosition {
    let anchor_point = match descriptor.anchor {
        Some(corner) => corner.anchor_point(anchor_rect),
        None => Vector2::new(0.0, 0.0),
    };

    let offset = match descriptor.overlay {
        Some(corner) => corner.overlay_offset(overlay_rect),
        None => Vector2::new(0.0, 0.0),
    };

    PopoverPosition {
        left: anchor_point.x,
        top: anchor_point.y,
        offset_x: offset.x,
        offset_y: offset.y,
    }
}
