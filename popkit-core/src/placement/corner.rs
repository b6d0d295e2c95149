// SPDX-License-Identifier: LGPL-3.0-only

use crate::placement::position::Rect;
use nalgebra::Vector2;

/// Symbolic attachment point on a rectangle.
///
/// The same nine tokens name a point on the *anchor* rectangle (the
/// reference point the overlay is pinned to) and a point on the *overlay*
/// rectangle (the corner that lands on that reference point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top-left corner
    TopLeft,
    /// Top center (horizontally centered at top)
    TopCenter,
    /// Top-right corner
    TopRight,
    /// Left center (vertically centered on left)
    CenterLeft,
    /// Center (both horizontally and vertically)
    CenterCenter,
    /// Right center (vertically centered on right)
    CenterRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom center (horizontally centered at bottom)
    BottomCenter,
    /// Bottom-right corner
    BottomRight,
}

impl Corner {
    /// All corners in table order. Parsing scans this order, so it also
    /// fixes the precedence when several corner tokens are declared.
    pub const ALL: [Corner; 9] = [
        Corner::TopLeft,
        Corner::TopCenter,
        Corner::TopRight,
        Corner::CenterLeft,
        Corner::CenterCenter,
        Corner::CenterRight,
        Corner::BottomLeft,
        Corner::BottomCenter,
        Corner::BottomRight,
    ];

    /// Parse a corner from its kebab-case token (e.g. `"center-right"`).
    ///
    /// Returns [None] for unrecognized tokens; callers treat a missing
    /// corner as a zero contribution rather than an error.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "top-left" => Some(Corner::TopLeft),
            "top-center" => Some(Corner::TopCenter),
            "top-right" => Some(Corner::TopRight),
            "center-left" => Some(Corner::CenterLeft),
            "center-center" => Some(Corner::CenterCenter),
            "center-right" => Some(Corner::CenterRight),
            "bottom-left" => Some(Corner::BottomLeft),
            "bottom-center" => Some(Corner::BottomCenter),
            "bottom-right" => Some(Corner::BottomRight),
            _ => None,
        }
    }

    /// The kebab-case token for this corner.
    pub fn as_token(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopCenter => "top-center",
            Corner::TopRight => "top-right",
            Corner::CenterLeft => "center-left",
            Corner::CenterCenter => "center-center",
            Corner::CenterRight => "center-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomCenter => "bottom-center",
            Corner::BottomRight => "bottom-right",
        }
    }

    /// The absolute coordinate of this corner on an anchor rectangle.
    pub fn anchor_point(&self, rect: &Rect) -> Vector2<f64> {
        let (x, y) = match self {
            Corner::TopLeft => (rect.left, rect.top),
            Corner::TopCenter => (rect.left + rect.width / 2.0, rect.top),
            Corner::TopRight => (rect.left + rect.width, rect.top),
            Corner::CenterLeft => (rect.left, rect.top + rect.height / 2.0),
            Corner::CenterCenter => {
                (rect.left + rect.width / 2.0, rect.top + rect.height / 2.0)
            },
            Corner::CenterRight => (rect.left + rect.width, rect.top + rect.height / 2.0),
            Corner::BottomLeft => (rect.left, rect.top + rect.height),
            Corner::BottomCenter => (rect.left + rect.width / 2.0, rect.top + rect.height),
            Corner::BottomRight => (rect.left + rect.width, rect.top + rect.height),
        };

        Vector2::new(x, y)
    }

    /// The negative offset that lands this corner of an overlay rectangle
    /// exactly on the anchor point.
    pub fn overlay_offset(&self, rect: &Rect) -> Vector2<f64> {
        let (dx, dy) = match self {
            Corner::TopLeft => (0.0, 0.0),
            Corner::TopCenter => (-rect.width / 2.0, 0.0),
            Corner::TopRight => (-rect.width, 0.0),
            Corner::CenterLeft => (0.0, -rect.height / 2.0),
            Corner::CenterCenter => (-rect.width / 2.0, -rect.height / 2.0),
            Corner::CenterRight => (-rect.width, -rect.height / 2.0),
            Corner::BottomLeft => (0.0, -rect.height),
            Corner::BottomCenter => (-rect.width / 2.0, -rect.height),
            Corner::BottomRight => (-rect.width, -rect.height),
        };

        Vector2::new(dx, dy)
    }
}
