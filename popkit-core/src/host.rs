// SPDX-License-Identifier: LGPL-3.0-only

//! Host boundary: everything the engine needs from the rendering tree.
//!
//! The engine never owns elements. It borrows a [Host] for geometry and
//! style queries, writes resolved styles back through it, and asks it to
//! watch elements for changes. The host delivers notifications by calling
//! [PopoverEngine::notify](crate::engine::PopoverEngine::notify) on the UI
//! thread; watch handles returned here are owned by the engine's registry
//! and released on disconnect.

use crate::placement::position::Rect;
use bitflags::bitflags;
use nalgebra::Vector2;

/// Key the host uses to locate an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKey {
    /// Lookup by unique element identifier.
    Id(String),
    /// Lookup by style class (first match wins), used for the scrollable
    /// root container.
    Class(String),
}

impl ElementKey {
    /// Key of the anchor element for a popover id (`popover-<id>`).
    pub fn anchor(id: &str) -> Self {
        ElementKey::Id(format!("popover-{id}"))
    }

    /// Key of the content element for a popover id (`popovercontent-<id>`).
    pub fn content(id: &str) -> Self {
        ElementKey::Id(format!("popovercontent-{id}"))
    }

    /// Key of a container element looked up by class.
    pub fn container(class: &str) -> Self {
        ElementKey::Class(class.to_string())
    }
}

/// Current viewport geometry and scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Inner viewport width.
    pub width: f64,
    /// Inner viewport height.
    pub height: f64,
    /// Horizontal document scroll offset.
    pub scroll_x: f64,
    /// Vertical document scroll offset.
    pub scroll_y: f64,
}

impl Viewport {
    /// Viewport size as a vector.
    pub fn size(&self) -> Vector2<f64> {
        Vector2::new(self.width, self.height)
    }

    /// Scroll offsets as a vector.
    pub fn scroll(&self) -> Vector2<f64> {
        Vector2::new(self.scroll_x, self.scroll_y)
    }
}

/// Computed position mode of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    /// Normal document flow.
    #[default]
    Static,
    /// Positioned relative to the viewport; immune to document scroll.
    Fixed,
}

/// A stacking-order style write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackingWrite {
    /// Inherit an explicit stacking value verbatim.
    Explicit(i32),
    /// Offset against the shared popover stacking base (the host expresses
    /// this relative to its base custom property).
    Relative(u32),
}

bitflags! {
    /// Allow-list of attributes an attribute watch reports on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AttributeFilter: u8 {
        /// Style-class changes (drives visibility transitions).
        const CLASS = 0b01;
        /// Sibling-ordering tick changes (drives restacking).
        const TICKS = 0b10;
    }
}

/// Opaque handle to a live change-notification watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchHandle(
    /// Host-assigned watch identifier.
    pub u64,
);

/// The rendering-tree collaborator the engine is driven against.
///
/// All methods take `&self`; hosts that mutate internal bookkeeping use
/// interior mutability. Implementations must fire resize watches only on
/// *measured box* changes, not on every style write — the engine's own
/// position writes would otherwise re-enter it in an unbounded loop (the
/// engine stays convergent either way, but the loop would never go idle).
pub trait Host {
    /// Whether the element currently exists in the rendering tree.
    fn is_mounted(&self, key: &ElementKey) -> bool;

    /// Bounding rectangle of an element in viewport coordinates.
    fn bounding_rect(&self, key: &ElementKey) -> Option<Rect>;

    /// Bounding rectangle of an element's parent. The anchor marker node
    /// sits inside the visual anchor, so placement measures the parent box.
    fn parent_bounding_rect(&self, key: &ElementKey) -> Option<Rect>;

    /// Declared style tokens of an element, read once at connect time.
    fn style_tokens(&self, key: &ElementKey) -> Vec<String>;

    /// Whether the content element currently carries the open flag.
    /// `false` when the element is not mounted.
    fn is_open(&self, key: &ElementKey) -> bool;

    /// Computed position mode of an element.
    fn position_mode(&self, key: &ElementKey) -> PositionMode;

    /// Explicit stacking order of an element, [None] when auto.
    fn stacking_order(&self, key: &ElementKey) -> Option<i32>;

    /// Current viewport geometry and scroll offsets.
    fn viewport(&self) -> Viewport;

    /// Tick values of the content element and its siblings, in tree order.
    fn sibling_ticks(&self, key: &ElementKey) -> Vec<(ElementKey, i64)>;

    /// Write the resolved left/top style of an element.
    fn write_position(&self, key: &ElementKey, left: f64, top: f64);

    /// Constrain the max-width style of an element.
    fn write_max_width(&self, key: &ElementKey, max_width: f64);

    /// Write the position mode of an element.
    fn write_position_mode(&self, key: &ElementKey, mode: PositionMode);

    /// Write the stacking order of an element.
    fn write_stacking(&self, key: &ElementKey, write: StackingWrite);

    /// Set or clear the flip marker attribute on an element.
    fn write_flip_marker(&self, key: &ElementKey, flipped: bool);

    /// Watch an element for attribute mutations restricted to `filter`.
    /// Returns [None] when the element cannot be watched (not mounted).
    fn watch_attributes(&self, key: &ElementKey, filter: AttributeFilter)
        -> Option<WatchHandle>;

    /// Watch an element's own measured box for resizes.
    fn watch_resize(&self, key: &ElementKey) -> Option<WatchHandle>;

    /// Watch the measured box of an element's parent for resizes.
    fn watch_parent_resize(&self, key: &ElementKey) -> Option<WatchHandle>;

    /// Release a watch. Must be synchronous: no notification for the watch
    /// may be delivered after this returns.
    fn unwatch(&self, handle: WatchHandle);
}
