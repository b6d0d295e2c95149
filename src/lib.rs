#![warn(missing_docs)]

//! Anchored overlay positioning for UI shells: compute where a floating
//! panel renders relative to its anchor, and flip it to an alternate
//! placement when it would overflow the viewport.

pub use nalgebra as math;

pub use popkit_core as core;

/// A "prelude" for users of the popkit engine.
///
/// Importing this module brings into scope the most common types
/// needed to drive popover placement from a host shell.
///
/// ```rust
/// use popkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::PopoverConfig;
    pub use crate::core::engine::{ChangeEvent, PlacementFilter, PopoverEngine, PopoverId};
    pub use crate::core::host::{
        AttributeFilter, ElementKey, Host, PositionMode, StackingWrite, Viewport, WatchHandle,
    };
    pub use crate::core::placement::corner::Corner;
    pub use crate::core::placement::descriptor::{OverflowPolicy, PlacementDescriptor};
    pub use crate::core::placement::flip::{FlipSelector, FlipState};
    pub use crate::core::placement::position::{place, PopoverPosition, Rect};

    // Math
    pub use nalgebra::Vector2;
}
