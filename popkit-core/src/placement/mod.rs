// SPDX-License-Identifier: LGPL-3.0-only

//! Pure placement math: no state, no host access.
//!
//! [corner] holds the attachment-point tables, [descriptor] the parsed
//! placement declaration, [position] the raw placement composition and
//! [flip] the overflow-flip resolver.

pub mod corner;
pub mod descriptor;
pub mod flip;
pub mod position;

pub use corner::Corner;
pub use descriptor::{OverflowPolicy, PlacementDescriptor, PopoverDeclaration};
pub use flip::{FlipSelector, FlipState};
pub use position::{place, PopoverPosition, Rect};
