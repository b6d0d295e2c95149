// SPDX-License-Identifier: LGPL-3.0-only

use crate::host::{ElementKey, WatchHandle};
use crate::placement::descriptor::PopoverDeclaration;
use crate::placement::flip::FlipState;

/// The three change-notification watches held for a connected overlay.
///
/// Owned exclusively by the registry; released as a unit on disconnect.
#[derive(Debug, Clone, Copy)]
pub struct InstanceWatches {
    /// Attribute mutations on the content element (class + ticks).
    pub attributes: WatchHandle,
    /// Resizes of the anchor's parent box.
    pub anchor_resize: WatchHandle,
    /// Resizes of the content element's own box.
    pub content_resize: WatchHandle,
}

impl InstanceWatches {
    /// All handles, for bulk release.
    pub fn handles(&self) -> [WatchHandle; 3] {
        [self.attributes, self.anchor_resize, self.content_resize]
    }
}

/// Per-overlay record owned by the registry.
///
/// Flip memory and the stacking-skip marker live here, indexed by id —
/// never attached to the borrowed elements themselves.
#[derive(Debug, Clone)]
pub struct OverlayInstance {
    /// Key of the anchor marker element.
    pub anchor_key: ElementKey,
    /// Key of the content element.
    pub content_key: ElementKey,
    /// Declaration parsed once at connect time.
    pub declaration: PopoverDeclaration,
    /// Flip memory (flip-on-open freeze).
    pub flip: FlipState,
    /// Set when the overlay inherited an explicit stacking order from its
    /// anchor; tick restacking leaves such overlays alone.
    pub skip_stacking: bool,
    /// Live change-notification watches.
    pub watches: InstanceWatches,
}
