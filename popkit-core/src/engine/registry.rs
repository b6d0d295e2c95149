// SPDX-License-Identifier: LGPL-3.0-only

use crate::engine::instance::OverlayInstance;
use crate::engine::PopoverId;
use crate::host::{ElementKey, WatchHandle};
use indexmap::IndexMap;

/// The process-wide container-resize watch, one per distinct container
/// class. The recorded class doubles as the idempotency marker.
#[derive(Debug, Clone)]
pub struct ContainerWatch {
    /// Container class the watch was established for.
    pub class: String,
    /// Live resize watch on the container element.
    pub handle: WatchHandle,
}

/// Bookkeeping for the set of currently connected overlays.
///
/// Keys are unique among open overlays; iteration follows registration
/// order. The registry owns every watch handle and is the only place they
/// are stored, so releasing an instance releases its subscriptions.
#[derive(Debug, Default)]
pub struct PopoverRegistry {
    instances: IndexMap<PopoverId, OverlayInstance>,
    container: Option<ContainerWatch>,
}

impl PopoverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is currently connected.
    pub fn contains(&self, id: &PopoverId) -> bool {
        self.instances.contains_key(id)
    }

    /// Register an instance under `id`.
    pub fn insert(&mut self, id: PopoverId, instance: OverlayInstance) {
        self.instances.insert(id, instance);
    }

    /// Remove and return the instance for `id`.
    pub fn remove(&mut self, id: &PopoverId) -> Option<OverlayInstance> {
        self.instances.shift_remove(id)
    }

    /// Borrow the instance for `id`.
    pub fn get(&self, id: &PopoverId) -> Option<&OverlayInstance> {
        self.instances.get(id)
    }

    /// Mutably borrow the instance for `id`.
    pub fn get_mut(&mut self, id: &PopoverId) -> Option<&mut OverlayInstance> {
        self.instances.get_mut(id)
    }

    /// Ids of all connected overlays, in registration order.
    pub fn ids(&self) -> Vec<PopoverId> {
        self.instances.keys().cloned().collect()
    }

    /// Reverse lookup: the instance whose content element is `key`.
    pub fn find_by_content(&self, key: &ElementKey) -> Option<&OverlayInstance> {
        self.instances
            .values()
            .find(|instance| instance.content_key == *key)
    }

    /// Remove and return every registered instance.
    pub fn drain(&mut self) -> Vec<(PopoverId, OverlayInstance)> {
        self.instances.drain(..).collect()
    }

    /// The current container watch, if any.
    pub fn container(&self) -> Option<&ContainerWatch> {
        self.container.as_ref()
    }

    /// Record the container watch.
    pub fn set_container(&mut self, watch: ContainerWatch) {
        self.container = Some(watch);
    }

    /// Remove and return the container watch.
    pub fn take_container(&mut self) -> Option<ContainerWatch> {
        self.container.take()
    }

    /// Number of connected overlays.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no overlay is connected.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
