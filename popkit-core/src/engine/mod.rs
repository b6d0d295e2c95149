// SPDX-License-Identifier: LGPL-3.0-only

//! The placement engine: overlay registry, change-event dispatch and the
//! placement driver.
//!
//! All operations run on the UI thread in response to discrete
//! notifications; none blocks, and every public operation is total over
//! its documented input domain. Missing elements and repeated
//! connect/disconnect calls are silent no-ops, not errors.

mod driver;

/// Per-overlay instance records and watch bookkeeping.
pub mod instance;

/// The id → instance registry and container-watch state.
pub mod registry;

use crate::config::PopoverConfig;
use crate::host::{AttributeFilter, ElementKey, Host};
use crate::placement::descriptor::{OverflowPolicy, PopoverDeclaration};
use crate::placement::flip::FlipState;
use instance::{InstanceWatches, OverlayInstance};
use registry::{ContainerWatch, PopoverRegistry};
use std::fmt;

/// Identifier of an overlay, unique among currently open overlays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PopoverId(String);

impl PopoverId {
    /// Create an id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The string form of this id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PopoverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PopoverId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A geometry-change notification delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Class attribute of a content element mutated (visibility changes).
    ContentClassMutated(PopoverId),
    /// Tick attribute mutated somewhere under a content element.
    ContentTicksMutated(PopoverId),
    /// The anchor's parent box resized.
    AnchorParentResized(PopoverId),
    /// The content element's own box resized.
    ContentResized(PopoverId),
    /// The scrollable root container resized.
    ContainerResized,
    /// The window resized.
    WindowResized,
    /// The window scrolled.
    WindowScrolled,
}

/// Scope filter for mass re-placement passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementFilter {
    /// Only overlays declared viewport-fixed.
    Fixed,
    /// Only overlays with the flip-always overflow policy.
    FlipAlways,
}

/// The anchored overlay positioning engine.
///
/// Owns the registry of connected overlays and drives placement through a
/// borrowed [Host]. Constructed once per application/page lifetime by the
/// UI-integration layer; never a process-wide static.
pub struct PopoverEngine<H: Host> {
    pub(crate) host: H,
    pub(crate) registry: PopoverRegistry,
    pub(crate) config: PopoverConfig,
}

impl<H: Host> PopoverEngine<H> {
    /// Create an engine with default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, PopoverConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(host: H, config: PopoverConfig) -> Self {
        Self {
            host,
            registry: PopoverRegistry::new(),
            config,
        }
    }

    /// Establish the container-resize watch for `container_class`,
    /// optionally overriding the flip margin.
    ///
    /// Idempotent per container class: repeated calls with the recorded
    /// class only apply the margin override; a different class replaces
    /// the previous watch. No-op when the container is not mounted.
    pub fn initialize(&mut self, container_class: &str, flip_margin: Option<f64>) {
        let key = ElementKey::container(container_class);
        if !self.host.is_mounted(&key) {
            return;
        }

        if let Some(margin) = flip_margin {
            if margin >= 0.0 {
                self.config.flip_margin = margin;
            }
        }
        self.config.container_class = Some(container_class.to_string());

        if let Some(watch) = self.registry.container() {
            if watch.class == container_class {
                return;
            }
        }

        if let Some(old) = self.registry.take_container() {
            self.host.unwatch(old.handle);
        }
        if let Some(handle) = self.host.watch_resize(&key) {
            log::debug!("Popover container watch established on .{}", container_class);
            self.registry.set_container(ContainerWatch {
                class: container_class.to_string(),
                handle,
            });
        }
    }

    /// Connect the overlay `id`: parse its declaration, establish its three
    /// change watches and perform one immediate placement.
    ///
    /// Idempotent; a silent no-op when the anchor or content element is not
    /// mounted yet (the next mutation notification re-triggers the host).
    pub fn connect(&mut self, id: &str) {
        if let Some(class) = self.config.container_class.clone() {
            self.initialize(&class, None);
        }

        let id = PopoverId::new(id);
        if self.registry.contains(&id) {
            log::trace!("Popover connect: {} already connected", id);
            return;
        }

        let anchor_key = ElementKey::anchor(id.as_str());
        let content_key = ElementKey::content(id.as_str());
        if !self.host.is_mounted(&anchor_key) || !self.host.is_mounted(&content_key) {
            log::debug!("Popover connect: {} not mounted yet", id);
            return;
        }

        let declaration = PopoverDeclaration::parse(&self.host.style_tokens(&content_key));

        let Some(attributes) = self
            .host
            .watch_attributes(&content_key, AttributeFilter::CLASS | AttributeFilter::TICKS)
        else {
            return;
        };
        let Some(anchor_resize) = self.host.watch_parent_resize(&anchor_key) else {
            self.host.unwatch(attributes);
            return;
        };
        let Some(content_resize) = self.host.watch_resize(&content_key) else {
            self.host.unwatch(attributes);
            self.host.unwatch(anchor_resize);
            return;
        };

        self.registry.insert(
            id.clone(),
            OverlayInstance {
                anchor_key,
                content_key,
                declaration,
                flip: FlipState::default(),
                skip_stacking: false,
                watches: InstanceWatches {
                    attributes,
                    anchor_resize,
                    content_resize,
                },
            },
        );
        log::debug!("Popover connect: {}", id);

        self.place_one(&id, None);
    }

    /// Disconnect the overlay `id`, releasing its three watches. A no-op
    /// when `id` is not registered.
    pub fn disconnect(&mut self, id: &str) {
        let id = PopoverId::new(id);
        if let Some(instance) = self.registry.remove(&id) {
            for handle in instance.watches.handles() {
                self.host.unwatch(handle);
            }
            log::debug!("Popover disconnect: {}", id);
        }
    }

    /// Disconnect every registered overlay and release the container watch.
    /// Safe to call when nothing is registered.
    pub fn dispose(&mut self) {
        for (id, instance) in self.registry.drain() {
            for handle in instance.watches.handles() {
                self.host.unwatch(handle);
            }
            log::trace!("Popover dispose: released {}", id);
        }
        if let Some(container) = self.registry.take_container() {
            self.host.unwatch(container.handle);
        }
        log::debug!("Popover engine disposed");
    }

    /// Ids of all connected overlays, in registration order.
    pub fn list_active_ids(&self) -> Vec<PopoverId> {
        self.registry.ids()
    }

    /// Dispatch a change notification.
    pub fn notify(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::ContentClassMutated(id) => {
                self.handle_class_mutation(&id);
                self.place_one(&id, None);
            },
            ChangeEvent::ContentTicksMutated(id) => self.restack_siblings(&id),
            ChangeEvent::AnchorParentResized(id) | ChangeEvent::ContentResized(id) => {
                self.place_one(&id, None);
            },
            ChangeEvent::ContainerResized | ChangeEvent::WindowResized => self.place_all(None),
            ChangeEvent::WindowScrolled => {
                self.place_all(Some(PlacementFilter::Fixed));
                self.place_all(Some(PlacementFilter::FlipAlways));
            },
        }
    }

    /// Open → closed transition: drop flip memory and the stacking-skip
    /// marker so the next open resolves fresh.
    fn handle_class_mutation(&mut self, id: &PopoverId) {
        let Some(instance) = self.registry.get_mut(id) else {
            return;
        };
        if self.host.is_open(&instance.content_key) {
            return;
        }

        if instance.declaration.policy == OverflowPolicy::FlipOnOpen {
            self.host.write_flip_marker(&instance.content_key, false);
        }
        instance.flip.reset();
        instance.skip_stacking = false;
    }
}
