//! In-memory host used by the integration tests.
//!
//! Records every style write and watch lifecycle so tests can assert on
//! the engine's side effects without a real rendering tree.

#![allow(dead_code)]

use popkit_core::host::{
    AttributeFilter, ElementKey, Host, PositionMode, StackingWrite, Viewport, WatchHandle,
};
use popkit_core::placement::position::Rect;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct ElementState {
    pub rect: Option<Rect>,
    pub parent_rect: Option<Rect>,
    pub tokens: Vec<String>,
    pub open: bool,
    pub position_mode: PositionMode,
    pub stacking: Option<i32>,
}

#[derive(Debug, Default)]
pub struct HostState {
    pub elements: HashMap<ElementKey, ElementState>,
    pub viewport: Viewport,
    pub ticks: HashMap<ElementKey, Vec<(ElementKey, i64)>>,

    next_watch: u64,
    pub watches_created: u64,
    pub live_watches: HashSet<u64>,

    pub positions: HashMap<ElementKey, (f64, f64)>,
    pub max_widths: HashMap<ElementKey, f64>,
    pub position_modes: HashMap<ElementKey, PositionMode>,
    pub stacking_writes: HashMap<ElementKey, StackingWrite>,
    pub flip_markers: HashMap<ElementKey, bool>,
}

/// Shared-handle mock host; clones observe the same state.
#[derive(Clone, Default)]
pub struct MockHost {
    pub state: Rc<RefCell<HostState>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount an anchor/content pair for `id` with the given anchor-parent
    /// geometry, content geometry and declared content tokens.
    pub fn mount_popover(&self, id: &str, anchor_parent: Rect, content: Rect, tokens: &[&str]) {
        let mut state = self.state.borrow_mut();
        state.elements.insert(
            ElementKey::anchor(id),
            ElementState {
                parent_rect: Some(anchor_parent),
                ..Default::default()
            },
        );
        state.elements.insert(
            ElementKey::content(id),
            ElementState {
                rect: Some(content),
                tokens: tokens.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        );
    }

    pub fn mount_container(&self, class: &str) {
        self.state
            .borrow_mut()
            .elements
            .insert(ElementKey::container(class), ElementState::default());
    }

    pub fn set_open(&self, id: &str, open: bool) {
        if let Some(element) = self
            .state
            .borrow_mut()
            .elements
            .get_mut(&ElementKey::content(id))
        {
            element.open = open;
        }
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.borrow_mut().viewport = viewport;
    }

    pub fn set_content_rect(&self, id: &str, rect: Rect) {
        if let Some(element) = self
            .state
            .borrow_mut()
            .elements
            .get_mut(&ElementKey::content(id))
        {
            element.rect = Some(rect);
        }
    }

    pub fn set_anchor_position_mode(&self, id: &str, mode: PositionMode) {
        if let Some(element) = self
            .state
            .borrow_mut()
            .elements
            .get_mut(&ElementKey::anchor(id))
        {
            element.position_mode = mode;
        }
    }

    pub fn set_anchor_stacking(&self, id: &str, stacking: Option<i32>) {
        if let Some(element) = self
            .state
            .borrow_mut()
            .elements
            .get_mut(&ElementKey::anchor(id))
        {
            element.stacking = stacking;
        }
    }

    pub fn set_sibling_ticks(&self, id: &str, ticks: Vec<(ElementKey, i64)>) {
        self.state
            .borrow_mut()
            .ticks
            .insert(ElementKey::content(id), ticks);
    }

    pub fn position_of(&self, id: &str) -> Option<(f64, f64)> {
        self.state
            .borrow()
            .positions
            .get(&ElementKey::content(id))
            .copied()
    }

    pub fn clear_writes(&self) {
        let mut state = self.state.borrow_mut();
        state.positions.clear();
        state.max_widths.clear();
        state.position_modes.clear();
        state.stacking_writes.clear();
        state.flip_markers.clear();
    }

    pub fn flip_marker_of(&self, id: &str) -> Option<bool> {
        self.state
            .borrow()
            .flip_markers
            .get(&ElementKey::content(id))
            .copied()
    }

    pub fn live_watch_count(&self) -> usize {
        self.state.borrow().live_watches.len()
    }

    pub fn watches_created(&self) -> u64 {
        self.state.borrow().watches_created
    }

    fn allocate_watch(&self, key: &ElementKey) -> Option<WatchHandle> {
        let mut state = self.state.borrow_mut();
        if !state.elements.contains_key(key) {
            return None;
        }
        state.next_watch += 1;
        let handle = state.next_watch;
        state.watches_created += 1;
        state.live_watches.insert(handle);
        Some(WatchHandle(handle))
    }
}

impl Host for MockHost {
    fn is_mounted(&self, key: &ElementKey) -> bool {
        self.state.borrow().elements.contains_key(key)
    }

    fn bounding_rect(&self, key: &ElementKey) -> Option<Rect> {
        self.state.borrow().elements.get(key)?.rect
    }

    fn parent_bounding_rect(&self, key: &ElementKey) -> Option<Rect> {
        self.state.borrow().elements.get(key)?.parent_rect
    }

    fn style_tokens(&self, key: &ElementKey) -> Vec<String> {
        self.state
            .borrow()
            .elements
            .get(key)
            .map(|element| element.tokens.clone())
            .unwrap_or_default()
    }

    fn is_open(&self, key: &ElementKey) -> bool {
        self.state
            .borrow()
            .elements
            .get(key)
            .is_some_and(|element| element.open)
    }

    fn position_mode(&self, key: &ElementKey) -> PositionMode {
        self.state
            .borrow()
            .elements
            .get(key)
            .map(|element| element.position_mode)
            .unwrap_or_default()
    }

    fn stacking_order(&self, key: &ElementKey) -> Option<i32> {
        self.state.borrow().elements.get(key)?.stacking
    }

    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn sibling_ticks(&self, key: &ElementKey) -> Vec<(ElementKey, i64)> {
        self.state.borrow().ticks.get(key).cloned().unwrap_or_default()
    }

    fn write_position(&self, key: &ElementKey, left: f64, top: f64) {
        self.state
            .borrow_mut()
            .positions
            .insert(key.clone(), (left, top));
    }

    fn write_max_width(&self, key: &ElementKey, max_width: f64) {
        let mut state = self.state.borrow_mut();
        state.max_widths.insert(key.clone(), max_width);
        // Constraining the style shrinks the measured box, like a layout
        // engine would.
        if let Some(element) = state.elements.get_mut(key) {
            if let Some(rect) = element.rect.as_mut() {
                if rect.width > max_width {
                    rect.width = max_width;
                }
            }
        }
    }

    fn write_position_mode(&self, key: &ElementKey, mode: PositionMode) {
        self.state
            .borrow_mut()
            .position_modes
            .insert(key.clone(), mode);
    }

    fn write_stacking(&self, key: &ElementKey, write: StackingWrite) {
        self.state
            .borrow_mut()
            .stacking_writes
            .insert(key.clone(), write);
    }

    fn write_flip_marker(&self, key: &ElementKey, flipped: bool) {
        self.state
            .borrow_mut()
            .flip_markers
            .insert(key.clone(), flipped);
    }

    fn watch_attributes(&self, key: &ElementKey, _filter: AttributeFilter) -> Option<WatchHandle> {
        self.allocate_watch(key)
    }

    fn watch_resize(&self, key: &ElementKey) -> Option<WatchHandle> {
        self.allocate_watch(key)
    }

    fn watch_parent_resize(&self, key: &ElementKey) -> Option<WatchHandle> {
        self.allocate_watch(key)
    }

    fn unwatch(&self, handle: WatchHandle) {
        self.state.borrow_mut().live_watches.remove(&handle.0);
    }
}
