//! The ordered layer list and its mutations.

use std::time::{SystemTime, UNIX_EPOCH};

use strata_common::trace::trace;

use crate::layer::{Layer, LayerId, LayerState, selector_for_depth};
use crate::palette::ColorAllocator;

/// Owns the layer list and the color cursor.
///
/// Mutations addressed to an id that is not present do nothing and return
/// `false`; they are never errors.
#[derive(Debug, Clone)]
pub struct LayerStore {
    state: LayerState,
    allocator: ColorAllocator,
    /// Highest id ever issued or loaded. Survives [`LayerStore::clear_all`].
    last_id: u64,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new(ColorAllocator::default())
    }
}

impl LayerStore {
    /// Empty store.
    #[must_use]
    pub fn new(allocator: ColorAllocator) -> Self {
        Self::from_state(LayerState::default(), allocator)
    }

    /// Store resuming from a loaded state.
    #[must_use]
    pub fn from_state(state: LayerState, allocator: ColorAllocator) -> Self {
        let last_id = state.max_id().map_or(0, |id| id.0);
        Self {
            state,
            allocator,
            last_id,
        }
    }

    /// Swap in a loaded state. The id watermark only ever moves up.
    pub fn replace_state(&mut self, state: LayerState) {
        self.last_id = self.last_id.max(state.max_id().map_or(0, |id| id.0));
        self.state = state;
    }

    /// Append a layer one nesting level deeper than the current count.
    ///
    /// The selector is computed from the number of layers present now and is
    /// never recomputed, so deleting an earlier layer does not renumber it.
    pub fn add_layer(&mut self) -> LayerId {
        let selector = selector_for_depth(self.state.layers.len() + 1);
        let (color, counter) = self.allocator.next(self.state.color_counter);
        let id = self.fresh_id();
        trace("Layers", &format!("add {id}: {selector} {color}"));
        self.state.layers.push(Layer {
            id,
            selector,
            color,
            enabled: true,
        });
        self.state.color_counter = counter;
        id
    }

    /// Remove the layer with `id`. The color cursor is left alone.
    pub fn delete_layer(&mut self, id: LayerId) -> bool {
        let before = self.state.layers.len();
        self.state.layers.retain(|layer| layer.id != id);
        let removed = self.state.layers.len() != before;
        if removed {
            trace("Layers", &format!("delete {id}"));
        }
        removed
    }

    /// Turn the layer's rule on or off.
    pub fn set_enabled(&mut self, id: LayerId, enabled: bool) -> bool {
        let Some(layer) = self.get_mut(id) else {
            return false;
        };
        layer.enabled = enabled;
        true
    }

    /// Override the layer's color. The string is not validated.
    pub fn set_color(&mut self, id: LayerId, color: impl Into<String>) -> bool {
        let Some(layer) = self.get_mut(id) else {
            return false;
        };
        layer.color = color.into();
        true
    }

    /// Drop every layer and restart the color sequence.
    pub fn clear_all(&mut self) {
        trace("Layers", &format!("clear {} layer(s)", self.state.layers.len()));
        self.state = LayerState::default();
    }

    /// Layers in display order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.state.layers
    }

    /// Layer with `id`.
    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.state.layers.iter().find(|layer| layer.id == id)
    }

    fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.state.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.layers.len()
    }

    /// Whether there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.layers.is_empty()
    }

    /// The color cursor.
    #[must_use]
    pub const fn color_counter(&self) -> u64 {
        self.state.color_counter
    }

    /// The aggregate as persisted.
    #[must_use]
    pub const fn state(&self) -> &LayerState {
        &self.state
    }

    /// The allocator colors come from.
    #[must_use]
    pub const fn allocator(&self) -> &ColorAllocator {
        &self.allocator
    }

    /// Creation time in milliseconds, bumped past every id seen so far.
    fn fresh_id(&mut self) -> LayerId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        self.last_id = now.max(self.last_id.saturating_add(1));
        LayerId(self.last_id)
    }
}
