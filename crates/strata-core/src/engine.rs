//! The engine controller.
//!
//! [`Engine`] is the single owner of the layer state. Every public mutation
//! runs the same commit step: synthesize the stylesheet once, persist the
//! state once, and hand the stylesheet back as a [`Commit`] for whatever
//! style sink the host page provides. If the store rejects the write, the
//! in-memory state is rolled back and nothing reaches the sink.

use strata_common::trace::trace;

use crate::config::EngineConfig;
use crate::error::StorageError;
use crate::layer::{Layer, LayerId, LayerState};
use crate::palette::ColorAllocator;
use crate::persist::{KeyValueStore, PersistenceGateway};
use crate::store::LayerStore;
use crate::synth::StyleSynthesizer;

/// Receives synthesized stylesheet text, replacing whatever it held before.
pub trait StyleSink {
    /// Replace the sink's stylesheet with `css`.
    fn apply_stylesheet(&mut self, css: &str);
}

impl StyleSink for String {
    fn apply_stylesheet(&mut self, css: &str) {
        self.clear();
        self.push_str(css);
    }
}

/// Result of one committed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a commit carries the stylesheet the page must apply"]
pub struct Commit {
    /// The full stylesheet for the new state.
    pub stylesheet: String,
}

impl Commit {
    /// Push the stylesheet into `sink`.
    pub fn apply_to<K: StyleSink + ?Sized>(&self, sink: &mut K) {
        sink.apply_stylesheet(&self.stylesheet);
    }
}

/// Controller owning the layer store, the synthesizer and the persistence
/// gateway.
#[derive(Debug)]
pub struct Engine<S> {
    layers: LayerStore,
    synthesizer: StyleSynthesizer,
    gateway: PersistenceGateway<S>,
}

impl<S: KeyValueStore> Engine<S> {
    /// Engine with an empty state. Nothing is read from `store` yet.
    #[must_use]
    pub fn new(config: &EngineConfig, store: S) -> Self {
        Self {
            layers: LayerStore::new(ColorAllocator::new(&config.palette)),
            synthesizer: StyleSynthesizer::new(config),
            gateway: PersistenceGateway::new(store, config.storage_key.clone()),
        }
    }

    /// Engine resumed from whatever `store` holds.
    #[must_use]
    pub fn start(config: &EngineConfig, store: S) -> Self {
        let mut engine = Self::new(config, store);
        engine.load();
        engine
    }

    /// Replace the in-memory state with the persisted one. Missing or
    /// corrupt records load as the empty state.
    pub fn load(&mut self) {
        let state = self.gateway.load();
        trace(
            "Engine",
            &format!("loaded {} layer(s), colorCounter {}", state.layers.len(), state.color_counter),
        );
        self.layers.replace_state(state);
    }

    /// Add a layer one level deeper than the current count.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails; the layer is not added.
    pub fn add_layer(&mut self) -> Result<(LayerId, Commit), StorageError> {
        self.mutate(LayerStore::add_layer)
    }

    /// Delete a layer; absent ids are a no-op that still commits.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails; nothing changes.
    pub fn delete_layer(&mut self, id: LayerId) -> Result<Commit, StorageError> {
        self.mutate(|layers| layers.delete_layer(id)).map(|(_, commit)| commit)
    }

    /// Enable or disable a layer; absent ids are a no-op that still commits.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails; nothing changes.
    pub fn set_enabled(&mut self, id: LayerId, enabled: bool) -> Result<Commit, StorageError> {
        self.mutate(|layers| layers.set_enabled(id, enabled)).map(|(_, commit)| commit)
    }

    /// Recolor a layer; absent ids are a no-op that still commits.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails; nothing changes.
    pub fn set_color(&mut self, id: LayerId, color: &str) -> Result<Commit, StorageError> {
        self.mutate(|layers| layers.set_color(id, color)).map(|(_, commit)| commit)
    }

    /// Remove all layers and reset the color cursor to 0.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails; nothing changes.
    pub fn clear_all(&mut self) -> Result<Commit, StorageError> {
        self.mutate(LayerStore::clear_all).map(|((), commit)| commit)
    }

    /// Stylesheet for the current state without persisting anything.
    pub fn refresh(&self) -> Commit {
        Commit {
            stylesheet: self.stylesheet(),
        }
    }

    /// Apply `change`, then synthesize and persist exactly once.
    fn mutate<T>(
        &mut self,
        change: impl FnOnce(&mut LayerStore) -> T,
    ) -> Result<(T, Commit), StorageError> {
        let snapshot = self.layers.clone();
        let outcome = change(&mut self.layers);
        let stylesheet = self.stylesheet();
        if let Err(err) = self.gateway.save(self.layers.state()) {
            self.layers = snapshot;
            return Err(err);
        }
        Ok((outcome, Commit { stylesheet }))
    }

    /// Synthesized stylesheet for the current layers.
    #[must_use]
    pub fn stylesheet(&self) -> String {
        self.synthesizer.synthesize(self.layers.layers())
    }

    /// Layers in display order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        self.layers.layers()
    }

    /// Layer with `id`.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// The color cursor.
    #[must_use]
    pub const fn color_counter(&self) -> u64 {
        self.layers.color_counter()
    }

    /// The aggregate as persisted.
    #[must_use]
    pub const fn state(&self) -> &LayerState {
        self.layers.state()
    }

    /// The synthesizer in use.
    #[must_use]
    pub const fn synthesizer(&self) -> &StyleSynthesizer {
        &self.synthesizer
    }

    /// The persistence gateway.
    #[must_use]
    pub const fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    /// The backing key-value store.
    #[must_use]
    pub fn store(&self) -> &S {
        self.gateway.store()
    }
}
