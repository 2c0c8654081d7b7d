//! Persistence of the layer state through a key-value store port.
//!
//! The engine never talks to a concrete storage API. It is handed something
//! implementing [`KeyValueStore`], the same shape as an extension's local
//! storage area: string keys mapped to string values.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use strata_common::trace::trace;
use strata_common::warning::warn_once;

use crate::error::StorageError;
use crate::layer::LayerState;

/// A string-to-string key-value store.
pub trait KeyValueStore {
    /// Read the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store. Counts writes so callers can check how often state was
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry (does not count as a write).
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        let _ = store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of `set` and `remove` calls so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.writes += 1;
        let _ = self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.writes += 1;
        let _ = self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON file holding an object of string values.
///
/// A missing or empty file is an empty store. Writes go to a sibling
/// temporary file that is renamed over the original; a file that does not
/// parse is overwritten by the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`. Nothing is touched until the first access.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Entries to start a write from. A file that is not a JSON object of
    /// strings is replaced wholesale, matching how `load` treats it.
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_entries() {
            Err(err @ StorageError::Format { .. }) => {
                warn_once("Storage", &format!("{err}; overwriting it"));
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(entries)?;
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, text).map_err(io_error)?;
        fs::rename(&tmp, &self.path).map_err(io_error)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries_for_write()?;
        let _ = entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match self.read_entries() {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.write_entries(&entries)?;
                }
                Ok(())
            }
            Err(StorageError::Format { .. }) => self.write_entries(&self.entries_for_write()?),
            Err(err) => Err(err),
        }
    }
}

/// Saves and loads [`LayerState`] under one fixed key.
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    /// Gateway writing under `key`.
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Serialize `state` and write it under the gateway's key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save(&mut self, state: &LayerState) -> Result<(), StorageError> {
        let record = serde_json::to_string(state)?;
        trace(
            "Storage",
            &format!("saving {} layer(s), colorCounter {}", state.layers.len(), state.color_counter),
        );
        self.store.set(&self.key, record)
    }

    /// Read the persisted state.
    ///
    /// Never fails: a missing key, an unreadable store, or a record that does
    /// not decode all yield the empty default state.
    #[must_use]
    pub fn load(&self) -> LayerState {
        match self.store.get(&self.key) {
            Ok(Some(record)) => Self::decode(&record).unwrap_or_else(|| {
                warn_once("Storage", "stored layer state is corrupt; starting fresh");
                LayerState::default()
            }),
            Ok(None) => LayerState::default(),
            Err(err) => {
                warn_once("Storage", &format!("{err}; starting fresh"));
                LayerState::default()
            }
        }
    }

    /// Decode a persistence record. Duplicate layer ids count as corruption.
    #[must_use]
    pub fn decode(record: &str) -> Option<LayerState> {
        serde_json::from_str::<LayerState>(record)
            .ok()
            .filter(LayerState::has_unique_ids)
    }

    /// The persistence key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give back the underlying store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
