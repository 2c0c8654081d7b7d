//! The Strata layer engine.
//!
//! A layer outlines every element at one nesting depth below `body`. This
//! crate owns everything about layers that does not depend on a page:
//!
//! - **[`palette`]** - deterministic color allocation on a 24-step hue wheel
//! - **[`layer`]** - the layer record and the persisted aggregate
//! - **[`store`]** - the ordered layer list and its mutations
//! - **[`synth`]** - layer list to stylesheet text
//! - **[`persist`]** - key-value store port and the persistence gateway
//! - **[`engine`]** - the controller tying mutation, synthesis and persistence
//!   together into one commit per operation
//! - **[`config`]** - engine configuration
//!
//! ```text
//!   UI action ──► Engine::<op>() ──► LayerStore mutation
//!                                        │
//!                      StyleSynthesizer ◄┘
//!                             │
//!            PersistenceGateway::save() ──► Commit { stylesheet } ──► StyleSink
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod layer;
pub mod palette;
pub mod persist;
pub mod store;
pub mod synth;

pub use config::{EngineConfig, OutlineConfig, PaletteConfig};
pub use engine::{Commit, Engine, StyleSink};
pub use error::{ConfigError, StorageError};
pub use layer::{Layer, LayerId, LayerState, selector_for_depth};
pub use palette::ColorAllocator;
pub use persist::{FileStore, KeyValueStore, MemoryStore, PersistenceGateway};
pub use store::LayerStore;
pub use synth::StyleSynthesizer;
