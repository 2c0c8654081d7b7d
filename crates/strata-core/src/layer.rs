//! Layer records and the persisted aggregate.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Unique layer identity, strictly increasing over a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One outlined nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Identity used by the panel to address this layer.
    pub id: LayerId,
    /// Selector fixed at creation; see [`selector_for_depth`].
    pub selector: String,
    /// Outline color, normally `#rrggbb`. User overrides are not validated.
    pub color: String,
    /// Disabled layers stay in the list but emit no rule.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

const fn enabled_by_default() -> bool {
    true
}

/// The persisted aggregate: ordered layers plus the color cursor.
///
/// Serializes as `{"layers": [...], "colorCounter": n}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerState {
    /// Insertion order = depth order = display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub layers: Vec<Layer>,
    /// Number of colors ever allocated since the last clear.
    #[serde(default, deserialize_with = "null_as_default")]
    pub color_counter: u64,
}

impl LayerState {
    /// Whether every layer id is distinct.
    #[must_use]
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.layers.len());
        self.layers.iter().all(|layer| seen.insert(layer.id))
    }

    /// Largest id present, if any.
    #[must_use]
    pub fn max_id(&self) -> Option<LayerId> {
        self.layers.iter().map(|layer| layer.id).max()
    }
}

/// `"body"` followed by `depth` child-combinator segments.
///
/// `selector_for_depth(2) == "body > * > *"`.
#[must_use]
pub fn selector_for_depth(depth: usize) -> String {
    let mut selector = String::with_capacity(4 + depth * 4);
    selector.push_str("body");
    for _ in 0..depth {
        selector.push_str(" > *");
    }
    selector
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
