//! Engine configuration.
//!
//! Every field has a default matching the shipped overlay, so an empty JSON
//! object (or no config file at all) yields [`EngineConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage key the layer state is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "layoutHighlighterState";
/// Element id of the overlay panel.
pub const DEFAULT_PANEL_ID: &str = "layout-highlighter-panel";
/// Element id of the injected `<style>` element.
pub const DEFAULT_STYLE_ID: &str = "layout-highlighter-style";
/// Panel heading.
pub const DEFAULT_PANEL_TITLE: &str = "Layout Highlighter";

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key of the persistence record in the key-value store.
    pub storage_key: String,
    /// Element id reserved for the panel; its subtree is never outlined.
    pub panel_id: String,
    /// Element id of the `<style>` element the stylesheet is written into.
    pub style_id: String,
    /// Heading shown in the panel header.
    pub panel_title: String,
    /// Color allocation parameters.
    pub palette: PaletteConfig,
    /// Outline drawing parameters.
    pub outline: OutlineConfig,
    /// Pages whose URL starts with one of these are never activated.
    pub restricted_url_prefixes: Vec<String>,
}

/// Parameters of the hue-wheel color allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Degrees the hue advances per allocated color.
    pub hue_step: u32,
    /// HSL saturation, percent.
    pub saturation: f64,
    /// HSL lightness, percent.
    pub lightness: f64,
}

/// How layer outlines are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// `outline-width` of every layer rule.
    pub width: String,
    /// `outline-style` of every layer rule.
    pub style: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            panel_id: DEFAULT_PANEL_ID.to_string(),
            style_id: DEFAULT_STYLE_ID.to_string(),
            panel_title: DEFAULT_PANEL_TITLE.to_string(),
            palette: PaletteConfig::default(),
            outline: OutlineConfig::default(),
            restricted_url_prefixes: vec!["chrome://".to_string()],
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            hue_step: 75,
            saturation: 90.0,
            lightness: 55.0,
        }
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            width: "2px".to_string(),
            style: "solid".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and a validation
    /// error for values the engine cannot use.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_json`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Check the values the stylesheet and DOM depend on.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("panel_id", &self.panel_id), ("style_id", &self.style_id)] {
            if !is_css_ident(value) {
                return Err(ConfigError::InvalidIdent {
                    field,
                    value: value.clone(),
                });
            }
        }
        for (field, value) in [
            ("palette.saturation", self.palette.saturation),
            ("palette.lightness", self.palette.lightness),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// [§ 4.3.12 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier),
/// restricted to unescaped ASCII.
fn is_css_ident(value: &str) -> bool {
    let mut chars = value.chars();
    let starts_ok = match chars.next() {
        Some('-') => chars
            .clone()
            .next()
            .is_some_and(|c| c == '-' || c == '_' || c.is_ascii_alphabetic()),
        Some(c) => c == '_' || c.is_ascii_alphabetic(),
        None => false,
    };
    starts_ok && chars.all(|c| c == '-' || c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_ident() {
        assert!(is_css_ident("layout-highlighter-panel"));
        assert!(is_css_ident("-x"));
        assert!(is_css_ident("_panel2"));
        assert!(!is_css_ident(""));
        assert!(!is_css_ident("2panel"));
        assert!(!is_css_ident("-2"));
        assert!(!is_css_ident("has space"));
    }
}
