//! Layer list to stylesheet text.

use crate::config::EngineConfig;
use crate::layer::Layer;

/// Pure function from layers to CSS, parameterized by the panel id and the
/// outline appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSynthesizer {
    panel_id: String,
    outline_width: String,
    outline_style: String,
}

impl Default for StyleSynthesizer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl StyleSynthesizer {
    /// Synthesizer for the configured panel id and outline.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            panel_id: config.panel_id.clone(),
            outline_width: config.outline.width.clone(),
            outline_style: config.outline.style.clone(),
        }
    }

    /// `<selector> { outline: 2px solid <color> !important; }`
    #[must_use]
    pub fn layer_rule(&self, layer: &Layer) -> String {
        format!(
            "{} {{ outline: {} {} {} !important; }}",
            layer.selector, self.outline_width, self.outline_style, layer.color
        )
    }

    /// The trailing rule that keeps the panel and its subtree unoutlined.
    #[must_use]
    pub fn suppression_rule(&self) -> String {
        let id = &self.panel_id;
        format!("#{id}, #{id} * {{ outline: none !important; }}")
    }

    /// One rule per enabled layer in store order, then the suppression rule,
    /// joined by newlines.
    #[must_use]
    pub fn synthesize(&self, layers: &[Layer]) -> String {
        layers
            .iter()
            .filter(|layer| layer.enabled)
            .map(|layer| self.layer_rule(layer))
            .chain(std::iter::once(self.suppression_rule()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
