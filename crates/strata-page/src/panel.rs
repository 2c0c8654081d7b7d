//! The control panel.
//!
//! [`PanelPresenter`] builds the panel subtree inside `<body>`, re-renders
//! the layer list from engine state, and turns clicks and changes on its
//! controls into [`PanelEvent`]s. It never touches layer state itself.

use strata_core::{EngineConfig, Layer, LayerId};
use strata_dom::{DomTree, ElementData, NodeId};

use crate::VERSION;

/// Id of the minimize button.
pub const MINIMIZE_BUTTON_ID: &str = "lh-minimize-button";
/// Id of the close button.
pub const CLOSE_BUTTON_ID: &str = "lh-close-button";
/// Id of the add-layer button.
pub const ADD_LAYER_BUTTON_ID: &str = "lh-add-layer-button";
/// Id of the clear-all button.
pub const CLEAR_LAYERS_BUTTON_ID: &str = "lh-clear-layers-button";
/// Id of the `<ul>` holding one item per layer.
pub const LAYERS_LIST_ID: &str = "lh-layers-list";

/// Class of each layer list item.
pub const LAYER_ITEM_CLASS: &str = "lh-layer-item";
/// Class of the per-layer enable checkbox.
pub const LAYER_TOGGLE_CLASS: &str = "lh-layer-toggle";
/// Class of the per-layer color input.
pub const LAYER_COLOR_CLASS: &str = "lh-layer-color-picker";
/// Class of the per-layer label.
pub const LAYER_LABEL_CLASS: &str = "lh-layer-selector";
/// Class of the per-layer delete button.
pub const LAYER_DELETE_CLASS: &str = "lh-delete-layer";
/// Class set on the panel while it is minimized.
pub const COLLAPSED_CLASS: &str = "lh-panel--collapsed";

const DISPLAY_NONE: &str = "display: none";
const DISPLAY_BLOCK: &str = "display: block";

/// A user action on one of the panel's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Add-layer button.
    AddLayer,
    /// Clear-all button.
    ClearAll,
    /// Enable checkbox of a layer.
    Toggle {
        /// Layer the checkbox belongs to.
        id: LayerId,
        /// Checkbox state after the click.
        enabled: bool,
    },
    /// Color input of a layer.
    Recolor {
        /// Layer the input belongs to.
        id: LayerId,
        /// Value picked.
        color: String,
    },
    /// Delete button of a layer.
    Delete {
        /// Layer the button belongs to.
        id: LayerId,
    },
    /// Minimize button.
    Minimize,
    /// Close button.
    Close,
}

/// Builds and updates the panel subtree.
#[derive(Debug, Clone)]
pub struct PanelPresenter {
    panel_id: String,
    title: String,
}

impl PanelPresenter {
    /// Presenter for the configured panel id and title.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            panel_id: config.panel_id.clone(),
            title: config.panel_title.clone(),
        }
    }

    /// The panel element's id.
    #[must_use]
    pub fn panel_id(&self) -> &str {
        &self.panel_id
    }

    /// The connected panel element, if any.
    #[must_use]
    pub fn find(&self, tree: &DomTree) -> Option<NodeId> {
        tree.get_element_by_id(&self.panel_id)
    }

    /// The layer list inside the panel.
    fn list(&self, tree: &DomTree) -> Option<NodeId> {
        let panel = self.find(tree)?;
        tree.descendants(panel)
            .find(|&node| tree.as_element(node).and_then(ElementData::id) == Some(LAYERS_LIST_ID))
    }

    /// Whether `node` is the panel or inside it.
    fn contains(&self, tree: &DomTree, node: NodeId) -> bool {
        self.find(tree)
            .is_some_and(|panel| panel == node || tree.is_descendant_of(node, panel))
    }

    /// Build the panel and append it to `<body>`. An empty layer list is
    /// included; call [`render_layers`](Self::render_layers) to fill it.
    pub fn build(&self, tree: &mut DomTree) -> NodeId {
        let root = ElementData::new("div").with_attr("id", &self.panel_id);
        let panel = append(tree, None, root, None);
        let parent = tree
            .body()
            .or_else(|| tree.document_element())
            .unwrap_or_else(|| tree.root());
        tree.append_child(parent, panel);

        let header = append(tree, Some(panel), class("div", "lh-panel-header"), None);
        let title = format!("{} ", self.title);
        let heading = append(tree, Some(header), ElementData::new("h2"), Some(&title));
        let version = format!("({VERSION})");
        let _ = append(tree, Some(heading), class("span", "lh-version"), Some(&version));
        let controls = append(tree, Some(header), class("div", "lh-panel-controls"), None);
        let minimize = button(MINIMIZE_BUTTON_ID, "Minimize / expand");
        let _ = append(tree, Some(controls), minimize, Some("\u{2013}"));
        let close = button(CLOSE_BUTTON_ID, "Close panel");
        let _ = append(tree, Some(controls), close, Some("\u{d7}"));

        let body = append(tree, Some(panel), class("div", "lh-panel-body"), None);
        let add = ElementData::new("button").with_attr("id", ADD_LAYER_BUTTON_ID);
        let _ = append(tree, Some(body), add, Some("Add layer"));
        let container = append(tree, Some(body), class("div", "lh-layers-list-container"), None);
        let list_header = append(tree, Some(container), class("div", "lh-layers-header"), None);
        let _ = append(tree, Some(list_header), ElementData::new("h3"), Some("Layers"));
        let clear = ElementData::new("button").with_attr("id", CLEAR_LAYERS_BUTTON_ID);
        let _ = append(tree, Some(list_header), clear, Some("Clear all"));
        let list = ElementData::new("ul").with_attr("id", LAYERS_LIST_ID);
        let _ = append(tree, Some(container), list, None);
        panel
    }

    /// Replace the layer list with one item per layer, labelled by 1-based
    /// display position. Does nothing if the list is not in the document.
    pub fn render_layers(&self, tree: &mut DomTree, layers: &[Layer]) {
        let Some(list) = self.list(tree) else {
            return;
        };
        tree.remove_children(list);

        for (index, layer) in layers.iter().enumerate() {
            let item =
                class("li", LAYER_ITEM_CLASS).with_attr("data-layer-id", &layer.id.to_string());
            let item = append(tree, Some(list), item, None);

            let mut toggle = ElementData::new("input")
                .with_attr("type", "checkbox")
                .with_attr("class", LAYER_TOGGLE_CLASS)
                .with_attr("title", "Enable / disable layer");
            if layer.enabled {
                toggle = toggle.with_attr("checked", "");
            }
            let _ = append(tree, Some(item), toggle, None);

            let picker = ElementData::new("input")
                .with_attr("type", "color")
                .with_attr("class", LAYER_COLOR_CLASS)
                .with_attr("value", &layer.color)
                .with_attr("title", "Change color");
            let _ = append(tree, Some(item), picker, None);

            let label = class("span", LAYER_LABEL_CLASS).with_attr("title", &layer.selector);
            let _ = append(tree, Some(item), label, Some(&format!("Layer {}", index + 1)));

            let delete = class("button", LAYER_DELETE_CLASS).with_attr("title", "Delete layer");
            let _ = append(tree, Some(item), delete, Some("\u{d7}"));
        }
    }

    /// Whether the panel exists and is not hidden.
    #[must_use]
    pub fn is_visible(&self, tree: &DomTree) -> bool {
        self.find(tree)
            .is_some_and(|panel| tree.attribute(panel, "style") != Some(DISPLAY_NONE))
    }

    /// Show or hide the panel.
    pub fn set_visible(&self, tree: &mut DomTree, visible: bool) {
        if let Some(panel) = self.find(tree) {
            let display = if visible { DISPLAY_BLOCK } else { DISPLAY_NONE };
            tree.set_attribute(panel, "style", display);
        }
    }

    /// Flip visibility, returning the new state.
    pub fn toggle_visibility(&self, tree: &mut DomTree) -> bool {
        let visible = !self.is_visible(tree);
        self.set_visible(tree, visible);
        visible
    }

    /// Whether the panel is minimized.
    #[must_use]
    pub fn is_collapsed(&self, tree: &DomTree) -> bool {
        self.find(tree)
            .and_then(|panel| tree.as_element(panel))
            .is_some_and(|element| element.has_class(COLLAPSED_CLASS))
    }

    /// Toggle the minimized class, returning whether the panel is now
    /// minimized.
    pub fn toggle_collapsed(&self, tree: &mut DomTree) -> bool {
        let Some(panel) = self.find(tree) else {
            return false;
        };
        let collapsed = !self.is_collapsed(tree);
        let classes: Vec<String> = tree
            .attribute(panel, "class")
            .unwrap_or_default()
            .split_ascii_whitespace()
            .filter(|c| *c != COLLAPSED_CLASS)
            .map(str::to_string)
            .chain(collapsed.then(|| COLLAPSED_CLASS.to_string()))
            .collect();
        if classes.is_empty() {
            tree.remove_attribute(panel, "class");
        } else {
            tree.set_attribute(panel, "class", &classes.join(" "));
        }
        collapsed
    }

    /// Event produced by a click on `target`. Nodes outside the panel produce
    /// nothing.
    ///
    /// Layer controls are resolved through their enclosing list item. A click
    /// on an enable checkbox reports the state the checkbox flips to.
    #[must_use]
    pub fn event_for_click(&self, tree: &DomTree, target: NodeId) -> Option<PanelEvent> {
        if !self.contains(tree, target) {
            return None;
        }
        let element = tree.as_element(target)?;
        match element.id() {
            Some(MINIMIZE_BUTTON_ID) => return Some(PanelEvent::Minimize),
            Some(CLOSE_BUTTON_ID) => return Some(PanelEvent::Close),
            Some(ADD_LAYER_BUTTON_ID) => return Some(PanelEvent::AddLayer),
            Some(CLEAR_LAYERS_BUTTON_ID) => return Some(PanelEvent::ClearAll),
            _ => {}
        }
        let id = layer_id_of(tree, target)?;
        if element.has_class(LAYER_TOGGLE_CLASS) {
            Some(PanelEvent::Toggle {
                id,
                enabled: !element.attrs.contains_key("checked"),
            })
        } else if element.has_class(LAYER_DELETE_CLASS) {
            Some(PanelEvent::Delete { id })
        } else {
            None
        }
    }

    /// Event produced by a color input on `target` changing to `value`.
    #[must_use]
    pub fn event_for_change(
        &self,
        tree: &DomTree,
        target: NodeId,
        value: &str,
    ) -> Option<PanelEvent> {
        if !self.contains(tree, target) || !tree.as_element(target)?.has_class(LAYER_COLOR_CLASS) {
            return None;
        }
        Some(PanelEvent::Recolor {
            id: layer_id_of(tree, target)?,
            color: value.to_string(),
        })
    }

    /// The list item rendered for `id`.
    #[must_use]
    pub fn item_for(&self, tree: &DomTree, id: LayerId) -> Option<NodeId> {
        let list = self.list(tree)?;
        let wanted = id.to_string();
        tree.element_children(list)
            .find(|&item| tree.attribute(item, "data-layer-id") == Some(wanted.as_str()))
    }
}

/// The first descendant of `item` carrying `class_name`.
#[must_use]
pub fn control_in(tree: &DomTree, item: NodeId, class_name: &str) -> Option<NodeId> {
    tree.descendants(item)
        .find(|&node| tree.as_element(node).is_some_and(|e| e.has_class(class_name)))
}

/// `data-layer-id` of the closest enclosing layer item.
fn layer_id_of(tree: &DomTree, target: NodeId) -> Option<LayerId> {
    std::iter::once(target)
        .chain(tree.ancestors(target))
        .find(|&node| tree.as_element(node).is_some_and(|e| e.has_class(LAYER_ITEM_CLASS)))
        .and_then(|item| tree.attribute(item, "data-layer-id"))
        .and_then(|raw| raw.parse().ok())
        .map(LayerId)
}

fn class(tag: &str, class_name: &str) -> ElementData {
    ElementData::new(tag).with_attr("class", class_name)
}

fn button(id: &str, title: &str) -> ElementData {
    ElementData::new("button").with_attr("id", id).with_attr("title", title)
}

/// Create an element with optional text and append it under `parent`.
fn append(
    tree: &mut DomTree,
    parent: Option<NodeId>,
    data: ElementData,
    text: Option<&str>,
) -> NodeId {
    let node = tree.create_element(data);
    if let Some(text) = text {
        let text = tree.create_text(text);
        tree.append_child(node, text);
    }
    if let Some(parent) = parent {
        tree.append_child(parent, node);
    }
    node
}
