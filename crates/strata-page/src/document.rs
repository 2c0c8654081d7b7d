//! The host document and its overlay stylesheet.

use std::collections::HashMap;

use strata_core::StyleSink;
use strata_css::{OutlineValue, Stylesheet, parse_stylesheet, resolve_outlines};
use strata_dom::{DomTree, ElementData, NodeId};

/// A page the overlay is attached to.
#[derive(Debug, Clone, Default)]
pub struct Page {
    tree: DomTree,
}

impl Page {
    /// An empty `<html><head></head><body></body></html>` page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: DomTree::with_skeleton(),
        }
    }

    /// Wrap an existing tree.
    #[must_use]
    pub const fn from_tree(tree: DomTree) -> Self {
        Self { tree }
    }

    /// A page whose body holds `breadth` columns, each a chain of `depth`
    /// nested `<div class="level-N">` elements (N counts from 1).
    #[must_use]
    pub fn with_nested_divs(depth: usize, breadth: usize) -> Self {
        let mut page = Self::new();
        let Some(body) = page.tree.body() else {
            return page;
        };
        for column in 0..breadth {
            let mut parent = body;
            for level in 1..=depth {
                let mut data =
                    ElementData::new("div").with_attr("class", &format!("level-{level}"));
                if level == 1 {
                    data = data.with_attr("id", &format!("column-{}", column + 1));
                }
                let div = page.tree.create_element(data);
                page.tree.append_child(parent, div);
                parent = div;
            }
        }
        page
    }

    /// The document tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The document tree, mutably.
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Sink writing into the `<style id=style_id>` element.
    pub fn style_sink<'a>(&'a mut self, style_id: &'a str) -> StyleElementSink<'a> {
        StyleElementSink {
            tree: &mut self.tree,
            style_id,
        }
    }

    /// Text of the `<style id=style_id>` element, if it exists.
    #[must_use]
    pub fn style_text(&self, style_id: &str) -> Option<String> {
        self.tree
            .get_element_by_id(style_id)
            .map(|style| self.tree.text_content(style))
    }

    /// Every connected `<style>` element parsed, in tree order.
    #[must_use]
    pub fn stylesheet(&self) -> Stylesheet {
        let css: Vec<String> = self
            .tree
            .descendants(self.tree.root())
            .filter(|&id| self.tree.as_element(id).is_some_and(|e| e.tag_name == "style"))
            .map(|id| self.tree.text_content(id))
            .collect();
        parse_stylesheet(&css.join("\n"))
    }

    /// Cascaded `outline` for every element that has one.
    #[must_use]
    pub fn resolved_outlines(&self) -> HashMap<NodeId, OutlineValue> {
        resolve_outlines(&self.tree, &self.stylesheet())
    }
}

/// [`StyleSink`] backed by a `<style>` element, created in `<head>` on first
/// use.
#[derive(Debug)]
pub struct StyleElementSink<'a> {
    tree: &'a mut DomTree,
    style_id: &'a str,
}

impl StyleElementSink<'_> {
    /// Find the style element, creating it if it is missing.
    fn find_or_create(&mut self) -> NodeId {
        if let Some(existing) = self.tree.get_element_by_id(self.style_id) {
            return existing;
        }
        let parent = self
            .tree
            .head()
            .or_else(|| self.tree.document_element())
            .unwrap_or_else(|| self.tree.root());
        let style = self
            .tree
            .create_element(ElementData::new("style").with_attr("id", self.style_id));
        self.tree.append_child(parent, style);
        style
    }
}

impl StyleSink for StyleElementSink<'_> {
    fn apply_stylesheet(&mut self, css: &str) {
        let style = self.find_or_create();
        self.tree.set_text_content(style, css);
    }
}
