//! DOM tree for the Strata overlay host.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/). The overlay only needs
//! the mutations a content script performs on a live page: create elements,
//! append and remove children, set attributes, and replace text content.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! Removed nodes stay in the arena as detached nodes; their ids are never reused.

use std::collections::{BTreeMap, HashSet};

/// Map of attribute names to values for an element.
///
/// Ordered so serialized markup is stable.
pub type AttributesMap = BTreeMap<String, String>;

/// A type-safe index into the DOM tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// A node with its parent and ordered children.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
}

/// Element-specific data: local name and attribute list.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: AttributesMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns the set of class names from the class attribute.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.attrs
            .get("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether the class attribute contains `class_name`.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class_name))
    }
}

/// Arena-based DOM tree.
///
/// The Document node is always at index 0 ([`NodeId::ROOT`]).
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Create a tree holding `<html><head></head><body></body></html>`.
    #[must_use]
    pub fn with_skeleton() -> Self {
        let mut tree = Self::new();
        let html = tree.create_element(ElementData::new("html"));
        tree.append_child(NodeId::ROOT, html);
        let head = tree.create_element(ElementData::new("head"));
        tree.append_child(html, head);
        let body = tree.create_element(ElementData::new("body"));
        tree.append_child(html, body);
        tree
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes ever allocated, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached element.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.alloc(NodeType::Element(data))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeType::Text(text.to_string()))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`. A child that already
    /// has a parent is detached from it first. Appending a node under itself
    /// or one of its own descendants is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len()
            || child.0 >= self.nodes.len()
            || parent == child
            || self.is_descendant_of(parent, child)
        {
            return;
        }
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.remove_child(old_parent, child);
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `child` from `parent`. No-op if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(parent_node) = self.nodes.get_mut(parent.0) else {
            return;
        };
        let before = parent_node.children.len();
        parent_node.children.retain(|&c| c != child);
        if parent_node.children.len() != before {
            self.nodes[child.0].parent = None;
        }
    }

    /// Detach every child of `parent`.
    pub fn remove_children(&mut self, parent: NodeId) {
        let Some(parent_node) = self.nodes.get_mut(parent.0) else {
            return;
        };
        for child in std::mem::take(&mut parent_node.children) {
            self.nodes[child.0].parent = None;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Element children only, in tree order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.as_element(c).is_some())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over the descendants of a node in tree order (pre-order),
    /// excluding the node itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Whether `id` is reachable from the document root.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.is_descendant_of(id, NodeId::ROOT)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Read an attribute of an element node.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    /// Set an attribute on an element node. No-op for non-elements.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.as_element_mut(id) {
            let _ = element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove an attribute from an element node.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.as_element_mut(id) {
            let _ = element.attrs.remove(name);
        }
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Concatenation of all descendant text nodes in tree order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|d| self.as_text(d))
            .collect()
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "replace all with node within this" - detach every child, then append a
    /// single text node holding `text` (nothing when `text` is empty).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.remove_children(id);
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node);
        }
    }

    /// [§ 4.5 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// First connected element in tree order whose id is `element_id`.
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .find(|&id| self.as_element(id).and_then(ElementData::id) == Some(element_id))
    }

    /// Connected elements whose class list contains `class_name`, in tree order.
    #[must_use]
    pub fn get_elements_by_class_name(&self, class_name: &str) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
            .filter(|&id| self.as_element(id).is_some_and(|e| e.has_class(class_name)))
            .collect()
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(NodeId::ROOT).next()
    }

    /// [§ 3.1.2 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.child_with_tag(self.document_element()?, "head")
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.child_with_tag(self.document_element()?, "body")
    }

    fn child_with_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.element_children(parent)
            .find(|&id| self.as_element(id).is_some_and(|e| e.tag_name.eq_ignore_ascii_case(tag)))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
