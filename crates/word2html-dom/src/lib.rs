//! HTML fragment tree for the word2html converter.
//!
//! This crate provides an arena-based tree of HTML nodes modelled on the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), reduced to what a
//! document converter needs.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.
//!
//! Nodes only know their children. There are no parent or sibling
//! back-references, so the structure is a pure tree: a node reachable from the
//! root is owned by exactly one parent. Detaching a node leaves its slot in the
//! arena, but it is no longer reachable and is never serialized.

mod attributes;
mod role;
mod serialize;

pub use attributes::AttributesMap;
pub use role::{BULLET_CLASS, ElementRole, ListKind, ListMarker, NUMBER_CLASS, QuoteVariant};
pub use serialize::{escape_attribute, escape_text, print_tree, serialize_children, serialize_node};

/// A type-safe index into the tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The fragment root is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node of the tree and the ids of its children, in document order.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The fragment root. It has no markup of its own; serializing it emits
    /// only its children.
    Fragment,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
}

/// Element-specific data.
///
/// NOTE: We only store the local name, the ordered attribute list and the
/// role assigned at creation. Namespaces are irrelevant for converter output.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// Role inferred once from the tag and class when the element was created.
    role: ElementRole,
}

impl ElementData {
    /// Create element data, classifying its role from the tag and attributes.
    #[must_use]
    pub fn new(tag_name: &str, attrs: AttributesMap) -> Self {
        let role = ElementRole::classify(tag_name, &attrs);
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
            role,
        }
    }

    /// Create element data with an explicit role, bypassing classification.
    #[must_use]
    pub fn with_role(tag_name: &str, attrs: AttributesMap, role: ElementRole) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
            role,
        }
    }

    /// The role assigned at creation.
    #[must_use]
    pub const fn role(&self) -> ElementRole {
        self.role
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs.get("class").unwrap_or("").split_ascii_whitespace()
    }
}

/// Arena-based HTML fragment tree with O(1) node access.
///
/// All nodes live in a contiguous vector, using indices for all
/// relationships. The fragment root is always at index 0 ([`NodeId::ROOT`]).
#[derive(Debug, Clone)]
pub struct HtmlTree {
    nodes: Vec<Node>,
}

impl HtmlTree {
    /// Create a new tree holding only the fragment root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Fragment,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root fragment node ID.
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

    /// Number of allocated nodes, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (it always holds at least the root).
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
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached element, classifying its role.
    pub fn create_element(&mut self, tag_name: &str, attrs: AttributesMap) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name, attrs)))
    }

    /// Allocate a detached element with an explicit role.
    pub fn create_element_with_role(
        &mut self,
        tag_name: &str,
        attrs: AttributesMap,
        role: ElementRole,
    ) -> NodeId {
        self.alloc(NodeType::Element(ElementData::with_role(
            tag_name, attrs, role,
        )))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Text(text.into()))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// [§ 4.2.3 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// Inserts `child` into `parent` immediately before `reference`. If
    /// `reference` is not a child of `parent`, `child` is appended.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        let Some(node) = self.nodes.get_mut(parent.0) else {
            return;
        };
        match node.children.iter().position(|&c| c == reference) {
            Some(index) => node.children.insert(index, child),
            None => node.children.push(child),
        }
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `child` from `parent`. Does nothing if it is not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.retain(|&c| c != child);
        }
    }

    /// Detach and return all children of `parent`.
    pub fn take_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .get_mut(parent.0)
            .map(|node| std::mem::take(&mut node.children))
            .unwrap_or_default()
    }

    /// Move all children of `from` to the end of `to`.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let moved = self.take_children(from);
        if let Some(node) = self.nodes.get_mut(to.0) {
            node.children.extend(moved);
        }
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Position of `child` among the children of `parent`.
    #[must_use]
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
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

    /// Role of an element node, `None` for text and the root.
    #[must_use]
    pub fn role(&self, id: NodeId) -> Option<ElementRole> {
        self.as_element(id).map(ElementData::role)
    }

    /// Whether a node is a text node containing only whitespace.
    #[must_use]
    pub fn is_whitespace_text(&self, id: NodeId) -> bool {
        self.as_text(id).is_some_and(|t| t.trim().is_empty())
    }

    /// Concatenated text of a node and all its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.as_text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Iterate over `id` and everything below it in document (pre-)order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Iterate over every node reachable from the root, in document order.
    #[must_use]
    pub fn iter_all(&self) -> Descendants<'_> {
        self.descendants(NodeId::ROOT)
    }

    /// Ids of all reachable elements with a role matching `predicate`, in
    /// document order.
    #[must_use]
    pub fn elements_where(&self, predicate: impl Fn(ElementRole) -> bool) -> Vec<NodeId> {
        self.iter_all()
            .filter(|&id| self.role(id).is_some_and(&predicate))
            .collect()
    }
}

impl Default for HtmlTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a HtmlTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
