//! Node tree for the Sprig HTML parser.
//!
//! This crate provides an arena-based tree of parsed HTML nodes: elements,
//! text runs, and `#fragment` roots that group several top-level siblings.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! A node's `parent` is a plain index back into the arena; ownership of a node
//! is expressed only by its presence in some parent's `children` list (or by
//! being the root). Detaching a node clears both sides in one step.
//!
//! Attribute and style access, structural mutation, and HTML serialization
//! live in the [`attributes`], [`mutation`] and [`serialize`] modules as
//! further `impl DomTree` blocks.

use indexmap::IndexMap;
use strum_macros::Display;

/// Attribute and style accessors.
pub mod attributes;
/// Error type for tree operations.
pub mod error;
/// Structural mutation: insertion, removal, grafting of parsed trees.
pub mod mutation;
/// HTML re-emission and serde snapshots.
pub mod serialize;
/// Inline style helpers (`style="..."` parsing, camelCase/kebab-case).
pub mod style;

pub use error::DomError;
pub use serialize::NodeSnapshot;
pub use style::{camel_to_kebab, format_style, kebab_to_camel, parse_style_declarations};

/// Map of attribute names to values for an element, in source order.
pub type AttributesMap = IndexMap<String, String>;

/// Map of camelCase style property names to values, in source order.
pub type StylesMap = IndexMap<String, String>;

/// Elements that never have content and are serialized as `<name/>`.
pub const VOID_ELEMENTS: [&str; 14] = [
    "img", "br", "input", "meta", "link", "hr", "area", "base", "col", "embed", "param", "source",
    "track", "wbr",
];

/// Returns true if `tag_name` (lowercase) is a void element.
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// A type-safe index into the node tree.
///
/// `NodeId` is the identity of a node: two ids are the same node exactly
/// when they compare equal within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The node produced by parsing is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A single node stored in the arena.
///
/// Nodes are read-only outside this crate; the tree changes only through
/// [`DomTree`]'s checked mutators.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub(crate) node_type: NodeType,

    /// Non-owning back-reference to the containing node.
    pub(crate) parent: Option<NodeId>,

    /// Children in document order.
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// The node's payload.
    #[must_use]
    pub const fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// The containing node, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// Synthetic root grouping two or more top-level siblings.
    Fragment,
    /// An element with its attributes, styles and collapsed text.
    Element(ElementData),
    /// A literal text run.
    Text(String),
}

impl NodeType {
    /// The kind of this payload.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Fragment => NodeKind::Fragment,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
        }
    }
}

/// Payload-free discriminant of [`NodeType`].
///
/// Displays as the sentinel tag names used for non-element nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    /// `#fragment`
    #[strum(serialize = "#fragment")]
    Fragment,
    /// An element.
    #[strum(serialize = "element")]
    Element,
    /// `#text`
    #[strum(serialize = "#text")]
    Text,
}

/// Element-specific data.
///
/// `text_content` is non-empty only when the element's parsed content was a
/// single text run, which is folded into the element instead of being kept
/// as a child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Attributes in source order, never containing `style`.
    pub attrs: AttributesMap,
    /// Inline styles keyed by camelCase property name.
    pub styles: StylesMap,
    /// Collapsed text content, emitted before any children.
    pub text_content: String,
}

impl ElementData {
    /// Create an element with no attributes, styles or text.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    /// Returns true if this is a void element.
    #[must_use]
    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag_name)
    }
}

/// Arena-based node tree with O(1) node access.
///
/// All nodes live in one vector and refer to each other by [`NodeId`].
/// Slots are never freed or reused: a node removed with
/// [`DomTree::detach`] or [`DomTree::remove_child`] keeps its slot, along
/// with its subtree, and still counts in [`DomTree::len`]. A long editing
/// session that detaches nodes can start over from [`DomTree::compacted`].
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The root is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create an empty `#fragment` tree.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(NodeType::Fragment)
    }

    /// Create a tree whose root has the given payload.
    #[must_use]
    pub fn with_root(node_type: NodeType) -> Self {
        Self {
            nodes: vec![Node {
                node_type: normalized(node_type),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root node ID.
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
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Returns true if `id` names a node of this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Number of allocated slots, including detached nodes and their subtrees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true: the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    ///
    /// A `style` attribute in element data is moved into the style map, and
    /// void elements lose any text.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type: normalized(node_type),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends the detached node `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// As [`DomTree::insert_child`].
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<&mut Self, DomError> {
        let len = self.children(parent).len();
        self.insert_child(parent, len, child)
    }

    /// Links `child` under `parent` without any checks.
    pub(crate) fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
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

    /// Snapshot of a node's children.
    ///
    /// Changing the returned vector does not affect the tree.
    #[must_use]
    pub fn child(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).to_vec()
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Position of `id` within its parent's children.
    #[must_use]
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_in_parent(id)?;
        let parent = self.parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_in_parent(id)?;
        let parent = self.parent(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// The kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.node_type.kind())
    }

    /// The node's tag name: the element name, or `#text` / `#fragment`.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| match &n.node_type {
            NodeType::Element(data) => data.tag_name.as_str(),
            NodeType::Text(_) => "#text",
            NodeType::Fragment => "#fragment",
        })
    }

    /// The node's own text: a text run, an element's collapsed text, or
    /// the empty string for fragments and unknown ids.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> &str {
        self.get(id).map_or("", |n| match &n.node_type {
            NodeType::Element(data) => data.text_content.as_str(),
            NodeType::Text(text) => text.as_str(),
            NodeType::Fragment => "",
        })
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
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
}

/// Bring element data in line with what the parser produces.
fn normalized(node_type: NodeType) -> NodeType {
    match node_type {
        NodeType::Element(mut data) => {
            while let Some(index) = data.attrs.keys().position(|name| name.eq_ignore_ascii_case("style")) {
                if let Some((_, value)) = data.attrs.shift_remove_index(index) {
                    data.styles.extend(parse_style_declarations(&value));
                }
            }
            if data.is_void() {
                data.text_content.clear();
            }
            NodeType::Element(data)
        }
        other => other,
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
