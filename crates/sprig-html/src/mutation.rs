//! Tree mutation driven by HTML text.
//!
//! [`HtmlMutation`] extends [`DomTree`] with `insert`, `before` and `after`
//! that accept either markup or an already-built tree. Markup is parsed with
//! the default lenient parser; a `#fragment` result contributes each of its
//! children as a separate sibling.

use sprig_dom::{DomTree, NodeId};

use crate::error::{Error, ParseError};
use crate::parser::parse;

/// Content to add to a tree.
#[derive(Debug, Clone)]
pub enum NodeSource {
    /// Markup, parsed on insertion.
    Html(String),
    /// A tree whose reachable nodes are copied in.
    Tree(DomTree),
}

impl NodeSource {
    /// Turn the source into a tree, parsing markup if needed.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] from parsing the markup.
    pub fn into_tree(self) -> Result<DomTree, ParseError> {
        match self {
            Self::Html(html) => parse(&html),
            Self::Tree(tree) => Ok(tree),
        }
    }
}

impl From<&str> for NodeSource {
    fn from(html: &str) -> Self {
        Self::Html(html.to_string())
    }
}

impl From<String> for NodeSource {
    fn from(html: String) -> Self {
        Self::Html(html)
    }
}

impl From<DomTree> for NodeSource {
    fn from(tree: DomTree) -> Self {
        Self::Tree(tree)
    }
}

/// Insertion of markup or trees relative to a node.
///
/// Every method validates the target before parsing, so a call that fails
/// for structural reasons never parses (or warns about) its argument.
pub trait HtmlMutation {
    /// Insert `node` into `parent` at `position` (`0..=len`).
    ///
    /// # Errors
    ///
    /// [`sprig_dom::DomError::InvalidPosition`] for an out-of-range
    /// position, [`sprig_dom::DomError::UnsupportedOperation`] for text and
    /// void parents, or a [`ParseError`] from the markup.
    fn insert(
        &mut self,
        parent: NodeId,
        position: usize,
        node: impl Into<NodeSource>,
    ) -> Result<&mut Self, Error>;

    /// Insert `node` right before `target`, as its sibling.
    ///
    /// # Errors
    ///
    /// [`sprig_dom::DomError::NoParent`] if `target` has no parent, or a
    /// [`ParseError`] from the markup.
    fn before(&mut self, target: NodeId, node: impl Into<NodeSource>) -> Result<&mut Self, Error>;

    /// Insert `node` right after `target`, as its sibling.
    ///
    /// # Errors
    ///
    /// As [`HtmlMutation::before`].
    fn after(&mut self, target: NodeId, node: impl Into<NodeSource>) -> Result<&mut Self, Error>;
}

impl HtmlMutation for DomTree {
    fn insert(
        &mut self,
        parent: NodeId,
        position: usize,
        node: impl Into<NodeSource>,
    ) -> Result<&mut Self, Error> {
        self.check_position(parent, position)?;
        let tree = node.into().into_tree()?;
        Ok(self.insert_tree(parent, position, tree)?)
    }

    fn before(&mut self, target: NodeId, node: impl Into<NodeSource>) -> Result<&mut Self, Error> {
        let _ = self.sibling_position(target)?;
        let tree = node.into().into_tree()?;
        Ok(self.insert_tree_before(target, tree)?)
    }

    fn after(&mut self, target: NodeId, node: impl Into<NodeSource>) -> Result<&mut Self, Error> {
        let _ = self.sibling_position(target)?;
        let tree = node.into().into_tree()?;
        Ok(self.insert_tree_after(target, tree)?)
    }
}
