use std::mem;

use sprig_dom::{DomError, DomTree, ElementData, NodeId, NodeType};

/// A parsed node before it is placed in a [`DomTree`].
///
/// Records only live for the duration of one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Payload of the node.
    pub node_type: NodeType,
    /// Parsed children in document order.
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    /// A `#text` record.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Text(text.into()),
            children: Vec::new(),
        }
    }

    /// An element record with the given children.
    pub const fn element(data: ElementData, children: Vec<Self>) -> Self {
        Self {
            node_type: NodeType::Element(data),
            children,
        }
    }

    /// Fold a lone text child into the element's own `text_content`.
    #[must_use]
    pub fn collapse_single_text(mut self) -> Self {
        if let [only] = self.children.as_mut_slice()
            && let NodeType::Text(text) = &mut only.node_type
            && let NodeType::Element(data) = &mut self.node_type
        {
            data.text_content = mem::take(text);
            self.children.clear();
        }
        self
    }

    /// Build a tree rooted at this record.
    ///
    /// # Errors
    ///
    /// [`DomError`] if a record has children it cannot hold.
    pub fn into_tree(mut self) -> Result<DomTree, DomError> {
        let mut tree = DomTree::with_root(mem::replace(&mut self.node_type, NodeType::Fragment));
        for child in mem::take(&mut self.children) {
            child.attach(&mut tree, NodeId::ROOT)?;
        }
        Ok(tree)
    }

    /// Allocate this record and its subtree under `parent`.
    ///
    /// # Errors
    ///
    /// As [`DomTree::append_node`].
    pub fn attach(self, tree: &mut DomTree, parent: NodeId) -> Result<(), DomError> {
        let mut pending = vec![(self, parent)];
        while let Some((mut record, parent)) = pending.pop() {
            let id = tree.append_node(parent, mem::replace(&mut record.node_type, NodeType::Fragment))?;
            pending.extend(mem::take(&mut record.children).into_iter().rev().map(|child| (child, id)));
        }
        Ok(())
    }
}

impl Drop for NodeRecord {
    fn drop(&mut self) {
        // Flatten deep nesting so dropping it does not recurse.
        let mut pending = mem::take(&mut self.children);
        while let Some(mut record) = pending.pop() {
            pending.append(&mut record.children);
        }
    }
}
