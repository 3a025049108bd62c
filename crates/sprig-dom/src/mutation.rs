use crate::{DomError, DomTree, NodeId, NodeKind, NodeType};

impl DomTree {
    /// Checks that `parent` can take a new child at `position`.
    ///
    /// `position` must lie in `0..=len`; `#text` nodes and void elements
    /// never take children.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`], [`DomError::UnsupportedOperation`] or
    /// [`DomError::InvalidPosition`].
    pub fn check_position(&self, parent: NodeId, position: usize) -> Result<(), DomError> {
        let node = self.get(parent).ok_or(DomError::UnknownNode(parent))?;
        match &node.node_type {
            NodeType::Text(_) => {
                return Err(DomError::UnsupportedOperation {
                    operation: "insert children",
                    target: "#text".to_string(),
                });
            }
            NodeType::Element(data) if data.is_void() => {
                return Err(DomError::UnsupportedOperation {
                    operation: "insert children",
                    target: format!("<{}>", data.tag_name),
                });
            }
            _ => {}
        }
        let len = node.children.len();
        if position > len {
            return Err(DomError::InvalidPosition { position, len });
        }
        Ok(())
    }

    /// Locates `target` among its parent's children.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`], [`DomError::NoParent`], or
    /// [`DomError::NodeNotFound`] if the back-reference is stale.
    pub fn sibling_position(&self, target: NodeId) -> Result<(NodeId, usize), DomError> {
        if !self.contains(target) {
            return Err(DomError::UnknownNode(target));
        }
        let parent = self.parent(target).ok_or(DomError::NoParent)?;
        let index = self
            .children(parent)
            .iter()
            .position(|&c| c == target)
            .ok_or(DomError::NodeNotFound)?;
        Ok((parent, index))
    }

    /// Inserts the detached node `child` into `parent` at `position`.
    ///
    /// # Errors
    ///
    /// Fails as [`DomTree::check_position`] does, and with
    /// [`DomError::InvalidArgument`] if `child` is still attached, would
    /// become its own ancestor, or is a `#fragment`.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        position: usize,
        child: NodeId,
    ) -> Result<&mut Self, DomError> {
        self.check_position(parent, position)?;
        if !self.contains(child) {
            return Err(DomError::UnknownNode(child));
        }
        if self.parent(child).is_some() {
            return Err(DomError::InvalidArgument(format!(
                "{child:?} already has a parent; detach it first"
            )));
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(DomError::InvalidArgument(format!(
                "{child:?} cannot be inserted into its own subtree"
            )));
        }
        if self.kind(child) == Some(NodeKind::Fragment) {
            return Err(DomError::InvalidArgument(
                "a #fragment cannot be a child; insert its children instead".to_string(),
            ));
        }
        self.splice(parent, position, &[child]);
        Ok(self)
    }

    /// Allocates a node and appends it as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// As [`DomTree::check_position`], and [`DomError::InvalidArgument`]
    /// for a `#fragment` payload.
    pub fn append_node(&mut self, parent: NodeId, node_type: NodeType) -> Result<NodeId, DomError> {
        self.check_position(parent, self.children(parent).len())?;
        if matches!(node_type, NodeType::Fragment) {
            return Err(DomError::InvalidArgument(
                "a #fragment cannot be a child".to_string(),
            ));
        }
        let id = self.alloc(node_type);
        self.push_child(parent, id);
        Ok(id)
    }

    /// Inserts the detached node `new_child` into `parent` just before `reference`.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] if `reference` is not a child of `parent`,
    /// otherwise as [`DomTree::insert_child`].
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: NodeId,
    ) -> Result<&mut Self, DomError> {
        let index = self
            .children(parent)
            .iter()
            .position(|&c| c == reference)
            .ok_or(DomError::NodeNotFound)?;
        self.insert_child(parent, index, new_child)
    }

    /// Removes `child` from `parent`, clearing its back-reference.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<&mut Self, DomError> {
        let node = self.get_mut(parent).ok_or(DomError::UnknownNode(parent))?;
        let index = node
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(DomError::NodeNotFound)?;
        let _ = node.children.remove(index);
        self.nodes[child.0].parent = None;
        Ok(self)
    }

    /// Detaches `id` from its parent. The node and its subtree keep their
    /// arena slots but are no longer reachable from the root.
    ///
    /// # Errors
    ///
    /// [`DomError::NoParent`] if the node is already detached (or is the root).
    pub fn detach(&mut self, id: NodeId) -> Result<&mut Self, DomError> {
        let (parent, _) = self.sibling_position(id)?;
        self.remove_child(parent, id)
    }

    /// Copies the reachable nodes of `other` into this arena, unattached.
    ///
    /// A `#fragment` root is transparent: its children are imported in order
    /// instead of the fragment itself. Returns the ids of the imported tops.
    pub fn graft(&mut self, other: &Self) -> Vec<NodeId> {
        let root = other.root();
        if matches!(other.nodes[root.0].node_type, NodeType::Fragment) {
            other
                .children(root)
                .iter()
                .map(|&child| self.import(other, child))
                .collect()
        } else {
            vec![self.import(other, root)]
        }
    }

    /// Moves the contents of `other` into `parent` starting at `position`.
    ///
    /// A `#fragment` contributes each of its children as a separate sibling.
    ///
    /// # Errors
    ///
    /// As [`DomTree::check_position`].
    pub fn insert_tree(
        &mut self,
        parent: NodeId,
        position: usize,
        other: Self,
    ) -> Result<&mut Self, DomError> {
        self.check_position(parent, position)?;
        let tops = self.graft(&other);
        self.splice(parent, position, &tops);
        Ok(self)
    }

    /// Moves the contents of `other` in front of `target`, as its siblings.
    ///
    /// # Errors
    ///
    /// [`DomError::NoParent`] if `target` is detached or is the root.
    pub fn insert_tree_before(&mut self, target: NodeId, other: Self) -> Result<&mut Self, DomError> {
        let (parent, index) = self.sibling_position(target)?;
        self.insert_tree(parent, index, other)
    }

    /// Moves the contents of `other` right after `target`, as its siblings.
    ///
    /// # Errors
    ///
    /// [`DomError::NoParent`] if `target` is detached or is the root.
    pub fn insert_tree_after(&mut self, target: NodeId, other: Self) -> Result<&mut Self, DomError> {
        let (parent, index) = self.sibling_position(target)?;
        self.insert_tree(parent, index + 1, other)
    }

    /// Copy of this tree holding only the nodes reachable from the root.
    ///
    /// Detached nodes are left behind, so the copy may be smaller. Nodes are
    /// renumbered; ids taken from this tree do not carry over.
    #[must_use]
    pub fn compacted(&self) -> Self {
        let root = self.root();
        let mut tree = Self::with_root(self.nodes[root.0].node_type.clone());
        self.copy_children(&mut tree, root, NodeId::ROOT);
        tree
    }

    fn import(&mut self, other: &Self, id: NodeId) -> NodeId {
        let copy = self.alloc(other.nodes[id.0].node_type.clone());
        other.copy_children(self, id, copy);
        copy
    }

    /// Copies the subtrees below `from` in this tree under `to` in `target`.
    fn copy_children(&self, target: &mut Self, from: NodeId, to: NodeId) {
        let mut pending = vec![(from, to)];
        while let Some((source, copy)) = pending.pop() {
            for &child in &self.nodes[source.0].children {
                let imported = target.alloc(self.nodes[child.0].node_type.clone());
                target.push_child(copy, imported);
                pending.push((child, imported));
            }
        }
    }

    fn splice(&mut self, parent: NodeId, position: usize, ids: &[NodeId]) {
        for (offset, &id) in ids.iter().enumerate() {
            self.nodes[parent.0].children.insert(position + offset, id);
            self.nodes[id.0].parent = Some(parent);
        }
    }
}
