use std::fmt;

use serde::Serialize;

use crate::style::format_style;
use crate::{AttributesMap, DomTree, NodeId, NodeType, StylesMap};

/// Owned, serde-serializable view of a subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    /// Element name, `#text` or `#fragment`.
    pub tag_name: String,
    /// Text run or collapsed element text.
    pub text_content: String,
    /// Attributes in source order.
    pub attributes: AttributesMap,
    /// camelCase styles in source order.
    pub styles: StylesMap,
    /// Child snapshots in document order.
    pub children: Vec<NodeSnapshot>,
}

impl Drop for NodeSnapshot {
    fn drop(&mut self) {
        // Flatten deep subtrees so dropping them does not recurse.
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

impl DomTree {
    /// Re-emit the subtree rooted at `id` as HTML.
    ///
    /// Text is written verbatim; only attribute values are escaped
    /// (`"` becomes `&quot;`). Styles are written as a trailing
    /// `style="prop: value; ..."` attribute and void elements close with `/>`.
    #[must_use]
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let mut pending = vec![Emit::Node(id)];
        while let Some(step) = pending.pop() {
            let id = match step {
                Emit::Node(id) => id,
                Emit::Close(tag_name) => {
                    out.push_str("</");
                    out.push_str(tag_name);
                    out.push('>');
                    continue;
                }
            };
            let Some(node) = self.get(id) else {
                continue;
            };
            match &node.node_type {
                NodeType::Text(text) => out.push_str(text),
                NodeType::Fragment => {
                    pending.extend(node.children.iter().rev().map(|&child| Emit::Node(child)));
                }
                NodeType::Element(data) => {
                    out.push('<');
                    out.push_str(&data.tag_name);
                    for (name, value) in &data.attrs {
                        if name.eq_ignore_ascii_case("style") {
                            continue;
                        }
                        push_attribute(out, name, value);
                    }
                    if !data.styles.is_empty() {
                        push_attribute(out, "style", &format_style(&data.styles));
                    }
                    if data.is_void() {
                        out.push_str("/>");
                        continue;
                    }
                    out.push('>');
                    out.push_str(&data.text_content);
                    pending.push(Emit::Close(&data.tag_name));
                    pending.extend(node.children.iter().rev().map(|&child| Emit::Node(child)));
                }
            }
        }
    }

    /// Build an owned snapshot of the subtree rooted at `id`.
    #[must_use]
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        // Pre-order slots, each with the slot of its parent.
        let mut order: Vec<(NodeId, Option<usize>)> = Vec::new();
        let mut pending = vec![(id, None)];
        while let Some((node, parent)) = pending.pop() {
            let slot = order.len();
            order.push((node, parent));
            pending.extend(self.children(node).iter().rev().map(|&child| (child, Some(slot))));
        }

        // A node's descendants sit in later slots, so walking backwards
        // finishes every child before its parent. Children arrive last first.
        let mut built: Vec<Option<NodeSnapshot>> =
            order.iter().map(|&(node, _)| self.shallow_snapshot(node)).collect();
        for slot in (1..order.len()).rev() {
            let Some(mut snapshot) = built[slot].take() else {
                continue;
            };
            snapshot.children.reverse();
            if let Some(parent) = order[slot].1
                && let Some(parent) = built[parent].as_mut()
            {
                parent.children.push(snapshot);
            }
        }

        let mut root = built.into_iter().next().flatten()?;
        root.children.reverse();
        Some(root)
    }

    fn shallow_snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.get(id)?;
        let (attributes, styles) = match &node.node_type {
            NodeType::Element(data) => (data.attrs.clone(), data.styles.clone()),
            _ => (AttributesMap::new(), StylesMap::new()),
        };
        Some(NodeSnapshot {
            tag_name: self.tag_name(id)?.to_string(),
            text_content: self.text_content(id).to_string(),
            attributes,
            styles,
            children: Vec::with_capacity(node.children.len()),
        })
    }
}

/// Pending output of the serializer walk.
enum Emit<'a> {
    Node(NodeId),
    Close(&'a str),
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&value.replace('"', "&quot;"));
    out.push('"');
}

impl fmt::Display for DomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html(self.root()))
    }
}
