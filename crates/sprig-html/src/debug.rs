use std::fmt::Write as _;

use sprig_dom::{DomTree, NodeId, NodeType, format_style};

/// Render a subtree as an indented outline, one node per line.
///
/// Elements show their attributes and styles, an element's collapsed text
/// is shown on the next line, and text runs are quoted with newlines
/// escaped and spaces made visible.
#[must_use]
pub fn dump_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    let mut pending = vec![(id, 0)];
    while let Some((id, indent)) = pending.pop() {
        write_node(tree, id, indent, &mut out);
        pending.extend(tree.children(id).iter().rev().map(|&child| (child, indent + 1)));
    }
    out
}

/// Print a node tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", dump_tree(tree, id));
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match node.node_type() {
        NodeType::Fragment => {
            let _ = writeln!(out, "{prefix}#fragment");
        }
        NodeType::Element(data) => {
            let mut attrs: Vec<String> = data
                .attrs
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        k.clone()
                    } else {
                        format!("{k}=\"{v}\"")
                    }
                })
                .collect();
            if !data.styles.is_empty() {
                attrs.push(format!("style=\"{}\"", format_style(&data.styles)));
            }
            if attrs.is_empty() {
                let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
            } else {
                let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "));
            }
            if !data.text_content.is_empty() {
                let _ = writeln!(out, "{prefix}  {}", quoted(&data.text_content));
            }
        }
        NodeType::Text(text) => {
            let _ = writeln!(out, "{prefix}{}", quoted(text));
        }
    }
}

fn quoted(text: &str) -> String {
    let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
    format!("\"{display}\"")
}
