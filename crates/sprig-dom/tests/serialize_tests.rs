//! Tests for HTML re-emission and snapshots.

use sprig_dom::{DomTree, ElementData, NodeId, NodeType};

#[test]
fn test_element_with_attrs_and_styles() {
    let mut data = ElementData::new("div");
    data.text_content = "Hello".to_string();
    let mut tree = DomTree::with_root(NodeType::Element(data));
    tree.set_attrs(NodeId::ROOT, [("id", Some("test")), ("class", Some("container"))])
        .unwrap()
        .set_style(NodeId::ROOT, "color", Some("red"))
        .unwrap();

    assert_eq!(
        tree.to_html(NodeId::ROOT),
        r#"<div id="test" class="container" style="color: red">Hello</div>"#
    );
}

#[test]
fn test_void_element_self_closes() {
    let mut tree = DomTree::with_root(NodeType::Element(ElementData::new("img")));
    tree.set_attrs(NodeId::ROOT, [("src", Some("test.jpg")), ("alt", Some("test"))])
        .unwrap();

    assert_eq!(tree.to_string(), r#"<img src="test.jpg" alt="test"/>"#);
}

#[test]
fn test_attribute_quotes_are_escaped() {
    let mut tree = DomTree::with_root(NodeType::Element(ElementData::new("div")));
    tree.set_attr(NodeId::ROOT, "data-value", Some(r#"Hello "World""#))
        .unwrap();

    assert_eq!(
        tree.to_html(NodeId::ROOT),
        r#"<div data-value="Hello &quot;World&quot;"></div>"#
    );
}

#[test]
fn test_text_is_verbatim() {
    let tree = DomTree::with_root(NodeType::Text("a < b & \"c\"".to_string()));
    assert_eq!(tree.to_html(NodeId::ROOT), "a < b & \"c\"");
}

#[test]
fn test_fragment_concatenates_children() {
    let mut tree = DomTree::new();
    let mut p = ElementData::new("p");
    p.text_content = "First".to_string();
    let p = tree.alloc(NodeType::Element(p));
    tree.append_child(NodeId::ROOT, p).unwrap();
    let text = tree.alloc(NodeType::Text(" and ".to_string()));
    tree.append_child(NodeId::ROOT, text).unwrap();
    let br = tree.alloc(NodeType::Element(ElementData::new("br")));
    tree.append_child(NodeId::ROOT, br).unwrap();

    assert_eq!(tree.to_html(NodeId::ROOT), "<p>First</p> and <br/>");
}

#[test]
fn test_text_content_precedes_children() {
    let mut div = ElementData::new("div");
    div.text_content = "Hi".to_string();
    let mut tree = DomTree::with_root(NodeType::Element(div));
    let span = tree.alloc(NodeType::Element(ElementData::new("span")));
    tree.insert_child(NodeId::ROOT, 0, span).unwrap();

    assert_eq!(tree.to_html(NodeId::ROOT), "<div>Hi<span></span></div>");
}

#[test]
fn test_detached_nodes_are_not_emitted() {
    let mut tree = DomTree::with_root(NodeType::Element(ElementData::new("ul")));
    let li = tree.alloc(NodeType::Element(ElementData::new("li")));
    tree.append_child(NodeId::ROOT, li).unwrap();
    tree.detach(li).unwrap();

    assert_eq!(tree.to_html(NodeId::ROOT), "<ul></ul>");
}

#[test]
fn test_snapshot_json() {
    let mut tree = DomTree::with_root(NodeType::Element(ElementData::new("div")));
    tree.set_attr(NodeId::ROOT, "id", Some("x"))
        .unwrap()
        .set_style(NodeId::ROOT, "font-size", Some("14px"))
        .unwrap();
    let text = tree.alloc(NodeType::Text("t".to_string()));
    tree.append_child(NodeId::ROOT, text).unwrap();

    let snapshot = tree.snapshot(NodeId::ROOT).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["tagName"], "div");
    assert_eq!(json["attributes"]["id"], "x");
    assert_eq!(json["styles"]["fontSize"], "14px");
    assert_eq!(json["children"][0]["tagName"], "#text");
    assert_eq!(json["children"][0]["textContent"], "t");
}

#[test]
fn test_deep_tree_serializes() {
    let depth = 20_000;
    let mut tree = DomTree::new();
    let mut parent = NodeId::ROOT;
    for _ in 0..depth {
        parent = tree
            .append_node(parent, NodeType::Element(ElementData::new("i")))
            .unwrap();
    }
    tree.append_node(parent, NodeType::Text("x".to_string())).unwrap();

    let expected = format!("{}x{}", "<i>".repeat(depth), "</i>".repeat(depth));
    assert_eq!(tree.to_html(NodeId::ROOT), expected);

    let mut snapshot = tree.snapshot(NodeId::ROOT).unwrap();
    let mut levels = 0;
    while let Some(child) = snapshot.children.pop() {
        assert!(snapshot.children.is_empty());
        snapshot = child;
        levels += 1;
    }
    assert_eq!(levels, depth + 1);
    assert_eq!(snapshot.text_content, "x");
}

#[test]
fn test_snapshot_keeps_child_order() {
    let mut tree = DomTree::new();
    for tag in ["a", "b", "c"] {
        let id = tree
            .append_node(NodeId::ROOT, NodeType::Element(ElementData::new(tag)))
            .unwrap();
        tree.append_node(id, NodeType::Text(tag.to_uppercase())).unwrap();
    }

    let snapshot = tree.snapshot(NodeId::ROOT).unwrap();

    let tags: Vec<_> = snapshot.children.iter().map(|c| c.tag_name.as_str()).collect();
    assert_eq!(tags, ["a", "b", "c"]);
    assert_eq!(snapshot.children[2].children[0].text_content, "C");
    assert!(tree.snapshot(NodeId(42)).is_none());
}
