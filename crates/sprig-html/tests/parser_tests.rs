//! Integration tests for the HTML parser.

use sprig_html::{DomTree, HtmlParser, NodeId, NodeKind, ParseError, parse, parse_bytes};

/// Helper to parse HTML that is expected to succeed
fn parse_ok(html: &str) -> DomTree {
    parse(html).expect("parse failed")
}

/// Helper to collect the tag names of a node's children
fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&c| tree.tag_name(c).unwrap_or_default().to_string())
        .collect()
}

// ========== node kinds ==========

#[test]
fn test_single_root_element() {
    let tree = parse_ok(r#"<div class="container">Hello</div>"#);

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("div"));
    assert_eq!(tree.get_attr(NodeId::ROOT, "class"), Some("container"));
    assert_eq!(tree.text_content(NodeId::ROOT), "Hello");
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_nested_elements() {
    let tree = parse_ok("<div><p>Hello <strong>World</strong></p></div>");

    assert_eq!(child_tags(&tree, NodeId::ROOT), ["p"]);
    let p = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.text_content(p), "");
    assert_eq!(child_tags(&tree, p), ["#text", "strong"]);

    let text = tree.children(p)[0];
    let strong = tree.children(p)[1];
    assert_eq!(tree.text_content(text), "Hello ");
    assert_eq!(tree.text_content(strong), "World");
    assert_eq!(tree.parent(strong), Some(p));
    assert_eq!(tree.parent(p), Some(NodeId::ROOT));
}

#[test]
fn test_multi_root_fragment() {
    let tree = parse_ok("<p>First</p><div>Second</div><span>Third</span>");

    assert_eq!(tree.kind(NodeId::ROOT), Some(NodeKind::Fragment));
    assert_eq!(tree.tag_name(NodeId::ROOT), Some("#fragment"));
    assert_eq!(child_tags(&tree, NodeId::ROOT), ["p", "div", "span"]);
}

#[test]
fn test_void_elements_fragment() {
    let tree = parse_ok(r#"<img src="test.jpg" alt="test" /><br />"#);

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("#fragment"));
    assert_eq!(child_tags(&tree, NodeId::ROOT), ["img", "br"]);
    let img = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.get_attr(img, "src"), Some("test.jpg"));
}

#[test]
fn test_void_element_without_slash() {
    let tree = parse_ok(r#"<input type="text" disabled>"#);

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("input"));
    assert_eq!(tree.get_attr(NodeId::ROOT, "disabled"), Some(""));
    assert_eq!(tree.to_string(), r#"<input type="text" disabled=""/>"#);
}

#[test]
fn test_text_root() {
    let tree = parse_ok("Hello World");

    assert_eq!(tree.kind(NodeId::ROOT), Some(NodeKind::Text));
    assert_eq!(tree.tag_name(NodeId::ROOT), Some("#text"));
    assert_eq!(tree.text_content(NodeId::ROOT), "Hello World");
    assert!(tree.child(NodeId::ROOT).is_empty());
}

#[test]
fn test_mixed_text_and_tags() {
    let tree = parse_ok("Hello <strong>World</strong>!");

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("#fragment"));
    assert_eq!(child_tags(&tree, NodeId::ROOT), ["#text", "strong", "#text"]);
    let children = tree.child(NodeId::ROOT);
    assert_eq!(tree.text_content(children[0]), "Hello ");
    assert_eq!(tree.text_content(children[2]), "!");
}

#[test]
fn test_input_is_trimmed() {
    let tree = parse_ok("  \n <p>x</p>\n ");
    assert_eq!(tree.tag_name(NodeId::ROOT), Some("p"));
}

#[test]
fn test_tag_name_lowercased_attribute_case_kept() {
    let tree = parse_ok(r#"<DIV dataId="7">x</DIV>"#);

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("div"));
    assert_eq!(tree.get_attr(NodeId::ROOT, "dataId"), Some("7"));
    assert_eq!(tree.to_string(), r#"<div dataId="7">x</div>"#);
}

// ========== collapse ==========

#[test]
fn test_single_text_child_collapses() {
    let tree = parse_ok("<ul><li>one</li><li> </li></ul>");

    for li in tree.child(NodeId::ROOT) {
        assert!(tree.children(li).is_empty());
    }
    assert_eq!(tree.text_content(tree.children(NodeId::ROOT)[1]), " ");
}

#[test]
fn test_empty_element_has_no_children() {
    let tree = parse_ok("<div></div>");
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert_eq!(tree.text_content(NodeId::ROOT), "");
}

// ========== nesting ==========

#[test]
fn test_same_name_nesting() {
    let tree = parse_ok("<div><div>inner</div>tail</div><p>next</p>");

    assert_eq!(child_tags(&tree, NodeId::ROOT), ["div", "p"]);
    let outer = tree.children(NodeId::ROOT)[0];
    assert_eq!(child_tags(&tree, outer), ["div", "#text"]);
}

#[test]
fn test_prefix_named_sibling_does_not_nest() {
    let tree = parse_ok("<p><pre>code</pre></p>");

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("p"));
    assert_eq!(child_tags(&tree, NodeId::ROOT), ["pre"]);
}

#[test]
fn test_gt_inside_attribute_value() {
    let tree = parse_ok(r#"<a title="1 > 0" href=/x>link</a>"#);

    assert_eq!(tree.get_attr(NodeId::ROOT, "title"), Some("1 > 0"));
    assert_eq!(tree.get_attr(NodeId::ROOT, "href"), Some("/x"));
    assert_eq!(tree.text_content(NodeId::ROOT), "link");
}

// ========== styles ==========

#[test]
fn test_style_attribute_is_exploded() {
    let tree = parse_ok(r#"<div style="color: red; font-size: 14px;">Test</div>"#);

    assert_eq!(tree.get_style(NodeId::ROOT, "color"), Some("red"));
    assert_eq!(tree.get_style(NodeId::ROOT, "fontSize"), Some("14px"));
    assert_eq!(tree.get_style(NodeId::ROOT, "font-size"), Some("14px"));
    assert_eq!(tree.get_style(NodeId::ROOT, "background-color"), None);
    assert_eq!(tree.get_attr(NodeId::ROOT, "style"), None);
}

// ========== serialization round trips ==========

#[test]
fn test_round_trips() {
    for (input, expected) in [
        (r#"<div class="c">Hi</div>"#, r#"<div class="c">Hi</div>"#),
        (
            "<div><p>Hello <strong>World</strong></p></div>",
            "<div><p>Hello <strong>World</strong></p></div>",
        ),
        (r#"<img src="a.jpg" />"#, r#"<img src="a.jpg"/>"#),
        ("Hello World", "Hello World"),
        ("<p>First</p><div>Second</div>", "<p>First</p><div>Second</div>"),
        (
            r#"<div id="test" class="container" style="color: red;">Hello</div>"#,
            r#"<div id="test" class="container" style="color: red">Hello</div>"#,
        ),
    ] {
        assert_eq!(parse_ok(input).to_string(), expected, "{input}");
    }
}

// ========== errors ==========

#[test]
fn test_empty_input() {
    assert_eq!(parse("").unwrap_err(), ParseError::EmptyInput);
    assert_eq!(parse(" \n\t ").unwrap_err(), ParseError::EmptyInput);
}

#[test]
fn test_parse_bytes() {
    let tree = parse_bytes(b"<b>bold</b>").unwrap();
    assert_eq!(tree.tag_name(NodeId::ROOT), Some("b"));

    let err = parse_bytes(&[b'<', 0xff, b'>']).unwrap_err();
    assert!(matches!(err, ParseError::InvalidInput(_)));
}

// ========== leniency ==========

#[test]
fn test_unterminated_tag_absorbs_rest() {
    let (tree, issues) = HtmlParser::new("<div><p>").run_with_issues().unwrap();

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("div"));
    assert_eq!(child_tags(&tree, NodeId::ROOT), ["p"]);
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(|issue| !issue.is_error));
    assert_eq!(issues[0].offset, 0);
    assert_eq!(issues[1].offset, 5);
}

#[test]
fn test_stray_lt_is_dropped() {
    let (tree, issues) = HtmlParser::new("a < b").run_with_issues().unwrap();

    assert_eq!(tree.kind(NodeId::ROOT), Some(NodeKind::Text));
    assert_eq!(tree.text_content(NodeId::ROOT), "a ");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].offset, 2);
}

#[test]
fn test_stray_end_tag_inside_element() {
    let tree = parse_ok("<div>a</span>b</div>");

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("div"));
    assert_eq!(tree.text_content(NodeId::ROOT), "ab");
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_leading_end_tag_is_dropped() {
    let tree = parse_ok("</p>text");

    assert_eq!(tree.kind(NodeId::ROOT), Some(NodeKind::Fragment));
    assert_eq!(child_tags(&tree, NodeId::ROOT), ["#text"]);
    assert_eq!(tree.to_string(), "text");
}

#[test]
fn test_trailing_end_tag_keeps_single_root() {
    let (tree, issues) = HtmlParser::new("<div>a</div></div>").run_with_issues().unwrap();

    assert_eq!(tree.tag_name(NodeId::ROOT), Some("div"));
    assert_eq!(tree.to_string(), "<div>a</div>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].offset, 12);
}

#[test]
fn test_unparsable_input() {
    assert_eq!(parse("</p>").unwrap_err(), ParseError::UnparsableInput);
    assert_eq!(parse("<!-- c -->").unwrap_err(), ParseError::UnparsableInput);
    assert_eq!(parse("</div><!doctype html>").unwrap_err(), ParseError::UnparsableInput);
    assert_eq!(
        parse("</p>").unwrap_err().to_string(),
        "cannot parse invalid HTML string"
    );
}

#[test]
fn test_unparsable_input_in_strict_mode() {
    let err = HtmlParser::new("</p>").with_strict_mode().run().unwrap_err();
    assert!(matches!(err, ParseError::Strict { offset: 0, .. }));
}

#[test]
fn test_well_formed_input_has_no_issues() {
    let (_, issues) = HtmlParser::new("<ul><li>a</li><li>b<br></li></ul>")
        .run_with_issues()
        .unwrap();
    assert!(issues.is_empty());
}

#[test]
fn test_strict_mode_rejects_unterminated() {
    let err = HtmlParser::new("<div><p>").with_strict_mode().run().unwrap_err();

    let ParseError::Strict { message, offset } = err else {
        panic!("expected strict error, got {err:?}");
    };
    assert!(message.contains("<div>"));
    assert_eq!(offset, 0);
}

#[test]
fn test_strict_mode_accepts_well_formed() {
    let tree = HtmlParser::new("<p>a</p><p>b</p>")
        .with_strict_mode()
        .run()
        .unwrap();
    assert_eq!(child_tags(&tree, NodeId::ROOT), ["p", "p"]);
}

// ========== deep nesting ==========

#[test]
fn test_deep_nesting_round_trips() {
    let depth = 1000;
    let input = format!("{}{}", "<i>".repeat(depth), "</i>".repeat(depth));

    let (tree, issues) = HtmlParser::new(&input).run_with_issues().unwrap();

    assert!(issues.is_empty());
    assert_eq!(tree.tag_name(NodeId::ROOT), Some("i"));
    assert_eq!(tree.len(), depth);
    assert_eq!(tree.ancestors(NodeId(depth - 1)).count(), depth - 1);
    assert_eq!(tree.to_string(), input);
}

#[test]
fn test_deep_unterminated_nesting() {
    let depth = 20_000;
    let input = "<b>".repeat(depth);

    let (tree, issues) = HtmlParser::new(&input).run_with_issues().unwrap();

    assert_eq!(tree.len(), depth);
    assert_eq!(issues.len(), depth);
    assert_eq!(issues[1].offset, 3);
    assert_eq!(issues[depth - 1].offset, input.len() - 3);
    assert_eq!(tree.to_string(), format!("{input}{}", "</b>".repeat(depth)));
}

#[test]
fn test_dropped_span_ends_at_gt_or_next_lt() {
    let tree = parse_ok("<p>x < y <!-- note --> z</p>");

    assert_eq!(tree.text_content(NodeId::ROOT), "x  z");
}
