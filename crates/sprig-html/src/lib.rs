//! Lenient HTML fragment parser for the Sprig node tree.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tag scanning**: opening-tag recognition, attribute lists with
//!   `style` split into camelCase declarations, and depth-counted matching
//!   of same-name end tags
//! - **Tree construction**: one left-to-right pass turning a string into a
//!   [`DomTree`] rooted at an element, a text run, or a `#fragment`
//! - **String-driven mutation**: [`HtmlMutation`] adds `insert`, `before`
//!   and `after` that accept markup or another tree
//!
//! # Not Implemented
//!
//! - Comments, doctype, CDATA
//! - Raw-text handling for `<script>` and `<style>`
//! - Character reference decoding
//! - Implied end tags and mis-nesting repair
//!
//! # Example
//!
//! ```
//! use sprig_html::{HtmlMutation, NodeId, parse};
//!
//! let mut tree = parse("<ul><li>one</li></ul>").unwrap();
//! tree.insert(NodeId::ROOT, 1, "<li>two</li><li>three</li>")
//!     .unwrap()
//!     .set_attr(NodeId::ROOT, "id", Some("list"))
//!     .unwrap();
//!
//! assert_eq!(
//!     tree.to_string(),
//!     r#"<ul id="list"><li>one</li><li>two</li><li>three</li></ul>"#
//! );
//! ```

/// Indented tree dumps for debugging.
pub mod debug;
/// Parser and mutation error types.
pub mod error;
/// Markup-accepting `insert`/`before`/`after`.
pub mod mutation;
/// HTML parser and tree construction.
pub mod parser;
/// Tag-level scanning of HTML text.
pub mod tokenizer;

pub use debug::{dump_tree, print_tree};
pub use error::{Error, ParseError};
pub use mutation::{HtmlMutation, NodeSource};
pub use parser::{HtmlParser, ParseIssue, parse, parse_bytes};
pub use sprig_dom as dom;
pub use sprig_dom::{DomError, DomTree, ElementData, NodeId, NodeKind, NodeType};
