//! Tree construction from an HTML string.
//!
//! The parser scans the input once, left to right. Text runs and element
//! spans are collected as parse records, an element's content is
//! split the same way on an explicit stack of open elements, and the
//! finished records are moved into a [`sprig_dom::DomTree`] in a single pass.

/// HTML parser implementation.
pub mod tree_builder;
/// Transient parse records.
pub(crate) mod record;

pub use tree_builder::{HtmlParser, ParseIssue, parse, parse_bytes};
