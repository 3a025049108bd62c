//! Tag-level scanning.
//!
//! These helpers work on plain string slices and never allocate a tree:
//! recognizing an opening tag, finding the end tag that balances it, and
//! splitting an attribute list into attributes and inline styles.

/// Attribute list parsing, including `style` explosion.
pub mod attributes;
/// Opening-tag recognition at the start of a span.
pub mod open_tag;
/// Depth-counting search for a matching end tag.
pub mod tag_matcher;

pub use attributes::{ParsedAttributes, parse_attributes};
pub use open_tag::{OpenTag, match_open_tag};
pub use tag_matcher::{find_matching_close, has_close_tag};
