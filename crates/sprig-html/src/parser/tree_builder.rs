use std::collections::HashMap;

use sprig_common::warning::warn_once;
use sprig_dom::{DomTree, ElementData, NodeId, NodeType, is_void_element};

use super::record::NodeRecord;
use crate::error::ParseError;
use crate::tokenizer::{
    OpenTag, ParsedAttributes, find_matching_close, has_close_tag, match_open_tag, parse_attributes,
};

/// A problem in the markup that the parser recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Description of the problem.
    pub message: String,
    /// Byte offset into the trimmed input where the problem starts.
    pub offset: usize,
    /// True when the issue was raised in strict mode and aborted the parse.
    pub is_error: bool,
}

/// Lenient parser from an HTML string to a [`DomTree`].
///
/// The whole input is read in one left-to-right pass. Top-level spans
/// become the children of a `#fragment` root, unless the input is exactly
/// one element or one text run, which then becomes the root itself.
///
/// Unterminated elements swallow the rest of their input and a `<` that
/// does not open a tag is dropped through its `>` (or up to the next `<`).
/// Both are reported as [`ParseIssue`]s; [`HtmlParser::with_strict_mode`]
/// turns them into errors.
#[derive(Debug, Clone)]
pub struct HtmlParser<'a> {
    /// Input as given; leading and trailing whitespace is ignored.
    input: &'a str,

    /// Parse issues encountered so far.
    issues: Vec<ParseIssue>,

    /// If true, the first issue aborts the parse.
    strict_mode: bool,

    /// Per tag name, a document range `(start, end)` known to hold no end tag.
    unclosed: HashMap<String, (usize, usize)>,
}

impl<'a> HtmlParser<'a> {
    /// Create a parser for `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            issues: Vec::new(),
            strict_mode: false,
            unclosed: HashMap::new(),
        }
    }

    /// Enable strict mode: recoverable markup problems become errors.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Record a recovered problem.
    ///
    /// Logs via sprig-common's warning system and stores the issue for later retrieval.
    fn parse_warning(&mut self, message: String, offset: usize) {
        warn_once("HTML Parser", &message);
        self.issues.push(ParseIssue {
            message,
            offset,
            is_error: self.strict_mode,
        });
    }

    /// Run the parser and return the tree.
    ///
    /// # Errors
    ///
    /// See [`HtmlParser::run_with_issues`].
    pub fn run(self) -> Result<DomTree, ParseError> {
        self.run_with_issues().map(|(tree, _)| tree)
    }

    /// Run the parser and return both the tree and any recovered problems.
    ///
    /// # Errors
    ///
    /// [`ParseError::EmptyInput`] for blank input, [`ParseError::Strict`]
    /// for the first issue in strict mode, and
    /// [`ParseError::UnparsableInput`] if nothing could be read.
    pub fn run_with_issues(mut self) -> Result<(DomTree, Vec<ParseIssue>), ParseError> {
        let input = self.input.trim();
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // The input is a single node only if it is text or opens with a tag.
        let single = !input.starts_with('<') || match_open_tag(input).is_some();
        let mut records = self.split_fragment(input, 0);

        if self.strict_mode
            && let Some(issue) = self.issues.first()
        {
            return Err(ParseError::Strict {
                message: issue.message.clone(),
                offset: issue.offset,
            });
        }

        let tree = if single
            && records.len() == 1
            && let Some(record) = records.pop()
        {
            record.into_tree()?
        } else if records.is_empty() {
            return Err(ParseError::UnparsableInput);
        } else {
            let mut tree = DomTree::new();
            for record in records {
                record.attach(&mut tree, NodeId::ROOT)?;
            }
            tree
        };
        Ok((tree, self.issues))
    }

    /// Split `input` into its top-level records.
    ///
    /// `base` is the offset of `input` within the whole document. Open
    /// elements are kept on an explicit stack, so nesting depth is bounded
    /// by memory rather than by the call stack.
    fn split_fragment(&mut self, input: &str, base: usize) -> Vec<NodeRecord> {
        let mut stack = vec![Frame::new(None, input, base)];

        while let Some(frame) = stack.last_mut() {
            if frame.cursor < frame.content.len() {
                if let Some(child) = self.scan_span(frame) {
                    stack.push(child);
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let Some(data) = done.element else {
                return done.records;
            };
            let record = NodeRecord::element(data, done.records).collapse_single_text();
            if let Some(parent) = stack.last_mut() {
                parent.records.push(record);
            }
        }
        Vec::new()
    }

    /// Consume the next span of `frame`.
    ///
    /// Text is added to the frame's records. An opening tag yields the
    /// frame for its content, which the caller finishes first.
    fn scan_span<'s>(&mut self, frame: &mut Frame<'s>) -> Option<Frame<'s>> {
        let rest = &frame.content[frame.cursor..];
        match rest.find('<') {
            None => {
                push_text(&mut frame.records, rest);
                frame.cursor = frame.content.len();
                return None;
            }
            Some(0) => {}
            Some(at) => {
                push_text(&mut frame.records, &rest[..at]);
                frame.cursor += at;
                return None;
            }
        }

        let offset = frame.base + frame.cursor;
        let Some(open) = match_open_tag(rest) else {
            // Nothing can be built here: skip through the `>` that ends
            // this tag-like span, or up to the next `<` if none does.
            let next_lt = rest[1..].find('<').map_or(rest.len(), |at| at + 1);
            let len = rest[..next_lt].find('>').map_or(next_lt, |gt| gt + 1);
            self.parse_warning("'<' does not start a tag, markup dropped".to_string(), offset);
            frame.cursor += len;
            return None;
        };

        let (child, consumed) = self.parse_element(rest, &open, offset);
        frame.cursor += consumed;
        Some(child)
    }

    /// Open the element started by `open` at the start of `input`.
    ///
    /// Returns the frame for its content and the number of bytes the whole
    /// element spans.
    fn parse_element<'s>(&mut self, input: &'s str, open: &OpenTag<'_>, base: usize) -> (Frame<'s>, usize) {
        let ParsedAttributes { attrs, styles } = parse_attributes(open.attributes);
        let data = ElementData {
            tag_name: open.name.to_ascii_lowercase(),
            attrs,
            styles,
            text_content: String::new(),
        };
        let content_base = base + open.len;

        // Void elements have no content, whatever the tag was terminated with.
        if is_void_element(&data.tag_name) {
            return (Frame::new(Some(data), "", content_base), open.len);
        }

        let (content, consumed) = match self.find_close(input, &data.tag_name, open.len, base) {
            Some(close) => (&input[open.len..close], close + data.tag_name.len() + 3),
            None => {
                self.parse_warning(
                    format!("unterminated <{}> absorbs the rest of its input", data.tag_name),
                    base,
                );
                (&input[open.len..], input.len())
            }
        };
        (Frame::new(Some(data), content, content_base), consumed)
    }

    /// [`find_matching_close`] for an element at document offset `base`.
    ///
    /// Unterminated elements nested in one another would otherwise rescan
    /// the same tail of the input once per level.
    fn find_close(&mut self, input: &str, tag_name: &str, from: usize, base: usize) -> Option<usize> {
        let (start, end) = (base + from, base + input.len());
        if let Some(&(known_start, known_end)) = self.unclosed.get(tag_name)
            && known_start <= start
            && end <= known_end
        {
            return None;
        }

        let close = find_matching_close(input, tag_name, from);
        if close.is_none() && !has_close_tag(input, tag_name, from) {
            self.unclosed.insert(tag_name.to_string(), (start, end));
        }
        close
    }
}

/// An element whose content is still being split.
#[derive(Debug)]
struct Frame<'s> {
    /// The element being built, `None` for the top level.
    element: Option<ElementData>,
    /// The element's content.
    content: &'s str,
    /// Offset of `content` in the whole document.
    base: usize,
    /// Bytes of `content` consumed so far.
    cursor: usize,
    records: Vec<NodeRecord>,
}

impl<'s> Frame<'s> {
    const fn new(element: Option<ElementData>, content: &'s str, base: usize) -> Self {
        Self {
            element,
            content,
            base,
            cursor: 0,
            records: Vec::new(),
        }
    }
}

/// Append a text run, merging it into a preceding text record.
fn push_text(records: &mut Vec<NodeRecord>, text: &str) {
    if let Some(NodeRecord {
        node_type: NodeType::Text(last),
        ..
    }) = records.last_mut()
    {
        last.push_str(text);
    } else {
        records.push(NodeRecord::text(text));
    }
}

/// Parse an HTML string leniently.
///
/// # Errors
///
/// [`ParseError::EmptyInput`] for blank input and
/// [`ParseError::UnparsableInput`] when no node can be read from it.
///
/// # Example
/// ```
/// let tree = sprig_html::parse(r#"<div class="c">Hi</div>"#).unwrap();
/// assert_eq!(tree.to_string(), r#"<div class="c">Hi</div>"#);
/// ```
pub fn parse(html: &str) -> Result<DomTree, ParseError> {
    HtmlParser::new(html).run()
}

/// Parse UTF-8 encoded HTML leniently.
///
/// # Errors
///
/// [`ParseError::InvalidInput`] if `bytes` are not UTF-8, otherwise as [`parse`].
pub fn parse_bytes(bytes: &[u8]) -> Result<DomTree, ParseError> {
    parse(std::str::from_utf8(bytes)?)
}
