use std::str::Utf8Error;

use sprig_dom::DomError;
use thiserror::Error;

/// Errors raised while turning input into a tree.
///
/// Malformed markup is not an error in the default lenient mode; it is
/// recovered from and reported as a [`crate::ParseIssue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidInput(#[from] Utf8Error),

    /// The input is empty or only whitespace.
    #[error("cannot parse an empty HTML string")]
    EmptyInput,

    /// Neither a single node nor a fragment could be read from the input.
    #[error("cannot parse invalid HTML string")]
    UnparsableInput,

    /// The parsed records could not be placed in a tree.
    #[error("cannot build the parsed tree: {0}")]
    Build(#[from] DomError),

    /// A recoverable problem, rejected because strict mode is on.
    #[error("{message} (at byte {offset})")]
    Strict {
        /// Description of the problem.
        message: String,
        /// Byte offset into the trimmed input.
        offset: usize,
    },
}

/// Error of the HTML-accepting mutators, which parse and then mutate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The HTML argument could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The mutation itself was rejected.
    #[error(transparent)]
    Dom(#[from] DomError),
}
