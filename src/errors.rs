//! Crate-wide error types.
//!
//! One rich, documented variant per failure mode rather than a single
//! stringly typed error, via `thiserror`.

use thiserror::Error;

/// Errors raised while applying operations to a source string, or while
/// locating a section of a larger document to apply them to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("retain({requested}) at position {position} exceeds {available} remaining characters")]
    RetainOverflow {
        position: usize,
        requested: usize,
        available: usize,
    },

    #[error("delete({requested}) at position {position} exceeds {available} remaining characters")]
    DeleteOverflow {
        position: usize,
        requested: usize,
        available: usize,
    },

    #[error("operations ended with {remaining} source character(s) neither retained nor deleted")]
    UnconsumedSource { remaining: usize },

    #[error("no sub-range of the document matches the diff's captured source")]
    SectionNotFound,

    #[error("{candidate_count} equally-confident sub-ranges match the diff's captured source")]
    AmbiguousMatch { candidate_count: usize },
}

/// Errors raised while parsing the ASCII patch format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line_number}: unrecognized prefix {prefix:?}")]
    InvalidPrefix { line_number: usize, prefix: String },

    #[error("line {line_number}: malformed line {content:?}")]
    InvalidFormat { line_number: usize, content: String },

    #[error("patch text is empty")]
    EmptyPatch,
}

/// Errors surfaced by the `*_checked` integrity helpers. The boolean
/// `verify`/`verify_full` facade functions stay boolean per the facade
/// contract; these richer variants are for callers who want the reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("applying the diff to its stored source did not reproduce its stored destination")]
    ContentMismatch,
}
