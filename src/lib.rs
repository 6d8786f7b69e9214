//! Multi-line text diffing: five interoperable generators, a context-aware
//! apply path that can locate a diff's source inside a larger document, and
//! a lossless ASCII patch codec.

pub mod ascii;
pub mod context_locator;
mod diffs;
mod errors;
mod metadata;
mod operation;
mod raw_operation;
mod tokenizer;
mod utils;

pub use ascii::{emit_ascii, parse_ascii};
pub use context_locator::{ContextLocatorConfig, locate_and_apply};
pub use diffs::Algorithm;
pub use errors::{ApplyError, IntegrityError, ParseError};
pub use metadata::{ApplicationType, Diff, Metadata};
pub use operation::Op;

/// Creates a diff from `source` to `destination` using `algorithm`, falling
/// back to Zoom if the requested algorithm's output fails verification (see
/// [`Algorithm`]). `source_start_line` is an optional hint used when
/// `source` is known to be a section of a larger document.
pub fn create(
    source: &str,
    destination: &str,
    algorithm: Algorithm,
    source_start_line: Option<usize>,
) -> Diff {
    Diff::create(source, destination, algorithm, source_start_line)
}

/// Applies `diff` to `document`. If `document` matches the diff's stored
/// source exactly (or the diff carries no metadata), applies directly;
/// otherwise invokes the context locator to find and patch the matching
/// section.
pub fn apply(document: &str, diff: &Diff) -> Result<String, ApplyError> {
    match &diff.metadata {
        Some(metadata) if document != metadata.source_content => context_locator::locate_and_apply(
            document,
            metadata,
            &diff.operations,
            &ContextLocatorConfig::default(),
        ),
        _ => diff.apply_to(document),
    }
}

/// Recomputes `diff`'s checksum and compares it to the stored `diff_hash`.
pub fn verify(diff: &Diff) -> bool { diff.verify() }

/// `verify` plus a round-trip application of the diff's stored content
/// snapshots.
pub fn verify_full(diff: &Diff) -> bool { diff.verify_full() }

/// Like `verify`, but reports why verification failed instead of collapsing
/// it to `false`.
pub fn verify_checked(diff: &Diff) -> Result<(), IntegrityError> { diff.verify_checked() }

/// Like `verify_full`, but reports why verification failed instead of
/// collapsing it to `false`.
pub fn verify_full_checked(diff: &Diff) -> Result<(), IntegrityError> { diff.verify_full_checked() }

/// Synthesizes a diff with source/destination roles swapped. `None` if
/// `diff` carries no metadata.
pub fn make_undo(diff: &Diff) -> Option<Diff> { diff.make_undo() }
