//! The metadata layer: content snapshots, context anchors, integrity
//! checksum, and the `Diff` record that bundles them with an operation
//! sequence.

use sha2::{Digest, Sha256};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    diffs::{self, Algorithm},
    errors::{ApplyError, IntegrityError},
    operation::{apply, canonical_encoding, Op},
    utils::lines::split_lines_keep_ends,
};

/// Whether a `Diff` was captured against a complete document or a section of
/// a larger one. A hint for the apply path, not a guarantee: direct
/// application is always tried first regardless of this value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationType {
    RequiresFullSource,
    RequiresTruncatedSource,
}

/// Everything captured about a `Diff` at creation time, beyond the raw
/// operations themselves. Every field is meaningful on its own; a `Diff`
/// built without metadata (e.g. one parsed from a hand-written op list)
/// simply has `None` here, which disables undo, context location, and
/// integrity verification.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub source_start_line: usize,
    pub source_total_lines: usize,
    pub preceding_context: String,
    pub following_context: String,
    pub source_content: String,
    pub destination_content: String,
    pub algorithm_used: Algorithm,
    pub diff_hash: String,
    pub application_type: ApplicationType,
}

impl Metadata {
    fn capture(
        source: &str,
        destination: &str,
        ops: &[Op],
        algorithm_used: Algorithm,
        source_start_line: usize,
    ) -> Self {
        let source_lines = split_lines_keep_ends(source);
        let preceding_context = source_lines.first().copied().unwrap_or("").to_owned();
        let following_context = source_lines.last().copied().unwrap_or("").to_owned();

        let application_type = if source_start_line > 0 {
            ApplicationType::RequiresTruncatedSource
        } else {
            ApplicationType::RequiresFullSource
        };

        Metadata {
            source_start_line,
            source_total_lines: source_lines.len(),
            preceding_context,
            following_context,
            source_content: source.to_owned(),
            destination_content: destination.to_owned(),
            algorithm_used,
            diff_hash: checksum(ops),
            application_type,
        }
    }
}

/// SHA-256 over `canonical_encoding(ops)`, hex-encoded.
pub fn checksum(ops: &[Op]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_encoding(ops));
    hex::encode(hasher.finalize())
}

/// An ordered sequence of operations, optionally bound to the metadata
/// captured when it was created. Immutable after construction: nothing in
/// this crate mutates a `Diff`'s operations or metadata in place.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub operations: Vec<Op>,
    pub metadata: Option<Metadata>,
}

impl Diff {
    /// Runs `algorithm` (falling back to Zoom on verification failure, see
    /// `diffs::generate`) and captures full metadata for the result.
    pub fn create(
        source: &str,
        destination: &str,
        algorithm: Algorithm,
        source_start_line: Option<usize>,
    ) -> Self {
        let (operations, algorithm_used) = diffs::generate(source, destination, algorithm);
        let metadata = Metadata::capture(
            source,
            destination,
            &operations,
            algorithm_used,
            source_start_line.unwrap_or(0),
        );

        Diff { operations, metadata: Some(metadata) }
    }

    /// Applies this diff's operations directly to `source`, without
    /// involving the context locator. Callers that may be handed a larger
    /// document should go through `crate::apply` instead.
    pub fn apply_to(&self, source: &str) -> Result<String, ApplyError> {
        apply(source, &self.operations)
    }

    /// Recomputes the checksum over `operations` and compares it to the
    /// stored `diff_hash`. `false` if there is no metadata to compare
    /// against.
    pub fn verify(&self) -> bool {
        match &self.metadata {
            Some(metadata) => checksum(&self.operations) == metadata.diff_hash,
            None => false,
        }
    }

    /// `verify` plus a round-trip application of the stored content
    /// snapshots.
    pub fn verify_full(&self) -> bool {
        if !self.verify() {
            return false;
        }
        match &self.metadata {
            Some(metadata) => self
                .apply_to(&metadata.source_content)
                .map(|result| result == metadata.destination_content)
                .unwrap_or(false),
            None => false,
        }
    }

    /// Like `verify`, but reports why verification failed instead of
    /// collapsing it to `false`.
    pub fn verify_checked(&self) -> Result<(), IntegrityError> {
        let metadata = self.metadata.as_ref().ok_or(IntegrityError::ContentMismatch)?;
        let actual = checksum(&self.operations);
        if actual == metadata.diff_hash {
            Ok(())
        } else {
            Err(IntegrityError::ChecksumMismatch { expected: metadata.diff_hash.clone(), actual })
        }
    }

    /// Like `verify_full`, but reports why verification failed instead of
    /// collapsing it to `false`.
    pub fn verify_full_checked(&self) -> Result<(), IntegrityError> {
        self.verify_checked()?;
        let metadata = self.metadata.as_ref().ok_or(IntegrityError::ContentMismatch)?;
        let result = self
            .apply_to(&metadata.source_content)
            .map_err(|_| IntegrityError::ContentMismatch)?;
        if result == metadata.destination_content {
            Ok(())
        } else {
            Err(IntegrityError::ContentMismatch)
        }
    }

    /// Synthesizes a fresh diff with source/destination roles swapped, by
    /// re-running `metadata.algorithm_used` on the swapped pair rather than
    /// attempting to invert `operations` directly. `None` if this diff has
    /// no metadata (undo needs both content snapshots).
    pub fn make_undo(&self) -> Option<Diff> {
        let metadata = self.metadata.as_ref()?;
        Some(Diff::create(
            &metadata.destination_content,
            &metadata.source_content,
            metadata.algorithm_used,
            None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_create_captures_contexts_and_verifies() {
        let diff = Diff::create("Hello, world!", "Hello, Swift!", Algorithm::Zoom, None);
        assert_eq!(diff.apply_to("Hello, world!").unwrap(), "Hello, Swift!");
        assert!(diff.verify());
        assert!(diff.verify_full());

        let metadata = diff.metadata.unwrap();
        assert_eq!(metadata.preceding_context, "Hello, world!");
        assert_eq!(metadata.following_context, "Hello, world!");
        assert_eq!(metadata.source_total_lines, 1);
        assert_eq!(metadata.application_type, ApplicationType::RequiresFullSource);
    }

    #[test]
    fn test_verify_checked_reports_checksum_mismatch() {
        let mut diff = Diff::create("Hello, world!", "Hello, Swift!", Algorithm::Zoom, None);
        diff.operations.push(Op::Retain(0));
        if let Some(metadata) = diff.metadata.as_mut() {
            metadata.diff_hash = "not-a-real-hash".to_owned();
        }
        assert!(matches!(diff.verify_checked(), Err(IntegrityError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_source_start_line_implies_truncated_source() {
        let diff = Diff::create("body B", "body B updated", Algorithm::Megatron, Some(3));
        let metadata = diff.metadata.unwrap();
        assert_eq!(metadata.source_start_line, 3);
        assert_eq!(metadata.application_type, ApplicationType::RequiresTruncatedSource);
    }

    #[test]
    fn test_checksum_stable_across_runs() {
        let a = Diff::create("abc", "abd", Algorithm::Zoom, None);
        let b = Diff::create("abc", "abd", Algorithm::Zoom, None);
        assert_eq!(a.metadata.unwrap().diff_hash, b.metadata.unwrap().diff_hash);
    }

    #[test]
    fn test_checksum_distinguishes_different_operations() {
        let a = Diff::create("abc", "abd", Algorithm::Zoom, None);
        let b = Diff::create("abc", "abx", Algorithm::Zoom, None);
        assert_ne!(a.metadata.unwrap().diff_hash, b.metadata.unwrap().diff_hash);
    }

    #[test]
    fn test_undo_law() {
        let source = "func greet() {\n    print(\"Hello\")\n}\n";
        let destination = "func greet() {\n    print(\"Hello, World!\")\n}\n";
        let diff = Diff::create(source, destination, Algorithm::Megatron, None);
        let applied = diff.apply_to(source).unwrap();
        let undo = diff.make_undo().unwrap();
        assert_eq!(undo.apply_to(&applied).unwrap(), source);
    }

    #[test]
    fn test_undo_none_without_metadata() {
        let diff = Diff { operations: vec![Op::Retain(3)], metadata: None };
        assert!(diff.make_undo().is_none());
        assert!(!diff.verify());
    }

    #[test]
    fn test_multiline_first_and_last_line_contexts() {
        let source = "# Doc\n## Section A\nbody A\n";
        let diff = Diff::create(source, "# Doc\nbody\n", Algorithm::Megatron, None);
        let metadata = diff.metadata.unwrap();
        assert_eq!(metadata.preceding_context, "# Doc\n");
        assert_eq!(metadata.following_context, "body A\n");
        assert_eq!(metadata.source_total_lines, 3);
    }
}
