//! Starscream: line-unit diff. Splits source and destination into lines
//! (keeping terminators), computes a line-level LCS, and coalesces the
//! result into block-shaped Retain/Delete/Insert operations.

use crate::{operation::Op, raw_operation::RawOperation, tokenizer::line_tokenizer::line_tokenizer};

use super::{coalesce::coalesce, lcs::line_lcs};

pub fn diff(source: &str, destination: &str) -> Vec<Op> {
    let ops = line_ops(source, destination);
    to_char_ops(coalesce(ops))
}

/// The uncoalesced, one-entry-per-line LCS used both by Starscream/Optimus
/// and by the ASCII codec, which needs line granularity regardless of the
/// generator that originally produced a `Diff`'s operations.
pub fn line_ops(source: &str, destination: &str) -> Vec<RawOperation<String>> {
    let source_tokens = line_tokenizer(source);
    let destination_tokens = line_tokenizer(destination);
    line_lcs(&source_tokens, &destination_tokens)
}

/// Converts token-level `RawOperation`s (each wrapping whole lines) into the
/// character-counted `Op` sequence the facade exposes.
pub fn to_char_ops(ops: Vec<RawOperation<String>>) -> Vec<Op> {
    ops.into_iter()
        .filter_map(|op| {
            let length = op.original_text_length();
            match op {
                RawOperation::Equal(_) if length > 0 => Some(Op::Retain(length)),
                RawOperation::Equal(_) => None,
                RawOperation::Delete(_) if length > 0 => Some(Op::Delete(length)),
                RawOperation::Delete(_) => None,
                RawOperation::Insert(_) => {
                    let text = op.get_original_text();
                    if text.is_empty() { None } else { Some(Op::Insert(text)) }
                }
            }
        })
        .collect()
}
