//! Megatron: the hybrid generator. Runs Starscream's line-block LCS, then
//! post-processes `Delete(n) Insert(t)` pairs with high intra-line
//! similarity into a `Retain/Delete/Insert/Retain` micro-sequence derived
//! from Zoom applied to just that region — capturing semantic line-level
//! changes while preserving unchanged runs within the line. This is the
//! default algorithm (see the facade's `Algorithm::default`).

use crate::{operation::Op, raw_operation::RawOperation};

use super::{
    coalesce::coalesce,
    starscream::line_ops,
    zoom,
};
use crate::utils::{common_prefix_len::common_prefix_len, common_suffix_len::common_suffix_len};

/// Intra-line similarity threshold above which a delete/insert pair is
/// refined into a character-level micro-sequence rather than kept as a
/// blunt whole-block replace.
const INTRA_LINE_SIMILARITY_THRESHOLD: f64 = 0.5;

pub fn diff(source: &str, destination: &str) -> Vec<Op> {
    let blocks = coalesce(line_ops(source, destination));
    let mut ops = Vec::new();
    let mut i = 0;

    while i < blocks.len() {
        if let (RawOperation::Delete(_), Some(RawOperation::Insert(_))) =
            (&blocks[i], blocks.get(i + 1))
        {
            let old_text = blocks[i].get_original_text();
            let new_text = blocks[i + 1].get_original_text();
            let old_chars: Vec<char> = old_text.chars().collect();
            let new_chars: Vec<char> = new_text.chars().collect();

            if is_similar(&old_chars, &new_chars) {
                ops.extend(zoom::diff_chars(&old_chars, &new_chars));
            } else {
                if !old_chars.is_empty() {
                    ops.push(Op::Delete(old_chars.len()));
                }
                if !new_chars.is_empty() {
                    ops.push(Op::Insert(new_text));
                }
            }
            i += 2;
            continue;
        }

        push_block(&blocks[i], &mut ops);
        i += 1;
    }

    ops
}

fn push_block(block: &RawOperation<String>, ops: &mut Vec<Op>) {
    let length = block.original_text_length();
    match block {
        RawOperation::Equal(_) if length > 0 => ops.push(Op::Retain(length)),
        RawOperation::Equal(_) => {}
        RawOperation::Delete(_) if length > 0 => ops.push(Op::Delete(length)),
        RawOperation::Delete(_) => {}
        RawOperation::Insert(_) => {
            let text = block.get_original_text();
            if !text.is_empty() {
                ops.push(Op::Insert(text));
            }
        }
    }
}

/// `> 50% common prefix+suffix characters`, relative to the shorter side.
fn is_similar(old: &[char], new: &[char]) -> bool {
    if old.is_empty() || new.is_empty() {
        return false;
    }

    let max_overlap = old.len().min(new.len());
    let prefix = common_prefix_len(old, 0..old.len(), new, 0..new.len()).min(max_overlap);
    let suffix = common_suffix_len(old, prefix..old.len(), new, prefix..new.len())
        .min(max_overlap - prefix);

    let min_len = old.len().min(new.len());
    (prefix + suffix) as f64 / min_len as f64 > INTRA_LINE_SIMILARITY_THRESHOLD
}
