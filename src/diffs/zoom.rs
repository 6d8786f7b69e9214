//! Zoom: the fastest and coarsest generator. Bulk common-prefix/suffix
//! trim over characters, O(n).

use crate::{
    operation::Op,
    utils::{common_prefix_len::common_prefix_len, common_suffix_len::common_suffix_len},
};

pub fn diff(source: &str, destination: &str) -> Vec<Op> {
    let source_chars: Vec<char> = source.chars().collect();
    let destination_chars: Vec<char> = destination.chars().collect();

    diff_chars(&source_chars, &destination_chars)
}

/// Character-level bulk trim shared with Flash's middle-span refinement.
pub fn diff_chars(source: &[char], destination: &[char]) -> Vec<Op> {
    let max_overlap = source.len().min(destination.len());

    let prefix_len =
        common_prefix_len(source, 0..source.len(), destination, 0..destination.len())
            .min(max_overlap);
    let suffix_len = common_suffix_len(
        source,
        prefix_len..source.len(),
        destination,
        prefix_len..destination.len(),
    )
    .min(max_overlap - prefix_len);

    let mut ops = Vec::new();
    if prefix_len > 0 {
        ops.push(Op::Retain(prefix_len));
    }

    let delete_len = source.len() - prefix_len - suffix_len;
    if delete_len > 0 {
        ops.push(Op::Delete(delete_len));
    }

    let inserted: String = destination[prefix_len..destination.len() - suffix_len]
        .iter()
        .collect();
    if !inserted.is_empty() {
        ops.push(Op::Insert(inserted));
    }

    if suffix_len > 0 {
        ops.push(Op::Retain(suffix_len));
    }

    ops
}
