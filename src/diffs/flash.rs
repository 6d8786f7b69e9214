//! Flash: same shape as Zoom, but the bulk prefix/suffix trim is computed
//! over whole lines first; only the remaining middle span is then trimmed
//! character-by-character. Produces the same result as Zoom for most
//! inputs, but ties break differently when a boundary falls mid-line.

use crate::{operation::Op, utils::lines::split_lines_keep_ends};

use super::zoom::diff_chars;

pub fn diff(source: &str, destination: &str) -> Vec<Op> {
    let source_lines = split_lines_keep_ends(source);
    let destination_lines = split_lines_keep_ends(destination);

    let max_line_overlap = source_lines.len().min(destination_lines.len());

    let mut prefix_lines = 0;
    while prefix_lines < max_line_overlap && source_lines[prefix_lines] == destination_lines[prefix_lines] {
        prefix_lines += 1;
    }

    let mut suffix_lines = 0;
    while suffix_lines < max_line_overlap - prefix_lines
        && source_lines[source_lines.len() - 1 - suffix_lines]
            == destination_lines[destination_lines.len() - 1 - suffix_lines]
    {
        suffix_lines += 1;
    }

    let prefix_char_len: usize = source_lines[..prefix_lines]
        .iter()
        .map(|line| line.chars().count())
        .sum();
    let suffix_char_len: usize = source_lines[source_lines.len() - suffix_lines..]
        .iter()
        .map(|line| line.chars().count())
        .sum();

    let middle_source: Vec<char> = source_lines[prefix_lines..source_lines.len() - suffix_lines]
        .concat()
        .chars()
        .collect();
    let middle_destination: Vec<char> = destination_lines
        [prefix_lines..destination_lines.len() - suffix_lines]
        .concat()
        .chars()
        .collect();

    let mut ops = Vec::new();

    let middle_ops = diff_chars(&middle_source, &middle_destination);
    for (i, op) in middle_ops.into_iter().enumerate() {
        match op {
            Op::Retain(n) if i == 0 && prefix_char_len > 0 => {
                ops.push(Op::Retain(prefix_char_len + n));
            }
            other => ops.push(other),
        }
    }
    if prefix_char_len > 0 && !matches!(ops.first(), Some(Op::Retain(_))) {
        ops.insert(0, Op::Retain(prefix_char_len));
    }

    if suffix_char_len > 0 {
        match ops.last_mut() {
            Some(Op::Retain(n)) => *n += suffix_char_len,
            _ => ops.push(Op::Retain(suffix_char_len)),
        }
    }

    ops
}
