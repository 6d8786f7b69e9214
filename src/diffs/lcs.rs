//! The line-LCS sub-algorithm selection ladder used by Starscream, Optimus,
//! and Megatron. Correctness never depends on which branch is taken (each
//! produces a valid, order-preserving common subsequence); the branches only
//! trade off speed for optimality, and every generator that calls
//! [`line_lcs`] is itself wrapped by the verification-and-fallback guard in
//! `diffs::generate`, so a suboptimal (but still correct) match here can
//! never surface an incorrect diff to a caller.

use std::{collections::BTreeMap, collections::HashMap, collections::HashSet, fmt::Debug};

use crate::{
    raw_operation::RawOperation,
    tokenizer::token::Token,
    utils::{common_prefix_len::common_prefix_len, common_suffix_len::common_suffix_len},
};

use super::myers::myers_diff;

const DIRECT_DIMENSION_LIMIT: usize = 3;
const MYERS_DIMENSION_LIMIT: usize = 200;
const SIMILARITY_THRESHOLD: f64 = 0.8;
const LOOKAHEAD: usize = 3;

/// Selects and runs one of four sub-algorithms, in order: direct comparison
/// for tiny inputs, a bounded linear scan for highly similar inputs, Myers'
/// algorithm for inputs bounded in both dimensions, and patience-sorting LCS
/// otherwise.
pub fn line_lcs<T>(old: &[Token<T>], new: &[Token<T>]) -> Vec<RawOperation<T>>
where
    T: PartialEq + Clone + Debug + std::hash::Hash + Eq,
{
    if old.len() <= DIRECT_DIMENSION_LIMIT && new.len() <= DIRECT_DIMENSION_LIMIT {
        return direct_lcs(old, new);
    }

    if estimate_similarity(old, new) > SIMILARITY_THRESHOLD {
        if let Some(ops) = bounded_linear_scan(old, new, LOOKAHEAD) {
            return ops;
        }
    }

    if old.len() <= MYERS_DIMENSION_LIMIT && new.len() <= MYERS_DIMENSION_LIMIT {
        return myers_diff(old, new);
    }

    patience_lcs(old, new)
}

/// Fraction of `old`'s tokens whose normalized content also occurs somewhere
/// in `new`. Cheap O(n+m) estimate used only to decide whether the bounded
/// linear scan is worth attempting.
fn estimate_similarity<T>(old: &[Token<T>], new: &[Token<T>]) -> f64
where
    T: PartialEq + Clone + Debug + std::hash::Hash + Eq,
{
    if old.is_empty() {
        return 0.0;
    }
    let new_set: HashSet<&T> = new.iter().map(Token::normalized).collect();
    let shared = old
        .iter()
        .filter(|token| new_set.contains(token.normalized()))
        .count();
    shared as f64 / old.len() as f64
}

/// Direct O(NM) table-based LCS, adapted from `similar`'s LCS algorithm.
/// Used only for the smallest inputs, where building the full table is
/// cheap.
pub fn direct_lcs<T>(old: &[Token<T>], new: &[Token<T>]) -> Vec<RawOperation<T>>
where
    T: PartialEq + Clone + Debug,
{
    let common_prefix_len = common_prefix_len(old, 0..old.len(), new, 0..new.len());
    let common_suffix_len = common_suffix_len(
        old,
        common_prefix_len..old.len(),
        new,
        common_prefix_len..new.len(),
    );

    let old_len = old.len() - common_prefix_len - common_suffix_len;
    let new_len = new.len() - common_prefix_len - common_suffix_len;

    let table = make_table(
        old,
        common_prefix_len..(old.len() - common_suffix_len),
        new,
        common_prefix_len..(new.len() - common_suffix_len),
    );

    let mut result = Vec::new();
    if common_prefix_len > 0 {
        result.push(RawOperation::Equal(old[0..common_prefix_len].to_vec()));
    }

    let mut old_idx = 0;
    let mut new_idx = 0;
    while old_idx < old_len && new_idx < new_len {
        let old_orig_idx = common_prefix_len + old_idx;
        let new_orig_idx = common_prefix_len + new_idx;

        if new[new_orig_idx] == old[old_orig_idx] {
            result.push(RawOperation::Equal(vec![old[old_orig_idx].clone()]));
            old_idx += 1;
            new_idx += 1;
        } else if table.get(&(new_idx, old_idx + 1)).unwrap_or(&0)
            >= table.get(&(new_idx + 1, old_idx)).unwrap_or(&0)
        {
            result.push(RawOperation::Delete(vec![old[old_orig_idx].clone()]));
            old_idx += 1;
        } else {
            result.push(RawOperation::Insert(vec![new[new_orig_idx].clone()]));
            new_idx += 1;
        }
    }

    if old_idx < old_len {
        result.push(RawOperation::Delete(
            old[common_prefix_len + old_idx..common_prefix_len + old_len].to_vec(),
        ));
    }

    if new_idx < new_len {
        result.push(RawOperation::Insert(
            new[common_prefix_len + new_idx..common_prefix_len + new_len].to_vec(),
        ));
    }

    if common_suffix_len > 0 {
        result.push(RawOperation::Equal(
            old[old_len + common_prefix_len..old_len + common_prefix_len + common_suffix_len]
                .to_vec(),
        ));
    }

    result
}

fn make_table<T>(
    old: &[Token<T>],
    old_range: std::ops::Range<usize>,
    new: &[Token<T>],
    new_range: std::ops::Range<usize>,
) -> BTreeMap<(usize, usize), u32>
where
    T: PartialEq + Clone + Debug,
{
    let old_len = old_range.len();
    let new_len = new_range.len();
    let mut table = BTreeMap::new();

    for i in (0..new_len).rev() {
        for j in (0..old_len).rev() {
            let val = if new[new_range.start + i] == old[old_range.start + j] {
                table.get(&(i + 1, j + 1)).unwrap_or(&0) + 1
            } else {
                *table
                    .get(&(i + 1, j))
                    .unwrap_or(&0)
                    .max(table.get(&(i, j + 1)).unwrap_or(&0))
            };
            if val > 0 {
                table.insert((i, j), val);
            }
        }
    }

    table
}

/// Single pass with a bounded lookahead: on a mismatch, looks up to
/// `lookahead` tokens ahead in either sequence for a resync point. Bails out
/// (returns `None`) the moment no resync is found within the window, letting
/// the caller fall back to a more thorough strategy. Only attempted when the
/// caller has already established the inputs are highly similar, so bailing
/// should be rare.
fn bounded_linear_scan<T>(
    old: &[Token<T>],
    new: &[Token<T>],
    lookahead: usize,
) -> Option<Vec<RawOperation<T>>>
where
    T: PartialEq + Clone + Debug,
{
    let mut result = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            result.push(RawOperation::Equal(vec![old[i].clone()]));
            i += 1;
            j += 1;
            continue;
        }

        let mut resynced = false;
        for k in 1..=lookahead {
            if j + k < new.len() && old[i] == new[j + k] {
                result.push(RawOperation::Insert(new[j..j + k].to_vec()));
                j += k;
                resynced = true;
                break;
            }
            if i + k < old.len() && old[i + k] == new[j] {
                result.push(RawOperation::Delete(old[i..i + k].to_vec()));
                i += k;
                resynced = true;
                break;
            }
        }

        if !resynced {
            return None;
        }
    }

    if i < old.len() {
        result.push(RawOperation::Delete(old[i..].to_vec()));
    }
    if j < new.len() {
        result.push(RawOperation::Insert(new[j..].to_vec()));
    }

    Some(result)
}

/// Patience-inspired LCS: hashes each `old` token's normalized content to its
/// positions, then greedily assigns each `new` token the next unused,
/// strictly-increasing `old` position with matching content. This yields a
/// valid (not necessarily longest) common subsequence in a single forward
/// pass, used as the catch-all branch for large, dissimilar inputs where the
/// other branches above don't apply.
fn patience_lcs<T>(old: &[Token<T>], new: &[Token<T>]) -> Vec<RawOperation<T>>
where
    T: PartialEq + Clone + Debug + std::hash::Hash + Eq,
{
    let mut positions: HashMap<&T, Vec<usize>> = HashMap::new();
    for (i, token) in old.iter().enumerate() {
        positions.entry(token.normalized()).or_default().push(i);
    }

    let mut cursors: HashMap<&T, usize> = HashMap::new();
    let mut matches: Vec<(usize, usize)> = Vec::new();
    let mut last_old: Option<usize> = None;

    for (j, token) in new.iter().enumerate() {
        let Some(candidates) = positions.get(token.normalized()) else {
            continue;
        };
        let cursor = cursors.entry(token.normalized()).or_insert(0);
        while *cursor < candidates.len()
            && last_old.is_some_and(|lo| candidates[*cursor] <= lo)
        {
            *cursor += 1;
        }
        if *cursor < candidates.len() {
            let old_idx = candidates[*cursor];
            matches.push((old_idx, j));
            last_old = Some(old_idx);
            *cursor += 1;
        }
    }

    let mut result = Vec::new();
    let mut old_idx = 0;
    let mut new_idx = 0;

    for (match_old, match_new) in matches {
        if match_old > old_idx {
            result.push(RawOperation::Delete(old[old_idx..match_old].to_vec()));
        }
        if match_new > new_idx {
            result.push(RawOperation::Insert(new[new_idx..match_new].to_vec()));
        }
        result.push(RawOperation::Equal(vec![old[match_old].clone()]));
        old_idx = match_old + 1;
        new_idx = match_new + 1;
    }

    if old_idx < old.len() {
        result.push(RawOperation::Delete(old[old_idx..].to_vec()));
    }
    if new_idx < new.len() {
        result.push(RawOperation::Insert(new[new_idx..].to_vec()));
    }

    result
}
