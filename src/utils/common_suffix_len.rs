use std::ops::{Index, Range};

/// Given two lookups and ranges calculates the length of the common suffix.
/// Mirrors `common_prefix_len`, which is itself copied from
/// <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/utils.rs>;
/// `similar` keeps the suffix variant private, so this is the straightforward
/// reverse-iteration analogue expected by `myers.rs` and `lcs.rs`.
pub fn common_suffix_len<Old, New>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> usize
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
{
    old_range
        .rev()
        .zip(new_range.rev())
        .take_while(|x| new[x.1] == old[x.0])
        .count()
}
