use std::fmt::Debug;

use crate::raw_operation::RawOperation;

/// Merges adjacent same-kind `RawOperation`s into single runs. Starscream
/// and Megatron use this to turn per-line matches into line-block retains,
/// deletes, and inserts; Optimus skips this step entirely to keep one
/// operation per line.
pub fn coalesce<T>(ops: Vec<RawOperation<T>>) -> Vec<RawOperation<T>>
where
    T: PartialEq + Clone + Debug,
{
    let mut result: Vec<RawOperation<T>> = Vec::new();

    for op in ops {
        match (result.last_mut(), &op) {
            (Some(RawOperation::Equal(prev)), RawOperation::Equal(next)) => {
                prev.extend(next.clone());
            }
            (Some(RawOperation::Delete(prev)), RawOperation::Delete(next)) => {
                prev.extend(next.clone());
            }
            (Some(RawOperation::Insert(prev)), RawOperation::Insert(next)) => {
                prev.extend(next.clone());
            }
            _ => result.push(op),
        }
    }

    result
}
