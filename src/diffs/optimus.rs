//! Optimus: the same line-LCS backbone as Starscream, but without
//! coalescing — one `Delete`/`Insert`/`Retain` per line, yielding the
//! highest operation count and the finest-grained edit history.

use crate::operation::Op;

use super::starscream::{line_ops, to_char_ops};

pub fn diff(source: &str, destination: &str) -> Vec<Op> {
    to_char_ops(line_ops(source, destination))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::operation::apply;

    #[test]
    fn test_one_operation_per_line() {
        let source = "a\nb\nc\nd\n";
        let destination = "a\nd\n";
        let ops = diff(source, destination);
        // unlike Starscream, b and d are not batched into one Delete block
        assert_eq!(
            ops,
            vec![
                Op::Retain(2),
                Op::Delete(2),
                Op::Delete(2),
                Op::Retain(2),
            ]
        );
        assert_eq!(apply(source, &ops).unwrap(), destination);
    }

    #[test]
    fn test_produces_at_least_as_many_operations_as_starscream() {
        let source = "a\nb\nc\nd\ne\n";
        let destination = "a\nx\ny\nd\ne\n";
        let optimus_ops = diff(source, destination);
        let starscream_ops = super::super::starscream::diff(source, destination);
        assert!(optimus_ops.len() >= starscream_ops.len());
        assert_eq!(apply(source, &optimus_ops).unwrap(), destination);
    }

    #[test]
    fn test_line_replacement_round_trips() {
        let source = "func greet() {\n    print(\"Hello\")\n}\n";
        let destination = "func greet() {\n    print(\"Hello, World!\")\n}\n";
        let ops = diff(source, destination);
        assert_eq!(apply(source, &ops).unwrap(), destination);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(diff("", ""), Vec::<Op>::new());
    }
}
