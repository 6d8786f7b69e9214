//! The edit-operation sum type and its apply engine.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{errors::ApplyError, utils::string_builder::StringBuilder};

/// A single edit operation over character units (Unicode scalar values).
///
/// `Retain`/`Delete` counts and `Insert` text all share this unit: a
/// generator and the apply engine must agree on it, which is why it is fixed
/// crate-wide rather than left to the caller.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Copy the next `n` characters from the source cursor to the output.
    Retain(usize),
    /// Advance the source cursor by `n` characters without emitting them.
    Delete(usize),
    /// Emit `text` verbatim; the source cursor is unchanged.
    Insert(String),
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Retain(n) => write!(f, "Retain({n})"),
            Op::Delete(n) => write!(f, "Delete({n})"),
            Op::Insert(text) => write!(f, "Insert({text:?})"),
        }
    }
}

/// Walks `ops` against `source`, producing the resulting string.
///
/// Maintains a source cursor and an output buffer: `Retain(n)` copies the
/// next `n` characters and advances, `Delete(n)` advances only, `Insert(t)`
/// appends `t`. After the last operation the cursor must equal
/// `source.chars().count()`, or [`ApplyError::UnconsumedSource`] is raised.
/// The first error encountered halts the walk; no partial output is
/// returned.
pub fn apply(source: &str, ops: &[Op]) -> Result<String, ApplyError> {
    let mut builder = StringBuilder::new(source);

    for op in ops {
        match op {
            Op::Retain(n) => builder.retain(*n)?,
            Op::Delete(n) => builder.delete(*n)?,
            Op::Insert(text) => builder.insert(text),
        }
    }

    builder.finish()
}

/// Canonical byte encoding of an operation sequence, used as the input to
/// the `diff_hash` checksum. Type byte (`R`=0x52, `D`=0x44, `I`=0x49)
/// followed by a 4-byte big-endian count (Retain/Delete) or a 4-byte
/// big-endian byte-length plus the UTF-8 bytes of the insert text.
pub fn canonical_encoding(ops: &[Op]) -> Vec<u8> {
    let mut bytes = Vec::new();

    for op in ops {
        match op {
            Op::Retain(n) => {
                bytes.push(0x52);
                bytes.extend_from_slice(&(*n as u32).to_be_bytes());
            }
            Op::Delete(n) => {
                bytes.push(0x44);
                bytes.extend_from_slice(&(*n as u32).to_be_bytes());
            }
            Op::Insert(text) => {
                bytes.push(0x49);
                bytes.extend_from_slice(&(text.len() as u32).to_be_bytes());
                bytes.extend_from_slice(text.as_bytes());
            }
        }
    }

    bytes
}
