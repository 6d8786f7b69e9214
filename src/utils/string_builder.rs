use crate::errors::ApplyError;

/// A helper for building a string in-order based on an original string and a
/// series of insertions, deletions, and retentions applied to it. It is safe
/// to use with UTF-8 strings as all operations are based on character
/// indices. The methods must be called in-order.
///
/// Bounds are reported as `ApplyError` at runtime rather than
/// `debug_assert!`-ed away, since applying a diff is a public, fallible
/// entry point rather than an internal merge step.
pub struct StringBuilder<'a> {
    original: std::str::Chars<'a>,
    remaining: usize,
    consumed: usize,
    buffer: String,
}

impl<'a> StringBuilder<'a> {
    pub fn new(original: &'a str) -> Self {
        StringBuilder {
            remaining: original.chars().count(),
            original: original.chars(),
            consumed: 0,
            buffer: String::with_capacity(original.len()),
        }
    }

    /// Insert a string at the end of the built buffer.
    pub fn insert(&mut self, text: &str) { self.buffer.push_str(text); }

    /// Skip copying `length` characters from the original string to the
    /// built buffer.
    pub fn delete(&mut self, length: usize) -> Result<(), ApplyError> {
        self.advance(length, false)
    }

    /// Copy `length` characters from the original string to the built
    /// buffer.
    pub fn retain(&mut self, length: usize) -> Result<(), ApplyError> {
        self.advance(length, true)
    }

    fn advance(&mut self, length: usize, keep: bool) -> Result<(), ApplyError> {
        if length > self.remaining {
            return Err(if keep {
                ApplyError::RetainOverflow {
                    position: self.consumed,
                    requested: length,
                    available: self.remaining,
                }
            } else {
                ApplyError::DeleteOverflow {
                    position: self.consumed,
                    requested: length,
                    available: self.remaining,
                }
            });
        }

        if keep {
            self.buffer.extend(self.original.by_ref().take(length));
        } else {
            self.original.by_ref().take(length).for_each(drop);
        }

        self.remaining -= length;
        self.consumed += length;

        Ok(())
    }

    /// Number of source characters not yet retained or deleted.
    pub fn remaining(&self) -> usize { self.remaining }

    /// Consumes the builder, failing if the source was not fully walked.
    pub fn finish(self) -> Result<String, ApplyError> {
        if self.remaining > 0 {
            return Err(ApplyError::UnconsumedSource {
                remaining: self.remaining,
            });
        }

        Ok(self.buffer)
    }
}
