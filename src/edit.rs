use std::ops::Range;
use thiserror::Error;

/// The fundamental input primitive: a half-open character-range replacement
/// against the current text.
///
/// Every keystroke the engine sees compiles down to this single shape.
/// Intelligence lives in the validator chain, not in text splicing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an Edit does nothing until resolve() is called"]
pub struct Edit {
    /// Starting character offset (inclusive)
    pub start: usize,
    /// Ending character offset (exclusive)
    pub end: usize,
    /// New text for the [start, end) span
    pub replacement: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("invalid character range: [{start}, {end}) in text of {len} characters")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },
}

impl Edit {
    /// Create an edit replacing `range` with `replacement`.
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            replacement: replacement.into(),
        }
    }

    /// Same span, different replacement.
    ///
    /// Used when a rule rewrites the typed fragment and the full text must
    /// be recomputed from the rewritten fragment.
    pub fn with_replacement(&self, replacement: impl Into<String>) -> Self {
        Self {
            start: self.start,
            end: self.end,
            replacement: replacement.into(),
        }
    }

    /// Apply the replacement to `current`, producing the proposed text.
    ///
    /// The range must satisfy `start <= end <= character length`; anything
    /// else is a caller contract violation reported as
    /// [`EditError::InvalidRange`].
    pub fn resolve(&self, current: &str) -> Result<String, EditError> {
        self.check_range(current)?;

        let prefix_end = byte_offset(current, self.start);
        let suffix_start = byte_offset(current, self.end);

        let mut resolved = String::with_capacity(
            current.len() - (suffix_start - prefix_end) + self.replacement.len(),
        );
        resolved.push_str(&current[..prefix_end]);
        resolved.push_str(&self.replacement);
        resolved.push_str(&current[suffix_start..]);
        Ok(resolved)
    }

    /// The edit that undoes this one against `current`.
    ///
    /// Resolving an edit and then resolving its inverse against the result
    /// restores the original text.
    pub fn inverse(&self, current: &str) -> Result<Edit, EditError> {
        self.check_range(current)?;

        let removed: String = current
            .chars()
            .skip(self.start)
            .take(self.end - self.start)
            .collect();
        let inserted = self.replacement.chars().count();

        Ok(Edit {
            start: self.start,
            end: self.start + inserted,
            replacement: removed,
        })
    }

    fn check_range(&self, current: &str) -> Result<(), EditError> {
        let len = current.chars().count();
        if self.start > self.end || self.end > len {
            return Err(EditError::InvalidRange {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }
}

/// Byte offset of the `idx`-th character; `idx` may equal the character count.
fn byte_offset(text: &str, idx: usize) -> usize {
    text.char_indices()
        .nth(idx)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}
