use crate::validator::{TextValidator, ValidationError};

/// Caps the text at `limit` characters.
///
/// Formatting: an overlong proposed text is truncated rather than rejected,
/// so typing at the limit silently stops growing the text.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    limit: usize,
}

impl MaxLength {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl TextValidator for MaxLength {
    fn validate(
        &self,
        old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        if let Some(old_text) = old_text {
            let old_len = old_text.chars().count();
            let new_len = new_text.chars().count();
            if old_len == self.limit && new_len > old_len {
                return Ok(old_text.to_owned());
            }
            if old_len < self.limit && new_len > self.limit {
                return Ok(new_text.chars().take(self.limit).collect());
            }
        }
        Ok(new_text.to_owned())
    }

    fn blocks_input(&self) -> bool {
        true
    }

    fn formats(&self) -> bool {
        true
    }
}

/// Reports text shorter than `limit` characters as not yet acceptable.
///
/// Non-blocking: typing continues, the field just reads as invalid.
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    limit: usize,
}

impl MinLength {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl TextValidator for MinLength {
    fn validate(
        &self,
        _old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        if new_text.chars().count() < self.limit {
            Err(ValidationError::WrongResult)
        } else {
            Ok(new_text.to_owned())
        }
    }
}

/// Commit-time rule rejecting an empty final text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEmpty;

impl TextValidator for NotEmpty {
    fn validate(
        &self,
        _old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        if new_text.is_empty() {
            Err(ValidationError::WrongResult)
        } else {
            Ok(new_text.to_owned())
        }
    }

    fn runs_on_commit(&self) -> bool {
        true
    }
}
