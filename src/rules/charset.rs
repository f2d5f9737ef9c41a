use std::fmt;

use crate::validator::{TextValidator, ValidationError};

/// Input-only guard admitting fragments whose every character satisfies a
/// predicate.
///
/// Blocking: a keystroke carrying a disallowed character is cancelled. An
/// empty fragment (deletion) always passes.
#[derive(Clone, Copy)]
pub struct CharacterRule {
    name: &'static str,
    allowed: fn(char) -> bool,
}

impl CharacterRule {
    pub fn new(name: &'static str, allowed: fn(char) -> bool) -> Self {
        Self { name, allowed }
    }

    /// Letters only (Unicode alphabetic).
    pub fn letters() -> Self {
        Self::new("letters", char::is_alphabetic)
    }

    /// ASCII digits only.
    pub fn digits() -> Self {
        Self::new("digits", |c| c.is_ascii_digit())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for CharacterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CharacterRule").field(&self.name).finish()
    }
}

impl TextValidator for CharacterRule {
    fn validate(
        &self,
        _old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        if new_text.chars().all(self.allowed) {
            Ok(new_text.to_owned())
        } else {
            Err(ValidationError::WrongInput)
        }
    }

    fn blocks_input(&self) -> bool {
        true
    }

    fn input_only(&self) -> bool {
        true
    }
}
