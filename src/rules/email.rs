use std::sync::LazyLock;

use regex::Regex;

use crate::validator::{TextValidator, ValidationError};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$")
        .expect("email pattern is valid")
});

/// Commit-time address check: local part, `@`, domain with a TLD of 2 to
/// 64 letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl TextValidator for Email {
    fn validate(
        &self,
        _old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        if EMAIL.is_match(new_text) {
            Ok(new_text.to_owned())
        } else {
            Err(ValidationError::WrongResult)
        }
    }

    fn runs_on_commit(&self) -> bool {
        true
    }
}
