use crate::validator::{TextValidator, ValidationError};

const MIN_LEN: usize = 6;
const MAX_LEN: usize = 25;
const REPEAT_RUN: usize = 5;
const DIGIT_RUN: usize = 3;

/// Commit-time password strength rule.
///
/// Checks run in a fixed order, so the first failure wins: length 6 to 25
/// characters, then no run of five identical characters, then no
/// three-digit ascending or descending sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Password;

impl TextValidator for Password {
    fn validate(
        &self,
        _old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        let chars: Vec<char> = new_text.chars().collect();
        if chars.len() < MIN_LEN || chars.len() > MAX_LEN {
            return Err(ValidationError::WrongLength);
        }
        if has_identical_run(&chars, REPEAT_RUN) {
            return Err(ValidationError::HasConsecutiveIdenticalCharacters);
        }
        if has_digit_sequence(&chars, DIGIT_RUN) {
            return Err(ValidationError::HasNumericSequence);
        }
        Ok(new_text.to_owned())
    }

    fn runs_on_commit(&self) -> bool {
        true
    }
}

fn has_identical_run(chars: &[char], run: usize) -> bool {
    chars
        .windows(run)
        .any(|window| window.iter().all(|&c| c == window[0]))
}

fn has_digit_sequence(chars: &[char], run: usize) -> bool {
    const ASCENDING: &str = "0123456789";
    const DESCENDING: &str = "9876543210";
    chars.windows(run).any(|window| {
        let window: String = window.iter().collect();
        ASCENDING.contains(window.as_str()) || DESCENDING.contains(window.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_reasonable_password() {
        let rule = Password;
        assert!(rule.validate(None, "tr0ub4dor&x").is_ok());
    }

    #[test]
    fn test_length_bounds() {
        let rule = Password;
        assert_eq!(
            rule.validate(None, "ab1de"),
            Err(ValidationError::WrongLength)
        );
        let long = "a1b2c3d4e5f6g7h8i9j0k1l2m3";
        assert_eq!(
            rule.validate(None, long),
            Err(ValidationError::WrongLength)
        );
    }

    #[test]
    fn test_length_check_runs_first() {
        // Five identical characters, but also too short: length wins.
        let rule = Password;
        assert_eq!(
            rule.validate(None, "11111"),
            Err(ValidationError::WrongLength)
        );
    }

    #[test]
    fn test_identical_run_detected() {
        let rule = Password;
        assert_eq!(
            rule.validate(None, "ab11111cd"),
            Err(ValidationError::HasConsecutiveIdenticalCharacters)
        );
        assert!(rule.validate(None, "ab1111cd").is_ok());
    }

    #[test]
    fn test_ascending_digit_sequence_detected() {
        let rule = Password;
        assert_eq!(
            rule.validate(None, "pass123word"),
            Err(ValidationError::HasNumericSequence)
        );
    }

    #[test]
    fn test_descending_digit_sequence_detected() {
        let rule = Password;
        assert_eq!(
            rule.validate(None, "pass987word"),
            Err(ValidationError::HasNumericSequence)
        );
    }

    #[test]
    fn test_nonadjacent_digits_pass() {
        let rule = Password;
        assert!(rule.validate(None, "a1b2c3d4").is_ok());
    }

    #[test]
    fn test_repeat_check_precedes_sequence_check() {
        // Both a 5-run and a digit sequence present.
        let rule = Password;
        assert_eq!(
            rule.validate(None, "aaaaa123"),
            Err(ValidationError::HasConsecutiveIdenticalCharacters)
        );
    }
}
