use crate::validator::{TextValidator, ValidationError};

/// Admits fragments that parse as a non-negative number.
///
/// Blocking and input-only: a keystroke producing anything else is
/// cancelled before the text changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveNumber;

impl TextValidator for PositiveNumber {
    fn validate(
        &self,
        _old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        if new_text.is_empty() {
            return Ok(String::new());
        }
        if new_text.parse::<f64>().is_ok() && !new_text.contains('-') {
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

/// Signed decimal input with comma normalization.
///
/// Formatting: commas are rewritten to dots in the running text; a minus
/// sign anywhere but the front reverts to the previous text. At most two
/// decimal places.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeNumber;

impl TextValidator for RelativeNumber {
    fn validate(
        &self,
        old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        if new_text == "-" {
            return Ok(new_text.to_owned());
        }
        if new_text.ends_with('-') {
            // A trailing sign after other characters is undone, not rejected.
            return Ok(old_text.unwrap_or_default().to_owned());
        }

        let normalized = new_text.replace(',', ".");
        if normalized.is_empty() {
            return Ok(normalized);
        }
        if normalized.parse::<f64>().is_ok() {
            if let Some((_, decimals)) = normalized.split_once('.') {
                if decimals.chars().count() > 2 {
                    return Err(ValidationError::WrongInput);
                }
            }
            return Ok(normalized);
        }

        Err(ValidationError::WrongInput)
    }

    fn blocks_input(&self) -> bool {
        true
    }

    fn formats(&self) -> bool {
        true
    }
}

/// Blocks keystrokes that would leave the text unparseable as a decimal
/// with at most `places` fractional digits.
///
/// A comma is accepted as the separator when `places > 0`; with zero
/// places any separator is rejected.
#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    places: usize,
}

impl Decimal {
    pub fn new(places: usize) -> Self {
        Self { places }
    }

    pub fn places(&self) -> usize {
        self.places
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self { places: 2 }
    }
}

impl TextValidator for Decimal {
    fn validate(
        &self,
        _old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError> {
        if new_text.is_empty() {
            return Ok(String::new());
        }
        if self.places == 0 && (new_text.contains('.') || new_text.contains(',')) {
            return Err(ValidationError::WrongInput);
        }

        let normalized = new_text.replace(',', ".");
        if normalized.parse::<f64>().is_err() {
            return Err(ValidationError::WrongInput);
        }
        if let Some((_, decimals)) = normalized.split_once('.') {
            if decimals.chars().count() > self.places {
                return Err(ValidationError::WrongInput);
            }
        }
        Ok(new_text.to_owned())
    }

    fn blocks_input(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_number_accepts_digits_and_empty() {
        let rule = PositiveNumber;
        assert!(rule.validate(None, "").is_ok());
        assert!(rule.validate(None, "5").is_ok());
        assert!(rule.validate(None, "12.5").is_ok());
    }

    #[test]
    fn test_positive_number_rejects_letters_and_signs() {
        let rule = PositiveNumber;
        assert_eq!(
            rule.validate(None, "a"),
            Err(ValidationError::WrongInput)
        );
        assert_eq!(
            rule.validate(None, "-3"),
            Err(ValidationError::WrongInput)
        );
    }

    #[test]
    fn test_relative_number_normalizes_comma() {
        let rule = RelativeNumber;
        assert_eq!(rule.validate(Some("12"), "12,5").unwrap(), "12.5");
    }

    #[test]
    fn test_relative_number_is_idempotent() {
        let rule = RelativeNumber;
        let once = rule.validate(Some("12"), "12,5").unwrap();
        let twice = rule.validate(Some(&once), &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_relative_number_leading_sign_alone() {
        let rule = RelativeNumber;
        assert_eq!(rule.validate(None, "-").unwrap(), "-");
        assert_eq!(rule.validate(Some("-"), "-1").unwrap(), "-1");
    }

    #[test]
    fn test_relative_number_trailing_sign_reverts() {
        let rule = RelativeNumber;
        assert_eq!(rule.validate(Some("12"), "12-").unwrap(), "12");
    }

    #[test]
    fn test_relative_number_limits_decimals() {
        let rule = RelativeNumber;
        assert_eq!(
            rule.validate(Some("1.25"), "1.255"),
            Err(ValidationError::WrongInput)
        );
    }

    #[test]
    fn test_decimal_respects_places() {
        let rule = Decimal::new(1);
        assert!(rule.validate(None, "3.5").is_ok());
        assert!(rule.validate(None, "3,5").is_ok());
        assert_eq!(
            rule.validate(None, "3.55"),
            Err(ValidationError::WrongInput)
        );
    }

    #[test]
    fn test_decimal_zero_places_rejects_separators() {
        let rule = Decimal::new(0);
        assert!(rule.validate(None, "35").is_ok());
        assert_eq!(
            rule.validate(None, "3.5"),
            Err(ValidationError::WrongInput)
        );
        assert_eq!(
            rule.validate(None, "3,5"),
            Err(ValidationError::WrongInput)
        );
    }

    #[test]
    fn test_decimal_accepts_partial_typing() {
        let rule = Decimal::default();
        assert!(rule.validate(None, "1.").is_ok());
        assert!(rule.validate(None, "-1.5").is_ok());
    }
}
