use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

use crate::chain::ValidatorChain;
use crate::rules::{
    CharacterRule, Decimal, Email, MaxLength, MinLength, NotEmpty, Password, PositiveNumber,
    RelativeNumber,
};
use crate::validator::TextValidator;

/// Declarative description of a validator chain, loaded from TOML.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ChainConfig {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub rules: Vec<RuleKind>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One rule entry; `type` selects the policy, remaining keys parameterize it.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RuleKind {
    PositiveNumber,
    RelativeNumber,
    Decimal {
        #[serde(default = "default_places")]
        places: usize,
    },
    MaxLength {
        limit: usize,
    },
    MinLength {
        limit: usize,
    },
    NotEmpty,
    Letters,
    Digits,
    Email,
    Password,
}

fn default_places() -> usize {
    2
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::PositiveNumber => "positive-number",
            RuleKind::RelativeNumber => "relative-number",
            RuleKind::Decimal { .. } => "decimal",
            RuleKind::MaxLength { .. } => "max-length",
            RuleKind::MinLength { .. } => "min-length",
            RuleKind::NotEmpty => "not-empty",
            RuleKind::Letters => "letters",
            RuleKind::Digits => "digits",
            RuleKind::Email => "email",
            RuleKind::Password => "password",
        }
    }

    /// Instantiate the policy this entry describes.
    pub fn build(&self) -> Rc<dyn TextValidator> {
        match self {
            RuleKind::PositiveNumber => Rc::new(PositiveNumber),
            RuleKind::RelativeNumber => Rc::new(RelativeNumber),
            RuleKind::Decimal { places } => Rc::new(Decimal::new(*places)),
            RuleKind::MaxLength { limit } => Rc::new(MaxLength::new(*limit)),
            RuleKind::MinLength { limit } => Rc::new(MinLength::new(*limit)),
            RuleKind::NotEmpty => Rc::new(NotEmpty),
            RuleKind::Letters => Rc::new(CharacterRule::letters()),
            RuleKind::Digits => Rc::new(CharacterRule::digits()),
            RuleKind::Email => Rc::new(Email),
            RuleKind::Password => Rc::new(Password),
        }
    }
}

impl ChainConfig {
    /// Structural checks beyond what deserialization can express.
    pub fn validate(&self) -> Result<(), ValidationIssues> {
        let mut issues = Vec::new();

        if self.rules.is_empty() {
            issues.push(ValidationIssue::EmptyRuleList);
        }

        for (index, rule) in self.rules.iter().enumerate() {
            match rule {
                RuleKind::MaxLength { limit } | RuleKind::MinLength { limit } => {
                    if *limit == 0 {
                        issues.push(ValidationIssue::ZeroLimit {
                            index,
                            rule: rule.name(),
                        });
                    }
                }
                RuleKind::Decimal { places } => {
                    if *places > 10 {
                        issues.push(ValidationIssue::TooManyPlaces {
                            index,
                            places: *places,
                        });
                    }
                }
                _ => {}
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationIssues { issues })
        }
    }

    /// Build the runtime chain in declaration order.
    pub fn build(&self) -> ValidatorChain {
        let rules: Vec<Rc<dyn TextValidator>> =
            self.rules.iter().map(RuleKind::build).collect();
        ValidatorChain::new(rules)
    }
}

#[derive(Debug, Clone)]
pub struct ValidationIssues {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationIssues {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    EmptyRuleList,
    ZeroLimit { index: usize, rule: &'static str },
    TooManyPlaces { index: usize, places: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyRuleList => write!(f, "chain config contains no rules"),
            ValidationIssue::ZeroLimit { index, rule } => {
                write!(f, "rule #{index} ('{rule}') has a zero limit")
            }
            ValidationIssue::TooManyPlaces { index, places } => {
                write!(f, "rule #{index} ('decimal') allows {places} places, maximum is 10")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_declaration_order() {
        let config = ChainConfig {
            meta: Metadata::default(),
            rules: vec![
                RuleKind::MaxLength { limit: 5 },
                RuleKind::NotEmpty,
                RuleKind::Email,
            ],
        };
        let chain = config.build();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.edit_rules().count(), 1);
        assert_eq!(chain.commit_rules().count(), 2);
    }

    #[test]
    fn test_empty_rule_list_is_an_issue() {
        let config = ChainConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.issues.as_slice(),
            [ValidationIssue::EmptyRuleList]
        ));
    }

    #[test]
    fn test_zero_limit_is_an_issue() {
        let config = ChainConfig {
            meta: Metadata::default(),
            rules: vec![RuleKind::MaxLength { limit: 0 }],
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.issues.as_slice(),
            [ValidationIssue::ZeroLimit { index: 0, .. }]
        ));
    }

    #[test]
    fn test_rule_names_round_trip() {
        assert_eq!(RuleKind::PositiveNumber.name(), "positive-number");
        assert_eq!(RuleKind::Decimal { places: 2 }.name(), "decimal");
        assert_eq!(RuleKind::Password.name(), "password");
    }
}
