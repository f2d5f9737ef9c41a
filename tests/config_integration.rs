//! Integration tests for the chain config parser and loader.

use std::fs;

use textgate::config::{load_from_path, load_from_str, ConfigError, RuleKind};
use textgate::{EditDecision, ValidationEngine, ValidationError};

#[test]
fn test_load_basic_chain() {
    let toml = r#"
[meta]
name = "amount"
description = "Positive amounts with two decimals"

[[rules]]
type = "positive-number"

[[rules]]
type = "max-length"
limit = 8
"#;

    let config = load_from_str(toml).unwrap();
    assert_eq!(config.meta.name, "amount");
    assert_eq!(config.rules.len(), 2);
    assert_eq!(config.rules[0], RuleKind::PositiveNumber);
    assert_eq!(config.rules[1], RuleKind::MaxLength { limit: 8 });

    let chain = config.build();
    assert_eq!(chain.len(), 2);
    assert!(chain.has_edit_rules());
    assert!(!chain.has_commit_rules());
}

#[test]
fn test_decimal_places_default() {
    let toml = r#"
[[rules]]
type = "decimal"
"#;

    let config = load_from_str(toml).unwrap();
    assert_eq!(config.rules[0], RuleKind::Decimal { places: 2 });
}

#[test]
fn test_loaded_chain_drives_engine() {
    let toml = r#"
[[rules]]
type = "max-length"
limit = 3
"#;

    let config = load_from_str(toml).unwrap();
    let mut engine = ValidationEngine::new(config.build());
    let decision = engine.should_change_text("abc", 3..3, "d").unwrap();
    // Over the limit: the engine takes over and keeps the old text.
    assert_eq!(decision, EditDecision::Handled);
    assert!(engine.is_valid());
}

#[test]
fn test_commit_rules_from_config() {
    let toml = r#"
[[rules]]
type = "not-empty"

[[rules]]
type = "email"
"#;

    let config = load_from_str(toml).unwrap();
    let mut engine = ValidationEngine::new(config.build());

    engine.editing_ended("");
    assert!(!engine.is_valid());
    assert_eq!(engine.last_error(), Some(ValidationError::WrongResult));

    engine.editing_ended("user@example.com");
    assert!(engine.is_valid());
}

#[test]
fn test_empty_config_fails_validation() {
    let toml = r#"
[meta]
name = "nothing"
"#;

    let err = load_from_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));
}

#[test]
fn test_zero_limit_fails_validation() {
    let toml = r#"
[[rules]]
type = "min-length"
limit = 0
"#;

    let err = load_from_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));
}

#[test]
fn test_unknown_rule_type_is_a_parse_error() {
    let toml = r#"
[[rules]]
type = "telepathy"
"#;

    let err = load_from_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Toml { .. }));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let err = load_from_str("[[rules").unwrap_err();
    assert!(matches!(err, ConfigError::Toml { .. }));
}

#[test]
fn test_load_from_path_carries_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.toml");
    fs::write(&path, "[[rules]]\ntype = \"password\"\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.rules[0], RuleKind::Password);

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[meta]\nname = \"empty\"\n").unwrap();
    let err = load_from_path(&bad).unwrap_err();
    match err {
        ConfigError::Validation { path, .. } => {
            assert_eq!(path.as_deref(), Some(bad.as_path()));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = load_from_path("/nonexistent/chain.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
