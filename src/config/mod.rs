//! Declarative chain configuration: a TOML schema describing an ordered
//! rule list, structural validation, and construction of the runtime chain.

pub mod loader;
pub mod schema;

pub use loader::{load_from_path, load_from_str, ConfigError};
pub use schema::{ChainConfig, Metadata, RuleKind, ValidationIssue, ValidationIssues};
