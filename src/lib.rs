//! Textgate: incremental text validation for editable fields.
//!
//! An engine that decides, per keystroke and per commit, whether an edit to
//! a text value is accepted, rejected, or reformatted, by running an
//! ordered chain of independent rules.
//!
//! # Architecture
//!
//! Every keystroke compiles down to a single primitive: [`Edit`], a
//! half-open character-range replacement. The engine resolves the edit into
//! a proposed text, walks the applicable sub-chain of [`TextValidator`]s in
//! declaration order, and produces an [`EditDecision`]: let the host apply
//! its default mutation, take over the mutation with reformatted text, or
//! block the keystroke outright. Commit-time rules run once on the final
//! text when editing ends; passive re-validation covers mutations the
//! engine did not structurally observe.
//!
//! Rejections are plain values from a closed set ([`ValidationError`]);
//! they never escape the engine. The engine keeps only a weak handle to its
//! host and goes inert when the host is dropped.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use textgate::rules::MaxLength;
//! use textgate::{EditDecision, FieldState, TextHost, ValidationEngine, ValidatorChain};
//!
//! let chain = ValidatorChain::new(vec![Rc::new(MaxLength::new(5))]);
//! let mut engine = ValidationEngine::new(chain);
//!
//! let host = FieldState::shared("1234");
//! engine.attach(host.clone());
//!
//! // Appending "56" would exceed the limit; the engine truncates and
//! // applies the result itself.
//! let decision = engine
//!     .should_change_text("1234", 4..4, "56")
//!     .expect("range is in bounds");
//! assert_eq!(decision, EditDecision::Handled);
//! assert_eq!(host.borrow().text(), "12345");
//! assert!(engine.is_valid());
//! ```

pub mod chain;
pub mod config;
pub mod edit;
pub mod engine;
pub mod host;
pub mod rules;
pub mod validator;

// Re-exports
pub use chain::ValidatorChain;
pub use config::{load_from_path, load_from_str, ChainConfig, ConfigError, RuleKind};
pub use edit::{Edit, EditError};
pub use engine::{EditDecision, ValidationEngine};
pub use host::{
    caret_after_replacement, EditLifecycle, FieldState, SharedHost, StatusSink, TextHost,
};
pub use validator::{TextValidator, ValidationError};
