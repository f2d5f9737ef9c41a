use thiserror::Error;

/// Typed rejection reported by a rule.
///
/// The set is closed: rules cannot invent new kinds, and the engine absorbs
/// every rejection into session state rather than propagating it. The engine
/// itself has no fatal error path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the typed fragment is not acceptable input")]
    WrongInput,

    #[error("the resulting text has the wrong format")]
    WrongFormat,

    #[error("the text length is out of bounds")]
    WrongLength,

    #[error("the text does not satisfy the rule")]
    WrongResult,

    #[error("the text contains an ascending or descending digit sequence")]
    HasNumericSequence,

    #[error("the text contains a run of identical characters")]
    HasConsecutiveIdenticalCharacters,
}

impl ValidationError {
    /// Whether this kind may cancel a keystroke when the reporting rule has
    /// `blocks_input()`. `WrongResult` judges the committed value and never
    /// cancels typing.
    pub(crate) fn blocks_edit(self) -> bool {
        !matches!(self, ValidationError::WrongResult)
    }
}

/// A single validation policy: old/new text in, accepted (possibly
/// rewritten) text or a typed rejection out.
///
/// The four flag methods are fixed policy; the engine reads nothing else.
/// How the engine interprets a rule follows from the flags:
///
/// - `input_only` rules see the typed fragment as `new_text` and `None` as
///   `old_text`; full-text rules see the previous text and the running
///   resulting text.
/// - `formats` rules may return a rewritten text on success, which replaces
///   the running result; the returned text of non-formatting rules is
///   ignored.
/// - `blocks_input` escalates a per-keystroke rejection into cancelling the
///   keystroke outright.
/// - `runs_on_commit` moves the rule out of the per-keystroke pass entirely;
///   it runs once on the final text when editing ends.
pub trait TextValidator {
    /// Validate `new_text` against the optional `old_text`, returning the
    /// accepted text.
    fn validate(
        &self,
        old_text: Option<&str>,
        new_text: &str,
    ) -> Result<String, ValidationError>;

    /// A rejection during the per-keystroke pass cancels the edit outright.
    fn blocks_input(&self) -> bool {
        false
    }

    /// The rule sees only the typed fragment, never the surrounding text.
    fn input_only(&self) -> bool {
        false
    }

    /// A successful validate may rewrite the running result text.
    fn formats(&self) -> bool {
        false
    }

    /// The rule runs once on the full text when editing ends.
    fn runs_on_commit(&self) -> bool {
        false
    }
}
