use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Engine-facing surface of the widget that owns the editable text.
///
/// The engine only ever holds a weak handle to the host: the host owns the
/// engine, never the other way around. All positions are character offsets.
///
/// Contract: `set_text` calls made by the engine are not reported back via
/// [`ValidationEngine::text_changed`]; the host reports only mutations the
/// engine did not structurally observe (programmatic assignment, paste-style
/// shortcuts outside the edit protocol, and so on).
///
/// [`ValidationEngine::text_changed`]: crate::engine::ValidationEngine::text_changed
pub trait TextHost {
    fn text(&self) -> String;

    /// Caret position in characters.
    fn caret(&self) -> usize;

    fn set_text(&mut self, text: &str);

    fn set_caret(&mut self, caret: usize);
}

/// Shared handle to a host, as stored by the owner.
pub type SharedHost = Rc<RefCell<dyn TextHost>>;

/// Non-owning handle held by the engine.
pub(crate) type WeakHost = Weak<RefCell<dyn TextHost>>;

/// Observer of the engine's valid/invalid outcome.
pub trait StatusSink {
    fn validity_changed(&self, is_valid: bool);
}

/// Pass-through lifecycle hooks with no validation semantics.
///
/// The engine forwards these after its own bookkeeping. The slot is owned by
/// the host and distinct from the status sink; the engine never clears it on
/// its own.
pub trait EditLifecycle {
    fn should_begin_editing(&self) -> bool {
        true
    }

    fn did_begin_editing(&self) {}

    fn should_end_editing(&self) -> bool {
        true
    }

    fn did_end_editing(&self) {}

    fn should_clear(&self) -> bool {
        true
    }

    fn should_return(&self) -> bool {
        true
    }
}

/// Caret position preserving the relative offset across a text swap,
/// clamped to the new bounds.
pub fn caret_after_replacement(old_len: usize, new_len: usize, caret: usize) -> usize {
    let shifted = caret as isize + new_len as isize - old_len as isize;
    shifted.clamp(0, new_len as isize) as usize
}

/// A minimal in-memory host: text plus caret.
///
/// Ready-made state for widgets that do not track selection themselves, and
/// for driving the engine from tests and tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    text: String,
    caret: usize,
}

impl FieldState {
    /// A field holding `text` with the caret at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self { text, caret }
    }

    /// A shared, interior-mutable field for attaching to an engine.
    pub fn shared(text: impl Into<String>) -> Rc<RefCell<FieldState>> {
        Rc::new(RefCell::new(Self::new(text)))
    }
}

impl TextHost for FieldState {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
    }

    fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.text.chars().count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_shifts_with_growth() {
        assert_eq!(caret_after_replacement(4, 6, 4), 6);
    }

    #[test]
    fn test_caret_shifts_with_shrink() {
        assert_eq!(caret_after_replacement(6, 4, 5), 3);
    }

    #[test]
    fn test_caret_clamps_to_zero() {
        assert_eq!(caret_after_replacement(5, 1, 2), 0);
    }

    #[test]
    fn test_caret_clamps_to_new_length() {
        assert_eq!(caret_after_replacement(3, 2, 3), 2);
    }

    #[test]
    fn test_field_state_starts_with_caret_at_end() {
        let field = FieldState::new("héllo");
        assert_eq!(field.caret(), 5);
    }

    #[test]
    fn test_field_state_clamps_caret() {
        let mut field = FieldState::new("ab");
        field.set_caret(10);
        assert_eq!(field.caret(), 2);
    }

    #[test]
    fn test_lifecycle_defaults_allow_everything() {
        struct Silent;
        impl EditLifecycle for Silent {}

        let hooks = Silent;
        assert!(hooks.should_begin_editing());
        assert!(hooks.should_end_editing());
        assert!(hooks.should_clear());
        assert!(hooks.should_return());
    }
}
