use std::ops::Range;
use std::rc::Rc;

use crate::chain::ValidatorChain;
use crate::edit::{Edit, EditError};
use crate::host::{caret_after_replacement, EditLifecycle, SharedHost, StatusSink, WeakHost};
use crate::validator::ValidationError;

/// Outcome of a per-keystroke pass, returned to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision {
    /// No rule objected and none reformatted: the host applies its default
    /// edit itself.
    ApplyDefault,
    /// The engine already wrote the resulting text to the host; the default
    /// edit must not run.
    Handled,
    /// The keystroke is rejected outright; the text stays unchanged.
    Blocked,
}

impl EditDecision {
    /// The boolean form of the host contract: `true` means "apply the
    /// default edit".
    pub fn allows_default(self) -> bool {
        matches!(self, EditDecision::ApplyDefault)
    }
}

/// Per-field session state.
///
/// Created with the engine, reset only by installing a new chain, mutated on
/// every edit, commit, and passive event.
#[derive(Debug, Clone, Default)]
struct Session {
    is_valid: bool,
    last_error: Option<ValidationError>,
    editing: bool,
    /// Whether the most recent mutation came through the structured edit
    /// path, so passive re-validation can reuse its result.
    saw_structured_edit: bool,
}

/// Orchestrates a [`ValidatorChain`] over the three event kinds of a text
/// field: per-keystroke edits, end-of-editing commits, and passive
/// re-validation of unobserved changes.
///
/// Single-threaded and synchronous; events for one engine must be serialized
/// by the host. The engine holds a weak host handle and no-ops once the host
/// is gone.
pub struct ValidationEngine {
    chain: ValidatorChain,
    host: Option<WeakHost>,
    sink: Option<Rc<dyn StatusSink>>,
    forward: Option<Rc<dyn EditLifecycle>>,
    session: Session,
}

impl ValidationEngine {
    pub fn new(chain: ValidatorChain) -> Self {
        Self {
            chain,
            host: None,
            sink: None,
            forward: None,
            session: Session::default(),
        }
    }

    /// Bind the engine to its host.
    ///
    /// Only a weak handle is kept; the host owns the engine and the engine
    /// must never extend the host's lifetime.
    pub fn attach(&mut self, host: SharedHost) {
        self.host = Some(Rc::downgrade(&host));
    }

    /// Install the observer notified of validity changes.
    pub fn set_status_sink(&mut self, sink: Rc<dyn StatusSink>) {
        self.sink = Some(sink);
    }

    pub fn clear_status_sink(&mut self) {
        self.sink = None;
    }

    /// Install the host-owned delegate that lifecycle events are forwarded
    /// to after the engine's own processing.
    pub fn set_forward_delegate(&mut self, delegate: Rc<dyn EditLifecycle>) {
        self.forward = Some(delegate);
    }

    pub fn clear_forward_delegate(&mut self) {
        self.forward = None;
    }

    /// Replace the whole rule set atomically and reset the session.
    ///
    /// In-flight passes iterate their own snapshot and are unaffected. The
    /// editing flag survives; validity and the stored error do not.
    pub fn set_chain(&mut self, chain: ValidatorChain) {
        self.chain = chain;
        self.session = Session {
            editing: self.session.editing,
            ..Session::default()
        };
    }

    pub fn chain(&self) -> &ValidatorChain {
        &self.chain
    }

    pub fn is_valid(&self) -> bool {
        self.session.is_valid
    }

    pub fn last_error(&self) -> Option<ValidationError> {
        self.session.last_error
    }

    pub fn is_editing(&self) -> bool {
        self.session.editing
    }

    /// Per-keystroke path: decide what happens to a proposed replacement of
    /// `range` (character offsets into `current`) with `replacement`.
    ///
    /// Walks the per-keystroke sub-chain in declaration order, maintaining a
    /// running result text that formatting rules may rewrite, and
    /// short-circuiting on the first rejection. A blocking rejection cancels
    /// the keystroke with text and session state both untouched; once any
    /// visited rule reformats, the engine takes over the mutation and the
    /// host must not apply its default edit.
    ///
    /// An out-of-range `range` is a caller contract violation and surfaces
    /// as an [`EditError`].
    pub fn should_change_text(
        &mut self,
        current: &str,
        range: Range<usize>,
        replacement: &str,
    ) -> Result<EditDecision, EditError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "edit_pass",
            start = range.start,
            end = range.end,
            fragment = replacement
        )
        .entered();

        self.session.saw_structured_edit = true;

        let chain = self.chain.clone();
        if !chain.has_edit_rules() {
            // Nothing to say; the host's own approval logic decides.
            return Ok(EditDecision::ApplyDefault);
        }

        let edit = Edit::new(range, replacement);
        let mut result_text = edit.resolve(current)?;
        let mut engine_applies = false;
        let mut rejection = None;

        for rule in chain.edit_rules() {
            let outcome = match (rule.input_only(), rule.formats()) {
                (true, true) => match rule.validate(None, &edit.replacement) {
                    Ok(fragment) => {
                        result_text = edit.with_replacement(fragment).resolve(current)?;
                        Ok(())
                    }
                    Err(kind) => Err(kind),
                },
                (true, false) => rule.validate(None, &edit.replacement).map(|_| ()),
                (false, true) => match rule.validate(Some(current), &result_text) {
                    Ok(formatted) => {
                        result_text = formatted;
                        Ok(())
                    }
                    Err(kind) => Err(kind),
                },
                (false, false) => rule.validate(Some(current), &result_text).map(|_| ()),
            };

            if let Err(kind) = outcome {
                if kind.blocks_edit() && rule.blocks_input() {
                    // The keystroke never happened: text and session state
                    // stay exactly as they were.
                    return Ok(EditDecision::Blocked);
                }
                rejection = Some(kind);
            }

            if rule.formats() {
                engine_applies = true;
            }
            if rejection.is_some() {
                break;
            }
        }

        self.session.is_valid = rejection.is_none();
        self.session.last_error = rejection;

        if engine_applies {
            self.apply_text(current, &result_text);
            self.notify_sink();
            self.session.saw_structured_edit = false;
            return Ok(EditDecision::Handled);
        }

        Ok(EditDecision::ApplyDefault)
    }

    /// Commit path: run the commit sub-chain against the final text.
    ///
    /// The first rejection stops the chain and marks the session invalid. A
    /// formatting rule that accepts has its output applied to the host
    /// immediately and becomes the baseline for the rules after it. Exactly
    /// one sink notification is emitted per non-empty pass.
    pub fn editing_ended(&mut self, final_text: &str) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("commit_pass", len = final_text.len()).entered();

        let chain = self.chain.clone();
        if chain.has_commit_rules() {
            let mut text = final_text.to_owned();
            let mut rejection = None;

            for rule in chain.commit_rules() {
                match rule.validate(None, &text) {
                    Ok(accepted) => {
                        if rule.formats() && accepted != text {
                            self.apply_text(&text, &accepted);
                            text = accepted;
                        }
                    }
                    Err(kind) => {
                        rejection = Some(kind);
                        break;
                    }
                }
            }

            self.session.is_valid = rejection.is_none();
            self.session.last_error = rejection;
            self.notify_sink();
        }

        if let Some(forward) = &self.forward {
            forward.did_end_editing();
        }
        self.session.editing = false;
        self.session.saw_structured_edit = false;
    }

    /// Passive path: the host's text changed through a channel the engine
    /// did not structurally observe, or a structured edit just landed.
    ///
    /// A change already evaluated by the per-keystroke pass is not
    /// re-evaluated; its stored validity is pushed to the sink. Anything
    /// else re-runs the full-text per-keystroke rules against `current`.
    pub fn text_changed(&mut self, current: &str) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("passive_pass", len = current.len()).entered();

        let chain = self.chain.clone();
        if self.session.editing && self.session.saw_structured_edit {
            if chain.has_edit_rules() {
                self.notify_sink();
            }
        } else {
            let mut rejection = None;
            for rule in chain.passive_rules() {
                if let Err(kind) = rule.validate(None, current) {
                    rejection = Some(kind);
                    break;
                }
            }
            self.session.is_valid = rejection.is_none();
            self.session.last_error = rejection;
            self.notify_sink();
        }
        self.session.saw_structured_edit = false;
    }

    // Lifecycle hooks: engine bookkeeping first, then forward to the
    // host-owned delegate. Defaults allow everything.

    pub fn should_begin_editing(&self) -> bool {
        self.forward
            .as_ref()
            .map_or(true, |forward| forward.should_begin_editing())
    }

    pub fn did_begin_editing(&mut self) {
        self.session.editing = true;
        self.session.saw_structured_edit = false;
        if let Some(forward) = &self.forward {
            forward.did_begin_editing();
        }
    }

    pub fn should_end_editing(&self) -> bool {
        self.forward
            .as_ref()
            .map_or(true, |forward| forward.should_end_editing())
    }

    pub fn should_clear(&self) -> bool {
        self.forward
            .as_ref()
            .map_or(true, |forward| forward.should_clear())
    }

    pub fn should_return(&self) -> bool {
        self.forward
            .as_ref()
            .map_or(true, |forward| forward.should_return())
    }

    /// Write `new_text` into the host, preserving the caret's relative
    /// offset. No-op when the text is unchanged or the host is gone.
    fn apply_text(&self, old_text: &str, new_text: &str) {
        if old_text == new_text {
            return;
        }
        let Some(host) = self.host.as_ref().and_then(|weak| weak.upgrade()) else {
            return;
        };
        let mut host = host.borrow_mut();
        let caret = host.caret();
        let old_len = old_text.chars().count();
        let new_len = new_text.chars().count();
        host.set_text(new_text);
        host.set_caret(caret_after_replacement(old_len, new_len, caret));
    }

    fn notify_sink(&self) {
        if let Some(sink) = &self.sink {
            sink.validity_changed(self.session.is_valid);
        }
    }
}
