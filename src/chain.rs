use std::fmt;
use std::rc::Rc;

use crate::validator::TextValidator;

/// An ordered, immutable snapshot of rules.
///
/// Cloning is a reference-count bump. The engine iterates its own clone of
/// the snapshot, so installing a new chain between events can never corrupt
/// an in-flight pass; replacing a chain mid-event is not supported and not
/// needed (events are strictly serialized per field).
#[derive(Clone)]
pub struct ValidatorChain {
    rules: Rc<[Rc<dyn TextValidator>]>,
}

impl ValidatorChain {
    /// Build a chain from rules in declaration order.
    pub fn new(rules: Vec<Rc<dyn TextValidator>>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    /// A chain with no rules; every edit falls through to the host.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that run per keystroke, in declaration order.
    pub fn edit_rules(&self) -> impl Iterator<Item = &Rc<dyn TextValidator>> + '_ {
        self.rules.iter().filter(|rule| !rule.runs_on_commit())
    }

    /// Rules that run once when editing ends, in declaration order.
    pub fn commit_rules(&self) -> impl Iterator<Item = &Rc<dyn TextValidator>> + '_ {
        self.rules.iter().filter(|rule| rule.runs_on_commit())
    }

    /// Rules consulted when the text changes outside the structured edit
    /// path: per-keystroke rules that can see the full text.
    pub fn passive_rules(&self) -> impl Iterator<Item = &Rc<dyn TextValidator>> + '_ {
        self.rules
            .iter()
            .filter(|rule| !rule.runs_on_commit() && !rule.input_only())
    }

    pub fn has_edit_rules(&self) -> bool {
        self.edit_rules().next().is_some()
    }

    pub fn has_commit_rules(&self) -> bool {
        self.commit_rules().next().is_some()
    }
}

impl Default for ValidatorChain {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("len", &self.rules.len())
            .finish()
    }
}
