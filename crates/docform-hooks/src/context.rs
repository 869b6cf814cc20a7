//! Per-call action context
//!
//! One [`ActionContext`] is created for each action invocation and passed
//! through every hook of that action. The `valid` flag is how a hook
//! vetoes the action without throwing: clear it, and the caller aborts
//! before the remote call. The flag is scoped to the single invocation,
//! never shared across calls.

use docform_model::{Action, Record};

/// Mutable context threaded through one action's hook stages
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Working copy of the record; pre-persist hook mutations are kept
    pub record: Record,
    /// Action being performed, when there is one
    pub action: Option<Action>,
    /// Field that triggered this run, for field hooks
    pub fieldname: Option<String>,
    /// Veto flag; starts true, any hook may clear it
    pub valid: bool,
}

impl ActionContext {
    /// Context for a lifecycle hook run
    #[must_use]
    pub fn new(record: Record) -> Self {
        Self {
            record,
            action: None,
            fieldname: None,
            valid: true,
        }
    }

    /// Context for an action's validate/persist chain
    #[must_use]
    pub fn for_action(record: Record, action: Action) -> Self {
        Self {
            action: Some(action),
            ..Self::new(record)
        }
    }

    /// Context for a field-change trigger
    #[must_use]
    pub fn for_field(record: Record, fieldname: impl Into<String>) -> Self {
        Self {
            fieldname: Some(fieldname.into()),
            ..Self::new(record)
        }
    }

    /// Veto the enclosing action
    #[inline]
    pub fn veto(&mut self) {
        self.valid = false;
    }
}
