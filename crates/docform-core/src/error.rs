//! Controller error taxonomy
//!
//! Local failures (permission, veto, declined confirm, busy) resolve
//! without contacting remote and leave state untouched. Remote failures
//! are surfaced, never retried here. Programmer errors are fatal.
//! Type/instance conflicts never appear as errors: they are handled at
//! the machine boundary by a session reload.

use crate::collab::StoreError;
use docform_hooks::HookError;
use docform_model::Action;

/// Main controller error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Action guard denial
    #[error("no permission to {action} {doctype}")]
    PermissionDenied { action: Action, doctype: String },

    /// A hook cleared the per-call valid flag
    #[error("{action} stopped by validation")]
    ValidationVetoed { action: Action },

    /// Read permission missing at load time
    #[error("not permitted to read {doctype} {name}")]
    NotPermittedToRead { doctype: String, name: String },

    /// User declined the confirmation prompt
    #[error("confirmation declined")]
    ConfirmationDeclined,

    /// Another transition on this controller is in flight
    #[error("transition already in progress")]
    TransitionInProgress,

    /// Remote/store failure; caller decides whether to retry
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Hook pipeline failure (fail-fast)
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// Transition invoked with no record loaded
    #[error("no active record")]
    NoActiveRecord,

    /// Amend on a type without the back-reference field
    #[error("type {doctype} has no amended_from field")]
    MissingAmendField { doctype: String },
}

impl FormError {
    /// Whether the caller can recover and retry
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }

    /// Programmer errors: fail immediately, never degrade silently
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FormError::NoActiveRecord | FormError::MissingAmendField { .. }
        )
    }

    /// Whether this failure was decided locally, before any remote call
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            FormError::PermissionDenied { .. }
                | FormError::ValidationVetoed { .. }
                | FormError::NotPermittedToRead { .. }
                | FormError::ConfirmationDeclined
                | FormError::TransitionInProgress
        )
    }
}
