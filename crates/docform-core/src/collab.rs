//! Collaborator contracts
//!
//! The controller consumes its surroundings through these narrow traits:
//! the document store, the permission engine, the workflow engine, the
//! confirmation/notification surface, routing, and the form view. The
//! core decides *what* happens and in what order; implementations decide
//! how it looks and how it travels.

use docform_model::{Action, Capability, PermissionSet, Record};
use serde_json::Value;

/// Errors surfaced by the document store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No such record remotely
    #[error("record not found: {doctype} {name}")]
    NotFound { doctype: String, name: String },

    /// Transport or server failure; message comes from the transport
    #[error("remote call failed: {0}")]
    Remote(String),
}

impl StoreError {
    /// Not-found error for a (type, name) pair
    #[inline]
    #[must_use]
    pub fn not_found(doctype: impl Into<String>, name: impl Into<String>) -> Self {
        StoreError::NotFound {
            doctype: doctype.into(),
            name: name.into(),
        }
    }
}

/// A field mutation reported by the store's change feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub doctype: String,
    pub name: String,
    pub fieldname: String,
    pub value: Value,
}

/// Keyed cache of records plus the remote persistence boundary
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Cached copy, if any
    fn get(&self, doctype: &str, name: &str) -> Option<Record>;

    /// Fetch from remote, populating the cache
    async fn fetch_remote(&self, doctype: &str, name: &str) -> Result<Record, StoreError>;

    /// Persist a record under an action; returns the server's copy
    async fn persist(&self, record: &Record, action: Action) -> Result<Record, StoreError>;

    /// Delete remotely and locally
    async fn remove(&self, doctype: &str, name: &str) -> Result<(), StoreError>;

    /// Drop the cached copy so the next resolve goes remote
    fn evict(&self, doctype: &str, name: &str);

    /// Insert or replace the cached copy without a remote round-trip
    ///
    /// Used for locally created records and to keep the cache canonical
    /// while the controller edits its working copy.
    fn put_local(&self, record: Record);
}

/// Yes/no permission rules per document type
pub trait PermissionEngine: Send + Sync {
    /// Capability rows for a type, optionally specialized to a record
    fn get_permissions(&self, doctype: &str, record: Option<&Record>) -> PermissionSet;

    /// Single-capability check at an access level
    fn has_capability(
        &self,
        doctype: &str,
        level: usize,
        capability: Capability,
        record: &Record,
    ) -> bool;
}

/// Workflow-state engine
pub trait WorkflowEngine: Send + Sync {
    /// Whether the record is read-only under its current workflow state
    fn is_read_only(&self, doctype: &str, name: &str) -> bool;

    /// Field carrying the workflow state, when the type has a workflow
    fn state_fieldname(&self, doctype: &str) -> Option<String>;

    /// Whether the type has a workflow at all
    fn has_workflow(&self, doctype: &str) -> bool;
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// Audible/visual feedback cues for completed actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Submit,
    Cancel,
}

/// Confirmation and notification surface
#[async_trait::async_trait]
pub trait Interaction: Send + Sync {
    /// Ask the user to confirm; resolves to acceptance
    async fn confirm(&self, message: &str) -> bool;

    /// Show a non-blocking notice
    fn notify(&self, message: &str, kind: NoticeKind);

    /// Play a feedback cue
    fn play_cue(&self, cue: Cue);
}

/// Routing and session-level recovery
pub trait Navigator: Send + Sync {
    /// Route to a record's form
    fn navigate_to(&self, doctype: &str, name: &str);

    /// Go back in history
    fn back(&self);

    /// Abandon the current view and reload the whole session
    fn reload_session(&self);
}

/// View-side failure, reported but never fatal to a render pass
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("view error: {0}")]
pub struct ViewError(pub String);

/// Opaque handle to the UI control that triggered an action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlId(pub String);

impl ControlId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// The rendered form surface
///
/// Everything visual. The controller only dictates ordering; failures in
/// the refresh methods are logged and the pass continues.
pub trait FormView: Send + Sync {
    /// Refresh title/status chrome; `different_doc` resets toolbar state
    fn refresh_header(&self, record: &Record, different_doc: bool) -> Result<(), ViewError>;

    /// Refresh all field widgets from record state
    fn refresh_fields(&self, record: &Record) -> Result<(), ViewError>;

    /// Refresh a single field widget
    fn refresh_field(&self, record: &Record, fieldname: &str);

    /// Post-render dashboard/summary update
    fn after_refresh(&self, record: &Record) -> Result<(), ViewError>;

    /// Commit any pending input before a save
    fn flush_pending_input(&self);

    /// Close open inline-edit sub-forms
    fn close_subforms(&self);

    /// Drop cached column layouts (headings differ between records)
    fn reset_column_cache(&self);

    /// Focus the first input of a new record
    fn focus_first_input(&self);

    /// Toggle the whole form read-only
    fn set_read_only(&self, read_only: bool);

    /// Enable or disable an action control
    fn set_control_enabled(&self, control: &ControlId, enabled: bool);

    /// Full-surface "not permitted" display
    fn show_not_permitted(&self, doctype: &str, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::not_found("Invoice", "INV-001");
        assert_eq!(err.to_string(), "record not found: Invoice INV-001");
        assert_eq!(
            StoreError::Remote("timeout".into()).to_string(),
            "remote call failed: timeout"
        );
    }

    #[test]
    fn control_id_equality() {
        assert_eq!(ControlId::new("save-btn"), ControlId::new("save-btn"));
        assert_ne!(ControlId::new("save-btn"), ControlId::new("submit-btn"));
    }
}
