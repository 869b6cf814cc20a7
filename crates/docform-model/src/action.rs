//! Form actions and the action -> capability map

use crate::perm::Capability;
use serde::{Deserialize, Serialize};

/// A user-requested form action
///
/// Each action maps to exactly one required capability; the map is total
/// and fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Create,
    Save,
    Submit,
    /// Post-submit edit of a submitted record
    Update,
    Cancel,
    Amend,
    Delete,
}

impl Action {
    /// Capability required to perform this action
    #[must_use]
    pub fn required_capability(self) -> Capability {
        match self {
            Action::Create => Capability::Create,
            Action::Save => Capability::Write,
            Action::Submit => Capability::Submit,
            Action::Update => Capability::Submit,
            Action::Cancel => Capability::Cancel,
            Action::Amend => Capability::Amend,
            Action::Delete => Capability::Delete,
        }
    }

    /// Whether the validate / before-save hook stage runs for this action
    ///
    /// Update skips validation: it is a post-submit correction, already
    /// confirmed once.
    #[inline]
    #[must_use]
    pub fn needs_validation(self) -> bool {
        self != Action::Update
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Action::Create => "Create",
            Action::Save => "Save",
            Action::Submit => "Submit",
            Action::Update => "Update",
            Action::Cancel => "Cancel",
            Action::Amend => "Amend",
            Action::Delete => "Delete",
        };
        write!(f, "{label}")
    }
}
