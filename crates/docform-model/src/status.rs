//! Record status lifecycle
//!
//! A record moves Draft -> Submitted -> Cancelled and never backwards.
//! Amendment creates a fresh Draft record; it never rewinds the original.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Three-valued lifecycle status of a record
///
/// Wire representation is the numeric code (0/1/2) used by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DocStatus {
    /// Editable, not yet confirmed
    Draft,
    /// Confirmed; further edits go through Update
    Submitted,
    /// Terminally withdrawn
    Cancelled,
}

impl DocStatus {
    /// Numeric status code as stored remotely
    #[inline]
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }

    /// Statuses reachable from this one
    #[must_use]
    pub fn allowed_transitions(self) -> &'static [DocStatus] {
        match self {
            DocStatus::Draft => &[DocStatus::Submitted],
            DocStatus::Submitted => &[DocStatus::Cancelled],
            DocStatus::Cancelled => &[],
        }
    }

    /// Check whether `to` is a legal next status
    #[inline]
    #[must_use]
    pub fn can_transition(self, to: DocStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }

    #[inline]
    #[must_use]
    pub fn is_draft(self) -> bool {
        self == DocStatus::Draft
    }

    #[inline]
    #[must_use]
    pub fn is_submitted(self) -> bool {
        self == DocStatus::Submitted
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(self) -> bool {
        self == DocStatus::Cancelled
    }
}

impl Default for DocStatus {
    fn default() -> Self {
        DocStatus::Draft
    }
}

impl From<DocStatus> for u8 {
    fn from(value: DocStatus) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for DocStatus {
    type Error = ModelError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DocStatus::Draft),
            1 => Ok(DocStatus::Submitted),
            2 => Ok(DocStatus::Cancelled),
            other => Err(ModelError::InvalidStatusCode(other)),
        }
    }
}

impl std::fmt::Display for DocStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DocStatus::Draft => "Draft",
            DocStatus::Submitted => "Submitted",
            DocStatus::Cancelled => "Cancelled",
        };
        write!(f, "{label}")
    }
}
