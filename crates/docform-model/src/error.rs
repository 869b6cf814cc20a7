//! Error types for the record model

use crate::status::DocStatus;

/// Model-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Status code outside 0..=2
    #[error("invalid status code: {0}")]
    InvalidStatusCode(u8),

    /// Transition not in the status table
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition { from: DocStatus, to: DocStatus },
}
