//! Hook pipeline errors

/// Errors from running hooks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// A hook rejected the action outright
    #[error("hook rejected: {0}")]
    Rejected(String),

    /// A hook failed while running
    #[error("hook '{hook}' failed: {message}")]
    Failed { hook: String, message: String },
}

impl HookError {
    /// Rejection with a message
    #[inline]
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        HookError::Rejected(message.into())
    }

    /// Failure attributed to a named hook point
    #[inline]
    #[must_use]
    pub fn failed(hook: impl Into<String>, message: impl Into<String>) -> Self {
        HookError::Failed {
            hook: hook.into(),
            message: message.into(),
        }
    }
}
