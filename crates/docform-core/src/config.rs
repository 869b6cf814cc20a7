//! Controller configuration

use chrono::Duration;

/// Tunables for one form controller
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Cached-copy age beyond which a clean record silently reloads
    pub stale_after_secs: i64,
    /// Event bus buffer capacity
    pub event_capacity: usize,
    /// Name of the schema-defining type, for open-conflict detection
    pub schema_type_name: String,
}

impl FormConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the staleness threshold
    #[inline]
    #[must_use]
    pub fn with_stale_after_secs(mut self, secs: i64) -> Self {
        self.stale_after_secs = secs;
        self
    }

    /// Override the schema type name
    #[inline]
    #[must_use]
    pub fn with_schema_type_name(mut self, name: impl Into<String>) -> Self {
        self.schema_type_name = name.into();
        self
    }

    /// Staleness threshold as a duration
    #[inline]
    #[must_use]
    pub fn stale_after(&self) -> Duration {
        Duration::seconds(self.stale_after_secs)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: 120,
            event_capacity: 64,
            schema_type_name: "Schema".to_string(),
        }
    }
}
