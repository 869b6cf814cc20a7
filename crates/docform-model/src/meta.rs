//! Per-type metadata consumed by the controller
//!
//! A trimmed view of the type's schema: only the facts the lifecycle
//! controller needs to decide what is allowed, not how fields render.

use serde::{Deserialize, Serialize};

/// Schema facts for one document type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeMeta {
    /// Type name
    pub name: String,
    /// Records of this type can be submitted
    pub is_submittable: bool,
    /// This type defines other types; editing it conflicts with any open
    /// instance editor
    pub is_schema_type: bool,
    /// The type carries an `amended_from` field (amendment allowed)
    pub has_amended_from: bool,
    /// The type carries an `amendment_date` field
    pub has_amendment_date: bool,
    /// Field used for display titles, when the name is not it
    pub title_field: Option<String>,
}

impl TypeMeta {
    /// Create metadata for a plain, non-submittable type
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn submittable(mut self) -> Self {
        self.is_submittable = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn schema_type(mut self) -> Self {
        self.is_schema_type = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn amendable(mut self) -> Self {
        self.has_amended_from = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_amendment_date(mut self) -> Self {
        self.has_amendment_date = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_title_field(mut self, field: impl Into<String>) -> Self {
        self.title_field = Some(field.into());
        self
    }
}
