//! The document record under edit
//!
//! A [`Record`] is the in-memory copy of one remote document: its type,
//! name, lifecycle status, and an ordered free-form field map. The
//! controller owns the record exclusively while it is open; everything
//! else sees shared read access.

use crate::error::ModelError;
use crate::status::DocStatus;
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field holding the back-reference on an amended record
pub const AMENDED_FROM_FIELD: &str = "amended_from";

/// Field stamped with the amendment time when the type carries it
pub const AMENDMENT_DATE_FIELD: &str = "amendment_date";

/// One editable document record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Document type name
    pub doctype: String,
    /// Unique name within the type
    pub name: String,
    /// Lifecycle status
    pub status: DocStatus,
    /// Created locally, never persisted
    pub is_local: bool,
    /// Server copy changed since this one was loaded
    pub needs_refresh: bool,
    /// Time of the last confirmed sync with the store
    pub last_sync: Option<DateTime<Utc>>,
    /// Ordered fieldname -> value map
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create a record bound to an existing remote name
    #[must_use]
    pub fn new(doctype: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            name: name.into(),
            status: DocStatus::Draft,
            is_local: false,
            needs_refresh: false,
            last_sync: None,
            fields: IndexMap::new(),
        }
    }

    /// Create a locally-new, unsaved draft with a generated name
    #[must_use]
    pub fn new_local(doctype: impl Into<String>) -> Self {
        let doctype = doctype.into();
        let name = local_name(&doctype);
        Self {
            is_local: true,
            ..Self::new(doctype, name)
        }
    }

    /// Read a field value
    #[inline]
    #[must_use]
    pub fn get(&self, fieldname: &str) -> Option<&Value> {
        self.fields.get(fieldname)
    }

    /// Read a field as a string slice, if it is one
    #[inline]
    #[must_use]
    pub fn get_str(&self, fieldname: &str) -> Option<&str> {
        self.fields.get(fieldname).and_then(Value::as_str)
    }

    /// Write a field value
    pub fn set(&mut self, fieldname: impl Into<String>, value: Value) {
        self.fields.insert(fieldname.into(), value);
    }

    /// Fieldnames in insertion order
    pub fn fieldnames(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields present
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Back-reference to the record this one amends
    #[inline]
    #[must_use]
    pub fn amended_from(&self) -> Option<&str> {
        self.get_str(AMENDED_FROM_FIELD)
    }

    /// Advance the status along the lifecycle table
    ///
    /// # Errors
    /// `ModelError::IllegalTransition` when `to` is not reachable.
    pub fn transition(&mut self, to: DocStatus) -> Result<(), ModelError> {
        if !self.status.can_transition(to) {
            return Err(ModelError::IllegalTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Mark this copy as synchronized with the store at `now`
    pub fn mark_synced(&mut self, now: DateTime<Utc>) {
        self.last_sync = Some(now);
        self.is_local = false;
        self.needs_refresh = false;
    }

    /// Age of this copy relative to `now`; `None` when never synced
    #[must_use]
    pub fn age_since_sync(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.last_sync.map(|at| now - at)
    }

    /// Whether this copy is older than `threshold`
    ///
    /// Locally-new records are never stale: there is nothing remote to be
    /// stale against.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        if self.is_local {
            return false;
        }
        matches!(self.age_since_sync(now), Some(age) if age > threshold)
    }

    /// Duplicate into a fresh local draft
    ///
    /// Copies the field map, strips amendment bookkeeping, and generates a
    /// new local name. The original is untouched.
    #[must_use]
    pub fn duplicate(&self) -> Record {
        let mut copy = Record::new_local(self.doctype.clone());
        copy.fields = self.fields.clone();
        copy.fields.shift_remove(AMENDED_FROM_FIELD);
        copy.fields.shift_remove(AMENDMENT_DATE_FIELD);
        copy
    }
}

/// Generate a name for a locally created record
fn local_name(doctype: &str) -> String {
    let slug = doctype.to_lowercase().replace(' ', "-");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("new-{}-{}", slug, &suffix[..8])
}

/// Whether a value is empty for dirty-tracking purposes
///
/// Rich-text widgets normalize null to empty string on render; the two are
/// treated as the same "nothing" so the round-trip does not dirty the form.
#[inline]
#[must_use]
pub fn is_semantically_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Whether both the incoming and the current value are empty
#[inline]
#[must_use]
pub fn both_semantically_empty(incoming: &Value, current: Option<&Value>) -> bool {
    is_semantically_empty(incoming) && current.map_or(true, is_semantically_empty)
}
