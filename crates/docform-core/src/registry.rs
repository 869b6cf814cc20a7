//! Open-document registry
//!
//! Process-wide table of which records are open in this session, keyed by
//! (type, name). Used to detect load races and type-level conflicts.
//! Entries persist across record switches and are cleared only by explicit
//! close or rename. A single mutex guards the set: entries are small and
//! contention is rare.

use parking_lot::Mutex;
use std::collections::HashSet;

type OpenKey = (String, String);

/// Which (type, name) pairs are open in this session
#[derive(Debug, Default)]
pub struct OpenDocRegistry {
    open: Mutex<HashSet<OpenKey>>,
}

impl OpenDocRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether (type, name) is open
    #[must_use]
    pub fn is_open(&self, doctype: &str, name: &str) -> bool {
        self.open
            .lock()
            .contains(&(doctype.to_string(), name.to_string()))
    }

    /// Whether any record of a type is open
    #[must_use]
    pub fn any_open_of_type(&self, doctype: &str) -> bool {
        self.open.lock().iter().any(|(dt, _)| dt == doctype)
    }

    /// Record (type, name) as open
    pub fn mark_open(&self, doctype: impl Into<String>, name: impl Into<String>) {
        self.open.lock().insert((doctype.into(), name.into()));
    }

    /// Remove (type, name)
    pub fn mark_closed(&self, doctype: &str, name: &str) {
        self.open
            .lock()
            .remove(&(doctype.to_string(), name.to_string()));
    }

    /// Atomically move an entry from `old` to `new`
    pub fn rename(&self, doctype: &str, old: &str, new: impl Into<String>) {
        let mut open = self.open.lock();
        open.remove(&(doctype.to_string(), old.to_string()));
        open.insert((doctype.to_string(), new.into()));
    }

    /// Number of open entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.lock().len()
    }

    /// Whether nothing is open
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_close_round_trip() {
        let registry = OpenDocRegistry::new();
        assert!(!registry.is_open("Invoice", "INV-001"));

        registry.mark_open("Invoice", "INV-001");
        assert!(registry.is_open("Invoice", "INV-001"));
        assert!(registry.any_open_of_type("Invoice"));
        assert!(!registry.any_open_of_type("Order"));

        registry.mark_closed("Invoice", "INV-001");
        assert!(registry.is_empty());
    }

    #[test]
    fn rename_moves_entry() {
        let registry = OpenDocRegistry::new();
        registry.mark_open("Invoice", "new-invoice-1234");
        registry.rename("Invoice", "new-invoice-1234", "INV-001");

        assert!(!registry.is_open("Invoice", "new-invoice-1234"));
        assert!(registry.is_open("Invoice", "INV-001"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn entries_survive_other_types() {
        let registry = OpenDocRegistry::new();
        registry.mark_open("Invoice", "INV-001");
        registry.mark_open("Order", "ORD-001");

        registry.mark_closed("Invoice", "INV-001");
        assert!(registry.is_open("Order", "ORD-001"));
    }
}
