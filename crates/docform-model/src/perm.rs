//! Permission capabilities and per-level permission sets
//!
//! Permissions arrive from the permission engine as one row of capability
//! booleans per access level. Level 0 is the row action guards consult.

use serde::{Deserialize, Serialize};

/// A single grantable capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Read,
    Write,
    Create,
    Submit,
    Cancel,
    Amend,
    Delete,
}

impl Capability {
    /// All capabilities, in declaration order
    pub const ALL: [Capability; 7] = [
        Capability::Read,
        Capability::Write,
        Capability::Create,
        Capability::Submit,
        Capability::Cancel,
        Capability::Amend,
        Capability::Delete,
    ];
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Capability::Read => "read",
            Capability::Write => "write",
            Capability::Create => "create",
            Capability::Submit => "submit",
            Capability::Cancel => "cancel",
            Capability::Amend => "amend",
            Capability::Delete => "delete",
        };
        write!(f, "{label}")
    }
}

/// Capability booleans for one access level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPerms {
    pub read: bool,
    pub write: bool,
    pub create: bool,
    pub submit: bool,
    pub cancel: bool,
    pub amend: bool,
    pub delete: bool,
}

impl LevelPerms {
    /// No capabilities granted
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Every capability granted
    #[must_use]
    pub fn all() -> Self {
        Self {
            read: true,
            write: true,
            create: true,
            submit: true,
            cancel: true,
            amend: true,
            delete: true,
        }
    }

    /// Grant one capability (builder style)
    #[must_use]
    pub fn grant(mut self, capability: Capability) -> Self {
        match capability {
            Capability::Read => self.read = true,
            Capability::Write => self.write = true,
            Capability::Create => self.create = true,
            Capability::Submit => self.submit = true,
            Capability::Cancel => self.cancel = true,
            Capability::Amend => self.amend = true,
            Capability::Delete => self.delete = true,
        }
        self
    }

    /// Check one capability
    #[inline]
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Read => self.read,
            Capability::Write => self.write,
            Capability::Create => self.create,
            Capability::Submit => self.submit,
            Capability::Cancel => self.cancel,
            Capability::Amend => self.amend,
            Capability::Delete => self.delete,
        }
    }
}

/// Per-access-level permission rows for one document type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    levels: Vec<LevelPerms>,
}

impl PermissionSet {
    /// Build from explicit level rows (index = access level)
    #[inline]
    #[must_use]
    pub fn new(levels: Vec<LevelPerms>) -> Self {
        Self { levels }
    }

    /// Build with only the base (level 0) row
    #[inline]
    #[must_use]
    pub fn from_base(base: LevelPerms) -> Self {
        Self { levels: vec![base] }
    }

    /// Row for an access level, if present
    #[inline]
    #[must_use]
    pub fn level(&self, level: usize) -> Option<&LevelPerms> {
        self.levels.get(level)
    }

    /// Level 0 row; an absent row grants nothing
    #[inline]
    #[must_use]
    pub fn base(&self) -> LevelPerms {
        self.levels.first().copied().unwrap_or_default()
    }

    /// Whether level 0 grants a capability
    #[inline]
    #[must_use]
    pub fn grants(&self, capability: Capability) -> bool {
        self.base().has(capability)
    }

    /// Whether the holder may act on a workflow-locked record
    ///
    /// Write, create, submit, or cancel at level 0 lets the user keep
    /// moving a record through workflow states even while the workflow
    /// marks it read-only.
    #[must_use]
    pub fn workflow_override(&self) -> bool {
        let base = self.base();
        base.write || base.create || base.submit || base.cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_grants_nothing() {
        let perms = PermissionSet::default();
        for cap in Capability::ALL {
            assert!(!perms.grants(cap));
        }
        assert!(!perms.workflow_override());
    }

    #[test]
    fn grant_builder() {
        let base = LevelPerms::none()
            .grant(Capability::Read)
            .grant(Capability::Submit);
        assert!(base.read);
        assert!(base.submit);
        assert!(!base.write);
    }

    #[test]
    fn base_level_consulted() {
        let perms = PermissionSet::new(vec![
            LevelPerms::none().grant(Capability::Read),
            LevelPerms::all(),
        ]);
        assert!(perms.grants(Capability::Read));
        assert!(!perms.grants(Capability::Write));
        assert!(perms.level(1).unwrap().delete);
    }

    #[test]
    fn workflow_override_requires_state_moving_capability() {
        let read_only = PermissionSet::from_base(LevelPerms::none().grant(Capability::Read));
        assert!(!read_only.workflow_override());

        for cap in [
            Capability::Write,
            Capability::Create,
            Capability::Submit,
            Capability::Cancel,
        ] {
            let perms = PermissionSet::from_base(LevelPerms::none().grant(cap));
            assert!(perms.workflow_override(), "{cap} should override");
        }

        let amend_only = PermissionSet::from_base(LevelPerms::none().grant(Capability::Amend));
        assert!(!amend_only.workflow_override());
    }
}
