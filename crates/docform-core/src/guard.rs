//! Action guard
//!
//! Pure decision: may this action run, given the permission rows and the
//! workflow read-only status? The action -> capability map is total and
//! fixed (`Action::required_capability`), so there is no unmapped-action
//! case to fail on.

use docform_model::{Action, Capability, PermissionSet};

/// Reason an action was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDenial {
    /// The requested action
    pub action: Action,
    /// The capability it maps to
    pub capability: Capability,
    /// Whether the denial happened under a workflow read-only lock
    pub workflow_read_only: bool,
}

/// Stateless permission gate for form actions
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionGuard;

impl ActionGuard {
    /// Decide whether `action` may proceed
    ///
    /// Under a workflow read-only lock the user may still act when they
    /// hold any state-moving capability (write/create/submit/cancel), so
    /// they can carry a record through its workflow states. Otherwise the
    /// mapped capability alone decides.
    pub fn can_perform(
        action: Action,
        perms: &PermissionSet,
        workflow_read_only: bool,
    ) -> Result<(), PermissionDenial> {
        let capability = action.required_capability();

        let allowed = if workflow_read_only {
            perms.workflow_override()
        } else {
            perms.grants(capability)
        };

        if allowed {
            Ok(())
        } else {
            Err(PermissionDenial {
                action,
                capability,
                workflow_read_only,
            })
        }
    }
}
