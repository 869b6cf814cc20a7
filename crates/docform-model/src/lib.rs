//! docform-model - Document record data model
//!
//! The leaf crate of the docform workspace:
//! - Record status lifecycle (draft / submitted / cancelled)
//! - The record itself with its ordered field map
//! - Permission sets and the action -> capability map
//! - Per-type metadata consumed by the controller

pub mod action;
pub mod error;
pub mod meta;
pub mod perm;
pub mod record;
pub mod status;

// Re-exports for convenience
pub use action::Action;
pub use error::ModelError;
pub use meta::TypeMeta;
pub use perm::{Capability, LevelPerms, PermissionSet};
pub use record::{
    both_semantically_empty, is_semantically_empty, Record, AMENDED_FROM_FIELD,
    AMENDMENT_DATE_FIELD,
};
pub use status::DocStatus;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
