//! docform-core - Document form lifecycle controller
//!
//! The control logic that decides *what* happens to an editable document
//! record and *in what order*:
//! - [`FormController`]: load, save, submit, cancel, amend, delete
//! - [`ActionGuard`]: permission gate per action
//! - [`DirtyTracker`]: local-edit state
//! - [`OpenDocRegistry`]: process-wide open-record table
//! - [`RenderOrchestrator`]: ordered post-transition refresh
//! - Collaborator contracts for the store, permissions, workflow, UI
//!
//! # Example
//!
//! ```rust,ignore
//! use docform_core::prelude::*;
//!
//! # async fn example(collab: Collaborators) -> Result<(), FormError> {
//! let hooks = std::sync::Arc::new(docform_hooks::HookRegistry::new());
//! let open_docs = std::sync::Arc::new(OpenDocRegistry::new());
//! let meta = docform_model::TypeMeta::new("Invoice").submittable().amendable();
//!
//! let frm = FormController::new(meta, FormConfig::new(), collab, hooks, open_docs);
//! frm.open("INV-001").await?;
//! frm.submit(SaveOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod collab;
pub mod config;
pub mod controller;
pub mod dirty;
pub mod error;
pub mod events;
pub mod guard;
pub mod registry;
pub mod render;

// Re-exports for convenience
pub use collab::{
    ControlId, Cue, DocumentStore, FieldChange, FormView, Interaction, Navigator, NoticeKind,
    PermissionEngine, StoreError, ViewError, WorkflowEngine,
};
pub use config::FormConfig;
pub use controller::{Collaborators, FormController, LifecycleState, SaveOptions};
pub use dirty::DirtyTracker;
pub use error::FormError;
pub use events::{EventBus, FormEvent, FormEventKind};
pub use guard::{ActionGuard, PermissionDenial};
pub use registry::OpenDocRegistry;
pub use render::{RenderOrchestrator, RenderPass};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the form controller
    pub use crate::{
        Collaborators, ControlId, FormConfig, FormController, FormError, FormEventKind,
        OpenDocRegistry, SaveOptions,
    };
    pub use docform_hooks::{ActionContext, HookName, HookRegistry};
    pub use docform_model::{Action, Capability, DocStatus, Record, TypeMeta};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
