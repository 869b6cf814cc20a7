//! docform-hooks - Lifecycle hook registry and trigger pipeline
//!
//! Pluggable event hooks ("scripts") that intercept every lifecycle point
//! of a document form:
//! - [`HookName`] names the interception points
//! - [`HookRegistry`] holds registered hooks in registration order
//! - [`TriggerPipeline`] runs them serially, fail-fast
//! - [`ActionContext`] carries the per-call veto flag between hooks

pub mod context;
pub mod error;
pub mod name;
pub mod pipeline;
pub mod registry;

// Re-exports for convenience
pub use context::ActionContext;
pub use error::HookError;
pub use name::HookName;
pub use pipeline::TriggerPipeline;
pub use registry::{FnHook, Hook, HookRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
