//! Hook registry
//!
//! Hooks are registered once at controller construction against a
//! (doctype, hook point) key and live for the controller's lifetime.
//! Registration order is execution order.

use crate::context::ActionContext;
use crate::error::HookError;
use crate::name::HookName;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered hook
///
/// Implementors may be synchronous or asynchronous; the pipeline awaits
/// each to completion either way.
#[async_trait::async_trait]
pub trait Hook: Send + Sync {
    /// Run against the current action context
    async fn run(&self, ctx: &mut ActionContext) -> Result<(), HookError>;
}

/// Adapter turning a closure into a [`Hook`]
pub struct FnHook<F>(F);

impl<F> FnHook<F>
where
    F: for<'a> Fn(&'a mut ActionContext) -> BoxFuture<'a, Result<(), HookError>> + Send + Sync,
{
    /// Wrap a future-returning closure
    #[inline]
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait::async_trait]
impl<F> Hook for FnHook<F>
where
    F: for<'a> Fn(&'a mut ActionContext) -> BoxFuture<'a, Result<(), HookError>> + Send + Sync,
{
    async fn run(&self, ctx: &mut ActionContext) -> Result<(), HookError> {
        (self.0)(ctx).await
    }
}

type HookKey = (String, HookName);

/// Ordered hook storage keyed by (doctype, hook point)
#[derive(Default)]
pub struct HookRegistry {
    hooks: RwLock<HashMap<HookKey, Vec<Arc<dyn Hook>>>>,
}

impl HookRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook; appended after earlier registrations for the key
    pub fn register(&self, doctype: impl Into<String>, hook: HookName, handler: Arc<dyn Hook>) {
        let key = (doctype.into(), hook);
        self.hooks.write().entry(key).or_default().push(handler);
    }

    /// Register a future-returning closure
    pub fn register_fn<F>(&self, doctype: impl Into<String>, hook: HookName, f: F)
    where
        F: for<'a> Fn(&'a mut ActionContext) -> BoxFuture<'a, Result<(), HookError>>
            + Send
            + Sync
            + 'static,
    {
        self.register(doctype, hook, Arc::new(FnHook::new(f)));
    }

    /// Register a synchronous closure
    ///
    /// Normalized to the async interface with an immediately-ready future.
    pub fn register_sync<F>(&self, doctype: impl Into<String>, hook: HookName, f: F)
    where
        F: Fn(&mut ActionContext) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.register_fn(doctype, hook, move |ctx| {
            let result = f(ctx);
            Box::pin(std::future::ready(result))
        });
    }

    /// Hooks for a key, in registration order
    ///
    /// Returns clones so no lock is held while hooks run.
    #[must_use]
    pub fn hooks_for(&self, doctype: &str, hook: &HookName) -> Vec<Arc<dyn Hook>> {
        self.hooks
            .read()
            .get(&(doctype.to_string(), hook.clone()))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of hooks registered for a key
    #[must_use]
    pub fn count(&self, doctype: &str, hook: &HookName) -> usize {
        self.hooks
            .read()
            .get(&(doctype.to_string(), hook.clone()))
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total: usize = self.hooks.read().values().map(Vec::len).sum();
        f.debug_struct("HookRegistry").field("hooks", &total).finish()
    }
}
