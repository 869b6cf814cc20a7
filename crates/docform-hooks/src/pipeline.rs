//! Serial trigger pipeline
//!
//! Runs every hook registered for a point, one at a time, each awaited to
//! completion before the next starts. The first hook error aborts the run;
//! hooks that already ran are not rolled back. Hooks across different
//! points never interleave because each `run` is awaited end-to-end.

use crate::context::ActionContext;
use crate::error::HookError;
use crate::name::HookName;
use crate::registry::HookRegistry;
use std::sync::Arc;

/// Ordered, fail-fast hook runner
#[derive(Debug, Clone)]
pub struct TriggerPipeline {
    registry: Arc<HookRegistry>,
}

impl TriggerPipeline {
    /// Create a pipeline over a shared registry
    #[inline]
    #[must_use]
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// The underlying registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Run all hooks for one point against `ctx`
    ///
    /// # Errors
    /// The first failing hook's error, with later hooks unrun.
    pub async fn run(
        &self,
        doctype: &str,
        hook: &HookName,
        ctx: &mut ActionContext,
    ) -> Result<(), HookError> {
        let hooks = self.registry.hooks_for(doctype, hook);
        if hooks.is_empty() {
            return Ok(());
        }

        tracing::debug!(doctype, hook = %hook, count = hooks.len(), "running hooks");
        for (position, handler) in hooks.iter().enumerate() {
            if let Err(err) = handler.run(ctx).await {
                tracing::warn!(doctype, hook = %hook, position, %err, "hook failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docform_model::Record;
    use parking_lot::Mutex;

    fn pipeline_with_registry() -> (TriggerPipeline, Arc<HookRegistry>) {
        let registry = Arc::new(HookRegistry::new());
        (TriggerPipeline::new(Arc::clone(&registry)), registry)
    }

    fn invoice_ctx() -> ActionContext {
        ActionContext::new(Record::new("Invoice", "INV-001"))
    }

    #[tokio::test]
    async fn runs_hooks_in_registration_order() {
        let (pipeline, registry) = pipeline_with_registry();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["h1", "h2", "h3"] {
            let order = Arc::clone(&order);
            registry.register_sync("Invoice", HookName::Validate, move |_| {
                order.lock().push(label);
                Ok(())
            });
        }

        let mut ctx = invoice_ctx();
        pipeline
            .run("Invoice", &HookName::Validate, &mut ctx)
            .await
            .unwrap();

        assert_eq!(*order.lock(), vec!["h1", "h2", "h3"]);
    }

    #[tokio::test]
    async fn fails_fast_on_first_error() {
        let (pipeline, registry) = pipeline_with_registry();
        let ran_after = Arc::new(Mutex::new(false));

        registry.register_sync("Invoice", HookName::BeforeSave, |_| {
            Err(HookError::rejected("nope"))
        });
        {
            let ran_after = Arc::clone(&ran_after);
            registry.register_sync("Invoice", HookName::BeforeSave, move |_| {
                *ran_after.lock() = true;
                Ok(())
            });
        }

        let mut ctx = invoice_ctx();
        let err = pipeline
            .run("Invoice", &HookName::BeforeSave, &mut ctx)
            .await
            .unwrap_err();

        assert_eq!(err, HookError::rejected("nope"));
        assert!(!*ran_after.lock());
    }

    #[tokio::test]
    async fn empty_point_is_a_no_op() {
        let (pipeline, _registry) = pipeline_with_registry();
        let mut ctx = invoice_ctx();
        pipeline
            .run("Invoice", &HookName::Refresh, &mut ctx)
            .await
            .unwrap();
        assert!(ctx.valid);
    }

    #[tokio::test]
    async fn veto_is_visible_to_later_hooks_and_caller() {
        let (pipeline, registry) = pipeline_with_registry();
        let saw_veto = Arc::new(Mutex::new(false));

        registry.register_sync("Invoice", HookName::Validate, |ctx| {
            ctx.veto();
            Ok(())
        });
        {
            let saw_veto = Arc::clone(&saw_veto);
            registry.register_sync("Invoice", HookName::Validate, move |ctx| {
                *saw_veto.lock() = !ctx.valid;
                Ok(())
            });
        }

        let mut ctx = invoice_ctx();
        pipeline
            .run("Invoice", &HookName::Validate, &mut ctx)
            .await
            .unwrap();

        assert!(!ctx.valid);
        assert!(*saw_veto.lock());
    }
}
