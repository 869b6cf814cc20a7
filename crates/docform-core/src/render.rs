//! Render orchestration
//!
//! The fixed refresh sequence run after every successful load or
//! transition: header, global notify, field widgets, the `refresh` hook,
//! `onload_post_render` on first load, then the dashboard pass. Order is
//! load-bearing; each step is awaited before the next. View failures are
//! reported and the pass continues; hook failures abort only their own
//! step.

use crate::collab::FormView;
use crate::events::{EventBus, FormEventKind};
use docform_hooks::{ActionContext, HookName, TriggerPipeline};
use docform_model::Record;
use std::sync::Arc;

/// Per-pass render inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderPass {
    /// The record shown differs from the previous one
    pub different_doc: bool,
    /// This is the record's first load in this session
    pub first_load: bool,
}

/// Ordered post-transition refresh runner
#[derive(Clone)]
pub struct RenderOrchestrator {
    view: Arc<dyn FormView>,
    pipeline: TriggerPipeline,
    events: EventBus,
}

impl RenderOrchestrator {
    /// Create an orchestrator over the view, hook pipeline, and event bus
    #[must_use]
    pub fn new(view: Arc<dyn FormView>, pipeline: TriggerPipeline, events: EventBus) -> Self {
        Self {
            view,
            pipeline,
            events,
        }
    }

    /// Run the full refresh sequence
    ///
    /// Returns the record as the `refresh` hooks left it, so the caller
    /// can keep their mutations.
    pub async fn render(&self, record: Record, pass: RenderPass) -> Record {
        let doctype = record.doctype.clone();
        let name = record.name.clone();

        // 1. header/title/status chrome
        if let Err(err) = self.view.refresh_header(&record, pass.different_doc) {
            tracing::warn!(%doctype, %name, %err, "header refresh failed");
        }

        // 2. global notify
        self.events.emit(FormEventKind::Refresh, &doctype, &name);

        // 3. field widgets
        if let Err(err) = self.view.refresh_fields(&record) {
            tracing::warn!(%doctype, %name, %err, "field refresh failed");
        }

        // 4. refresh hook; fail-fast confined to this step
        let mut ctx = ActionContext::new(record);
        if let Err(err) = self.pipeline.run(&doctype, &HookName::Refresh, &mut ctx).await {
            tracing::warn!(%doctype, %name, %err, "refresh hook failed");
        }

        // 5. onload_post_render, first load only
        if pass.first_load {
            if let Err(err) = self
                .pipeline
                .run(&doctype, &HookName::OnloadPostRender, &mut ctx)
                .await
            {
                tracing::warn!(%doctype, %name, %err, "onload_post_render hook failed");
            }
        }
        let record = ctx.record;

        // 6. dashboard/summary
        if let Err(err) = self.view.after_refresh(&record) {
            tracing::warn!(%doctype, %name, %err, "after-refresh failed");
        }

        self.events.emit(FormEventKind::RenderComplete, &doctype, &name);

        if record.is_local {
            self.view.focus_first_input();
        }

        record
    }
}
