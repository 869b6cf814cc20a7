//! Form lifecycle controller
//!
//! The central state machine. Holds the active record, drives
//! load/save/submit/cancel/amend/delete transitions, performs staleness
//! and open-conflict detection, and coordinates the action guard, dirty
//! tracker, and trigger pipeline around the single remote-call boundary.
//!
//! Transitions are serialized per controller by a busy token: a second
//! transition entered while one is in flight fails fast with
//! [`FormError::TransitionInProgress`] instead of racing it.

use crate::collab::{
    ControlId, Cue, DocumentStore, FieldChange, FormView, Interaction, Navigator, NoticeKind,
    PermissionEngine, WorkflowEngine,
};
use crate::config::FormConfig;
use crate::dirty::DirtyTracker;
use crate::error::FormError;
use crate::events::{EventBus, FormEventKind};
use crate::guard::ActionGuard;
use crate::registry::OpenDocRegistry;
use crate::render::{RenderOrchestrator, RenderPass};
use chrono::Utc;
use docform_hooks::{ActionContext, HookName, HookRegistry, TriggerPipeline};
use docform_model::{
    Action, Capability, PermissionSet, Record, TypeMeta, AMENDED_FROM_FIELD, AMENDMENT_DATE_FIELD,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where the controller is in its own lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unloaded,
    Loading,
    Loaded,
}

/// External collaborators, injected at construction
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn DocumentStore>,
    pub permissions: Arc<dyn PermissionEngine>,
    pub workflow: Arc<dyn WorkflowEngine>,
    pub interaction: Arc<dyn Interaction>,
    pub navigator: Arc<dyn Navigator>,
    pub view: Arc<dyn FormView>,
}

/// Options for a save-family transition
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// The UI control that triggered the action; disabled for the
    /// duration, re-enabled on every exit path
    pub control: Option<ControlId>,
}

impl SaveOptions {
    /// Options carrying a triggering control
    #[must_use]
    pub fn with_control(control: ControlId) -> Self {
        Self {
            control: Some(control),
        }
    }
}

#[derive(Debug)]
struct ControllerState {
    docname: Option<String>,
    record: Option<Record>,
    perms: PermissionSet,
    read_only: bool,
    save_disabled: bool,
    lifecycle: LifecycleState,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            docname: None,
            record: None,
            perms: PermissionSet::default(),
            read_only: false,
            save_disabled: false,
            lifecycle: LifecycleState::Unloaded,
        }
    }
}

/// Releases the busy token on drop
struct TransitionGuard<'a>(&'a AtomicBool);

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The document form lifecycle controller
pub struct FormController {
    meta: TypeMeta,
    config: FormConfig,
    store: Arc<dyn DocumentStore>,
    permissions: Arc<dyn PermissionEngine>,
    workflow: Arc<dyn WorkflowEngine>,
    interaction: Arc<dyn Interaction>,
    navigator: Arc<dyn Navigator>,
    view: Arc<dyn FormView>,
    pipeline: TriggerPipeline,
    renderer: RenderOrchestrator,
    events: EventBus,
    open_docs: Arc<OpenDocRegistry>,
    dirty: DirtyTracker,
    state: Mutex<ControllerState>,
    busy: AtomicBool,
}

impl FormController {
    /// Create a controller for one document type
    #[must_use]
    pub fn new(
        meta: TypeMeta,
        config: FormConfig,
        collab: Collaborators,
        hooks: Arc<HookRegistry>,
        open_docs: Arc<OpenDocRegistry>,
    ) -> Self {
        let events = EventBus::new(config.event_capacity);
        let pipeline = TriggerPipeline::new(hooks);
        let renderer = RenderOrchestrator::new(
            Arc::clone(&collab.view),
            pipeline.clone(),
            events.clone(),
        );
        Self {
            meta,
            config,
            store: collab.store,
            permissions: collab.permissions,
            workflow: collab.workflow,
            interaction: collab.interaction,
            navigator: collab.navigator,
            view: collab.view,
            pipeline,
            renderer,
            events,
            open_docs,
            dirty: DirtyTracker::new(),
            state: Mutex::new(ControllerState::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Document type this controller edits
    #[inline]
    #[must_use]
    pub fn doctype(&self) -> &str {
        &self.meta.name
    }

    /// Type metadata
    #[inline]
    #[must_use]
    pub fn meta(&self) -> &TypeMeta {
        &self.meta
    }

    /// Lifecycle event bus
    #[inline]
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Name of the active record, if any
    #[must_use]
    pub fn docname(&self) -> Option<String> {
        self.state.lock().docname.clone()
    }

    /// Snapshot of the active record, if any
    #[must_use]
    pub fn record(&self) -> Option<Record> {
        self.state.lock().record.clone()
    }

    /// Current lifecycle state
    #[must_use]
    pub fn lifecycle(&self) -> LifecycleState {
        self.state.lock().lifecycle
    }

    /// Whether local edits are pending
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Whether the active record is locally new (never persisted)
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.state.lock().record.as_ref().is_some_and(|r| r.is_local)
    }

    /// Permissions as of the last refresh
    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        self.state.lock().perms.clone()
    }

    /// Workflow read-only status as of the last refresh
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.state.lock().read_only
    }

    /// Single-capability check against the active record
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        let record = self.record();
        record.map_or(false, |r| {
            self.permissions
                .has_capability(self.doctype(), 0, capability, &r)
        })
    }

    /// Block the save family regardless of permissions
    pub fn disable_save(&self) {
        self.state.lock().save_disabled = true;
    }

    /// Re-allow the save family
    pub fn enable_save(&self) {
        self.state.lock().save_disabled = false;
    }

    // ------------------------------------------------------------------
    // Load / switch / reload
    // ------------------------------------------------------------------

    /// Open a record by name, loading it on first sight
    pub async fn open(&self, name: &str) -> Result<(), FormError> {
        let _busy = self.begin_transition()?;
        let previous = self.docname();
        let different = previous.as_deref() != Some(name);
        if different && previous.is_some() {
            // leaving another record: settle its UI first
            self.view.close_subforms();
            self.view.reset_column_cache();
        }
        self.load(name, different).await
    }

    /// Switch to another record of the same type while the form stays open
    pub async fn switch_to(&self, name: &str) -> Result<(), FormError> {
        self.open(name).await
    }

    /// Evict the cached copy, re-fetch, re-render
    pub async fn reload(&self) -> Result<(), FormError> {
        let _busy = self.begin_transition()?;
        self.reload_inner().await
    }

    /// Drop the active record from this controller
    ///
    /// The open-registry entry survives; it is cleared only by delete or
    /// rename.
    pub fn close(&self) {
        let mut st = self.state.lock();
        if let Some(name) = st.docname.take() {
            st.record = None;
            st.lifecycle = LifecycleState::Unloaded;
            drop(st);
            self.events.emit(FormEventKind::Unload, self.doctype(), &name);
        }
    }

    async fn load(&self, name: &str, different_doc: bool) -> Result<(), FormError> {
        let doctype = self.doctype().to_string();
        self.state.lock().lifecycle = LifecycleState::Loading;
        tracing::debug!(%doctype, %name, "loading record");

        let first_load = !self.open_docs.is_open(&doctype, name);

        // type-level open conflict is unrecoverable for this view
        if first_load && self.has_type_conflict(name) {
            tracing::warn!(%doctype, %name, "open conflict detected, reloading session");
            self.navigator.reload_session();
            self.state.lock().lifecycle = LifecycleState::Unloaded;
            return Ok(());
        }

        // resolve from cache, falling back to remote
        let mut record = match self.store.get(&doctype, name) {
            Some(record) => record,
            None => self.fetch_stamped(&doctype, name).await?,
        };

        // permissions gate entry
        let perms = self.permissions.get_permissions(&doctype, Some(&record));
        if !perms.grants(Capability::Read) {
            self.view.show_not_permitted(&doctype, name);
            self.state.lock().lifecycle = LifecycleState::Unloaded;
            return Err(FormError::NotPermittedToRead {
                doctype,
                name: name.to_string(),
            });
        }

        let read_only = self.workflow.is_read_only(&doctype, name);
        self.view.set_read_only(read_only);

        let mut refetched = false;
        if !first_load {
            // silent reload of a clean, stale copy
            if !self.dirty.is_dirty() && record.is_stale(Utc::now(), self.config.stale_after()) {
                tracing::info!(%doctype, %name, "cached copy stale, reloading");
                self.store.evict(&doctype, name);
                record = self.fetch_stamped(&doctype, name).await?;
                refetched = true;
            }
        }

        // server copy moved under us
        if record.needs_refresh {
            if self.dirty.is_dirty() {
                // local edits win until the user explicitly refreshes
                self.interaction.notify(
                    "This record was modified after you loaded it. Refresh to see the latest version.",
                    NoticeKind::Warning,
                );
            } else {
                self.store.evict(&doctype, name);
                record = self.fetch_stamped(&doctype, name).await?;
                refetched = true;
            }
        }

        // nudge a clean, saved, workflow-less draft toward submission
        if self.meta.is_submittable
            && perms.grants(Capability::Submit)
            && !self.dirty.is_dirty()
            && !record.is_local
            && !self.workflow.has_workflow(&doctype)
            && record.status.is_draft()
        {
            self.interaction
                .notify("Submit this document to confirm", NoticeKind::Info);
        }

        {
            let mut st = self.state.lock();
            st.docname = Some(name.to_string());
            st.perms = perms;
            st.read_only = read_only;
            st.record = Some(record.clone());
        }

        if first_load {
            let mut ctx = ActionContext::new(record);
            self.pipeline
                .run(&doctype, &HookName::BeforeLoad, &mut ctx)
                .await?;
            self.pipeline.run(&doctype, &HookName::Onload, &mut ctx).await?;
            record = ctx.record;
            self.state.lock().record = Some(record.clone());
            self.store.put_local(record.clone());
            self.open_docs.mark_open(&doctype, name);
            self.events.emit(FormEventKind::Load, &doctype, name);
        }

        if first_load || refetched {
            self.dirty.reset();
        }

        let rendered = self
            .renderer
            .render(
                record,
                RenderPass {
                    different_doc,
                    first_load,
                },
            )
            .await;

        let mut st = self.state.lock();
        st.record = Some(rendered);
        st.lifecycle = LifecycleState::Loaded;
        Ok(())
    }

    async fn reload_inner(&self) -> Result<(), FormError> {
        let doctype = self.doctype().to_string();
        let Some(name) = self.docname() else {
            return Ok(());
        };

        if self.has_type_conflict(&name) {
            tracing::warn!(%doctype, %name, "open conflict detected, reloading session");
            self.navigator.reload_session();
            return Ok(());
        }

        // nothing remote to reload for a local record
        if self.record().is_some_and(|r| r.is_local) {
            return Ok(());
        }

        self.store.evict(&doctype, &name);
        let record = self.fetch_stamped(&doctype, &name).await?;
        self.state.lock().record = Some(record.clone());
        self.dirty.reset();

        let rendered = self.renderer.render(record, RenderPass::default()).await;
        let mut st = self.state.lock();
        st.record = Some(rendered);
        st.lifecycle = LifecycleState::Loaded;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Save family
    // ------------------------------------------------------------------

    /// Persist the active record under an action
    pub async fn save(&self, action: Action, opts: SaveOptions) -> Result<(), FormError> {
        let _busy = self.begin_transition()?;
        self.save_inner(action, &opts).await
    }

    /// Save a draft, or update a dirty submitted record
    pub async fn save_or_update(&self, opts: SaveOptions) -> Result<(), FormError> {
        if self.state.lock().save_disabled {
            return Ok(());
        }
        let record = self.current_record()?;
        if record.status.is_draft() {
            self.save(Action::Save, opts).await
        } else if record.status.is_submitted() && self.dirty.is_dirty() {
            self.save(Action::Update, opts).await
        } else {
            Ok(())
        }
    }

    /// Submit the active draft after user confirmation
    pub async fn submit(&self, opts: SaveOptions) -> Result<(), FormError> {
        let _busy = self.begin_transition()?;
        self.submit_inner(&opts).await
    }

    /// Cancel the active submitted record after user confirmation
    pub async fn cancel_record(&self, opts: SaveOptions) -> Result<(), FormError> {
        let _busy = self.begin_transition()?;
        self.cancel_inner(&opts).await
    }

    async fn save_inner(&self, action: Action, opts: &SaveOptions) -> Result<(), FormError> {
        let doctype = self.doctype().to_string();
        let mut record = self.current_record()?;

        self.set_control(opts, false);
        self.view.flush_pending_input();
        self.view.close_subforms();

        if let Err(err) = self.validate_form_action(action, &record) {
            self.set_control(opts, true);
            return Err(err);
        }

        if action.needs_validation() {
            let mut ctx = ActionContext::for_action(record.clone(), action);
            let staged = async {
                self.pipeline.run(&doctype, &HookName::Validate, &mut ctx).await?;
                self.pipeline
                    .run(&doctype, &HookName::BeforeSave, &mut ctx)
                    .await
            };
            if let Err(err) = staged.await {
                self.set_control(opts, true);
                return Err(err.into());
            }
            if !ctx.valid {
                tracing::info!(%doctype, %action, "action vetoed by validation");
                self.set_control(opts, true);
                return Err(FormError::ValidationVetoed { action });
            }
            record = ctx.record;
        }

        let mut persisted = match self.store.persist(&record, action).await {
            Ok(persisted) => persisted,
            Err(err) => {
                tracing::warn!(%doctype, %action, %err, "persist failed");
                self.set_control(opts, true);
                return Err(err.into());
            }
        };
        persisted.mark_synced(Utc::now());
        tracing::info!(%doctype, name = %persisted.name, %action, "record persisted");

        self.state.lock().record = Some(persisted.clone());
        self.store.put_local(persisted.clone());
        self.dirty.reset();

        if matches!(
            action,
            Action::Save | Action::Update | Action::Amend | Action::Create
        ) {
            self.interaction.play_cue(Cue::Click);
        }

        let mut ctx = ActionContext::for_action(persisted, action);
        let after = self.pipeline.run(&doctype, &HookName::AfterSave, &mut ctx).await;
        self.state.lock().record = Some(ctx.record.clone());
        self.set_control(opts, true);
        after?;

        let rendered = self.renderer.render(ctx.record, RenderPass::default()).await;
        self.state.lock().record = Some(rendered);
        Ok(())
    }

    async fn submit_inner(&self, opts: &SaveOptions) -> Result<(), FormError> {
        let doctype = self.doctype().to_string();
        let record = self.current_record()?;

        self.set_control(opts, false);

        if let Err(err) = self.validate_form_action(Action::Submit, &record) {
            self.set_control(opts, true);
            return Err(err);
        }

        let prompt = format!("Permanently submit {}?", record.name);
        if !self.interaction.confirm(&prompt).await {
            self.set_control(opts, true);
            return Err(FormError::ConfirmationDeclined);
        }

        let mut ctx = ActionContext::for_action(record, Action::Submit);
        if let Err(err) = self
            .pipeline
            .run(&doctype, &HookName::BeforeSubmit, &mut ctx)
            .await
        {
            self.set_control(opts, true);
            return Err(err.into());
        }
        if !ctx.valid {
            self.set_control(opts, true);
            return Err(FormError::ValidationVetoed {
                action: Action::Submit,
            });
        }
        self.state.lock().record = Some(ctx.record);

        self.save_inner(Action::Submit, opts).await?;
        self.interaction.play_cue(Cue::Submit);

        let record = self.current_record()?;
        let mut ctx = ActionContext::for_action(record, Action::Submit);
        let result = self.pipeline.run(&doctype, &HookName::OnSubmit, &mut ctx).await;
        self.state.lock().record = Some(ctx.record);
        result.map_err(Into::into)
    }

    async fn cancel_inner(&self, opts: &SaveOptions) -> Result<(), FormError> {
        let doctype = self.doctype().to_string();
        let record = self.current_record()?;

        self.set_control(opts, false);

        if let Err(err) = self.validate_form_action(Action::Cancel, &record) {
            self.set_control(opts, true);
            return Err(err);
        }

        let prompt = format!("Permanently cancel {}?", record.name);
        if !self.interaction.confirm(&prompt).await {
            self.set_control(opts, true);
            return Err(FormError::ConfirmationDeclined);
        }

        let mut ctx = ActionContext::for_action(record, Action::Cancel);
        if let Err(err) = self
            .pipeline
            .run(&doctype, &HookName::BeforeCancel, &mut ctx)
            .await
        {
            self.set_control(opts, true);
            return Err(err.into());
        }
        if !ctx.valid {
            self.set_control(opts, true);
            return Err(FormError::ValidationVetoed {
                action: Action::Cancel,
            });
        }

        let mut persisted = match self.store.persist(&ctx.record, Action::Cancel).await {
            Ok(persisted) => persisted,
            Err(err) => {
                tracing::warn!(%doctype, %err, "cancel persist failed");
                self.set_control(opts, true);
                return Err(err.into());
            }
        };
        persisted.mark_synced(Utc::now());
        tracing::info!(%doctype, name = %persisted.name, "record cancelled");

        self.state.lock().record = Some(persisted.clone());
        self.store.put_local(persisted.clone());
        self.dirty.reset();
        self.interaction.play_cue(Cue::Cancel);
        self.set_control(opts, true);

        let rendered = self.renderer.render(persisted, RenderPass::default()).await;
        self.state.lock().record = Some(rendered.clone());

        let mut ctx = ActionContext::for_action(rendered, Action::Cancel);
        let result = self
            .pipeline
            .run(&doctype, &HookName::AfterCancel, &mut ctx)
            .await;
        self.state.lock().record = Some(ctx.record);
        result.map_err(Into::into)
    }

    // ------------------------------------------------------------------
    // Amend / copy / delete / rename
    // ------------------------------------------------------------------

    /// Duplicate into a new draft back-linked to this record
    ///
    /// The original's status is untouched; the caller lands on the new
    /// record via navigation.
    pub async fn amend(&self) -> Result<String, FormError> {
        let _busy = self.begin_transition()?;
        if !self.meta.has_amended_from {
            return Err(FormError::MissingAmendField {
                doctype: self.doctype().to_string(),
            });
        }
        let record = self.current_record()?;
        self.validate_form_action(Action::Amend, &record)?;

        let mut amended = record.duplicate();
        amended.set(AMENDED_FROM_FIELD, serde_json::json!(record.name.clone()));
        if self.meta.has_amendment_date {
            amended.set(
                AMENDMENT_DATE_FIELD,
                serde_json::json!(Utc::now().to_rfc3339()),
            );
        }
        let name = amended.name.clone();
        tracing::info!(doctype = %self.doctype(), from = %record.name, to = %name, "amending");

        self.store.put_local(amended);
        self.interaction.play_cue(Cue::Click);
        self.navigator.navigate_to(self.doctype(), &name);
        Ok(name)
    }

    /// Duplicate into a fresh unlinked draft
    pub async fn copy_doc(&self) -> Result<String, FormError> {
        let _busy = self.begin_transition()?;
        let record = self.current_record()?;
        self.validate_form_action(Action::Create, &record)?;

        let copy = record.duplicate();
        let name = copy.name.clone();
        self.store.put_local(copy);
        self.navigator.navigate_to(self.doctype(), &name);
        Ok(name)
    }

    /// Delete the active record and navigate back
    pub async fn delete_record(&self) -> Result<(), FormError> {
        let _busy = self.begin_transition()?;
        let doctype = self.doctype().to_string();
        let record = self.current_record()?;
        self.validate_form_action(Action::Delete, &record)?;

        self.store.remove(&doctype, &record.name).await?;
        tracing::info!(%doctype, name = %record.name, "record deleted");

        self.open_docs.mark_closed(&doctype, &record.name);
        {
            let mut st = self.state.lock();
            st.docname = None;
            st.record = None;
            st.lifecycle = LifecycleState::Unloaded;
        }
        self.dirty.reset();
        self.events.emit(FormEventKind::Unload, &doctype, &record.name);
        self.navigator.back();
        Ok(())
    }

    /// Adopt a rename performed by the store/server
    pub fn rename_notify(&self, old: &str, new: &str) {
        let doctype = self.doctype().to_string();
        {
            let mut st = self.state.lock();
            if st.docname.as_deref() != Some(old) {
                return;
            }
            st.docname = Some(new.to_string());
            if let Some(record) = st.record.as_mut() {
                record.name = new.to_string();
            }
        }
        self.open_docs.rename(&doctype, old, new);
        tracing::info!(%doctype, %old, %new, "record renamed");
        self.events.emit(FormEventKind::Rename, &doctype, new);
        self.navigator.navigate_to(&doctype, new);
    }

    // ------------------------------------------------------------------
    // Field-change intake
    // ------------------------------------------------------------------

    /// Apply a field change reported by the store's change feed
    ///
    /// Ignored unless it addresses the active record. Dirtiness is
    /// skipped when both the incoming and current values are semantically
    /// empty (normalization round-trips from rich-text widgets).
    pub async fn handle_field_change(&self, change: FieldChange) -> Result<(), FormError> {
        let doctype = self.doctype().to_string();
        let mut record = {
            let st = self.state.lock();
            match (&st.docname, &st.record) {
                (Some(docname), Some(record))
                    if change.doctype == doctype && change.name == *docname =>
                {
                    record.clone()
                }
                _ => return Ok(()),
            }
        };

        let noop_change =
            docform_model::both_semantically_empty(&change.value, record.get(&change.fieldname));
        record.set(change.fieldname.clone(), change.value);
        self.state.lock().record = Some(record.clone());
        self.store.put_local(record.clone());

        if !noop_change && self.dirty.mark_dirty() {
            self.events.emit(FormEventKind::Dirty, &doctype, &record.name);
        }

        self.view.refresh_field(&record, &change.fieldname);

        let mut ctx = ActionContext::for_field(record, change.fieldname.clone());
        let result = self
            .pipeline
            .run(&doctype, &HookName::field(change.fieldname), &mut ctx)
            .await;
        self.state.lock().record = Some(ctx.record);
        result.map_err(Into::into)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn begin_transition(&self) -> Result<TransitionGuard<'_>, FormError> {
        if self.busy.swap(true, Ordering::Acquire) {
            tracing::debug!(doctype = %self.doctype(), "transition rejected: busy");
            return Err(FormError::TransitionInProgress);
        }
        Ok(TransitionGuard(&self.busy))
    }

    fn current_record(&self) -> Result<Record, FormError> {
        self.state
            .lock()
            .record
            .clone()
            .ok_or(FormError::NoActiveRecord)
    }

    /// Re-check permissions for an action, refreshing the cached set
    fn validate_form_action(&self, action: Action, record: &Record) -> Result<(), FormError> {
        let doctype = self.doctype().to_string();
        let perms = self.permissions.get_permissions(&doctype, Some(record));
        let read_only = self.workflow.is_read_only(&doctype, &record.name);
        {
            let mut st = self.state.lock();
            st.perms = perms.clone();
            st.read_only = read_only;
        }

        if let Err(denial) = ActionGuard::can_perform(action, &perms, read_only) {
            tracing::warn!(%doctype, action = %denial.action, "permission denied");
            let message = format!("no permission to {} {}", denial.action, doctype);
            self.interaction.notify(&message, NoticeKind::Error);
            return Err(FormError::PermissionDenied { action, doctype });
        }
        Ok(())
    }

    fn set_control(&self, opts: &SaveOptions, enabled: bool) {
        if let Some(control) = &opts.control {
            self.view.set_control_enabled(control, enabled);
        }
    }

    async fn fetch_stamped(&self, doctype: &str, name: &str) -> Result<Record, FormError> {
        let mut record = self.store.fetch_remote(doctype, name).await?;
        record.mark_synced(Utc::now());
        self.store.put_local(record.clone());
        Ok(record)
    }

    /// Schema/instance open-conflict detection
    ///
    /// Editing the schema record for a type conflicts with any open
    /// instance of that type, and vice versa.
    fn has_type_conflict(&self, name: &str) -> bool {
        if self.meta.is_schema_type {
            self.open_docs.any_open_of_type(name)
        } else {
            self.open_docs
                .is_open(&self.config.schema_type_name, self.doctype())
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("doctype", &self.meta.name)
            .field("docname", &self.docname())
            .field("lifecycle", &self.lifecycle())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
