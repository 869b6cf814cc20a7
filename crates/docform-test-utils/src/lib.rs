//! Testing utilities for the docform workspace
//!
//! In-memory fakes for every collaborator contract, plus a [`TestEnv`]
//! that wires them into a controller.

#![allow(missing_docs)]

use chrono::Utc;
use dashmap::DashMap;
use docform_core::{
    Collaborators, ControlId, Cue, DocumentStore, FieldChange, FormConfig, FormController,
    FormView, Interaction, Navigator, NoticeKind, OpenDocRegistry, PermissionEngine, StoreError,
    ViewError, WorkflowEngine,
};
use docform_hooks::HookRegistry;
use docform_model::{Action, Capability, DocStatus, LevelPerms, PermissionSet, Record, TypeMeta};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type DocKey = (String, String);

fn key(doctype: &str, name: &str) -> DocKey {
    (doctype.to_string(), name.to_string())
}

/// In-memory document store with a simulated remote side
///
/// The "remote" table plays the server: persisting under Submit/Cancel
/// advances the status the way the server would, and illegal transitions
/// come back as remote errors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cache: DashMap<DocKey, Record>,
    remote: DashMap<DocKey, Record>,
    fail_next_persist: Mutex<Option<String>>,
    fail_next_fetch: Mutex<Option<String>>,
    pub fetch_count: AtomicUsize,
    pub persist_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record on the remote side only
    pub fn seed_remote(&self, record: Record) {
        self.remote
            .insert(key(&record.doctype, &record.name), record);
    }

    /// Seed a record into both the remote side and the cache
    pub fn seed(&self, record: Record) {
        self.cache
            .insert(key(&record.doctype, &record.name), record.clone());
        self.seed_remote(record);
    }

    /// Flag the cached copy as modified elsewhere
    pub fn set_needs_refresh(&self, doctype: &str, name: &str) {
        if let Some(mut cached) = self.cache.get_mut(&key(doctype, name)) {
            cached.needs_refresh = true;
        }
    }

    /// Backdate the cached copy's last sync by `secs`
    pub fn age_cached(&self, doctype: &str, name: &str, secs: i64) {
        if let Some(mut cached) = self.cache.get_mut(&key(doctype, name)) {
            cached.last_sync = Some(Utc::now() - chrono::Duration::seconds(secs));
        }
    }

    pub fn fail_next_persist(&self, message: impl Into<String>) {
        *self.fail_next_persist.lock() = Some(message.into());
    }

    pub fn fail_next_fetch(&self, message: impl Into<String>) {
        *self.fail_next_fetch.lock() = Some(message.into());
    }

    pub fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn persists(&self) -> usize {
        self.persist_count.load(Ordering::SeqCst)
    }

    /// What the simulated server holds for a record
    pub fn remote_copy(&self, doctype: &str, name: &str) -> Option<Record> {
        self.remote.get(&key(doctype, name)).map(|r| r.value().clone())
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    fn get(&self, doctype: &str, name: &str) -> Option<Record> {
        self.cache.get(&key(doctype, name)).map(|r| r.value().clone())
    }

    async fn fetch_remote(&self, doctype: &str, name: &str) -> Result<Record, StoreError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_next_fetch.lock().take() {
            return Err(StoreError::Remote(message));
        }
        let record = self
            .remote
            .get(&key(doctype, name))
            .map(|r| r.value().clone())
            .ok_or_else(|| StoreError::not_found(doctype, name))?;
        self.cache.insert(key(doctype, name), record.clone());
        Ok(record)
    }

    async fn persist(&self, record: &Record, action: Action) -> Result<Record, StoreError> {
        self.persist_count.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_next_persist.lock().take() {
            return Err(StoreError::Remote(message));
        }

        let mut server_copy = record.clone();
        server_copy.is_local = false;
        match action {
            Action::Submit => server_copy
                .transition(DocStatus::Submitted)
                .map_err(|e| StoreError::Remote(e.to_string()))?,
            Action::Cancel => server_copy
                .transition(DocStatus::Cancelled)
                .map_err(|e| StoreError::Remote(e.to_string()))?,
            _ => {}
        }

        let k = key(&server_copy.doctype, &server_copy.name);
        self.remote.insert(k.clone(), server_copy.clone());
        self.cache.insert(k, server_copy.clone());
        Ok(server_copy)
    }

    async fn remove(&self, doctype: &str, name: &str) -> Result<(), StoreError> {
        let k = key(doctype, name);
        self.remote.remove(&k);
        self.cache.remove(&k);
        Ok(())
    }

    fn evict(&self, doctype: &str, name: &str) {
        self.cache.remove(&key(doctype, name));
    }

    fn put_local(&self, record: Record) {
        self.cache
            .insert(key(&record.doctype, &record.name), record);
    }
}

/// Permission engine returning one fixed set
#[derive(Debug, Default)]
pub struct StaticPermissions {
    perms: Mutex<PermissionSet>,
}

impl StaticPermissions {
    pub fn new(perms: PermissionSet) -> Self {
        Self {
            perms: Mutex::new(perms),
        }
    }

    pub fn allow_all() -> Self {
        Self::new(PermissionSet::from_base(LevelPerms::all()))
    }

    /// Swap the granted set mid-test
    pub fn set(&self, perms: PermissionSet) {
        *self.perms.lock() = perms;
    }
}

impl PermissionEngine for StaticPermissions {
    fn get_permissions(&self, _doctype: &str, _record: Option<&Record>) -> PermissionSet {
        self.perms.lock().clone()
    }

    fn has_capability(
        &self,
        _doctype: &str,
        level: usize,
        capability: Capability,
        _record: &Record,
    ) -> bool {
        self.perms
            .lock()
            .level(level)
            .is_some_and(|row| row.has(capability))
    }
}

/// Workflow engine with a fixed read-only answer
#[derive(Debug, Default)]
pub struct StaticWorkflow {
    read_only: Mutex<bool>,
    state_field: Option<String>,
}

impl StaticWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locked() -> Self {
        Self {
            read_only: Mutex::new(true),
            state_field: Some("workflow_state".to_string()),
        }
    }

    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.lock() = read_only;
    }
}

impl WorkflowEngine for StaticWorkflow {
    fn is_read_only(&self, _doctype: &str, _name: &str) -> bool {
        *self.read_only.lock()
    }

    fn state_fieldname(&self, _doctype: &str) -> Option<String> {
        self.state_field.clone()
    }

    fn has_workflow(&self, _doctype: &str) -> bool {
        self.state_field.is_some()
    }
}

/// Interaction fake with scripted confirmation answers
///
/// Confirms everything unless answers were queued. Records every notice
/// and cue.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: Mutex<VecDeque<bool>>,
    pub notices: Mutex<Vec<(String, NoticeKind)>>,
    pub cues: Mutex<Vec<Cue>>,
    pub confirms: Mutex<Vec<String>>,
}

impl ScriptedInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next confirmation
    pub fn push_answer(&self, accept: bool) {
        self.answers.lock().push_back(accept);
    }

    pub fn notices_of_kind(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn cue_count(&self, cue: Cue) -> usize {
        self.cues.lock().iter().filter(|c| **c == cue).count()
    }
}

#[async_trait::async_trait]
impl Interaction for ScriptedInteraction {
    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().push(message.to_string());
        self.answers.lock().pop_front().unwrap_or(true)
    }

    fn notify(&self, message: &str, kind: NoticeKind) {
        self.notices.lock().push((message.to_string(), kind));
    }

    fn play_cue(&self, cue: Cue) {
        self.cues.lock().push(cue);
    }
}

/// Navigator fake recording every routing call
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<(String, String)>>,
    pub back_count: AtomicUsize,
    pub session_reloads: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_route(&self) -> Option<(String, String)> {
        self.routes.lock().last().cloned()
    }

    pub fn session_reload_count(&self) -> usize {
        self.session_reloads.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, doctype: &str, name: &str) {
        self.routes
            .lock()
            .push((doctype.to_string(), name.to_string()));
    }

    fn back(&self) {
        self.back_count.fetch_add(1, Ordering::SeqCst);
    }

    fn reload_session(&self) {
        self.session_reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// View fake recording calls and control enablement
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Mutex<Vec<String>>,
    pub disabled_controls: Mutex<Vec<ControlId>>,
    pub read_only: Mutex<bool>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    pub fn is_control_disabled(&self, control: &ControlId) -> bool {
        self.disabled_controls.lock().contains(control)
    }
}

impl FormView for RecordingView {
    fn refresh_header(&self, _record: &Record, _different_doc: bool) -> Result<(), ViewError> {
        self.calls.lock().push("refresh_header".into());
        Ok(())
    }

    fn refresh_fields(&self, _record: &Record) -> Result<(), ViewError> {
        self.calls.lock().push("refresh_fields".into());
        Ok(())
    }

    fn refresh_field(&self, _record: &Record, fieldname: &str) {
        self.calls.lock().push(format!("refresh_field:{fieldname}"));
    }

    fn after_refresh(&self, _record: &Record) -> Result<(), ViewError> {
        self.calls.lock().push("after_refresh".into());
        Ok(())
    }

    fn flush_pending_input(&self) {
        self.calls.lock().push("flush_pending_input".into());
    }

    fn close_subforms(&self) {
        self.calls.lock().push("close_subforms".into());
    }

    fn reset_column_cache(&self) {
        self.calls.lock().push("reset_column_cache".into());
    }

    fn focus_first_input(&self) {
        self.calls.lock().push("focus_first_input".into());
    }

    fn set_read_only(&self, read_only: bool) {
        *self.read_only.lock() = read_only;
    }

    fn set_control_enabled(&self, control: &ControlId, enabled: bool) {
        let mut disabled = self.disabled_controls.lock();
        if enabled {
            disabled.retain(|c| c != control);
        } else {
            disabled.push(control.clone());
        }
    }

    fn show_not_permitted(&self, doctype: &str, name: &str) {
        self.calls
            .lock()
            .push(format!("show_not_permitted:{doctype}:{name}"));
    }
}

/// A full fake environment wired for a controller
pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub perms: Arc<StaticPermissions>,
    pub workflow: Arc<StaticWorkflow>,
    pub interaction: Arc<ScriptedInteraction>,
    pub navigator: Arc<RecordingNavigator>,
    pub view: Arc<RecordingView>,
    pub hooks: Arc<HookRegistry>,
    pub open_docs: Arc<OpenDocRegistry>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            perms: Arc::new(StaticPermissions::allow_all()),
            workflow: Arc::new(StaticWorkflow::new()),
            interaction: Arc::new(ScriptedInteraction::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            view: Arc::new(RecordingView::new()),
            hooks: Arc::new(HookRegistry::new()),
            open_docs: Arc::new(OpenDocRegistry::new()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            store: Arc::clone(&self.store) as _,
            permissions: Arc::clone(&self.perms) as _,
            workflow: Arc::clone(&self.workflow) as _,
            interaction: Arc::clone(&self.interaction) as _,
            navigator: Arc::clone(&self.navigator) as _,
            view: Arc::clone(&self.view) as _,
        }
    }

    pub fn controller(&self, meta: TypeMeta) -> FormController {
        self.controller_with_config(meta, FormConfig::new())
    }

    pub fn controller_with_config(&self, meta: TypeMeta, config: FormConfig) -> FormController {
        FormController::new(
            meta,
            config,
            self.collaborators(),
            Arc::clone(&self.hooks),
            Arc::clone(&self.open_docs),
        )
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A submittable, amendable Invoice type
pub fn invoice_meta() -> TypeMeta {
    TypeMeta::new("Invoice")
        .submittable()
        .amendable()
        .with_amendment_date()
}

/// A draft invoice seeded with a couple of fields
pub fn draft_invoice(name: &str) -> Record {
    let mut record = Record::new("Invoice", name);
    record.set("customer", serde_json::json!("Acme"));
    record.set("total", serde_json::json!(100));
    record.last_sync = Some(Utc::now());
    record
}

/// A submitted invoice
pub fn submitted_invoice(name: &str) -> Record {
    let mut record = draft_invoice(name);
    record
        .transition(DocStatus::Submitted)
        .expect("draft submits");
    record
}

/// A field change addressed to a record
pub fn field_change(doctype: &str, name: &str, fieldname: &str, value: serde_json::Value) -> FieldChange {
    FieldChange {
        doctype: doctype.to_string(),
        name: name.to_string(),
        fieldname: fieldname.to_string(),
        value,
    }
}
