//! Staleness recovery, conflict detection, rename adoption, and the
//! busy-token serialization of racing transitions.

use docform_core::{FormConfig, FormError, FormEventKind, NoticeKind, SaveOptions};
use docform_model::{Action, TypeMeta};
use docform_test_utils::{draft_invoice, field_change, invoice_meta, TestEnv};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn stale_clean_copy_reloads_from_remote_before_render() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());

    frm.open("INV-001").await.unwrap();
    assert_eq!(env.store.fetches(), 0);

    // cached copy is 200 seconds old, record is clean
    env.store.age_cached("Invoice", "INV-001", 200);
    frm.open("INV-001").await.unwrap();

    assert_eq!(env.store.fetches(), 1);
}

#[tokio::test]
async fn fresh_copy_does_not_reload() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());

    frm.open("INV-001").await.unwrap();
    env.store.age_cached("Invoice", "INV-001", 60);
    frm.open("INV-001").await.unwrap();

    assert_eq!(env.store.fetches(), 0);
}

#[tokio::test]
async fn stale_dirty_copy_is_kept() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());
    frm.open("INV-001").await.unwrap();

    frm.handle_field_change(field_change("Invoice", "INV-001", "total", json!(777)))
        .await
        .unwrap();
    env.store.age_cached("Invoice", "INV-001", 500);
    frm.open("INV-001").await.unwrap();

    // local edits survive; nothing was fetched over them
    assert_eq!(env.store.fetches(), 0);
    assert_eq!(frm.record().unwrap().get("total"), Some(&json!(777)));
    assert!(frm.is_dirty());
}

#[tokio::test]
async fn modified_elsewhere_with_local_edits_surfaces_notice() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());
    frm.open("INV-001").await.unwrap();

    frm.handle_field_change(field_change("Invoice", "INV-001", "total", json!(5)))
        .await
        .unwrap();
    env.store.set_needs_refresh("Invoice", "INV-001");
    frm.open("INV-001").await.unwrap();

    let warnings = env.interaction.notices_of_kind(NoticeKind::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("modified"));
    assert_eq!(env.store.fetches(), 0);
}

#[tokio::test]
async fn modified_elsewhere_when_clean_reloads_silently() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());
    frm.open("INV-001").await.unwrap();

    env.store.set_needs_refresh("Invoice", "INV-001");
    frm.open("INV-001").await.unwrap();

    assert_eq!(env.store.fetches(), 1);
    assert!(env.interaction.notices_of_kind(NoticeKind::Warning).is_empty());
}

#[tokio::test]
async fn reload_is_idempotent_without_edits() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());
    frm.open("INV-001").await.unwrap();

    frm.reload().await.unwrap();
    let first = frm.record().unwrap();
    frm.reload().await.unwrap();
    let second = frm.record().unwrap();

    assert_eq!(first.name, second.name);
    assert_eq!(first.status, second.status);
    assert_eq!(first.get("customer"), second.get("customer"));
    assert_eq!(first.get("total"), second.get("total"));
}

#[tokio::test]
async fn empty_normalization_round_trip_stays_clean() {
    let env = TestEnv::new();
    let mut record = draft_invoice("INV-001");
    record.set("notes", serde_json::Value::Null);
    env.store.seed(record);
    let frm = env.controller(invoice_meta());
    frm.open("INV-001").await.unwrap();

    // rich-text render normalizes null -> empty string
    frm.handle_field_change(field_change("Invoice", "INV-001", "notes", json!("")))
        .await
        .unwrap();
    assert!(!frm.is_dirty());

    // a genuine value dirties
    frm.handle_field_change(field_change("Invoice", "INV-001", "notes", json!("hello")))
        .await
        .unwrap();
    assert!(frm.is_dirty());
}

#[tokio::test]
async fn dirty_event_fires_on_clean_to_dirty_edge() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());
    frm.open("INV-001").await.unwrap();
    let mut rx = frm.events().subscribe();

    frm.handle_field_change(field_change("Invoice", "INV-001", "total", json!(1)))
        .await
        .unwrap();
    frm.handle_field_change(field_change("Invoice", "INV-001", "total", json!(2)))
        .await
        .unwrap();

    let mut dirty_events = 0;
    while let Ok(event) = rx.try_recv() {
        if event.kind == FormEventKind::Dirty {
            dirty_events += 1;
        }
    }
    assert_eq!(dirty_events, 1);
}

#[tokio::test]
async fn schema_editor_conflicts_with_open_instance() {
    let env = TestEnv::new();
    env.open_docs.mark_open("Invoice", "INV-001");

    let schema_meta = TypeMeta::new("Schema").schema_type();
    let frm = env.controller(schema_meta);

    // opening the schema record for "Invoice" while an invoice is open
    frm.open("Invoice").await.unwrap();

    assert_eq!(env.navigator.session_reload_count(), 1);
    assert!(frm.docname().is_none());
}

#[tokio::test]
async fn instance_editor_conflicts_with_open_schema() {
    let env = TestEnv::new();
    env.open_docs.mark_open("Schema", "Invoice");
    env.store.seed(draft_invoice("INV-001"));

    let frm = env.controller(invoice_meta());
    frm.open("INV-001").await.unwrap();

    assert_eq!(env.navigator.session_reload_count(), 1);
}

#[tokio::test]
async fn rename_moves_registry_entry_and_routes() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("new-invoice-temp"));
    let frm = env.controller(invoice_meta());
    frm.open("new-invoice-temp").await.unwrap();
    let mut rx = frm.events().subscribe();

    frm.rename_notify("new-invoice-temp", "INV-042");

    assert_eq!(frm.docname().as_deref(), Some("INV-042"));
    assert!(!env.open_docs.is_open("Invoice", "new-invoice-temp"));
    assert!(env.open_docs.is_open("Invoice", "INV-042"));
    assert_eq!(
        env.navigator.last_route(),
        Some(("Invoice".to_string(), "INV-042".to_string()))
    );
    assert_eq!(rx.try_recv().unwrap().kind, FormEventKind::Rename);

    // a rename for some other record is ignored
    frm.rename_notify("SOMETHING-ELSE", "X");
    assert_eq!(frm.docname().as_deref(), Some("INV-042"));
}

#[tokio::test]
async fn racing_transition_is_rejected_not_queued() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));

    let gate = Arc::new(tokio::sync::Notify::new());
    {
        let gate = Arc::clone(&gate);
        env.hooks
            .register_fn("Invoice", docform_hooks::HookName::BeforeSave, move |_| {
                let gate = Arc::clone(&gate);
                Box::pin(async move {
                    gate.notified().await;
                    Ok(())
                })
            });
    }

    let frm = Arc::new(env.controller(invoice_meta()));
    frm.open("INV-001").await.unwrap();

    let save_task = {
        let frm = Arc::clone(&frm);
        tokio::spawn(async move { frm.save(Action::Save, SaveOptions::default()).await })
    };
    // let the save reach its before_save suspension point
    tokio::task::yield_now().await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let err = frm.reload().await.unwrap_err();
    assert_eq!(err, FormError::TransitionInProgress);

    gate.notify_one();
    save_task.await.unwrap().unwrap();

    // with the save settled, reload proceeds
    frm.reload().await.unwrap();
}

#[tokio::test]
async fn switch_between_records_settles_previous_ui() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    env.store.seed(draft_invoice("INV-002"));
    let frm = env.controller(invoice_meta());

    frm.open("INV-001").await.unwrap();
    assert_eq!(env.view.call_count("close_subforms"), 0);

    frm.switch_to("INV-002").await.unwrap();

    assert_eq!(frm.docname().as_deref(), Some("INV-002"));
    assert!(env.view.call_count("close_subforms") >= 1);
    assert!(env.view.call_count("reset_column_cache") >= 1);
    // both records remain registered as open in this session
    assert!(env.open_docs.is_open("Invoice", "INV-001"));
    assert!(env.open_docs.is_open("Invoice", "INV-002"));
}

#[tokio::test]
async fn custom_staleness_threshold_is_honored() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller_with_config(
        invoice_meta(),
        FormConfig::new().with_stale_after_secs(30),
    );

    frm.open("INV-001").await.unwrap();
    env.store.age_cached("Invoice", "INV-001", 60);
    frm.open("INV-001").await.unwrap();

    assert_eq!(env.store.fetches(), 1);
}

#[tokio::test]
async fn close_emits_unload_and_keeps_registry_entry() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());
    frm.open("INV-001").await.unwrap();
    let mut rx = frm.events().subscribe();

    frm.close();

    assert_eq!(rx.try_recv().unwrap().kind, FormEventKind::Unload);
    assert!(frm.docname().is_none());
    // eviction is explicit; the open entry survives a close
    assert!(env.open_docs.is_open("Invoice", "INV-001"));
}
