//! Basic controller construction and no-record transition tests.
//!
//! Relocated from an inline `#[cfg(test)] mod tests` in `controller.rs`:
//! these exercises rely on `docform_test_utils`, which depends on
//! `docform-core`, so they must live in the integration-test crate to avoid
//! linking two copies of `docform-core` into one test binary.

use docform_core::{FormError, LifecycleState, SaveOptions};
use docform_model::Action;
use docform_test_utils::{draft_invoice, invoice_meta, TestEnv};

#[test]
fn starts_unloaded() {
    let env = TestEnv::new();
    let frm = env.controller(invoice_meta());

    assert_eq!(frm.lifecycle(), LifecycleState::Unloaded);
    assert!(frm.docname().is_none());
    assert!(frm.record().is_none());
    assert!(!frm.is_dirty());
}

#[test]
fn close_without_record_is_a_no_op() {
    let env = TestEnv::new();
    let frm = env.controller(invoice_meta());
    let mut rx = frm.events().subscribe();

    frm.close();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn transitions_without_a_record_are_programmer_errors() {
    let env = TestEnv::new();
    let frm = env.controller(invoice_meta());

    let err = frm.save(Action::Save, SaveOptions::default()).await.unwrap_err();
    assert_eq!(err, FormError::NoActiveRecord);
    assert!(err.is_fatal());
}

#[tokio::test]
async fn open_reaches_loaded() {
    let env = TestEnv::new();
    env.store.seed(draft_invoice("INV-001"));
    let frm = env.controller(invoice_meta());

    frm.open("INV-001").await.unwrap();
    assert_eq!(frm.lifecycle(), LifecycleState::Loaded);
}
