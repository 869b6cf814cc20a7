//! Form lifecycle events
//!
//! Broadcast to external listeners at the points where the original form
//! fires its document-global events: load, unload, refresh, rename,
//! render-complete, and the clean -> dirty edge.

use tokio::sync::broadcast;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEventKind {
    Load,
    Unload,
    Refresh,
    Rename,
    RenderComplete,
    Dirty,
}

/// One lifecycle event, carrying the active record's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEvent {
    pub kind: FormEventKind,
    pub doctype: String,
    pub name: String,
}

/// Broadcast bus for [`FormEvent`]s
///
/// Lossy by design: events inform listeners, they never gate the
/// lifecycle. Emitting with no subscribers is fine.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<FormEvent>,
}

impl EventBus {
    /// Create a bus with the given buffer capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all subsequent events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.tx.subscribe()
    }

    /// Emit an event
    pub fn emit(&self, kind: FormEventKind, doctype: &str, name: &str) {
        let event = FormEvent {
            kind,
            doctype: doctype.to_string(),
            name: name.to_string(),
        };
        tracing::trace!(?event, "form event");
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.emit(FormEventKind::Load, "Invoice", "INV-001");
        bus.emit(FormEventKind::Dirty, "Invoice", "INV-001");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.kind, FormEventKind::Load);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.kind, FormEventKind::Dirty);
        assert_eq!(second.name, "INV-001");
    }

    #[test]
    fn emit_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.emit(FormEventKind::Refresh, "Invoice", "INV-001");
    }
}
