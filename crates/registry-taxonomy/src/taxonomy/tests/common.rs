use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::taxonomy::{
    taxonomy_router, Dimension, EntityId, Notification, NotificationKind, NotificationSink,
    NotifyError, ProfessionDraft, Taxonomy, TaxonomyService,
};

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn messages(&self) -> Vec<(String, NotificationKind)> {
        self.events()
            .into_iter()
            .map(|event| (event.message, event.kind))
            .collect()
    }

    pub(super) fn last_message(&self) -> Option<String> {
        self.events().pop().map(|event| event.message)
    }
}

impl NotificationSink for MemoryNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl NotificationSink for FailingNotifier {
    fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("toast channel closed".to_string()))
    }
}

pub(super) fn build_service() -> (TaxonomyService<MemoryNotifier>, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::default());
    let service = TaxonomyService::new(Taxonomy::seeded(), notifier.clone());
    (service, notifier)
}

pub(super) fn seeded_router() -> (axum::Router, Arc<MemoryNotifier>) {
    let (service, notifier) = build_service();
    (taxonomy_router(Arc::new(service)), notifier)
}

pub(super) fn id(raw: u64) -> EntityId {
    EntityId(raw)
}

pub(super) fn ids(raw: &[u64]) -> Vec<EntityId> {
    raw.iter().copied().map(EntityId).collect()
}

pub(super) fn codes(taxonomy: &Taxonomy, dimension: Dimension) -> Vec<String> {
    taxonomy
        .store(dimension)
        .records()
        .iter()
        .map(|record| record.code.clone())
        .collect()
}

/// Medical / General Physician / MBBS qualification, all valid against the seed.
pub(super) fn physician_draft(name: &str) -> ProfessionDraft {
    ProfessionDraft {
        name: name.to_string(),
        category_id: Some(EntityId(1)),
        subcategory_id: Some(EntityId(1)),
        qualification_id: Some(EntityId(1)),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
