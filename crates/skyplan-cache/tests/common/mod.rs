//! Common test utilities for the mutation runner tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use skyplan_cache::collection;
use skyplan_cache::{CacheWrite, Mutation, MutationKind};
use skyplan_core::{ApiError, ApiResult, Notification, Notifier, QueryKey};
use tokio::sync::oneshot;

pub fn list_key() -> QueryKey {
    QueryKey::new("passengers")
}

pub fn entity_key(id: i64) -> QueryKey {
    QueryKey::new("passengers").with(id)
}

pub fn passenger(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name, "weight_lb": 180.0, "is_me": false})
}

/// Notifier that records everything it receives
#[derive(Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.received.lock().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().push(notification);
    }
}

/// Renames a passenger, with a scripted server answer
pub struct RenamePassenger {
    pub id: i64,
    pub name: String,
    outcome: ApiResult<Value>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    requests: Mutex<usize>,
}

impl RenamePassenger {
    pub fn succeeding(id: i64, name: &str) -> Self {
        Self::with_outcome(id, name, Ok(passenger(id, name)))
    }

    pub fn failing(id: i64, name: &str, error: ApiError) -> Self {
        Self::with_outcome(id, name, Err(error))
    }

    fn with_outcome(id: i64, name: &str, outcome: ApiResult<Value>) -> Self {
        Self {
            id,
            name: name.to_string(),
            outcome,
            gate: Mutex::new(None),
            requests: Mutex::new(0),
        }
    }

    /// Hold the request until the returned sender fires
    pub fn gated(mut self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        self.gate = Mutex::new(Some(rx));
        (self, tx)
    }

    pub fn request_count(&self) -> usize {
        *self.requests.lock()
    }

    fn patch(&self) -> Value {
        json!({"name": self.name})
    }
}

#[async_trait]
impl Mutation for RenamePassenger {
    type Output = Value;

    fn kind(&self) -> MutationKind {
        MutationKind::Update
    }

    fn target(&self) -> String {
        entity_key(self.id).to_string()
    }

    fn snapshot_keys(&self) -> Vec<QueryKey> {
        vec![list_key(), entity_key(self.id)]
    }

    fn optimistic_update(&self, key: &QueryKey, current: Option<&Value>) -> CacheWrite {
        let Some(current) = current else {
            return CacheWrite::Keep;
        };
        if *key == list_key() {
            collection::update_by_id(current, self.id, |e| collection::merge(e, &self.patch()))
                .into()
        } else {
            CacheWrite::Set(collection::merge(current, &self.patch()))
        }
    }

    async fn request(&self) -> ApiResult<Value> {
        *self.requests.lock() += 1;
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.outcome.clone()
    }

    fn reconcile(&self, key: &QueryKey, current: Option<&Value>, output: &Value) -> CacheWrite {
        if *key == list_key() {
            current
                .and_then(|list| collection::replace_by_id(list, self.id, output.clone()))
                .into()
        } else {
            CacheWrite::Set(output.clone())
        }
    }

    fn invalidates(&self, _output: &Value) -> Vec<QueryKey> {
        vec![entity_key(self.id).with("trips")]
    }

    fn success_message(&self) -> String {
        "Passenger updated".to_string()
    }
}
