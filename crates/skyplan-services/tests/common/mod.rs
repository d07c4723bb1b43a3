//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use skyplan_cache::MemoryStore;
use skyplan_core::{ApiError, ApiResult, Notification, Notifier};
use skyplan_services::{
    ApiClient, ApiRequest, ApiResponse, Method, ResourceService, Resource, StaticToken, Transport,
};
use std::sync::Arc;

/// Mock transport for testing service-layer logic without a backend.
///
/// Responses are registered per method and path; unregistered requests get a
/// 404 with a `detail` message. Every request is logged for assertions.
pub struct MockTransport {
    pub responses: Vec<(Method, String, u16, Vec<u8>)>,
    pub should_fail: bool,
    pub request_log: Arc<parking_lot::Mutex<Vec<ApiRequest>>>,
    /// Requests answered by echoing the body with the next id
    pub echo: Option<(Method, String)>,
    next_id: parking_lot::Mutex<i64>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: vec![],
            should_fail: false,
            request_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
            echo: None,
            next_id: parking_lot::Mutex::new(1),
        }
    }

    /// Answer `method path` with the request body plus a server-assigned id,
    /// counting up from `first_id`. The answer is delayed by one scheduler
    /// turn so concurrent requests are all in flight together.
    pub fn with_echo(mut self, method: Method, path: &str, first_id: i64) -> Self {
        self.echo = Some((method, path.to_string()));
        self.next_id = parking_lot::Mutex::new(first_id);
        self
    }

    /// Answer `method path` with `status` and a JSON body
    pub fn with_response(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.responses
            .push((method, path.to_string(), status, body.to_string().into_bytes()));
        self
    }

    /// Answer `method path` with `status` and a raw body
    pub fn with_raw_response(
        mut self,
        method: Method,
        path: &str,
        status: u16,
        body: &str,
    ) -> Self {
        self.responses
            .push((method, path.to_string(), status, body.as_bytes().to_vec()));
        self
    }

    /// Fail every request without a response
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    pub fn request_count(&self) -> usize {
        self.request_log.lock().len()
    }

    pub fn request_log(&self) -> Vec<ApiRequest> {
        self.request_log.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.request_log.lock().push(request.clone());
        if self.should_fail {
            return Err(ApiError::Network("connection refused".into()));
        }

        if let Some((method, path)) = &self.echo {
            if *method == request.method && *path == request.path {
                let id = {
                    let mut next = self.next_id.lock();
                    *next += 1;
                    *next - 1
                };
                tokio::task::yield_now().await;
                let mut body = request.body.clone().unwrap_or_else(|| json!({}));
                body["id"] = json!(id);
                return Ok(ApiResponse {
                    status: 201,
                    body: body.to_string().into_bytes(),
                });
            }
        }

        let found = self
            .responses
            .iter()
            .find(|(method, path, _, _)| *method == request.method && *path == request.path);
        Ok(match found {
            Some((_, _, status, body)) => ApiResponse {
                status: *status,
                body: body.clone(),
            },
            None => ApiResponse {
                status: 404,
                body: json!({"detail": "Not found"}).to_string().into_bytes(),
            },
        })
    }
}

/// Notifier that records everything it receives
#[derive(Default)]
pub struct RecordingNotifier {
    received: parking_lot::Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().push(notification);
    }
}

/// A service over `transport` with a fresh store, plus handles for assertions
pub struct Harness<R: Resource> {
    pub transport: Arc<MockTransport>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub service: ResourceService<R>,
}

pub fn harness<R: Resource>(transport: MockTransport) -> Harness<R> {
    let transport = Arc::new(transport);
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ApiClient::new(
        transport.clone(),
        Arc::new(StaticToken::new(Some("test-token".into()))),
    );
    let service = ResourceService::new(client, store.clone(), notifier.clone());
    Harness {
        transport,
        store,
        notifier,
        service,
    }
}

pub fn passenger(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name, "weight_lb": 180.0, "is_me": false})
}

pub fn flight(id: i64) -> Value {
    json!({
        "id": id,
        "departure_aerodrome_id": 1,
        "arrival_aerodrome_id": 2,
        "aircraft_id": 3,
        "departure_time": "2026-05-01T14:30:00Z",
        "status": "planned",
        "created_at": "2026-04-01T10:00:00Z",
        "last_updated": "2026-04-01T10:00:00Z"
    })
}
