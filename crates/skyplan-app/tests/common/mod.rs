//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use skyplan_core::ApiResult;
use skyplan_services::{ApiRequest, ApiResponse, Method, Transport};
use std::sync::Arc;

/// Transport serving canned JSON per method and path; anything else is a 404
pub struct StubBackend {
    routes: Vec<(Method, String, u16, Value)>,
    pub request_log: Arc<parking_lot::Mutex<Vec<String>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            routes: vec![],
            request_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }

    pub fn route(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.routes.push((method, path.to_string(), status, body));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.request_log.lock().clone()
    }
}

#[async_trait]
impl Transport for StubBackend {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.request_log
            .lock()
            .push(format!("{} {}", request.method.as_str(), request.path));
        let (status, body) = self
            .routes
            .iter()
            .find(|(method, path, _, _)| *method == request.method && *path == request.path)
            .map(|(_, _, status, body)| (*status, body.to_string()))
            .unwrap_or((404, r#"{"detail": "Not found"}"#.to_string()));
        Ok(ApiResponse {
            status,
            body: body.into_bytes(),
        })
    }
}
