//! Mock extraction endpoint for testing.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::endpoint::{
    EndpointError, ErrorPayload, ExtractionEndpoint, ServiceHealth, UploadRequest,
};

/// What the mock answers to the next uploads.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 2xx with this body.
    Success(Bytes),
    /// Non-2xx with this raw body, parsed the same way the HTTP client does.
    Rejected { status: u16, body: Bytes },
    /// Transport failure before any response.
    ConnectionFailed(String),
}

/// Mock implementation of the ExtractionEndpoint trait.
///
/// Provides controllable behavior for testing:
/// - Record every upload for assertions
/// - Simulate success, rejection or connection failure
/// - Simulate a slow service
///
/// # Example
///
/// ```rust,ignore
/// use tds_upload_core::testing::{MockEndpoint, MockResponse};
///
/// let endpoint = MockEndpoint::new();
/// endpoint.set_response(MockResponse::Rejected {
///     status: 400,
///     body: Bytes::from_static(br#"{"error":"bad pdf"}"#),
/// }).await;
///
/// // ... run a cycle ...
/// assert_eq!(endpoint.request_count().await, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockEndpoint {
    /// Recorded uploads.
    requests: Arc<RwLock<Vec<UploadRequest>>>,
    /// Answer for every upload.
    response: Arc<RwLock<MockResponse>>,
    /// Simulated service latency in milliseconds.
    delay_ms: Arc<RwLock<u64>>,
    /// Status endpoint answer.
    health_status: Arc<RwLock<String>>,
}

impl Default for MockEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEndpoint {
    /// Create a mock that succeeds instantly with a small CSV body.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            response: Arc::new(RwLock::new(MockResponse::Success(
                super::fixtures::csv_body(),
            ))),
            delay_ms: Arc::new(RwLock::new(0)),
            health_status: Arc::new(RwLock::new("ok".to_string())),
        }
    }

    /// Get all recorded uploads.
    pub async fn recorded_requests(&self) -> Vec<UploadRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of uploads received.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Configure the answer for subsequent uploads.
    pub async fn set_response(&self, response: MockResponse) {
        *self.response.write().await = response;
    }

    /// Set the simulated latency.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay_ms.write().await = delay.as_millis() as u64;
    }

    /// Set the status reported by the health check.
    pub async fn set_health_status(&self, status: impl Into<String>) {
        *self.health_status.write().await = status.into();
    }
}

#[async_trait]
impl ExtractionEndpoint for MockEndpoint {
    fn name(&self) -> &str {
        "mock"
    }

    async fn process(&self, request: UploadRequest) -> Result<Bytes, EndpointError> {
        self.requests.write().await.push(request);

        let delay_ms = *self.delay_ms.read().await;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        match self.response.read().await.clone() {
            MockResponse::Success(body) => Ok(body),
            MockResponse::Rejected { status, body } => Err(EndpointError::Rejected {
                status,
                message: ErrorPayload::message_from_body(&body),
            }),
            MockResponse::ConnectionFailed(reason) => Err(EndpointError::ConnectionFailed(reason)),
        }
    }

    async fn health(&self) -> Result<ServiceHealth, EndpointError> {
        Ok(ServiceHealth {
            status: self.health_status.read().await.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn empty_request() -> UploadRequest {
        UploadRequest {
            cycle_id: Uuid::new_v4(),
            parts: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_default_succeeds_and_records() {
        let endpoint = MockEndpoint::new();
        let body = endpoint.process(empty_request()).await.unwrap();
        assert!(!body.is_empty());
        assert_eq!(endpoint.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_rejected_parses_payload() {
        let endpoint = MockEndpoint::new();
        endpoint
            .set_response(MockResponse::Rejected {
                status: 400,
                body: Bytes::from_static(br#"{"error":"No files uploaded"}"#),
            })
            .await;

        let err = endpoint.process(empty_request()).await.unwrap_err();
        assert_eq!(err.user_message(), "No files uploaded");
    }

    #[tokio::test]
    async fn test_health_status_is_configurable() {
        let endpoint = MockEndpoint::new();
        assert!(endpoint.health().await.unwrap().is_ok());
        endpoint.set_health_status("maintenance").await;
        assert!(!endpoint.health().await.unwrap().is_ok());
    }
}
