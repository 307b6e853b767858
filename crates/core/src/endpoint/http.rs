//! HTTP implementation of the extraction endpoint.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client};
use tracing::{debug, warn};

use crate::config::EndpointConfig;

use super::error::EndpointError;
use super::traits::ExtractionEndpoint;
use super::types::{ErrorPayload, ServiceHealth, UploadRequest, FILES_FIELD, PDF_MIME};

/// Talks to the extraction service over HTTP.
pub struct HttpExtractionEndpoint {
    client: Client,
    config: EndpointConfig,
}

impl HttpExtractionEndpoint {
    /// Create a new endpoint client.
    pub fn new(config: EndpointConfig) -> Result<Self, EndpointError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| EndpointError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Build the multipart form: one `files` part per upload part.
    ///
    /// File names go out unencoded, as browsers send them, so `/` in a
    /// relative path survives.
    fn build_form(request: UploadRequest) -> Result<multipart::Form, EndpointError> {
        let mut form = multipart::Form::new().percent_encode_noop();
        for part in request.parts {
            let file_part = multipart::Part::bytes(part.data.to_vec())
                .file_name(part.relative_path.clone())
                .mime_str(PDF_MIME)
                .map_err(|e| EndpointError::InvalidPart {
                    name: part.relative_path,
                    reason: e.to_string(),
                })?;
            form = form.part(FILES_FIELD, file_part);
        }
        Ok(form)
    }
}

#[async_trait]
impl ExtractionEndpoint for HttpExtractionEndpoint {
    fn name(&self) -> &str {
        "http"
    }

    async fn process(&self, request: UploadRequest) -> Result<Bytes, EndpointError> {
        let url = self.config.process_url();
        let cycle_id = request.cycle_id;
        debug!(
            cycle_id = %cycle_id,
            url = %url,
            files = request.parts.len(),
            bytes = request.total_bytes(),
            "Posting upload"
        );

        let form = Self::build_form(request)?;
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(EndpointError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body gets the generic message
            let body = response.bytes().await.unwrap_or_default();
            let message = ErrorPayload::message_from_body(&body);
            warn!(
                cycle_id = %cycle_id,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "Upload rejected"
            );
            return Err(EndpointError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            EndpointError::InvalidResponse(format!("Failed to read response body: {}", e))
        })?;
        debug!(cycle_id = %cycle_id, bytes = body.len(), "Upload accepted");
        Ok(body)
    }

    async fn health(&self) -> Result<ServiceHealth, EndpointError> {
        let url = self.config.status_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(EndpointError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(EndpointError::Rejected {
                status: status.as_u16(),
                message: ErrorPayload::message_from_body(&body),
            });
        }

        response
            .json::<ServiceHealth>()
            .await
            .map_err(|e| EndpointError::InvalidResponse(format!("Failed to parse status: {}", e)))
    }
}
