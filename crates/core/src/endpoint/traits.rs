//! Trait definitions for the endpoint module.

use async_trait::async_trait;
use bytes::Bytes;

use super::error::EndpointError;
use super::types::{ServiceHealth, UploadRequest};

/// The remote service that turns uploaded PDFs into a dataset.
#[async_trait]
pub trait ExtractionEndpoint: Send + Sync {
    /// Returns the name of this endpoint implementation.
    fn name(&self) -> &str;

    /// Send one upload and return the raw body of a successful response.
    ///
    /// Non-success responses become [`EndpointError::Rejected`] carrying the
    /// payload's message, if any.
    async fn process(&self, request: UploadRequest) -> Result<Bytes, EndpointError>;

    /// Ask the service whether it is up.
    async fn health(&self) -> Result<ServiceHealth, EndpointError>;
}
