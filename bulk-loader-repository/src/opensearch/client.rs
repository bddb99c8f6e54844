//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `DestinationClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::config::{DestinationConfig, IndexSettings};
use crate::errors::DestinationError;
use crate::interfaces::{DestinationClient, IndexCreation, IndexDeletion};
use crate::opensearch::bulk::{build_bulk_body, error_reason, parse_bulk_items};
use bulk_loader_shared::{BulkOutcome, PreparedDocument};

/// Error type OpenSearch reports when creating an index that already exists.
const ALREADY_EXISTS_ERROR: &str = "resource_already_exists_exception";

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// use bulk_loader_repository::{DestinationConfig, OpenSearchClient};
/// let client = OpenSearchClient::new(&DestinationConfig::new("localhost:9200"))?;
///
/// client.create_index("people").await?;
/// let outcomes = client.bulk_write(&documents).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_settings: IndexSettings,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured host.
    ///
    /// No request is sent; an unreachable host surfaces on the first call.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(DestinationError::ConfigurationError)` - If the host is invalid
    ///   or the transport cannot be built
    pub fn new(config: &DestinationConfig) -> Result<Self, DestinationError> {
        let url = config.url()?;

        let conn_pool = SingleNodeConnectionPool::new(url.clone());
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| DestinationError::configuration(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self {
            client,
            index_settings: config.index_settings.clone(),
        })
    }

    /// Read an error response into a `RequestFailed` error.
    async fn request_failed(response: Response) -> DestinationError {
        let status = response.status_code().as_u16();
        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| value.get("error").map(error_reason))
            .unwrap_or(body);

        DestinationError::request_failed(status, reason)
    }

    fn is_already_exists(error: &DestinationError) -> bool {
        matches!(
            error,
            DestinationError::RequestFailed { status: 400, reason } if reason.starts_with(ALREADY_EXISTS_ERROR)
        )
    }
}

#[async_trait]
impl DestinationClient for OpenSearchClient {
    async fn index_exists(&self, index: &str) -> Result<bool, DestinationError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| DestinationError::unavailable(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(Self::request_failed(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn create_index(&self, index: &str) -> Result<IndexCreation, DestinationError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(self.index_settings.to_body())
            .send()
            .await
            .map_err(|e| DestinationError::unavailable(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(index = %index, "Index created");
            return Ok(IndexCreation::Created);
        }

        let error = Self::request_failed(response).await;
        if Self::is_already_exists(&error) {
            debug!(index = %index, "Index already exists");
            return Ok(IndexCreation::AlreadyExists);
        }

        error!(index = %index, error = %error, "Create index request failed");
        Err(error)
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index: &str) -> Result<IndexDeletion, DestinationError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| DestinationError::unavailable(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - the index may not exist yet
        if status.as_u16() == 404 {
            return Ok(IndexDeletion::NotFound);
        }

        if !status.is_success() {
            let error = Self::request_failed(response).await;
            error!(index = %index, error = %error, "Delete index request failed");
            return Err(error);
        }

        debug!(index = %index, "Index deleted");
        Ok(IndexDeletion::Deleted)
    }

    async fn refresh_index(&self, index: &str) -> Result<(), DestinationError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| DestinationError::unavailable(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(Self::request_failed(response).await);
        }

        Ok(())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_write(
        &self,
        documents: &[PreparedDocument],
    ) -> Result<Vec<BulkOutcome>, DestinationError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(build_bulk_body(documents))
            .send()
            .await
            .map_err(|e| DestinationError::unavailable(e.to_string()))?;

        if !response.status_code().is_success() {
            let error = Self::request_failed(response).await;
            error!(error = %error, "Bulk request failed");
            return Err(error);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DestinationError::parse(e.to_string()))?;

        let outcomes = parse_bulk_items(documents, &body);

        debug!(
            submitted = documents.len(),
            acknowledged = outcomes.iter().filter(|o| o.success).count(),
            "Bulk request completed"
        );

        Ok(outcomes)
    }
}
