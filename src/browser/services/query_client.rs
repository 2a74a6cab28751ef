//! # Query Client
//!
//! Stateless REST client for the character catalog API. Owns the URL and
//! query-parameter contract; performs no retries and no caching, so every
//! call is a fresh request.

use crate::browser::models::{Episode, OneOrMany, PageEnvelope, QueryState, Record};
use crate::browser::services::error::CatalogError;
use async_trait::async_trait;

/// Read-only operations against the catalog.
///
/// Implemented by [`QueryClient`] for the real API and by in-memory fakes
/// in tests.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /character?name=..&status=..&page=..` (page is one-based on the wire)
    async fn list_records(&self, query: &QueryState) -> Result<PageEnvelope, CatalogError>;

    /// `GET /character/{id}`
    async fn get_record(&self, id: u32) -> Result<Record, CatalogError>;

    /// `GET /character/{id1},{id2},..`; result order is whatever the API returns
    async fn list_by_ids(&self, ids: &[u32]) -> Result<Vec<Record>, CatalogError>;

    /// `GET /episode/{id1},{id2},..`; a single id yields a bare object
    async fn lookup_episodes(&self, ids: &[u32]) -> Result<OneOrMany<Episode>, CatalogError>;
}

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: reqwest::Client,
    base_url: String,
}

impl QueryClient {
    /// Create a new client.
    ///
    /// * `base_url` - API root, e.g. `https://rickandmortyapi.com/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn character_url(&self) -> String {
        format!("{}/character", self.base_url)
    }

    fn batch_url(&self, resource: &str, ids: &[u32]) -> String {
        format!("{}/{}/{}", self.base_url, resource, join_ids(ids))
    }

    // ---- private helpers ----

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CatalogError> {
        let response = request.send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Return the response unchanged on success, or a
    /// [`CatalogError::Status`] with the body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!("Catalog API returned {}: {}", status, body);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CatalogApi for QueryClient {
    async fn list_records(&self, query: &QueryState) -> Result<PageEnvelope, CatalogError> {
        let url = self.character_url();
        let page = query.wire_page().to_string();
        tracing::debug!(
            "GET {} name={:?} status={:?} page={}",
            url,
            query.name,
            query.status.as_query_value(),
            page
        );

        let request = self.client.get(url).query(&[
            ("name", query.name.as_str()),
            ("status", query.status.as_query_value()),
            ("page", page.as_str()),
        ]);
        self.get_json(request).await
    }

    async fn get_record(&self, id: u32) -> Result<Record, CatalogError> {
        let url = format!("{}/{}", self.character_url(), id);
        tracing::debug!("GET {}", url);
        self.get_json(self.client.get(url)).await
    }

    async fn list_by_ids(&self, ids: &[u32]) -> Result<Vec<Record>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.batch_url("character", ids);
        tracing::debug!("GET {}", url);
        let reply: OneOrMany<Record> = self.get_json(self.client.get(url)).await?;
        Ok(reply.into_vec())
    }

    async fn lookup_episodes(&self, ids: &[u32]) -> Result<OneOrMany<Episode>, CatalogError> {
        if ids.is_empty() {
            return Ok(OneOrMany::Many(Vec::new()));
        }
        let url = self.batch_url("episode", ids);
        tracing::debug!("GET {}", url);
        self.get_json(self.client.get(url)).await
    }
}

/// Comma-join identifiers for a batched path segment
fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
