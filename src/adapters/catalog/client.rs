//! Catalog GraphQL client with cursor pagination
//!
//! [`CatalogClient`] fetches the complete record set for one asset type
//! by walking pages until the API reports no further cursor. Page-level
//! retry, the single re-authentication path, and cursor bookkeeping all
//! live here; callers only see the final record list or a failure that
//! carries the records fetched before it.

use super::auth::TokenProvider;
use super::models::{AssetConnection, GraphQlResponse};
use super::query::{build_assets_query, QueryPayload};
use crate::config::CatalogConfig;
use crate::domain::{CatalogError, RawAssetRecord};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// A failed fetch, retaining the records from pages that completed
///
/// Pages already parsed before the failure are kept so reporting can
/// say how far the asset type got; the asset type's overall status is
/// still failed.
#[derive(Debug)]
pub struct FetchFailure {
    pub partial: Vec<RawAssetRecord>,
    pub error: CatalogError,
}

/// Source of raw asset records for one asset type
///
/// The production implementation is [`CatalogClient`]; the orchestrator
/// only depends on this trait so it can be exercised without a network.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetch every record of the given asset type, in API page order
    ///
    /// Not restartable: a fresh call re-fetches from page one.
    async fn fetch_assets(
        &self,
        asset_type_id: &str,
    ) -> Result<Vec<RawAssetRecord>, FetchFailure>;
}

/// Pagination state for one asset type
#[derive(Debug)]
enum PageState {
    Fetching(Option<String>),
    Done,
}

/// Outcome classification for a single page request
enum PageError {
    Unauthorized,
    Retryable(CatalogError),
    Fatal(CatalogError),
}

/// HTTP client for the catalog's GraphQL endpoint
pub struct CatalogClient {
    http: Client,
    graphql_url: String,
    tokens: Arc<TokenProvider>,
    page_size: u32,
    max_attempts: usize,
    retry_delay: Duration,
}

impl CatalogClient {
    /// Create a client for the configured catalog instance
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &CatalogConfig, page_size: u32) -> crate::domain::Result<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                crate::domain::CartaError::Configuration(format!(
                    "Failed to build HTTP client: {e}"
                ))
            })?;

        let tokens = Arc::new(TokenProvider::new(http.clone(), config));

        Ok(Self {
            http,
            graphql_url: config.graphql_url(),
            tokens,
            page_size,
            max_attempts: config.retry.max_attempts,
            retry_delay: Duration::from_millis(config.retry.retry_delay_ms),
        })
    }

    /// Fetch one page, applying the retry and re-authentication policy
    async fn fetch_page(
        &self,
        asset_type_id: &str,
        cursor: Option<&str>,
    ) -> Result<AssetConnection, CatalogError> {
        let payload = build_assets_query(asset_type_id, cursor, self.page_size);
        let mut attempt = 0usize;
        let mut reauthenticated = false;

        loop {
            attempt += 1;

            match self.post_query(&payload).await {
                Ok(connection) => return Ok(connection),
                Err(PageError::Unauthorized) if !reauthenticated => {
                    // The forced-refresh retry does not consume a regular attempt
                    reauthenticated = true;
                    attempt -= 1;
                    tracing::warn!(
                        asset_type_id,
                        "Received 401, refreshing token and retrying page once"
                    );
                    self.tokens.invalidate().await;
                }
                Err(PageError::Unauthorized) => {
                    return Err(CatalogError::AuthenticationFailed(
                        "request rejected with 401 after a forced token refresh".to_string(),
                    ));
                }
                Err(PageError::Retryable(error)) if attempt < self.max_attempts => {
                    tracing::warn!(
                        asset_type_id,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %error,
                        "Page fetch failed, retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(PageError::Retryable(error)) => return Err(error),
                Err(PageError::Fatal(error)) => return Err(error),
            }
        }
    }

    /// Issue one page request and classify the outcome
    async fn post_query(&self, payload: &QueryPayload) -> Result<AssetConnection, PageError> {
        let token = self.tokens.get_token().await.map_err(PageError::Fatal)?;

        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(&token)
            .json(payload)
            .send()
            .await
            .map_err(|e| PageError::Retryable(CatalogError::ConnectionFailed(e.to_string())))?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(PageError::Unauthorized);
        }

        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(PageError::Retryable(CatalogError::ServerError {
                status: status.as_u16(),
                message: body,
            }));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PageError::Fatal(CatalogError::QueryFailed(format!(
                "unexpected status {status}: {body}"
            ))));
        }

        let envelope: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| PageError::Fatal(CatalogError::InvalidResponse(e.to_string())))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> =
                envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(PageError::Fatal(CatalogError::QueryFailed(
                messages.join("; "),
            )));
        }

        match envelope.data {
            Some(data) => Ok(data.assets),
            None => Err(PageError::Fatal(CatalogError::InvalidResponse(
                "response contained neither data nor errors".to_string(),
            ))),
        }
    }
}

#[async_trait]
impl AssetSource for CatalogClient {
    async fn fetch_assets(
        &self,
        asset_type_id: &str,
    ) -> Result<Vec<RawAssetRecord>, FetchFailure> {
        let mut records = Vec::new();
        let mut pages = 0usize;
        let mut state = PageState::Fetching(None);

        while let PageState::Fetching(cursor) = state {
            let page = match self.fetch_page(asset_type_id, cursor.as_deref()).await {
                Ok(page) => page,
                Err(error) => {
                    return Err(FetchFailure {
                        partial: records,
                        error,
                    })
                }
            };

            pages += 1;
            state = next_state(&page, self.page_size);

            tracing::debug!(
                asset_type_id,
                page = pages,
                page_records = page.nodes.len(),
                "Fetched page"
            );

            records.extend(page.nodes);
        }

        tracing::info!(
            asset_type_id,
            records = records.len(),
            pages,
            "Fetched all pages for asset type"
        );

        Ok(records)
    }
}

/// Decide whether another page follows, and with which cursor
///
/// Each cursor is consumed exactly once; the walk terminates on an empty
/// page, on `hasNextPage = false`, or (when the API sends no pagination
/// metadata) on a page shorter than the requested size.
fn next_state(page: &AssetConnection, page_size: u32) -> PageState {
    if page.nodes.is_empty() {
        return PageState::Done;
    }

    match &page.page_info {
        Some(info) => match (&info.end_cursor, info.has_next_page) {
            (Some(cursor), true) => PageState::Fetching(Some(cursor.clone())),
            _ => PageState::Done,
        },
        None => {
            if page.nodes.len() as u32 >= page_size {
                PageState::Fetching(page.nodes.last().map(|a| a.id.clone()))
            } else {
                PageState::Done
            }
        }
    }
}
