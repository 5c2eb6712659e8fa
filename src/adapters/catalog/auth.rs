//! OAuth token lifecycle for the catalog API
//!
//! The catalog issues short-lived bearer tokens through a
//! client-credentials grant. [`TokenProvider`] owns the one cached token
//! for the whole process: fetch workers call [`TokenProvider::get_token`]
//! before every page and never see the expiry bookkeeping. The cache
//! mutex is held across the exchange itself, so concurrent callers that
//! arrive during a refresh wait for it instead of issuing duplicate
//! exchanges.

use crate::config::{CatalogConfig, SecretString};
use crate::domain::CatalogError;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tokio::sync::Mutex;

/// Assumed token lifetime when the endpoint omits `expires_in`
const DEFAULT_TOKEN_TTL_SECS: i64 = 300;

/// A cached access token with its expiry
#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Token endpoint response body
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,

    #[serde(default)]
    expires_in: Option<u64>,
}

/// Obtains and caches OAuth access tokens
///
/// # Example
///
/// ```no_run
/// use carta::adapters::catalog::TokenProvider;
/// use carta::config::CatalogConfig;
///
/// # async fn example(config: CatalogConfig) -> Result<(), Box<dyn std::error::Error>> {
/// let provider = TokenProvider::new(reqwest::Client::new(), &config);
/// let token = provider.get_token().await?;
/// # Ok(())
/// # }
/// ```
pub struct TokenProvider {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: SecretString,
    safety_margin: ChronoDuration,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    /// Create a provider for the configured catalog instance
    pub fn new(http: Client, config: &CatalogConfig) -> Self {
        Self {
            http,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            safety_margin: ChronoDuration::seconds(config.token_safety_margin_seconds as i64),
            cached: Mutex::new(None),
        }
    }

    /// Return a valid access token, exchanging credentials if needed
    ///
    /// The cached token is reused while it is at least `safety_margin`
    /// away from expiry. At most one credential exchange is in flight at
    /// any time; other callers wait for it and receive the same token.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::AuthenticationFailed`] if the credential
    /// exchange is rejected or the endpoint stays unreachable after one
    /// retry.
    pub async fn get_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Utc::now() < token.expires_at - self.safety_margin {
                return Ok(token.value.clone());
            }
            tracing::debug!("Cached access token is about to expire, refreshing");
        }

        let token = self.exchange().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Drop the cached token so the next `get_token` performs a fresh exchange
    ///
    /// Called when the API answers 401 despite a token that looked valid.
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
        tracing::debug!("Invalidated cached access token");
    }

    /// Perform the client-credentials exchange, retrying once on transport errors
    async fn exchange(&self) -> Result<AccessToken, CatalogError> {
        tracing::debug!(token_url = %self.token_url, "Requesting access token");

        let response = match self.post_credentials().await {
            Ok(response) => response,
            Err(first) => {
                tracing::warn!(error = %first, "Token exchange failed, retrying once");
                self.post_credentials().await.map_err(|e| {
                    CatalogError::AuthenticationFailed(format!(
                        "token endpoint unreachable: {e}"
                    ))
                })?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::AuthenticationFailed(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            CatalogError::AuthenticationFailed(format!("invalid token response: {e}"))
        })?;

        let ttl = token
            .expires_in
            .map(|secs| ChronoDuration::seconds(secs as i64))
            .unwrap_or_else(|| ChronoDuration::seconds(DEFAULT_TOKEN_TTL_SECS));

        tracing::info!(expires_in_secs = ttl.num_seconds(), "Obtained access token");

        Ok(AccessToken {
            value: token.access_token,
            expires_at: Utc::now() + ttl,
        })
    }

    async fn post_credentials(&self) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret().as_ref()),
            ])
            .send()
            .await
    }
}
