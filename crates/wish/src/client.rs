//! Wish client: configuration, the blessing request, and the fallback
//! contract that guarantees a response on every path.

use crate::error::{Result, WishError};
use crate::prompt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Environment variable holding the backend credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// A granted wish. `magical_factor` is intended to land in 80-100 but
/// out-of-range values from the backend are passed through as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishResponse {
    pub message: String,
    pub magical_factor: i64,
}

/// Configuration for the wish client
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WishConfig {
    /// API key; `None` means every wish resolves to the silent fallback
    pub api_key: Option<String>,
    /// Base endpoint for the generateContent API
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for WishConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

impl WishConfig {
    /// Create config from environment variables. A missing key is a valid
    /// configuration, not an error: the client falls back silently.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var(API_KEY_VAR) {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        config
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Fallback when no credential is configured. Returned without attempting
/// any network I/O.
pub fn missing_key_fallback() -> WishResponse {
    WishResponse {
        message: "The stars align to grant your wish in silence.".to_string(),
        magical_factor: 88,
    }
}

/// Fallback when the backend fails or replies with something unparseable.
pub fn quiet_spirits_fallback() -> WishResponse {
    WishResponse {
        message: "Your wish whispers through the golden branches, heard by the stars.".to_string(),
        magical_factor: 90,
    }
}

/// The wish service client
pub struct WishClient {
    config: WishConfig,
    client: reqwest::Client,
}

impl WishClient {
    /// Create a new wish client
    pub fn new(config: WishConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WishError::Api(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WishConfig {
        &self.config
    }

    /// Grant a wish. Always resolves: every failure path folds into one of
    /// the two fixed fallbacks.
    pub async fn grant(&self, wish: &str) -> WishResponse {
        match self.try_grant(wish).await {
            Ok(response) => response,
            Err(WishError::MissingCredential) => missing_key_fallback(),
            Err(err) => {
                warn!("the spirits are quiet: {err}");
                quiet_spirits_fallback()
            }
        }
    }

    async fn try_grant(&self, wish: &str) -> Result<WishResponse> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(WishError::MissingCredential)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, key
        );
        let response = self
            .client
            .post(&url)
            .json(&prompt::request_body(wish))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        prompt::parse_response(&body)
    }
}
