//! Word embeddings served by an HTTP endpoint.
//!
//! Each word is posted as `{"input": word}` and the endpoint answers with
//! `{"embedding": [f32, ...]}`. An optional API key is sent as a bearer token.
//!
//! # Examples
//!
//! ```no_run
//! use reading_time::{ApiEmbedding, TextProcessor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ApiEmbedding::new("http://localhost:8080/embed", None)?;
//! let vector = provider.process("Lesezeit")?;
//! assert!(!vector.is_empty());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::providers::TextProcessor;

/// Default time allowed for one embedding request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error returned by [`ApiEmbedding`].
#[derive(Debug, Error)]
pub enum ApiEmbeddingError {
    /// The word or the returned vector was empty.
    #[error("empty word or embedding")]
    Empty,
    /// The HTTP client could not be built or the request failed.
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The body was not an embedding or held non-finite values.
    #[error("invalid embedding response")]
    InvalidResponse,
}

impl PartialEq for ApiEmbeddingError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Empty, Self::Empty)
                | (Self::InvalidResponse, Self::InvalidResponse)
                | (Self::Request(_), Self::Request(_))
        )
    }
}

impl Eq for ApiEmbeddingError {}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Embedding capability backed by an HTTP API.
#[derive(Debug, Clone)]
pub struct ApiEmbedding {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl ApiEmbedding {
    /// Create a provider for `url` with [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiEmbeddingError::Request`] if the HTTP client cannot be
    /// constructed.
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Result<Self, ApiEmbeddingError> {
        Self::with_timeout(url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a provider with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiEmbeddingError::Request`] if the HTTP client cannot be
    /// constructed.
    pub fn with_timeout(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiEmbeddingError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextProcessor for ApiEmbedding {
    type Output = Box<[f32]>;
    type Error = ApiEmbeddingError;

    fn process(&self, input: &str) -> Result<Self::Output, Self::Error> {
        let word = input.trim();
        if word.is_empty() {
            return Err(ApiEmbeddingError::Empty);
        }
        let mut request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "input": word }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send()?.error_for_status()?;
        let body: EmbeddingResponse = response.json().map_err(|e| {
            tracing::warn!(url = %self.url, error = %e, "malformed embedding response");
            ApiEmbeddingError::InvalidResponse
        })?;
        if body.embedding.is_empty() {
            return Err(ApiEmbeddingError::Empty);
        }
        if !body.embedding.iter().all(|v| v.is_finite()) {
            return Err(ApiEmbeddingError::InvalidResponse);
        }
        Ok(body.embedding.into_boxed_slice())
    }
}
