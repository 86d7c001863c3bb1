//! HTTP answer provider - `AnswerProvider` over the question answering service.
//!
//! Protocol: `POST {base_url}/query` with `{"query": "<question>"}`; a
//! successful reply is `{"answer": "<text>"}`, optionally with
//! `"tokens_used"`. A `tokens_used` that is not a non-negative integer
//! fitting in `u32` is ignored rather than failing the whole reply.
//!
//! # Configuration
//!
//! ```ignore
//! let provider = HttpAnswerProvider::new(
//!     HttpAnswerConfig::new("http://localhost:8000").with_timeout(Duration::from_secs(30)),
//! )?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AnswerConfig;
use crate::ports::{Answer, AnswerProvider, ProviderError};

/// Configuration for the HTTP answer provider.
#[derive(Debug, Clone)]
pub struct HttpAnswerConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpAnswerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&AnswerConfig> for HttpAnswerConfig {
    fn from(config: &AnswerConfig) -> Self {
        Self::new(config.base_url.clone()).with_timeout(config.timeout())
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    answer: Option<String>,
    #[serde(default)]
    tokens_used: Option<serde_json::Value>,
}

impl QueryResponse {
    fn tokens_used(&self) -> Option<u32> {
        self.tokens_used
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|count| u32::try_from(count).ok())
    }
}

/// Calls the answer service over HTTP.
pub struct HttpAnswerProvider {
    config: HttpAnswerConfig,
    client: Client,
}

impl HttpAnswerProvider {
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(config: HttpAnswerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AnswerProvider for HttpAnswerProvider {
    async fn generate(&self, question: &str) -> Result<Answer, ProviderError> {
        let response = self
            .client
            .post(self.query_url())
            .json(&QueryRequest { query: question })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else if e.is_connect() {
                    ProviderError::Transport(format!("Connection failed: {}", e))
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: QueryResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::MalformedResponse(e.to_string())
            }
        })?;

        let tokens_used = body.tokens_used();
        match body.answer {
            Some(text) if !text.trim().is_empty() => Ok(Answer { text, tokens_used }),
            Some(_) => Err(ProviderError::MalformedResponse("blank answer".to_string())),
            None => Err(ProviderError::MalformedResponse(
                "missing answer field".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for HttpAnswerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAnswerProvider")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}
