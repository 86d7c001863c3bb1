//! Answer provider port.
//!
//! The external service that turns a question into an answer. It is slow and
//! may be down; callers get every failure back as a [`ProviderError`] value
//! and decide what to show the user.

use async_trait::async_trait;
use thiserror::Error;

/// A generated answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    /// Token usage, when the service reports it.
    pub tokens_used: Option<u32>,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens_used: None,
        }
    }

    pub fn with_tokens_used(mut self, tokens: u32) -> Self {
        self.tokens_used = Some(tokens);
        self
    }
}

/// Reasons an answer could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Connection refused, DNS failure, reset, and similar.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("answer service timed out")]
    Timeout,

    /// Service answered with a non-success status.
    #[error("answer service returned status {0}")]
    Status(u16),

    /// Body was not JSON or lacked a usable `answer` field.
    #[error("malformed answer response: {0}")]
    MalformedResponse(String),
}

/// Generates answers for questions.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn generate(&self, question: &str) -> Result<Answer, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_builder_sets_tokens() {
        let answer = Answer::new("42").with_tokens_used(7);
        assert_eq!(answer.text, "42");
        assert_eq!(answer.tokens_used, Some(7));
    }

    #[test]
    fn provider_errors_describe_the_failure() {
        assert_eq!(
            ProviderError::Status(503).to_string(),
            "answer service returned status 503"
        );
    }

    #[test]
    fn answer_provider_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn AnswerProvider>();
    }
}
