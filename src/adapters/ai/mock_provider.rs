//! Mock answer provider for testing.
//!
//! Replays queued outcomes in order, then falls back to a default answer.
//! Supports simulated latency and records every question it receives.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAnswerProvider::new()
//!     .with_answer("Bucharest")
//!     .with_error(ProviderError::Timeout);
//!
//! assert_eq!(provider.generate("Capital?").await?.text, "Bucharest");
//! assert!(provider.generate("Again?").await.is_err());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{Answer, AnswerProvider, ProviderError};

const DEFAULT_ANSWER: &str = "Mock answer";

/// Configurable `AnswerProvider` for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct MockAnswerProvider {
    outcomes: Arc<Mutex<VecDeque<Result<Answer, ProviderError>>>>,
    delay: Duration,
    questions: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAnswerProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful answer.
    pub fn with_answer(self, text: impl Into<String>) -> Self {
        lock(&self.outcomes).push_back(Ok(Answer::new(text)));
        self
    }

    /// Queues a full answer, including token usage.
    pub fn with_full_answer(self, answer: Answer) -> Self {
        lock(&self.outcomes).push_back(Ok(answer));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: ProviderError) -> Self {
        lock(&self.outcomes).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.questions).len()
    }

    /// Questions received so far, in call order.
    pub fn questions(&self) -> Vec<String> {
        lock(&self.questions).clone()
    }
}

#[async_trait]
impl AnswerProvider for MockAnswerProvider {
    async fn generate(&self, question: &str) -> Result<Answer, ProviderError> {
        lock(&self.questions).push(question.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.outcomes).pop_front();
        next.unwrap_or_else(|| Ok(Answer::new(DEFAULT_ANSWER)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_outcomes_in_order_then_defaults() {
        let provider = MockAnswerProvider::new()
            .with_answer("first")
            .with_error(ProviderError::Status(500));

        assert_eq!(provider.generate("a").await.unwrap().text, "first");
        assert_eq!(
            provider.generate("b").await.unwrap_err(),
            ProviderError::Status(500)
        );
        assert_eq!(provider.generate("c").await.unwrap().text, DEFAULT_ANSWER);
    }

    #[tokio::test]
    async fn records_questions() {
        let provider = MockAnswerProvider::new();
        provider.generate("Hello?").await.unwrap();
        provider.generate("Again?").await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.questions(), vec!["Hello?", "Again?"]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let provider = MockAnswerProvider::new().with_answer("shared");
        let clone = provider.clone();

        assert_eq!(clone.generate("q").await.unwrap().text, "shared");
        assert_eq!(provider.call_count(), 1);
    }
}
