//! Answer provider adapters.
//!
//! - `HttpAnswerProvider` - Calls the external question answering service
//! - `MockAnswerProvider` - Scripted answers for tests

mod http_answer_provider;
mod mock_provider;

pub use http_answer_provider::{HttpAnswerConfig, HttpAnswerProvider};
pub use mock_provider::MockAnswerProvider;
