//! Answer service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::{Environment, MAX_TIMEOUT_SECS};

/// External answer-generation service
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerConfig {
    /// Base URL; questions are posted to `{base_url}/query`
    pub base_url: String,

    /// Upper bound on a single answer request, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AnswerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate answer service configuration
    ///
    /// Plain HTTP is tolerated outside production, where the service usually
    /// runs next to the API on localhost.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("ANSWER__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAnswerServiceUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::AnswerServiceMustBeHttps);
        }
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    20
}
