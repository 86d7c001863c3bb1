//! The single place where answer-service failures turn into user-facing text.

use crate::ports::{Answer, ProviderError};

/// Shown as the assistant reply whenever the answer service cannot help.
pub const FALLBACK_ANSWER: &str =
    "Serviciul AI este momentan indisponibil. Vă rugăm să încercați mai târziu.";

/// Resolves a provider outcome into the answer that will be stored.
///
/// Every `ProviderError` variant, and a successful response with blank text,
/// maps to [`FALLBACK_ANSWER`] with no token usage.
pub fn answer_or_fallback(outcome: Result<Answer, ProviderError>) -> Answer {
    match outcome {
        Ok(answer) if !answer.text.trim().is_empty() => answer,
        Ok(_) => {
            tracing::warn!("Answer service returned an empty answer, using fallback");
            Answer::new(FALLBACK_ANSWER)
        }
        Err(error) => {
            tracing::warn!(error = %error, "Answer service failed, using fallback");
            Answer::new(FALLBACK_ANSWER)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_answer_passes_through() {
        let answer = Answer::new("Cursurile încep la 8.").with_tokens_used(12);
        assert_eq!(answer_or_fallback(Ok(answer.clone())), answer);
    }

    #[test]
    fn every_provider_error_maps_to_same_fallback() {
        let errors = [
            ProviderError::Transport("connection refused".to_string()),
            ProviderError::Timeout,
            ProviderError::Status(502),
            ProviderError::MalformedResponse("missing field `answer`".to_string()),
        ];

        for error in errors {
            let answer = answer_or_fallback(Err(error));
            assert_eq!(answer.text, FALLBACK_ANSWER);
            assert_eq!(answer.tokens_used, None);
        }
    }

    #[test]
    fn blank_answer_maps_to_fallback() {
        let answer = answer_or_fallback(Ok(Answer::new("  \n").with_tokens_used(3)));
        assert_eq!(answer, Answer::new(FALLBACK_ANSWER));
    }
}
