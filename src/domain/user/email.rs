//! Email address value object.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
        .expect("email pattern compiles")
});

/// A syntactically valid, trimmed email address.
///
/// Emails double as login names and token subjects, so the stored form is
/// exactly what the user typed minus surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parses and validates an email address.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the input is blank
    /// - `InvalidFormat` if it does not look like `local@domain.tld`
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(ValidationError::invalid_format(
                "email",
                "expected an address like name@example.com",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wraps a value loaded from storage without re-validating it.
    pub fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for raw in [
            "alice@example.com",
            "first.last@fmi.unibuc.ro",
            "user+tag@mail.example.org",
            "a_b-c@sub-domain.example.info",
        ] {
            assert!(Email::parse(raw).is_ok(), "{} should be valid", raw);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let email = Email::parse("  alice@example.com \n").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn rejects_blank_input_as_empty() {
        assert!(matches!(
            Email::parse("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "alice",
            "alice@",
            "@example.com",
            "alice@example",
            "alice@example.c",
            "alice@example.toolongtld",
            "al ice@example.com",
            "alice..smith@example.com",
        ] {
            assert!(
                matches!(Email::parse(raw), Err(ValidationError::InvalidFormat { .. })),
                "{} should be rejected",
                raw
            );
        }
    }
}
