//! Registration and login input rules.
//!
//! Every failed rule is collected so the client can show all problems at
//! once. At most one message is reported per field.

use super::Email;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Raw registration form.
#[derive(Debug, Clone)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration form that passed every rule.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub name: String,
    pub email: Email,
    pub password: String,
}

/// Raw login form.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login form that passed every rule.
#[derive(Debug, Clone)]
pub struct ValidLogin {
    pub email: Email,
    pub password: String,
}

/// Human-readable rule violations, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialViolations(Vec<String>);

impl CredentialViolations {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// All messages joined for a single-line summary.
    pub fn summary(&self) -> String {
        self.0.join(", ")
    }
}

impl std::fmt::Display for CredentialViolations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for CredentialViolations {}

impl RegistrationInput {
    pub fn validate(&self) -> Result<ValidRegistration, CredentialViolations> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        let name_chars = name.chars().count();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        } else if name_chars < NAME_MIN_CHARS {
            errors.push(format!("Name must be at least {} characters", NAME_MIN_CHARS));
        } else if name_chars > NAME_MAX_CHARS {
            errors.push(format!(
                "Name must be no more than {} characters",
                NAME_MAX_CHARS
            ));
        }

        let email = check_email(&self.email, &mut errors);

        if self.password != self.confirm_password {
            errors.push("Passwords do not match".to_string());
        } else if self.password.is_empty() {
            errors.push("Password is required".to_string());
        } else if self.password.chars().count() < PASSWORD_MIN_CHARS {
            errors.push(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_CHARS
            ));
        }

        match email {
            Some(email) if errors.is_empty() => Ok(ValidRegistration {
                name: name.to_string(),
                email,
                password: self.password.clone(),
            }),
            _ => Err(CredentialViolations(errors)),
        }
    }
}

impl LoginInput {
    pub fn validate(&self) -> Result<ValidLogin, CredentialViolations> {
        let mut errors = Vec::new();

        let email = check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push("Password is required".to_string());
        }

        match email {
            Some(email) if errors.is_empty() => Ok(ValidLogin {
                email,
                password: self.password.clone(),
            }),
            _ => Err(CredentialViolations(errors)),
        }
    }
}

fn check_email(raw: &str, errors: &mut Vec<String>) -> Option<Email> {
    if raw.trim().is_empty() {
        errors.push("Email is required".to_string());
        return None;
    }
    match Email::parse(raw) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push("Email format is invalid".to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationInput {
        RegistrationInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn valid_registration_passes_and_trims() {
        let input = RegistrationInput {
            name: "  Alice  ".to_string(),
            email: " alice@example.com ".to_string(),
            ..registration()
        };
        let valid = input.validate().unwrap();
        assert_eq!(valid.name, "Alice");
        assert_eq!(valid.email.as_str(), "alice@example.com");
    }

    #[test]
    fn name_length_is_counted_after_trim() {
        let input = RegistrationInput {
            name: " A ".to_string(),
            ..registration()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.messages(), ["Name must be at least 2 characters"]);

        let input = RegistrationInput {
            name: "x".repeat(51),
            ..registration()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.messages(), ["Name must be no more than 50 characters"]);
    }

    #[test]
    fn mismatch_is_reported_before_length() {
        let input = RegistrationInput {
            password: "abc".to_string(),
            confirm_password: "abd".to_string(),
            ..registration()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.messages(), ["Passwords do not match"]);
    }

    #[test]
    fn short_password_is_rejected() {
        let input = RegistrationInput {
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            ..registration()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.messages(), ["Password must be at least 6 characters"]);
    }

    #[test]
    fn all_violations_are_collected() {
        let input = RegistrationInput {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: String::new(),
            confirm_password: String::new(),
        };
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.messages(),
            ["Name is required", "Email format is invalid", "Password is required"]
        );
        assert_eq!(
            err.summary(),
            "Name is required, Email format is invalid, Password is required"
        );
    }

    #[test]
    fn login_requires_email_and_password() {
        let input = LoginInput {
            email: "  ".to_string(),
            password: String::new(),
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.messages(), ["Email is required", "Password is required"]);
    }

    #[test]
    fn login_does_not_enforce_password_length() {
        let input = LoginInput {
            email: "alice@example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(input.validate().is_ok());
    }
}
