//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Server host must be an IP address")]
    InvalidBindAddress,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("JWT secret must be at least {0} bytes")]
    JwtSecretTooShort(usize),

    #[error("Token lifetime must be greater than zero")]
    InvalidTokenTtl,

    #[error("Token lifetime must not exceed {0} seconds")]
    TokenTtlTooLong(u64),

    #[error("Invalid answer service URL")]
    InvalidAnswerServiceUrl,

    #[error("Answer service URL must use HTTPS in production")]
    AnswerServiceMustBeHttps,

    #[error("Answer timeout must be at least {margin}s shorter than the request timeout")]
    AnswerTimeoutTooLong { margin: u64 },
}
