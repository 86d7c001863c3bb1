//! HTTP listener settings

use serde::Deserialize;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for any configured timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Where and how the API listens.
///
/// `request_timeout_secs` bounds the whole request, including the answer
/// service call and the write that follows it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// Fallback filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins allowed to call the API
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Option<String>,
}

/// Deployment mode. Production switches logs to JSON and requires HTTPS
/// for the answer service.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    /// Listener address. The host must be a literal IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Origins from `cors_origins`, blanks dropped.
    pub fn allowed_origins(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.socket_addr().is_err() {
            return Err(ValidationError::InvalidBindAddress);
        }
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,askfmi=debug,sqlx=warn".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cors_origins() -> Option<String> {
    Some("http://localhost:3000".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hostname_is_not_a_bind_address() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBindAddress)
        ));
    }

    #[test]
    fn test_allowed_origins_skip_blanks() {
        let config = ServerConfig {
            cors_origins: Some(" https://ask.fmi.example ,, http://localhost:5173,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.allowed_origins(),
            vec!["https://ask.fmi.example", "http://localhost:5173"]
        );

        let none = ServerConfig {
            cors_origins: None,
            ..Default::default()
        };
        assert!(none.allowed_origins().is_empty());
    }

    #[test]
    fn test_request_timeout_bounds() {
        for secs in [0, MAX_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
    }

    #[test]
    fn test_only_two_environments_exist() {
        let parsed: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(parsed, Environment::Production);
        assert!(serde_json::from_str::<Environment>("\"staging\"").is_err());
    }
}
