//! Logging setup.

mod init_tracing;

pub use init_tracing::{env_filter, init_tracing};
