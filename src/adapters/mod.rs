//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Answer service client and a scripted mock
//! - `auth` - Session tokens, password hashing, session validation
//! - `http` - Axum routes, middleware, DTOs
//! - `memory` - In-memory repositories for tests and local runs
//! - `observability` - Tracing subscriber setup
//! - `postgres` - PostgreSQL repositories and migrations

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod observability;
pub mod postgres;
