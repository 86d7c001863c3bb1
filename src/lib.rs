//! AskFMI - Question answering API for university students
//!
//! This crate hosts the backend behind the AskFMI chat client: account
//! registration and login, a token gate in front of every chat endpoint,
//! and a conversation orchestrator that forwards questions to an external
//! answer service and stores both sides of each exchange.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
