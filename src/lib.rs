//! prune-mail library entrypoint.
//!
//! Modules:
//! - `app`: startup, configuration, shared state
//! - `http`: Axum router and handlers
//! - `service`: email lifecycle (send, draft, query, delete)
//! - `smtp`: outgoing mail transport (lettre or offline)
//! - `db`: migrations, the email store and demo data
//! - `models`: typed records used across layers
//! - `error`: error types
//! - `util`: tracing setup

pub mod app;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod service;
pub mod smtp;
pub mod util;
