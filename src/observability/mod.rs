//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured events via `tracing`, one subscriber per process
//! - Addresses and transaction hashes are logged; key material never is

pub mod logging;

pub use logging::init_logging;
