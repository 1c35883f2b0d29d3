//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, gas limit covers intrinsic gas)
//! - Check that URLs and contract addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::ClientConfig;

/// Intrinsic gas of any transaction.
const MIN_GAS_LIMIT: u64 = 21_000;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.chain.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "chain.rpc_url",
            format!("invalid URL '{}': {}", config.chain.rpc_url, e),
        ));
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chain.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.chain.gas_limit < MIN_GAS_LIMIT {
        errors.push(ValidationError::new(
            "chain.gas_limit",
            format!("must be at least {}", MIN_GAS_LIMIT),
        ));
    }

    if config.receipts.poll_interval_ms == 0 {
        errors.push(ValidationError::new("receipts.poll_interval_ms", "must be greater than 0"));
    }
    if config.receipts.timeout_secs == 0 {
        errors.push(ValidationError::new("receipts.timeout_secs", "must be greater than 0"));
    }

    for (field, value) in [
        ("contracts.temp_key", &config.contracts.temp_key),
        ("contracts.game", &config.contracts.game),
    ] {
        if value.parse::<Address>().is_err() {
            errors.push(ValidationError::new(field, format!("invalid address '{}'", value)));
        }
    }

    for (field, value) in [
        ("keys.work_key_env", &config.keys.work_key_env),
        ("keys.temp_key_env", &config.keys.temp_key_env),
        ("keys.operator_key_env", &config.keys.operator_key_env),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "environment variable name is empty"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
