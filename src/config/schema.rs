//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.
//! Private keys never appear here; only the names of the environment
//! variables that hold them.

use serde::{Deserialize, Serialize};

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Chain connection and transaction parameters.
    pub chain: ChainConfig,

    /// Receipt polling settings.
    pub receipts: ReceiptConfig,

    /// Target contract addresses.
    pub contracts: ContractsConfig,

    /// Where key material is loaded from.
    pub keys: KeysConfig,

    /// Parameters of the `game-info` walkthrough.
    pub demo: DemoConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// When set, transactions are refused if the node reports another chain ID.
    pub expected_chain_id: Option<u64>,

    /// Fixed gas limit for every contract call.
    pub gas_limit: u64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            rpc_timeout_secs: 30,
            expected_chain_id: None,
            gas_limit: 3_000_000,
            max_gas_price_gwei: 500,
        }
    }
}

/// Receipt polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Delay between `eth_getTransactionReceipt` polls in milliseconds.
    pub poll_interval_ms: u64,

    /// Give up waiting for a receipt after this many seconds.
    pub timeout_secs: u64,

    /// Blocks that must be mined on top of the receipt's block.
    pub confirmation_blocks: u32,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            timeout_secs: 120,
            confirmation_blocks: 0,
        }
    }
}

/// Contract addresses, kept as strings and parsed after validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Address of the temporary-key system contract.
    pub temp_key: String,

    /// Address of the Game contract.
    pub game: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            temp_key: "0x1000000000000000000000000000000000000021".to_string(),
            game: "0x3a9d4C411F8A37be2f34B208A03719a2cCf4Aee0".to_string(),
        }
    }
}

/// Environment variable names holding the three private keys.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeysConfig {
    pub work_key_env: String,
    pub temp_key_env: String,
    pub operator_key_env: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            work_key_env: "TEMPKEY_WORK_PRIVATE_KEY".to_string(),
            temp_key_env: "TEMPKEY_TEMP_PRIVATE_KEY".to_string(),
            operator_key_env: "TEMPKEY_OPERATOR_PRIVATE_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Line of credit written by `game-info`.
    pub line_of_credit: u64,

    /// Steps passed to `movePlayer` by `game-info`.
    pub move_steps: u64,

    /// Default validity period handed to the temp-key contract.
    pub period: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            line_of_credit: 1_234_567_890,
            move_steps: 1_234_567_890,
            period: "Hello World".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
