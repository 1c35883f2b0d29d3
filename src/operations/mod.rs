//! Named operations against the Game and temporary-key contracts.
//!
//! # Data Flow
//! ```text
//! operation (e.g. bind temporary key)
//!     → contracts (encode payload)
//!     → TxSubmitter (fetch context, sign with the role's key, broadcast)
//!     → TxHash, optionally awaited for a receipt
//! ```
//!
//! Every operation runs to completion before the next one starts.

pub mod demo;
pub mod game;
pub mod temp_key;

use alloy::primitives::{Address, TxHash};
use alloy::rpc::types::TransactionReceipt;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::{BlockchainClient, KeyRing, TxSubmitter};
use crate::config::{ClientConfig, ContractsConfig};

pub use demo::GameInfoReport;
pub use game::GameState;

/// Parsed contract addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contracts {
    pub temp_key: Address,
    pub game: Address,
}

impl Contracts {
    pub fn from_config(config: &ContractsConfig) -> BlockchainResult<Self> {
        Ok(Self {
            temp_key: parse_address(&config.temp_key)?,
            game: parse_address(&config.game)?,
        })
    }
}

fn parse_address(value: &str) -> BlockchainResult<Address> {
    value
        .parse()
        .map_err(|_| BlockchainError::InvalidAddress(value.to_string()))
}

/// Entry point for every operation: one connection, three keys, two contracts.
#[derive(Debug, Clone)]
pub struct GameClient {
    submitter: TxSubmitter,
    keys: KeyRing,
    contracts: Contracts,
}

impl GameClient {
    pub fn new(submitter: TxSubmitter, keys: KeyRing, contracts: Contracts) -> Self {
        Self {
            submitter,
            keys,
            contracts,
        }
    }

    /// Build a client from validated configuration and already-loaded keys.
    pub fn from_config(config: &ClientConfig, keys: KeyRing) -> BlockchainResult<Self> {
        let client = BlockchainClient::new(config.chain.clone())?;
        let submitter = TxSubmitter::new(client, config.receipts.clone());
        let contracts = Contracts::from_config(&config.contracts)?;

        tracing::info!(
            temp_key_contract = %contracts.temp_key,
            game_contract = %contracts.game,
            "Game client ready"
        );
        Ok(Self::new(submitter, keys, contracts))
    }

    pub fn keys(&self) -> &KeyRing {
        &self.keys
    }

    pub fn contracts(&self) -> &Contracts {
        &self.contracts
    }

    pub fn submitter(&self) -> &TxSubmitter {
        &self.submitter
    }

    /// Block until `tx_hash` is mined.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<TransactionReceipt> {
        self.submitter.wait_for_receipt(tx_hash).await
    }
}
