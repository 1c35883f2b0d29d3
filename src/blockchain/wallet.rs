//! Key pairs and transaction signing.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized
//! - `Debug` output shows the role and address, never the key

use std::fmt;

use alloy::consensus::TxLegacy;
use alloy::network::TxSignerSync;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signature;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::KeysConfig;

/// What a key is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    /// The player's long-lived account.
    Work,
    /// Short-lived key bound to a game on behalf of the work account.
    Temporary,
    /// Account allowed to grant line of credit.
    Operator,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyRole::Work => "work",
            KeyRole::Temporary => "temporary",
            KeyRole::Operator => "operator",
        };
        f.pad(name)
    }
}

/// A private key together with its derived address.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    role: KeyRole,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `role` - What the key is used for, for logging only
    pub fn from_private_key(private_key_hex: &str, role: KeyRole) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex.parse().map_err(|e| {
            BlockchainError::Wallet(format!("Invalid private key format for {} key: {}", role, e))
        })?;

        tracing::info!(role = %role, address = %signer.address(), "Key loaded");

        Ok(Self { signer, role })
    }

    /// Load a wallet from the named environment variable.
    pub fn from_env(var: &str, role: KeyRole) -> BlockchainResult<Self> {
        let private_key = std::env::var(var).map_err(|_| {
            BlockchainError::Wallet(format!(
                "Environment variable {} not set ({} key)",
                var, role
            ))
        })?;

        Self::from_private_key(&private_key, role)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn role(&self) -> KeyRole {
        self.role
    }

    /// Sign a legacy transaction.
    ///
    /// The transaction's `chain_id` must already be set; the signature then
    /// carries EIP-155 replay protection for that chain.
    pub fn sign_transaction(&self, tx: &mut TxLegacy) -> BlockchainResult<Signature> {
        if tx.chain_id.is_none() {
            return Err(BlockchainError::Signing(
                "refusing to sign a transaction without chain ID".to_string(),
            ));
        }
        self.signer
            .sign_transaction_sync(tx)
            .map_err(|e| BlockchainError::Signing(format!("{} key: {}", self.role, e)))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("role", &self.role)
            .field("address", &self.address())
            .finish()
    }
}

/// The three keys the client works with.
#[derive(Debug, Clone)]
pub struct KeyRing {
    pub work: Wallet,
    pub temporary: Wallet,
    pub operator: Wallet,
}

impl KeyRing {
    pub fn new(work: Wallet, temporary: Wallet, operator: Wallet) -> Self {
        Self {
            work,
            temporary,
            operator,
        }
    }

    /// Load all three keys from the environment variables named in `config`.
    pub fn from_env(config: &KeysConfig) -> BlockchainResult<Self> {
        Ok(Self::new(
            Wallet::from_env(&config.work_key_env, KeyRole::Work)?,
            Wallet::from_env(&config.temp_key_env, KeyRole::Temporary)?,
            Wallet::from_env(&config.operator_key_env, KeyRole::Operator)?,
        ))
    }

    /// Role and address of every key, in a stable order.
    pub fn addresses(&self) -> [(KeyRole, Address); 3] {
        [
            (KeyRole::Work, self.work.address()),
            (KeyRole::Temporary, self.temporary.address()),
            (KeyRole::Operator, self.operator.address()),
        ]
    }
}
