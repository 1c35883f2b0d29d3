//! Chain-specific types and error definitions.

use thiserror::Error;

pub use crate::config::schema::{ChainConfig, ReceiptConfig};

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Chain parameters fetched immediately before building a transaction.
///
/// Valid only at fetch time; never cached across transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainContext {
    /// Pending nonce of the sending account.
    pub nonce: u64,
    pub chain_id: ChainId,
    /// Suggested gas price in wei.
    pub gas_price: u128,
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node refused the signed transaction.
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// No receipt was available within the configured time.
    #[error("Transaction not confirmed after {0} seconds")]
    ConfirmationTimeout(u64),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or missing key.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Transaction signing failed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Call result could not be ABI-decoded.
    #[error("ABI error: {0}")]
    Abi(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// A configured address could not be parsed.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
