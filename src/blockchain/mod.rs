//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private keys)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (context fetch, build, sign, broadcast, receipt)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::TxSubmitter;
pub use types::{BlockchainError, BlockchainResult, ChainContext, ChainId};
pub use wallet::{KeyRing, KeyRole, Wallet};
