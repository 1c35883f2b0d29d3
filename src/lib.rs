//! Client for the temporary-key game contracts.
//!
//! Signs legacy EIP-155 transactions with a work, temporary or operator key
//! and submits them to the temporary-key system contract or the Game
//! contract over a single JSON-RPC connection.

pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod observability;
pub mod operations;

pub use blockchain::{BlockchainError, KeyRing, TxSubmitter};
pub use config::ClientConfig;
pub use operations::GameClient;
