//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Hold the single JSON-RPC connection for the process
//! - Query chain state (nonce, chain ID, gas price, receipts)
//! - Broadcast signed transactions and run read-only calls
//! - Bound every request by the configured timeout

use std::fmt::Display;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainConfig, ChainId};

/// Blockchain RPC client wrapper.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    config: ChainConfig,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// No request is made here; the HTTP transport connects lazily.
    pub fn new(config: ChainConfig) -> BlockchainResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        tracing::info!(
            rpc_url = %config.rpc_url,
            timeout_secs = config.rpc_timeout_secs,
            "Blockchain client initialized"
        );

        Ok(Self {
            provider,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        })
    }

    async fn request<F, T, E>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{}: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.config.rpc_timeout_secs))
            }
        }
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.request("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.request("eth_blockNumber", self.provider.get_block_number()).await
    }

    /// Get the pending transaction count (nonce) for an address.
    pub async fn get_pending_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.request(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).pending(),
        )
        .await
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> BlockchainResult<u128> {
        self.request("eth_gasPrice", self.provider.get_gas_price()).await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        self.request(
            "eth_getTransactionReceipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    /// Broadcast an EIP-2718 encoded signed transaction.
    ///
    /// Sent exactly once; a node error is reported as [`BlockchainError::Rejected`].
    pub async fn send_raw_transaction(&self, encoded: &[u8]) -> BlockchainResult<TxHash> {
        match timeout(self.timeout_duration, self.provider.send_raw_transaction(encoded)).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Broadcast rejected");
                Err(BlockchainError::Rejected(e.to_string()))
            }
            Err(_) => Err(BlockchainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }

    /// Execute a read-only call against `to` at the latest block.
    pub async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes> {
        let request = TransactionRequest::default().with_to(to).with_input(input);
        self.request("eth_call", self.provider.call(request)).await
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
