//! Transaction building, signing, broadcast and receipt monitoring.
//!
//! # Responsibilities
//! - Fetch a fresh [`ChainContext`] for every transaction
//! - Build legacy transactions with a fixed gas limit and zero value
//! - Sign with EIP-155 replay protection and broadcast once
//! - Poll for the receipt
//!
//! There is no retry: the first error is returned to the caller.

use std::time::Duration;

use alloy::consensus::{SignableTransaction, Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy::rpc::types::TransactionReceipt;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainContext, ReceiptConfig,
};
use crate::blockchain::wallet::Wallet;

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Signs and submits contract calls over a single client.
#[derive(Debug, Clone)]
pub struct TxSubmitter {
    client: BlockchainClient,
    receipts: ReceiptConfig,
}

impl TxSubmitter {
    /// Create a new submitter.
    pub fn new(client: BlockchainClient, receipts: ReceiptConfig) -> Self {
        Self { client, receipts }
    }

    /// Fetch nonce, chain ID and gas price for `from`.
    ///
    /// Enforces the configured chain ID and gas price ceiling.
    pub async fn chain_context(&self, from: Address) -> BlockchainResult<ChainContext> {
        let nonce = self.client.get_pending_nonce(from).await?;
        let chain_id = self.client.get_chain_id().await?;
        let gas_price = self.client.get_gas_price().await?;

        let config = self.client.config();
        if let Some(expected) = config.expected_chain_id {
            if chain_id.0 != expected {
                return Err(BlockchainError::ChainMismatch {
                    expected,
                    actual: chain_id.0,
                });
            }
        }

        let gas_price_gwei = gas_price / WEI_PER_GWEI;
        if gas_price_gwei > config.max_gas_price_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: u64::try_from(gas_price_gwei).unwrap_or(u64::MAX),
                max_gwei: config.max_gas_price_gwei,
            });
        }

        Ok(ChainContext {
            nonce,
            chain_id,
            gas_price,
        })
    }

    /// Build an unsigned legacy transaction calling `to` with `input`.
    pub fn build(&self, context: &ChainContext, to: Address, input: Bytes) -> TxLegacy {
        build_call(context, self.client.config().gas_limit, to, input)
    }

    /// Sign, broadcast and return the transaction hash.
    pub async fn submit(&self, wallet: &Wallet, to: Address, input: Bytes) -> BlockchainResult<TxHash> {
        let context = self.chain_context(wallet.address()).await?;
        let tx = self.build(&context, to, input);
        let signed = sign(wallet, tx)?;
        let local_hash = *signed.hash();

        let encoded = TxEnvelope::from(signed).encoded_2718();
        let tx_hash = self.client.send_raw_transaction(&encoded).await?;
        if tx_hash != local_hash {
            tracing::warn!(local = %local_hash, remote = %tx_hash, "Node reported a different transaction hash");
        }

        tracing::info!(
            tx_hash = %tx_hash,
            from = %wallet.address(),
            role = %wallet.role(),
            to = %to,
            nonce = context.nonce,
            chain_id = context.chain_id.0,
            "Transaction sent"
        );
        Ok(tx_hash)
    }

    /// Wait for a transaction to be mined.
    ///
    /// Returns the receipt once it exists and the configured number of
    /// blocks sit on top of it.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<TransactionReceipt> {
        let required_confirmations = self.receipts.confirmation_blocks;
        let timeout_duration = Duration::from_secs(self.receipts.timeout_secs);
        let poll_interval = Duration::from_millis(self.receipts.poll_interval_ms);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(BlockchainError::Reverted(format!(
                        "{} in block {}",
                        tx_hash,
                        receipt.block_number.unwrap_or_default()
                    )));
                }

                if required_confirmations == 0 {
                    return Ok(receipt);
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block);

                if confirmations >= required_confirmations as u64 {
                    return Ok(receipt);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(receipt) => receipt,
            Err(_) => Err(BlockchainError::ConfirmationTimeout(self.receipts.timeout_secs)),
        }
    }

    /// Submit and block until mined.
    pub async fn submit_and_wait(
        &self,
        wallet: &Wallet,
        to: Address,
        input: Bytes,
    ) -> BlockchainResult<TransactionReceipt> {
        let tx_hash = self.submit(wallet, to, input).await?;
        self.wait_for_receipt(tx_hash).await
    }

    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }
}

/// Build an unsigned legacy contract call bound to `context.chain_id`.
pub fn build_call(context: &ChainContext, gas_limit: u64, to: Address, input: Bytes) -> TxLegacy {
    TxLegacy {
        chain_id: Some(context.chain_id.0),
        nonce: context.nonce,
        gas_price: context.gas_price,
        gas_limit,
        to: TxKind::Call(to),
        value: U256::ZERO,
        input,
    }
}

/// Sign a transaction with `wallet`.
pub fn sign(wallet: &Wallet, mut tx: TxLegacy) -> BlockchainResult<Signed<TxLegacy>> {
    let signature = wallet.sign_transaction(&mut tx)?;
    Ok(tx.into_signed(signature))
}
