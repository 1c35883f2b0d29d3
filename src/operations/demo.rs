//! The `game-info` walkthrough.
//!
//! Set issuer, line of credit and position one after another, waiting for
//! each transaction to be mined and reading the value back before moving on.
//! The first failure ends the run.

use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionReceipt;
use serde::Serialize;

use crate::blockchain::types::BlockchainResult;
use crate::operations::GameClient;

/// One mined write and the value read back after it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoStep<T> {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub value: T,
}

/// Outcome of a complete `game-info` run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfoReport {
    pub issuer: DemoStep<Address>,
    pub line_of_credit: DemoStep<U256>,
    pub position: DemoStep<U256>,
}

impl GameClient {
    /// Run the walkthrough with the work address as issuer.
    pub async fn game_info(&self, line_of_credit: U256, steps: U256) -> BlockchainResult<GameInfoReport> {
        let issuer_address = self.keys.work.address();

        let tx_hash = self.set_issuer(issuer_address).await?;
        let receipt = self.mined("set issuer", tx_hash).await?;
        let issuer = self.issuer().await?;
        tracing::info!(issuer = %issuer, "Issuer read back");
        if issuer != issuer_address {
            tracing::warn!(expected = %issuer_address, actual = %issuer, "Issuer differs from the value just set");
        }
        let issuer = DemoStep {
            tx_hash,
            block_number: receipt.block_number,
            value: issuer,
        };

        let tx_hash = self.set_line_of_credit(line_of_credit).await?;
        let receipt = self.mined("set line of credit", tx_hash).await?;
        let credit = self.line_of_credit().await?;
        tracing::info!(line_of_credit = %credit, "Line of credit read back");
        let line_of_credit = DemoStep {
            tx_hash,
            block_number: receipt.block_number,
            value: credit,
        };

        let tx_hash = self.move_player(steps).await?;
        let receipt = self.mined("move player", tx_hash).await?;
        let position = self.position().await?;
        tracing::info!(position = %position, "Position read back");
        let position = DemoStep {
            tx_hash,
            block_number: receipt.block_number,
            value: position,
        };

        Ok(GameInfoReport {
            issuer,
            line_of_credit,
            position,
        })
    }

    async fn mined(&self, label: &'static str, tx_hash: TxHash) -> BlockchainResult<TransactionReceipt> {
        tracing::info!(step = label, tx_hash = %tx_hash, "Waiting for transaction");
        let receipt = self.wait_for_receipt(tx_hash).await?;
        match serde_json::to_string(&receipt) {
            Ok(json) => tracing::info!(step = label, receipt = %json, "Transaction mined"),
            Err(e) => tracing::warn!(step = label, error = %e, "Receipt could not be serialized"),
        }
        Ok(receipt)
    }
}
