//! Game contract operations. Writes are signed by the work key.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::Serialize;

use crate::blockchain::types::BlockchainResult;
use crate::contracts::game;
use crate::operations::GameClient;

/// Snapshot of the Game contract's public state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub issuer: Address,
    pub line_of_credit: U256,
    pub position: U256,
}

impl GameClient {
    pub async fn set_issuer(&self, issuer: Address) -> BlockchainResult<TxHash> {
        self.submitter
            .submit(&self.keys.work, self.contracts.game, game::set_issuer(issuer))
            .await
    }

    pub async fn set_line_of_credit(&self, amount: U256) -> BlockchainResult<TxHash> {
        self.submitter
            .submit(&self.keys.work, self.contracts.game, game::set_line_of_credit(amount))
            .await
    }

    pub async fn move_player(&self, steps: U256) -> BlockchainResult<TxHash> {
        self.submitter
            .submit(&self.keys.work, self.contracts.game, game::move_player(steps))
            .await
    }

    pub async fn issuer(&self) -> BlockchainResult<Address> {
        let out = self.call_game(game::issuer()).await?;
        game::decode_issuer(&out)
    }

    pub async fn line_of_credit(&self) -> BlockchainResult<U256> {
        let out = self.call_game(game::line_of_credit()).await?;
        game::decode_line_of_credit(&out)
    }

    pub async fn position(&self) -> BlockchainResult<U256> {
        let out = self.call_game(game::position()).await?;
        game::decode_position(&out)
    }

    /// Read issuer, line of credit and position in sequence.
    pub async fn query_state(&self) -> BlockchainResult<GameState> {
        Ok(GameState {
            issuer: self.issuer().await?,
            line_of_credit: self.line_of_credit().await?,
            position: self.position().await?,
        })
    }

    async fn call_game(&self, input: Bytes) -> BlockchainResult<Bytes> {
        self.submitter.client().call(self.contracts.game, input).await
    }
}
