//! Temporary-key lifecycle operations.

use alloy::primitives::{Bytes, TxHash, U256};

use crate::blockchain::types::BlockchainResult;
use crate::contracts::temp_key;
use crate::operations::GameClient;

impl GameClient {
    /// Bind the temporary key to the game contract for `period`. Signed by the work key.
    pub async fn bind_temp_key(&self, period: &[u8]) -> BlockchainResult<TxHash> {
        let input = temp_key::bind_temp_private_key(
            self.contracts.game,
            self.keys.temporary.address(),
            period,
        );
        tracing::info!(temp = %self.keys.temporary.address(), "Binding temporary key");
        self.submitter
            .submit(&self.keys.work, self.contracts.temp_key, input)
            .await
    }

    /// Revoke the temporary key. Signed by the work key.
    pub async fn invalidate_temp_key(&self) -> BlockchainResult<TxHash> {
        let input = temp_key::invalidate_temp_private_key(
            self.contracts.game,
            self.keys.temporary.address(),
        );
        tracing::info!(temp = %self.keys.temporary.address(), "Invalidating temporary key");
        self.submitter
            .submit(&self.keys.work, self.contracts.temp_key, input)
            .await
    }

    /// Submit a game call on behalf of the work account. Signed by the temporary key.
    pub async fn sign_on_behalf(&self, period: &[u8], game_call: Bytes) -> BlockchainResult<TxHash> {
        let input = temp_key::behalf_signature(
            self.keys.work.address(),
            self.contracts.game,
            period,
            game_call,
        );
        tracing::info!(work = %self.keys.work.address(), "Sending game call on behalf of work account");
        self.submitter
            .submit(&self.keys.temporary, self.contracts.temp_key, input)
            .await
    }

    /// Grant the work account more line of credit. Signed by the operator key.
    pub async fn add_line_of_credit(&self, value: U256) -> BlockchainResult<TxHash> {
        let input = temp_key::add_line_of_credit(
            self.contracts.game,
            self.keys.work.address(),
            value,
        );
        tracing::info!(work = %self.keys.work.address(), value = %value, "Adding line of credit");
        self.submitter
            .submit(&self.keys.operator, self.contracts.temp_key, input)
            .await
    }
}
