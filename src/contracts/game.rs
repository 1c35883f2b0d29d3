//! Game contract bindings.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

sol! {
    /// Minimal game: an issuer, a line of credit and a player position.
    #[derive(Debug, PartialEq, Eq)]
    contract Game {
        function setIssuer(address newIssuer) external;
        function issuer() external view returns (address);
        function setLineOfCredit(uint256 amount) external;
        function lineOfCredit() external view returns (uint256);
        function movePlayer(uint256 steps) external;
        function position() external view returns (uint256);
    }
}

pub fn set_issuer(issuer: Address) -> Bytes {
    Game::setIssuerCall { newIssuer: issuer }.abi_encode().into()
}

pub fn issuer() -> Bytes {
    Game::issuerCall {}.abi_encode().into()
}

pub fn set_line_of_credit(amount: U256) -> Bytes {
    Game::setLineOfCreditCall { amount }.abi_encode().into()
}

pub fn line_of_credit() -> Bytes {
    Game::lineOfCreditCall {}.abi_encode().into()
}

pub fn move_player(steps: U256) -> Bytes {
    Game::movePlayerCall { steps }.abi_encode().into()
}

pub fn position() -> Bytes {
    Game::positionCall {}.abi_encode().into()
}

pub fn decode_issuer(data: &[u8]) -> BlockchainResult<Address> {
    Game::issuerCall::abi_decode_returns(data)
        .map_err(|e| BlockchainError::Abi(format!("issuer(): {}", e)))
}

pub fn decode_line_of_credit(data: &[u8]) -> BlockchainResult<U256> {
    Game::lineOfCreditCall::abi_decode_returns(data)
        .map_err(|e| BlockchainError::Abi(format!("lineOfCredit(): {}", e)))
}

pub fn decode_position(data: &[u8]) -> BlockchainResult<U256> {
    Game::positionCall::abi_decode_returns(data)
        .map_err(|e| BlockchainError::Abi(format!("position(): {}", e)))
}
