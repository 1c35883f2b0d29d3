//! Temporary-key system contract bindings.
//!
//! The contract lives at a fixed address on chains that support it. A work
//! account binds a temporary key to one game contract for a period; the
//! temporary key may then send game calls on the work account's behalf,
//! paid from a line of credit an operator grants to the work account.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface TempPrivateKey {
        function bindTempPrivateKey(address gameContract, address tempAddress, bytes period) external;
        function invalidateTempPrivateKey(address gameContract, address tempAddress) external;
        function behalfSignature(address workAddress, address gameContract, bytes period, bytes input) external;
        function addLineOfCredit(address gameContract, address workAddress, uint256 addValue) external;
    }
}

pub fn bind_temp_private_key(game: Address, temp: Address, period: &[u8]) -> Bytes {
    TempPrivateKey::bindTempPrivateKeyCall {
        gameContract: game,
        tempAddress: temp,
        period: Bytes::copy_from_slice(period),
    }
    .abi_encode()
    .into()
}

pub fn invalidate_temp_private_key(game: Address, temp: Address) -> Bytes {
    TempPrivateKey::invalidateTempPrivateKeyCall {
        gameContract: game,
        tempAddress: temp,
    }
    .abi_encode()
    .into()
}

/// Wrap a game call so the temporary key can submit it for `work`.
pub fn behalf_signature(work: Address, game: Address, period: &[u8], input: Bytes) -> Bytes {
    TempPrivateKey::behalfSignatureCall {
        workAddress: work,
        gameContract: game,
        period: Bytes::copy_from_slice(period),
        input,
    }
    .abi_encode()
    .into()
}

pub fn add_line_of_credit(game: Address, work: Address, value: U256) -> Bytes {
    TempPrivateKey::addLineOfCreditCall {
        gameContract: game,
        workAddress: work,
        addValue: value,
    }
    .abi_encode()
    .into()
}
