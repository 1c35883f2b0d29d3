//! Contract call payload encoders.
//!
//! Each function turns typed arguments into ABI call data. Encoding is done
//! by alloy's `sol!` bindings; nothing here validates the result.

pub mod game;
pub mod temp_key;

pub use game::Game;
pub use temp_key::TempPrivateKey;
