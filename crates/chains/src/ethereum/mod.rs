//! Ethereum and EVM-compatible blockchain support.
//!
//! Includes:
//! - Keccak-256 address derivation at the BIP-44 path
//! - Etherscan-family balance API client (ETH, BSC, AVAX, MATIC)

pub mod address;
pub mod client;

pub use address::*;
pub use client::*;
