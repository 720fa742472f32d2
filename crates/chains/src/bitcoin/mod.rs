//! Bitcoin blockchain support.
//!
//! Includes:
//! - Legacy (P2PKH) address derivation at the BIP-44 path
//! - blockchain.info balance API client

pub mod address;
pub mod client;

pub use address::*;
pub use client::*;
