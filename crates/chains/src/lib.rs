//! Blockchain implementations for the seed sweep scanner.
//!
//! This crate provides blockchain-specific functionality:
//! - Mnemonic generation and HD key derivation
//! - Address derivation
//! - Block-explorer API clients

pub mod bitcoin;
pub mod ethereum;
pub mod hd;
