//! Shared types for the seed sweep scanner.
//!
//! This crate provides:
//! - The common error type
//! - Configuration loaded from environment variables
//! - Wallet hit records and the append-only result sink

pub mod config;
pub mod error;
pub mod sink;

pub use config::Config;
pub use error::SweepError;

use serde::{Deserialize, Serialize};

/// Networks the scanner can check balances on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chain {
    Bitcoin,
    Ethereum,
    BinanceSmartChain,
    Avalanche,
    Polygon,
}

impl Chain {
    /// Short ticker used in logs and the result sink.
    pub fn ticker(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "BTC",
            Chain::Ethereum => "ETH",
            Chain::BinanceSmartChain => "BSC",
            Chain::Avalanche => "AVAX",
            Chain::Polygon => "MATIC",
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ticker())
    }
}

/// A funded address discovered during a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletHit {
    /// Network the balance was found on.
    pub chain: Chain,
    /// The derived address that holds the balance.
    pub address: String,
    /// Balance in the chain's display unit (BTC, ETH, ...).
    pub balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_tickers() {
        assert_eq!(Chain::Bitcoin.ticker(), "BTC");
        assert_eq!(Chain::Ethereum.to_string(), "ETH");
        assert_eq!(Chain::BinanceSmartChain.to_string(), "BSC");
        assert_eq!(Chain::Avalanche.to_string(), "AVAX");
        assert_eq!(Chain::Polygon.to_string(), "MATIC");
    }
}
