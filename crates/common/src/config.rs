//! Scanner configuration, loaded once at startup from environment variables.

use std::path::PathBuf;

use crate::{Chain, SweepError};

/// Environment variable names.
pub const CHECK_BTC_ENV: &str = "CHECK_BTC";
pub const CHECK_ETH_ENV: &str = "CHECK_ETH";
pub const CHECK_BSC_ENV: &str = "CHECK_BSC";
pub const CHECK_AVAX_ENV: &str = "CHECK_AVAX";
pub const CHECK_MATIC_ENV: &str = "CHECK_MATIC";
pub const ETHERSCAN_API_KEY_ENV: &str = "ETHERSCAN_API_KEY";
pub const BSCSCAN_API_KEY_ENV: &str = "BSCSCAN_API_KEY";
pub const MATICSCAN_API_KEY_ENV: &str = "MATICSCAN_API_KEY";
pub const SNOWTRACE_API_KEY_ENV: &str = "SNOWTRACE_API_KEY";
pub const WALLETS_FILE_ENV: &str = "WALLETS_FILE_PATH";

const DEFAULT_WALLETS_FILE: &str = "wallets_with_balance.txt";

/// Immutable process configuration.
///
/// Per-chain checks default to enabled. The etherscan-family API keys are
/// required at startup even for disabled chains; Snowtrace works without one.
#[derive(Debug, Clone)]
pub struct Config {
    pub check_btc: bool,
    pub check_eth: bool,
    pub check_bsc: bool,
    pub check_avax: bool,
    pub check_matic: bool,

    pub etherscan_api_key: String,
    pub bscscan_api_key: String,
    pub maticscan_api_key: String,
    pub snowtrace_api_key: String,

    /// Append-only file funded wallets are written to.
    pub wallets_file: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Missing required API keys are a fatal configuration error; the
    /// message names every missing variable at once.
    pub fn from_env() -> Result<Self, SweepError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SweepError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = [
            ETHERSCAN_API_KEY_ENV,
            BSCSCAN_API_KEY_ENV,
            MATICSCAN_API_KEY_ENV,
        ];
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| lookup(name).map_or(true, |v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(SweepError::Configuration(format!(
                "Missing environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            check_btc: bool_var(&lookup, CHECK_BTC_ENV, true),
            check_eth: bool_var(&lookup, CHECK_ETH_ENV, true),
            check_bsc: bool_var(&lookup, CHECK_BSC_ENV, true),
            check_avax: bool_var(&lookup, CHECK_AVAX_ENV, true),
            check_matic: bool_var(&lookup, CHECK_MATIC_ENV, true),
            etherscan_api_key: lookup(ETHERSCAN_API_KEY_ENV).unwrap_or_default(),
            bscscan_api_key: lookup(BSCSCAN_API_KEY_ENV).unwrap_or_default(),
            maticscan_api_key: lookup(MATICSCAN_API_KEY_ENV).unwrap_or_default(),
            snowtrace_api_key: lookup(SNOWTRACE_API_KEY_ENV).unwrap_or_default(),
            wallets_file: lookup(WALLETS_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WALLETS_FILE)),
        })
    }

    /// Chains enabled for this run, in check order.
    pub fn enabled_chains(&self) -> Vec<Chain> {
        let mut chains = Vec::new();
        if self.check_btc {
            chains.push(Chain::Bitcoin);
        }
        if self.check_eth {
            chains.push(Chain::Ethereum);
        }
        if self.check_bsc {
            chains.push(Chain::BinanceSmartChain);
        }
        if self.check_avax {
            chains.push(Chain::Avalanche);
        }
        if self.check_matic {
            chains.push(Chain::Polygon);
        }
        chains
    }

    /// True when at least one EVM network needs the Ethereum-derived address.
    pub fn any_evm_enabled(&self) -> bool {
        self.check_eth || self.check_bsc || self.check_avax || self.check_matic
    }
}

fn bool_var<F>(lookup: &F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn with_keys() -> HashMap<String, String> {
        vars(&[
            (ETHERSCAN_API_KEY_ENV, "etherscan-key"),
            (BSCSCAN_API_KEY_ENV, "bscscan-key"),
            (MATICSCAN_API_KEY_ENV, "maticscan-key"),
        ])
    }

    #[test]
    fn test_missing_keys_are_fatal() {
        let env = vars(&[(ETHERSCAN_API_KEY_ENV, "etherscan-key")]);
        let result = Config::from_lookup(|name| env.get(name).cloned());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Missing environment variables"));
        assert!(err.contains(BSCSCAN_API_KEY_ENV));
        assert!(err.contains(MATICSCAN_API_KEY_ENV));
        assert!(!err.contains(ETHERSCAN_API_KEY_ENV));
    }

    #[test]
    fn test_empty_required_key_counts_as_missing() {
        let mut env = with_keys();
        env.insert(BSCSCAN_API_KEY_ENV.to_string(), String::new());
        let result = Config::from_lookup(|name| env.get(name).cloned());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains(BSCSCAN_API_KEY_ENV));
    }

    #[test]
    fn test_defaults() {
        let env = with_keys();
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert!(config.check_btc);
        assert!(config.check_eth);
        assert!(config.check_bsc);
        assert!(config.check_avax);
        assert!(config.check_matic);
        assert_eq!(config.snowtrace_api_key, "");
        assert_eq!(config.wallets_file, PathBuf::from(DEFAULT_WALLETS_FILE));
        assert_eq!(config.enabled_chains().len(), 5);
    }

    #[test]
    fn test_boolean_parsing() {
        let mut env = with_keys();
        env.insert(CHECK_BTC_ENV.to_string(), "false".to_string());
        env.insert(CHECK_ETH_ENV.to_string(), "0".to_string());
        env.insert(CHECK_BSC_ENV.to_string(), "TRUE".to_string());
        env.insert(CHECK_AVAX_ENV.to_string(), "1".to_string());
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert!(!config.check_btc);
        assert!(!config.check_eth);
        assert!(config.check_bsc);
        assert!(config.check_avax);
        assert!(config.any_evm_enabled());
        assert_eq!(
            config.enabled_chains(),
            vec![
                Chain::BinanceSmartChain,
                Chain::Avalanche,
                Chain::Polygon
            ]
        );
    }

    #[test]
    fn test_evm_disabled() {
        let mut env = with_keys();
        for name in [CHECK_ETH_ENV, CHECK_BSC_ENV, CHECK_AVAX_ENV, CHECK_MATIC_ENV] {
            env.insert(name.to_string(), "false".to_string());
        }
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert!(!config.any_evm_enabled());
        assert_eq!(config.enabled_chains(), vec![Chain::Bitcoin]);
    }
}
