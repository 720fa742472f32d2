//! Bitcoin balance API client (blockchain.info compatible).
//!
//! The balance endpoint returns an address-keyed object:
//! `{"1Abc...": {"final_balance": 0, "n_tx": 0, "total_received": 0}}`
//! with amounts in satoshis.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use common::SweepError;

/// Default public API endpoint.
pub const DEFAULT_API_URL: &str = "https://blockchain.info";

/// Satoshis per bitcoin.
const SATS_PER_BTC: f64 = 100_000_000.0;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-address balance summary as returned by the explorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressSummary {
    pub final_balance: u64,
    #[serde(default)]
    pub n_tx: u64,
    #[serde(default)]
    pub total_received: u64,
}

/// Async client for the blockchain.info balance API.
pub struct BitcoinExplorer {
    api_base: String,
    client: reqwest::Client,
}

impl BitcoinExplorer {
    pub fn new() -> Result<Self, SweepError> {
        Self::with_api_base(DEFAULT_API_URL)
    }

    pub fn with_api_base(api_base: &str) -> Result<Self, SweepError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SweepError::Explorer(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the confirmed balance of `address` in BTC.
    pub async fn fetch_balance(&self, address: &str) -> Result<f64, SweepError> {
        let url = format!("{}/balance?active={}", self.api_base, address);
        debug!("Querying BTC balance: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SweepError::Explorer(format!("API request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SweepError::RateLimited(format!(
                "blockchain.info returned HTTP {}",
                status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SweepError::Explorer(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SweepError::Explorer(format!("Failed to read response: {}", e)))?;

        parse_balance(&body, address)
    }
}

/// Parse the address-keyed balance response into BTC.
pub fn parse_balance(body: &str, address: &str) -> Result<f64, SweepError> {
    let summaries: HashMap<String, AddressSummary> = serde_json::from_str(body)
        .map_err(|e| SweepError::Serialization(format!("Failed to parse response: {}", e)))?;

    let summary = summaries.get(address).ok_or_else(|| {
        SweepError::Explorer(format!("Address {} missing from response", address))
    })?;

    Ok(summary.final_balance as f64 / SATS_PER_BTC)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA";

    #[test]
    fn test_parse_one_btc() {
        let body = format!(
            r#"{{"{}": {{"final_balance": 100000000, "n_tx": 3, "total_received": 250000000}}}}"#,
            ADDR
        );
        let balance = parse_balance(&body, ADDR).unwrap();
        assert_eq!(balance, 1.0);
    }

    #[test]
    fn test_parse_zero_balance() {
        let body = format!(
            r#"{{"{}": {{"final_balance": 0, "n_tx": 0, "total_received": 0}}}}"#,
            ADDR
        );
        let balance = parse_balance(&body, ADDR).unwrap();
        assert_eq!(balance, 0.0);
    }

    #[test]
    fn test_parse_sub_btc_amount() {
        let body = format!(r#"{{"{}": {{"final_balance": 12345678}}}}"#, ADDR);
        let balance = parse_balance(&body, ADDR).unwrap();
        assert!((balance - 0.12345678).abs() < 1e-12);
    }

    #[test]
    fn test_address_missing_from_response() {
        let body = r#"{"1SomeOtherAddress": {"final_balance": 5}}"#;
        let result = parse_balance(body, ADDR);
        assert!(matches!(result, Err(SweepError::Explorer(_))));
    }

    #[test]
    fn test_malformed_body_degrades_to_error() {
        for body in ["not json", r#"{"statusCode": 429, "message": "slow down"}"#, "[]"] {
            let result = parse_balance(body, ADDR);
            assert!(result.is_err(), "body should not parse: {}", body);
        }
    }
}
