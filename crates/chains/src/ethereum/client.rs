//! Etherscan-family balance API client.
//!
//! ETH, BSC, AVAX and MATIC explorers all expose the same account API:
//! `GET {base}/api?module=account&action=balance&address=...&tag=latest&apikey=...`
//! returning `{"status": "1", "message": "OK", "result": "<wei>"}`.
//! Rate-limiting proxies answer with `{"statusCode": 429, "message": ...}`.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use common::{Chain, SweepError};

/// Wei per ether (and per BNB/AVAX/MATIC - all EVM chains use 18 decimals).
const WEI_PER_COIN: f64 = 1e18;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Public API endpoint for an EVM chain's explorer, if it has one.
pub fn explorer_api_url(chain: Chain) -> Option<&'static str> {
    match chain {
        Chain::Ethereum => Some("https://api.etherscan.io"),
        Chain::BinanceSmartChain => Some("https://api.bscscan.com"),
        Chain::Avalanche => Some("https://api.snowtrace.io"),
        Chain::Polygon => Some("https://api.polygonscan.com"),
        Chain::Bitcoin => None,
    }
}

/// Async client for one EVM network's explorer.
pub struct EvmExplorer {
    chain: Chain,
    api_base: String,
    api_key: String,
    client: reqwest::Client,
}

impl EvmExplorer {
    /// Build a client for `chain` using its public explorer endpoint.
    ///
    /// `api_key` may be empty for explorers that serve anonymous queries
    /// (Snowtrace).
    pub fn for_chain(chain: Chain, api_key: &str) -> Result<Self, SweepError> {
        let api_base = explorer_api_url(chain).ok_or_else(|| {
            SweepError::Configuration(format!("{} has no etherscan-style explorer", chain))
        })?;
        Self::with_api_base(chain, api_base, api_key)
    }

    pub fn with_api_base(
        chain: Chain,
        api_base: &str,
        api_key: &str,
    ) -> Result<Self, SweepError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SweepError::Explorer(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            chain,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Get the balance of `address` in the chain's display unit.
    pub async fn fetch_balance(&self, address: &str) -> Result<f64, SweepError> {
        let url = format!(
            "{}/api?module=account&action=balance&address={}&tag=latest&apikey={}",
            self.api_base, address, self.api_key
        );
        debug!("Querying {} balance for {}", self.chain, address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SweepError::Explorer(format!("API request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SweepError::RateLimited(format!(
                "{} explorer returned HTTP {}",
                self.chain, status
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

        parse_balance(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<serde_json::Value>,
    // Rate-limit proxies answer with this shape instead of status/result.
    #[serde(default, rename = "statusCode")]
    status_code: Option<u16>,
}

/// Parse an etherscan-style balance response into the display unit.
pub fn parse_balance(body: &str) -> Result<f64, SweepError> {
    let response: ExplorerResponse = serde_json::from_str(body)
        .map_err(|e| SweepError::Serialization(format!("Failed to parse response: {}", e)))?;

    if let Some(code) = response.status_code {
        let message = response
            .message
            .unwrap_or_else(|| "no message".to_string());
        if code == 429 {
            return Err(SweepError::RateLimited(message));
        }
        return Err(SweepError::Explorer(format!("status {}: {}", code, message)));
    }

    match response.status.as_deref() {
        Some("1") => {
            let wei = response
                .result
                .as_ref()
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    SweepError::Serialization("Balance result missing or not a string".to_string())
                })?;
            let wei: u128 = wei.parse().map_err(|e| {
                SweepError::Serialization(format!("Invalid wei amount '{}': {}", wei, e))
            })?;
            Ok(wei as f64 / WEI_PER_COIN)
        }
        _ => {
            let detail = response
                .result
                .as_ref()
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .or(response.message)
                .unwrap_or_else(|| "no message".to_string());
            Err(SweepError::Explorer(detail))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_ether() {
        let body = r#"{"status": "1", "message": "OK", "result": "1000000000000000000"}"#;
        let balance = parse_balance(body).unwrap();
        assert_eq!(balance, 1.0);
    }

    #[test]
    fn test_parse_zero_balance() {
        let body = r#"{"status": "1", "message": "OK", "result": "0"}"#;
        assert_eq!(parse_balance(body).unwrap(), 0.0);
    }

    #[test]
    fn test_parse_fractional_balance() {
        let body = r#"{"status": "1", "message": "OK", "result": "250000000000000000"}"#;
        let balance = parse_balance(body).unwrap();
        assert!((balance - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_rate_limit_shape() {
        let body = r#"{"statusCode": 429, "message": "Too many requests"}"#;
        let result = parse_balance(body);
        assert!(matches!(result, Err(SweepError::RateLimited(_))));
    }

    #[test]
    fn test_provider_error_status() {
        let body = r#"{"status": "0", "message": "NOTOK", "result": "Max rate limit reached"}"#;
        let result = parse_balance(body);
        match result {
            Err(SweepError::Explorer(detail)) => assert!(detail.contains("Max rate limit")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_shape_degrades_to_error() {
        for body in ["not json", "{}", r#"{"unexpected": true}"#, "[]"] {
            assert!(parse_balance(body).is_err(), "body should not parse: {}", body);
        }
    }

    #[test]
    fn test_non_string_result_is_rejected() {
        let body = r#"{"status": "1", "message": "OK", "result": 12}"#;
        let result = parse_balance(body);
        assert!(matches!(result, Err(SweepError::Serialization(_))));
    }

    #[test]
    fn test_explorer_urls() {
        assert!(explorer_api_url(Chain::Ethereum).unwrap().contains("etherscan"));
        assert!(explorer_api_url(Chain::BinanceSmartChain).unwrap().contains("bscscan"));
        assert!(explorer_api_url(Chain::Avalanche).unwrap().contains("snowtrace"));
        assert!(explorer_api_url(Chain::Polygon).unwrap().contains("polygonscan"));
        assert!(explorer_api_url(Chain::Bitcoin).is_none());
    }
}
