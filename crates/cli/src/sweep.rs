//! The sequential sweep loop.
//!
//! One sweep: generate a mnemonic, derive addresses for the enabled chains,
//! query each explorer in turn, record any non-zero balance. Lookup failures
//! degrade to a zero balance and never abort the loop; derivation failures
//! skip the iteration.

use tracing::{error, info};

use chains::bitcoin::BitcoinExplorer;
use chains::ethereum::EvmExplorer;
use chains::hd::{self, Keyring};
use common::{sink, Chain, Config, SweepError, WalletHit};

/// Sweeps between progress log lines.
const PROGRESS_INTERVAL: u64 = 100;

pub struct Scanner {
    config: Config,
    bitcoin: Option<BitcoinExplorer>,
    evm: Vec<EvmExplorer>,
}

impl Scanner {
    /// Build explorer clients for every enabled chain.
    pub fn new(config: Config) -> Result<Self, SweepError> {
        let bitcoin = if config.check_btc {
            Some(BitcoinExplorer::new()?)
        } else {
            None
        };

        let mut evm = Vec::new();
        if config.check_eth {
            evm.push(EvmExplorer::for_chain(
                Chain::Ethereum,
                &config.etherscan_api_key,
            )?);
        }
        if config.check_bsc {
            evm.push(EvmExplorer::for_chain(
                Chain::BinanceSmartChain,
                &config.bscscan_api_key,
            )?);
        }
        if config.check_avax {
            evm.push(EvmExplorer::for_chain(
                Chain::Avalanche,
                &config.snowtrace_api_key,
            )?);
        }
        if config.check_matic {
            evm.push(EvmExplorer::for_chain(
                Chain::Polygon,
                &config.maticscan_api_key,
            )?);
        }

        Ok(Self {
            config,
            bitcoin,
            evm,
        })
    }

    /// Sweep until interrupted, or until `limit` sweeps when non-zero.
    pub async fn run(&self, limit: u64) -> Result<(), SweepError> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut sweeps: u64 = 0;
        let mut funded: u64 = 0;

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!(
                        "Interrupted by user. Exiting after {} sweeps ({} funded)",
                        sweeps, funded
                    );
                    return Ok(());
                }
                outcome = self.sweep_once() => {
                    match outcome {
                        Ok(true) => funded += 1,
                        Ok(false) => {}
                        // Derivation or sink failures are fatal for the
                        // iteration only.
                        Err(e) => error!("Sweep failed: {}", e),
                    }
                    sweeps += 1;

                    if sweeps % PROGRESS_INTERVAL == 0 {
                        info!("{} sweeps completed, {} funded wallets found", sweeps, funded);
                    }
                    if limit != 0 && sweeps >= limit {
                        info!("Sweep limit reached ({} sweeps, {} funded)", sweeps, funded);
                        return Ok(());
                    }
                }
            }
        }
    }

    /// One iteration: fresh mnemonic, derive, query, record.
    ///
    /// Returns whether a funded wallet was recorded.
    async fn sweep_once(&self) -> Result<bool, SweepError> {
        let mnemonic = hd::generate_mnemonic()?;
        let keyring = Keyring::from_mnemonic(&mnemonic)?;

        let mut hits = Vec::new();

        if let Some(explorer) = &self.bitcoin {
            let address = chains::bitcoin::derive_address(&keyring)?;
            info!("Checking | Address: {} | Network: BTC", address);
            let balance = zero_on_error(Chain::Bitcoin, explorer.fetch_balance(&address).await);
            if balance > 0.0 {
                hits.push(WalletHit {
                    chain: Chain::Bitcoin,
                    address,
                    balance,
                });
            }
        }

        // BSC/AVAX/MATIC balances are checked against the Ethereum-derived
        // address: the address format is identical across EVM networks.
        if !self.evm.is_empty() {
            let address = chains::ethereum::derive_address(&keyring)?;
            for explorer in &self.evm {
                info!(
                    "Checking | Address: {} | Network: {}",
                    address,
                    explorer.chain()
                );
                let balance =
                    zero_on_error(explorer.chain(), explorer.fetch_balance(&address).await);
                if balance > 0.0 {
                    hits.push(WalletHit {
                        chain: explorer.chain(),
                        address: address.clone(),
                        balance,
                    });
                }
            }
        }

        sink::record_hits(&self.config.wallets_file, &mnemonic.to_string(), &hits)
    }
}

/// Convert any lookup failure into a zero balance with a logged error.
fn zero_on_error(chain: Chain, result: Result<f64, SweepError>) -> f64 {
    match result {
        Ok(balance) => {
            info!("Balance for {}: {}", chain, balance);
            balance
        }
        Err(e) => {
            error!("Failed to fetch {} balance: {}", chain, e);
            0.0
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
