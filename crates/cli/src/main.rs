//! Seed Sweep CLI
//!
//! Generates random BIP-39 mnemonics, derives first-account addresses for
//! the enabled chains, checks public block explorers for balances, and
//! appends any funded wallet to a local file.

mod sweep;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};

use common::Config;

/// Random-seed wallet sweep scanner.
#[derive(Parser, Debug)]
#[command(name = "seedsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Stop after this many sweeps (0 = run until interrupted).
    #[arg(long, default_value = "0")]
    limit: u64,

    /// Override the output file for funded wallets.
    #[arg(long)]
    wallets_file: Option<std::path::PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            anyhow::bail!(e.to_string());
        }
    };
    if let Some(path) = cli.wallets_file {
        config.wallets_file = path;
    }

    let enabled: Vec<&str> = config
        .enabled_chains()
        .iter()
        .map(|c| c.ticker())
        .collect();

    info!("========================================");
    info!("  Seed Sweep Starting");
    info!("========================================");
    info!("Enabled chains: {}", enabled.join(", "));
    info!("Output file: {}", config.wallets_file.display());
    if cli.limit != 0 {
        info!("Sweep limit: {}", cli.limit);
    }

    let scanner = sweep::Scanner::new(config)?;
    scanner.run(cli.limit).await?;

    Ok(())
}
