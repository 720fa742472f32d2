//! Bitcoin address derivation utilities.
//!
//! The scanner checks the first BIP-44 receiving address (legacy P2PKH),
//! the path most wallets funded their first coins at.

use bitcoin::{Address, CompressedPublicKey, Network, PublicKey};

use common::SweepError;

use crate::hd::Keyring;

/// First receiving address of the default account (BIP-44, mainnet).
pub const DERIVATION_PATH: &str = "m/44'/0'/0'/0/0";

/// Derive the scanner's Bitcoin address for one mnemonic.
pub fn derive_address(keyring: &Keyring) -> Result<String, SweepError> {
    let public_key = keyring.derive_pubkey(DERIVATION_PATH)?;
    address_from_pubkey(&public_key.serialize(), Network::Bitcoin)
}

/// Derive a legacy Bitcoin address (P2PKH) from a compressed public key.
pub fn address_from_pubkey(
    public_key_bytes: &[u8],
    network: Network,
) -> Result<String, SweepError> {
    tracing::debug!("address_from_pubkey called");
    tracing::trace!("  Public key bytes: {}", hex::encode(public_key_bytes));

    if public_key_bytes.len() != 33 {
        return Err(SweepError::InvalidPublicKey(format!(
            "Expected 33 bytes, got {}",
            public_key_bytes.len()
        )));
    }

    let compressed = CompressedPublicKey::from_slice(public_key_bytes)
        .map_err(|e| SweepError::InvalidPublicKey(e.to_string()))?;

    let pubkey = PublicKey::from(compressed);
    let address = Address::p2pkh(pubkey, network);

    Ok(address.to_string())
}

// ============================================================================
// Tests
// ============================================================================
