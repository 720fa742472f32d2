//! Ethereum address derivation utilities.
//!
//! An Ethereum address is keccak256(uncompressed_pubkey[1..65])[12..32],
//! displayed with the EIP-55 mixed-case checksum. The same address is valid
//! on every EVM-compatible network.

use bitcoin::secp256k1::PublicKey;
use sha3::{Digest, Keccak256};

use common::SweepError;

use crate::hd::Keyring;

/// First receiving address of the default account (BIP-44, coin type 60).
pub const DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// Derive the scanner's Ethereum address for one mnemonic.
pub fn derive_address(keyring: &Keyring) -> Result<String, SweepError> {
    let public_key = keyring.derive_pubkey(DERIVATION_PATH)?;
    Ok(address_from_pubkey(&public_key))
}

/// Compute the checksummed address for a secp256k1 public key.
pub fn address_from_pubkey(public_key: &PublicKey) -> String {
    let uncompressed = public_key.serialize_uncompressed();
    // Skip the 0x04 prefix byte
    let hash = Keccak256::digest(&uncompressed[1..]);
    to_checksum_address(&hash[12..])
}

/// EIP-55 mixed-case checksum encoding of a 20-byte address.
///
/// A hex digit is uppercased when the corresponding nibble of
/// keccak256(lowercase_hex_address) is >= 8.
pub fn to_checksum_address(address_bytes: &[u8]) -> String {
    let lower = hex::encode(address_bytes);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
