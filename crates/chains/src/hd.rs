//! BIP-39 mnemonic generation and BIP-32 key derivation.
//!
//! Mnemonics are 12 English words from 128 bits of OS entropy. Derivation
//! follows BIP-44 paths; the hardened steps are available because we hold
//! the private key, unlike watch-only wallets.

use std::str::FromStr;

use bip39::Mnemonic;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::{All, PublicKey, Secp256k1};
use bitcoin::Network;
use rand::rngs::OsRng;
use rand::RngCore;

use common::SweepError;

/// 128 bits of entropy encodes to 12 words.
pub const ENTROPY_BYTES: usize = 16;

/// Generate a fresh random 12-word English mnemonic.
pub fn generate_mnemonic() -> Result<Mnemonic, SweepError> {
    let mut entropy = [0u8; ENTROPY_BYTES];
    OsRng.fill_bytes(&mut entropy);
    Mnemonic::from_entropy(&entropy)
        .map_err(|e| SweepError::Derivation(format!("Failed to encode mnemonic: {}", e)))
}

/// Master key material derived from one mnemonic.
///
/// Holds the BIP-32 master private key; child public keys for any path are
/// derived on demand. The seed uses the empty passphrase.
pub struct Keyring {
    master: Xpriv,
    secp: Secp256k1<All>,
}

impl Keyring {
    pub fn from_mnemonic(mnemonic: &Mnemonic) -> Result<Self, SweepError> {
        let seed = mnemonic.to_seed("");
        let master = Xpriv::new_master(Network::Bitcoin, &seed)
            .map_err(|e| SweepError::Derivation(format!("Failed to derive master key: {}", e)))?;

        tracing::debug!("Derived master key from mnemonic");

        Ok(Self {
            master,
            secp: Secp256k1::new(),
        })
    }

    /// Derive the public key at a path like "m/44'/0'/0'/0/0".
    pub fn derive_pubkey(&self, path: &str) -> Result<PublicKey, SweepError> {
        let path = DerivationPath::from_str(path)
            .map_err(|e| SweepError::Derivation(format!("Invalid derivation path: {}", e)))?;
        let child = self
            .master
            .derive_priv(&self.secp, &path)
            .map_err(|e| SweepError::Derivation(format!("Child derivation failed: {}", e)))?;
        Ok(child.private_key.public_key(&self.secp))
    }
}

// ============================================================================
// Tests
// ============================================================================
