//! Account key management and signing.
//!
//! # Security
//! - Private keys are accepted as explicit hex strings or read from an
//!   environment variable, never from config files
//! - Keys are never logged; the Debug impl shows only the address

use ed25519_dalek::{Signature, Signer, SigningKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;

use crate::account::address::Address;
use crate::error::{LedgerError, LedgerResult};
use crate::network::types::NetworkType;

/// Environment variable holding the signer's private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "TIPJAR_PRIVATE_KEY";

/// A signing account: an Ed25519 keypair bound to one network.
///
/// The address is derived deterministically from the public key and the
/// network identifier, so the same key yields different addresses on
/// mainnet and testnet.
pub struct Account {
    signing_key: SigningKey,
    network: NetworkType,
}

impl Account {
    /// Create an account from a hex-encoded private key.
    pub fn from_private_key(private_key_hex: &str, network: NetworkType) -> LedgerResult<Self> {
        let key_hex = private_key_hex.trim();

        let bytes = hex::decode(key_hex)
            .map_err(|_| LedgerError::InvalidKey("private key is not valid hex".to_string()))?;
        let bytes: [u8; SECRET_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            LedgerError::InvalidKey(format!(
                "private key must be {} bytes",
                SECRET_KEY_LENGTH
            ))
        })?;

        Ok(Self {
            signing_key: SigningKey::from_bytes(&bytes),
            network,
        })
    }

    /// Load the account from the `TIPJAR_PRIVATE_KEY` environment variable.
    pub fn from_env(network: NetworkType) -> LedgerResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            LedgerError::InvalidKey(format!("environment variable {} not set", PRIVATE_KEY_ENV_VAR))
        })?;

        Self::from_private_key(&private_key, network)
    }

    /// Generate a fresh account with the OS RNG.
    pub fn generate(network: NetworkType) -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
            network,
        }
    }

    /// The account's public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Hex form of the public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode_upper(self.public_key())
    }

    /// Hex form of the private key, for the key-generation helper only.
    pub fn private_key_hex(&self) -> String {
        hex::encode_upper(self.signing_key.to_bytes())
    }

    /// The network this account signs for.
    pub fn network_type(&self) -> NetworkType {
        self.network
    }

    /// The account's address on its network.
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key(), self.network)
    }

    /// Sign a message with the account's key.
    pub(crate) fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address().as_str())
            .field("network", &self.network)
            .finish()
    }
}
