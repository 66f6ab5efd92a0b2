//! Check-encoded network addresses.
//!
//! An address is the base58check encoding of a 21-byte payload: the
//! network identifier byte followed by the first 20 bytes of the SHA-256
//! digest of the account's public key. The encoding's checksum catches
//! typos; the leading byte ties the address to one network.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{LedgerError, LedgerResult};
use crate::network::types::NetworkType;

/// Length of the decoded address payload: version byte + 20 hash bytes.
pub const ADDRESS_PAYLOAD_LEN: usize = 21;

/// A validated, network-checksummed account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    raw: String,
    payload: [u8; ADDRESS_PAYLOAD_LEN],
}

impl Address {
    /// Parse and validate a raw address string.
    pub fn from_raw(raw: &str) -> LedgerResult<Self> {
        let decoded = bs58::decode(raw)
            .with_check(None)
            .into_vec()
            .map_err(|e| LedgerError::InvalidAddress(format!("'{}': {}", raw, e)))?;

        let payload: [u8; ADDRESS_PAYLOAD_LEN] = decoded.try_into().map_err(|_| {
            LedgerError::InvalidAddress(format!("'{}' has the wrong payload length", raw))
        })?;

        NetworkType::from_id(payload[0])
            .map_err(|_| LedgerError::InvalidAddress(format!("'{}' has an unknown network byte", raw)))?;

        Ok(Self {
            raw: raw.to_string(),
            payload,
        })
    }

    /// Derive the address of a public key on the given network.
    pub fn from_public_key(public_key: &[u8; 32], network: NetworkType) -> Self {
        let digest = Sha256::digest(public_key);

        let mut payload = [0u8; ADDRESS_PAYLOAD_LEN];
        payload[0] = network.id();
        payload[1..].copy_from_slice(&digest[..20]);

        let raw = bs58::encode(payload).with_check().into_string();
        Self { raw, payload }
    }

    /// The checksummed string form.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The decoded 21-byte payload used in transaction serialization.
    pub fn payload(&self) -> &[u8; ADDRESS_PAYLOAD_LEN] {
        &self.payload
    }

    /// The network this address belongs to.
    pub fn network_type(&self) -> NetworkType {
        // The version byte was validated at construction.
        NetworkType::from_id(self.payload[0]).unwrap_or(NetworkType::Testnet)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
