//! Transaction-level types.

use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::network::types::GenerationHash;
use crate::transaction::deadline::Deadline;

/// Wire identifier of the transfer transaction type.
pub const TRANSFER_TYPE: u16 = 16724;

/// Transaction format version.
pub const TRANSACTION_VERSION: u8 = 1;

/// A 32-byte transaction hash, hex-encoded in its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl FromStr for Hash256 {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)
            .map_err(|_| LedgerError::NetworkUnavailable(format!("malformed hash '{}'", s)))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| LedgerError::NetworkUnavailable(format!("hash '{}' is not 32 bytes", s)))?;
        Ok(Hash256(bytes))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A signed transfer, cryptographically bound to one network.
///
/// The payload is what gets announced; the hash is what confirmation is
/// tracked by. Re-signing the same fields against a different generation
/// hash yields a different, non-equivalent transaction.
#[derive(Debug, Clone)]
pub struct SignedTransfer {
    /// Full serialized payload: body ‖ signature ‖ signer public key.
    pub payload: Vec<u8>,
    /// Transaction hash announced to and reported by the network.
    pub hash: Hash256,
    /// Hex form of the signer's public key.
    pub signer_public_key: String,
    /// The generation hash the signature is bound to.
    pub generation_hash: GenerationHash,
    /// The transfer's deadline, re-checked at announce time.
    pub deadline: Deadline,
}

impl SignedTransfer {
    /// Hex form of the payload, as submitted to the node.
    pub fn payload_hex(&self) -> String {
        hex::encode_upper(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_round_trip() {
        let hex = "C5".repeat(32);
        let hash: Hash256 = hex.parse().unwrap();
        assert_eq!(hash.to_hex(), hex);
        assert_eq!(hash.to_string(), hex);
    }

    #[test]
    fn test_bad_hash_rejected() {
        assert!("".parse::<Hash256>().is_err());
        assert!("C5C5".parse::<Hash256>().is_err());
        assert!("XY".repeat(32).parse::<Hash256>().is_err());
    }
}
