//! Network identity types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Which network instance a node belongs to.
///
/// The identifier byte doubles as the address version byte, so an address
/// visibly belongs to one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

impl NetworkType {
    /// The network identifier byte carried in transactions and addresses.
    pub fn id(self) -> u8 {
        match self {
            NetworkType::Mainnet => 0x68,
            NetworkType::Testnet => 0x98,
        }
    }

    /// Map a node-reported identifier byte back to a network type.
    pub fn from_id(id: u8) -> LedgerResult<Self> {
        match id {
            0x68 => Ok(NetworkType::Mainnet),
            0x98 => Ok(NetworkType::Testnet),
            other => Err(LedgerError::NetworkUnavailable(format!(
                "unknown network identifier {:#04x}",
                other
            ))),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Mainnet => write!(f, "mainnet"),
            NetworkType::Testnet => write!(f, "testnet"),
        }
    }
}

/// The 32-byte fingerprint of a network's first block.
///
/// Signatures are computed over this hash together with the transaction
/// bytes, which makes a signed transaction valid on exactly one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationHash([u8; 32]);

impl GenerationHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl FromStr for GenerationHash {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| {
            LedgerError::NetworkUnavailable(format!("malformed generation hash '{}'", s))
        })?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
            LedgerError::NetworkUnavailable(format!("generation hash '{}' is not 32 bytes", s))
        })?;
        Ok(GenerationHash(bytes))
    }
}

impl fmt::Display for GenerationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Identifier of the network's currency asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyId(pub u64);

impl CurrencyId {
    /// Parse the 16-digit hex form used on the wire.
    pub fn from_hex(s: &str) -> LedgerResult<Self> {
        // from_str_radix tolerates a leading sign; only bare hex digits
        // are an asset id.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LedgerError::NetworkUnavailable(format!(
                "malformed asset id '{}'",
                s
            )));
        }
        u64::from_str_radix(s, 16)
            .map(CurrencyId)
            .map_err(|_| LedgerError::NetworkUnavailable(format!("malformed asset id '{}'", s)))
    }

    pub fn to_hex(self) -> String {
        format!("{:016X}", self.0)
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Live network configuration, valid for a single operation.
#[derive(Debug, Clone)]
pub struct NetworkParameters {
    pub network_type: NetworkType,
    /// Unixtime seconds of the network's first block; deadlines are
    /// expressed relative to this origin.
    pub epoch_adjustment_secs: u64,
    pub generation_hash: GenerationHash,
    pub currency_id: CurrencyId,
    /// Node-reported average fee multiplier, the ceiling factor for
    /// max-fee computation.
    pub average_fee_multiplier: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_id_round_trip() {
        assert_eq!(NetworkType::from_id(0x68).unwrap(), NetworkType::Mainnet);
        assert_eq!(NetworkType::from_id(0x98).unwrap(), NetworkType::Testnet);
        assert!(NetworkType::from_id(0x00).is_err());
    }

    #[test]
    fn test_generation_hash_parsing() {
        let hex = "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6";
        let hash: GenerationHash = hex.parse().unwrap();
        assert_eq!(hash.to_hex(), hex);
        // Lowercase input is accepted.
        let lower: GenerationHash = hex.to_lowercase().parse().unwrap();
        assert_eq!(lower, hash);

        assert!("abcd".parse::<GenerationHash>().is_err());
        assert!("zz".repeat(32).parse::<GenerationHash>().is_err());
    }

    #[test]
    fn test_currency_id_hex() {
        let id = CurrencyId::from_hex("6BED913FA20223F8").unwrap();
        assert_eq!(id.0, 0x6BED913FA20223F8);
        assert_eq!(id.to_hex(), "6BED913FA20223F8");
        assert!(CurrencyId::from_hex("not-hex").is_err());
        assert!(CurrencyId::from_hex("").is_err());
        // A leading sign is not a hex digit, even if the radix parser
        // would accept it.
        assert!(CurrencyId::from_hex("+BED913FA20223F8").is_err());
        assert!(CurrencyId::from_hex("-BED913FA20223F8").is_err());
    }
}
