//! Unsigned transfer assembly.
//!
//! # Responsibilities
//! - Combine recipient, amount, and message with live network parameters
//! - Compute the deadline from the default (or overridden) horizon
//! - Compute the max-fee ceiling from the serialized size
//!
//! The max fee is a ceiling, not the eventual exact fee: the network
//! determines the final fee at finalization, always at or below this
//! bound.

use std::time::Duration;

use crate::account::address::Address;
use crate::amount::Amount;
use crate::error::{LedgerError, LedgerResult};
use crate::network::types::{CurrencyId, NetworkParameters, NetworkType};
use crate::transaction::deadline::{Deadline, DEFAULT_HORIZON};
use crate::transaction::types::{TRANSACTION_VERSION, TRANSFER_TYPE};

/// Default bound on the attached message, in bytes of UTF-8.
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1023;

/// Serialized length of everything except the message: version, network,
/// type, max fee, deadline, recipient, currency id, amount, message length.
const FIXED_BODY_LEN: usize = 1 + 1 + 2 + 8 + 8 + 21 + 8 + 8 + 2;

/// Signature (64) plus signer public key (32) appended after signing.
const SIGNATURE_SUFFIX_LEN: usize = 64 + 32;

/// Builds unsigned transfers against one set of network parameters.
pub struct TransferBuilder<'a> {
    params: &'a NetworkParameters,
    horizon: Duration,
    max_message_bytes: usize,
}

impl<'a> TransferBuilder<'a> {
    pub fn new(params: &'a NetworkParameters) -> Self {
        Self {
            params,
            horizon: DEFAULT_HORIZON,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }

    /// Override the default two-hour deadline horizon.
    pub fn with_horizon(mut self, horizon: Duration) -> Self {
        self.horizon = horizon;
        self
    }

    /// Override the message length bound.
    pub fn with_max_message_bytes(mut self, max: usize) -> Self {
        self.max_message_bytes = max;
        self
    }

    /// Assemble an unsigned transfer of the network currency.
    pub fn build(
        &self,
        recipient: &Address,
        amount: Amount,
        message: &str,
    ) -> LedgerResult<UnsignedTransfer> {
        if recipient.network_type() != self.params.network_type {
            return Err(LedgerError::InvalidAddress(format!(
                "recipient '{}' belongs to {}, node is on {}",
                recipient,
                recipient.network_type(),
                self.params.network_type
            )));
        }
        // The wire length field is a u16; no override can raise the
        // bound past what the field can declare.
        let limit = self.max_message_bytes.min(u16::MAX as usize);
        if message.len() > limit {
            return Err(LedgerError::InvalidMessage(format!(
                "message is {} bytes; at most {} are supported",
                message.len(),
                limit
            )));
        }

        let deadline = Deadline::from_now(self.params.epoch_adjustment_secs, self.horizon);

        // Every field is fixed width, so the payload size is known before
        // the fee lands in it.
        let serialized_size = FIXED_BODY_LEN + message.len() + SIGNATURE_SUFFIX_LEN;
        let max_fee = self
            .params
            .average_fee_multiplier
            .saturating_mul(serialized_size as u64);

        Ok(UnsignedTransfer {
            network_type: self.params.network_type,
            max_fee,
            deadline,
            recipient: recipient.clone(),
            currency_id: self.params.currency_id,
            amount,
            message: message.to_string(),
        })
    }
}

/// An assembled transfer awaiting a signature.
#[derive(Debug, Clone)]
pub struct UnsignedTransfer {
    pub network_type: NetworkType,
    pub max_fee: u64,
    pub deadline: Deadline,
    pub recipient: Address,
    pub currency_id: CurrencyId,
    pub amount: Amount,
    pub message: String,
}

impl UnsignedTransfer {
    /// Canonical little-endian serialization of all signed fields.
    pub fn signable_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FIXED_BODY_LEN + self.message.len());
        out.push(TRANSACTION_VERSION);
        out.push(self.network_type.id());
        out.extend_from_slice(&TRANSFER_TYPE.to_le_bytes());
        out.extend_from_slice(&self.max_fee.to_le_bytes());
        out.extend_from_slice(&self.deadline.value_ms().to_le_bytes());
        out.extend_from_slice(self.recipient.payload());
        out.extend_from_slice(&self.currency_id.0.to_le_bytes());
        out.extend_from_slice(&self.amount.0.to_le_bytes());
        out.extend_from_slice(&(self.message.len() as u16).to_le_bytes());
        out.extend_from_slice(self.message.as_bytes());
        out
    }

    /// Size of the full signed payload.
    pub fn serialized_size(&self) -> usize {
        FIXED_BODY_LEN + self.message.len() + SIGNATURE_SUFFIX_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::types::GenerationHash;
    use crate::transaction::deadline::network_now_ms;

    fn test_params() -> NetworkParameters {
        NetworkParameters {
            network_type: NetworkType::Testnet,
            epoch_adjustment_secs: 1_615_853_185,
            generation_hash: "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6"
                .parse::<GenerationHash>()
                .unwrap(),
            currency_id: CurrencyId(0x6BED913FA20223F8),
            average_fee_multiplier: 100,
        }
    }

    fn test_recipient(params: &NetworkParameters) -> Address {
        Address::from_public_key(&[9u8; 32], params.network_type)
    }

    #[test]
    fn test_build_basic_transfer() {
        let params = test_params();
        let recipient = test_recipient(&params);
        let tx = TransferBuilder::new(&params)
            .build(&recipient, Amount(1_500_000), "thanks for the coffee")
            .unwrap();

        assert_eq!(tx.amount, Amount(1_500_000));
        assert_eq!(tx.currency_id, params.currency_id);
        assert!(tx.deadline.is_future(params.epoch_adjustment_secs));
    }

    #[test]
    fn test_max_fee_is_multiplier_times_size() {
        let params = test_params();
        let recipient = test_recipient(&params);
        let tx = TransferBuilder::new(&params)
            .build(&recipient, Amount(1), "hi")
            .unwrap();

        assert_eq!(tx.max_fee, 100 * tx.serialized_size() as u64);
    }

    #[test]
    fn test_signable_bytes_layout() {
        let params = test_params();
        let recipient = test_recipient(&params);
        let tx = TransferBuilder::new(&params)
            .build(&recipient, Amount(42), "ab")
            .unwrap();

        let bytes = tx.signable_bytes();
        assert_eq!(bytes.len(), FIXED_BODY_LEN + 2);
        assert_eq!(bytes[0], TRANSACTION_VERSION);
        assert_eq!(bytes[1], NetworkType::Testnet.id());
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), TRANSFER_TYPE);
        // The message sits at the tail.
        assert_eq!(&bytes[bytes.len() - 2..], b"ab");
        assert_eq!(tx.serialized_size(), bytes.len() + SIGNATURE_SUFFIX_LEN);
    }

    #[test]
    fn test_deadline_uses_default_horizon() {
        let params = test_params();
        let recipient = test_recipient(&params);
        let tx = TransferBuilder::new(&params)
            .build(&recipient, Amount(1), "")
            .unwrap();

        let delta = tx.deadline.value_ms() - network_now_ms(params.epoch_adjustment_secs);
        assert!((delta as i64 - 2 * 3600 * 1000).abs() < 5000);
    }

    #[test]
    fn test_message_bound_enforced() {
        let params = test_params();
        let recipient = test_recipient(&params);
        let long = "x".repeat(DEFAULT_MAX_MESSAGE_BYTES + 1);
        let err = TransferBuilder::new(&params)
            .build(&recipient, Amount(1), &long)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidMessage(_)));
    }

    #[test]
    fn test_message_bound_capped_at_wire_length_field() {
        let params = test_params();
        let recipient = test_recipient(&params);
        // A raised bound must not let the u16 length field wrap.
        let long = "x".repeat(70_000);
        let err = TransferBuilder::new(&params)
            .with_max_message_bytes(100_000)
            .build(&recipient, Amount(1), &long)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidMessage(_)));

        let at_limit = "x".repeat(u16::MAX as usize);
        let tx = TransferBuilder::new(&params)
            .with_max_message_bytes(100_000)
            .build(&recipient, Amount(1), &at_limit)
            .unwrap();
        let bytes = tx.signable_bytes();
        let len_offset = FIXED_BODY_LEN - 2;
        let declared = u16::from_le_bytes([bytes[len_offset], bytes[len_offset + 1]]);
        assert_eq!(declared as usize, at_limit.len());
    }

    #[test]
    fn test_cross_network_recipient_rejected() {
        let params = test_params();
        let mainnet_recipient = Address::from_public_key(&[9u8; 32], NetworkType::Mainnet);
        let err = TransferBuilder::new(&params)
            .build(&mainnet_recipient, Amount(1), "")
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAddress(_)));
    }
}
