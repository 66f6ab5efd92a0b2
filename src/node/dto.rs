//! Wire DTOs for the node REST and stream APIs.
//!
//! 64-bit quantities (amounts, heights, deadlines) travel as decimal
//! strings so no reader is tempted through a float. Conversions parse
//! them with integer arithmetic and reject anything malformed.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::{LedgerError, LedgerResult};
use crate::network::types::CurrencyId;
use crate::transaction::types::Hash256;

/// `GET /node/info` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfoDto {
    pub network_identifier: u8,
    pub network_generation_hash_seed: String,
}

/// `GET /network/properties` response.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkPropertiesDto {
    pub network: NetworkSectionDto,
    pub chain: ChainSectionDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSectionDto {
    /// Unixtime seconds of the network's first block.
    pub epoch_adjustment: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSectionDto {
    /// Hex identifier of the network currency asset.
    pub currency_id: String,
}

/// `GET /network/fees/transaction` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFeesDto {
    pub average_fee_multiplier: u64,
    #[serde(default)]
    pub median_fee_multiplier: u64,
    #[serde(default)]
    pub highest_fee_multiplier: u64,
    #[serde(default)]
    pub lowest_fee_multiplier: u64,
}

/// Body sent to `PUT /transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncePayloadDto {
    /// Hex-encoded signed transaction payload.
    pub payload: String,
}

/// Success body returned by `PUT /transactions`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnounceResponseDto {
    pub message: String,
}

/// Error body returned by the node on refusals and missing resources.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeErrorDto {
    pub code: String,
    pub message: String,
}

/// An asset entry held by an account or carried by a transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosaicDto {
    pub id: String,
    pub amount: String,
}

/// `GET /accounts/{address}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfoDto {
    pub account: AccountDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountDto {
    pub address: String,
    #[serde(default)]
    pub mosaics: Vec<MosaicDto>,
}

/// A confirmed transaction with its metadata, as returned by
/// `GET /transactions/confirmed/{hash}`, search pages, and stream events.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmedTransactionDto {
    pub meta: TransactionMetaDto,
    pub transaction: TransferBodyDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionMetaDto {
    pub hash: String,
    pub height: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBodyDto {
    pub signer_public_key: String,
    pub recipient_address: String,
    #[serde(default)]
    pub mosaics: Vec<MosaicDto>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Search page returned by `GET /transactions/confirmed?...`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionPageDto {
    #[serde(default)]
    pub data: Vec<ConfirmedTransactionDto>,
}

/// One asset quantity carried by a confirmed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicAmount {
    pub id: CurrencyId,
    pub amount: Amount,
}

/// A confirmed transfer as observed via subscription or direct lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedTransfer {
    pub hash: Hash256,
    pub height: u64,
    pub signer_public_key: String,
    pub recipient: String,
    pub mosaics: Vec<MosaicAmount>,
    pub message: Option<String>,
}

impl ConfirmedTransfer {
    /// Total of this transfer's entries matching the given currency asset.
    ///
    /// Summed defensively even though at most one matching entry is
    /// expected.
    pub fn amount_of(&self, currency: CurrencyId) -> Amount {
        let total = self
            .mosaics
            .iter()
            .filter(|m| m.id == currency)
            .fold(0u64, |acc, m| acc.saturating_add(m.amount.0));
        Amount(total)
    }
}

/// Parse a string-encoded 64-bit quantity from a node payload.
pub(crate) fn parse_u64(field: &str, value: &str) -> LedgerResult<u64> {
    value.parse::<u64>().map_err(|_| {
        LedgerError::NetworkUnavailable(format!("malformed node response: {} '{}'", field, value))
    })
}

impl TryFrom<ConfirmedTransactionDto> for ConfirmedTransfer {
    type Error = LedgerError;

    fn try_from(dto: ConfirmedTransactionDto) -> LedgerResult<Self> {
        let hash: Hash256 = dto.meta.hash.parse()?;
        let height = parse_u64("height", &dto.meta.height)?;

        let mut mosaics = Vec::with_capacity(dto.transaction.mosaics.len());
        for m in &dto.transaction.mosaics {
            mosaics.push(MosaicAmount {
                id: CurrencyId::from_hex(&m.id)?,
                amount: Amount(parse_u64("mosaic amount", &m.amount)?),
            });
        }

        Ok(ConfirmedTransfer {
            hash,
            height,
            signer_public_key: dto.transaction.signer_public_key,
            recipient: dto.transaction.recipient_address,
            mosaics,
            message: dto.transaction.message,
        })
    }
}
