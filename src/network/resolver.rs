//! Network parameter resolution.
//!
//! # Responsibilities
//! - Read network identity, epoch adjustment, currency asset id, and the
//!   fee schedule from the node
//! - Fail the whole resolution on any failed read (no retries)

use crate::error::LedgerResult;
use crate::network::types::{CurrencyId, GenerationHash, NetworkParameters, NetworkType};
use crate::node::dto::{NetworkPropertiesDto, NodeInfoDto, TransactionFeesDto};
use crate::node::NodeClient;

/// Resolves live network parameters from a node.
///
/// Every call performs the reads afresh; there is no cache, so two
/// pipeline steps that both need parameters each hit the node.
#[derive(Debug, Clone)]
pub struct NetworkResolver {
    client: NodeClient,
}

impl NetworkResolver {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }

    /// Fetch current network parameters.
    pub async fn resolve(&self) -> LedgerResult<NetworkParameters> {
        let info: NodeInfoDto = self.client.get_json("node_info", "/node/info").await?;
        let network_type = NetworkType::from_id(info.network_identifier)?;
        let generation_hash: GenerationHash = info.network_generation_hash_seed.parse()?;

        let properties: NetworkPropertiesDto = self
            .client
            .get_json("network_properties", "/network/properties")
            .await?;
        let currency_id = CurrencyId::from_hex(&properties.chain.currency_id)?;

        let fees: TransactionFeesDto = self
            .client
            .get_json("transaction_fees", "/network/fees/transaction")
            .await?;

        let params = NetworkParameters {
            network_type,
            epoch_adjustment_secs: properties.network.epoch_adjustment,
            generation_hash,
            currency_id,
            average_fee_multiplier: fees.average_fee_multiplier,
        };

        tracing::debug!(
            network = %params.network_type,
            currency = %params.currency_id,
            fee_multiplier = params.average_fee_multiplier,
            "Resolved network parameters"
        );

        Ok(params)
    }
}
