//! Currency-asset balance aggregation.

use crate::account::address::Address;
use crate::amount::Amount;
use crate::error::LedgerResult;
use crate::network::NetworkResolver;
use crate::node::dto::{AccountInfoDto, MosaicDto};
use crate::node::NodeClient;

/// Read-only balance queries against node state.
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    client: NodeClient,
}

impl BalanceAggregator {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }

    /// The address's holdings of the network currency asset.
    ///
    /// Returns zero when the account holds none of the currency. A failed
    /// account lookup is surfaced as `NetworkUnavailable`, never silently
    /// converted to zero.
    pub async fn balance_of(&self, address: &Address) -> LedgerResult<Amount> {
        // Fresh parameters per call; the currency id may only come from
        // the node we are querying.
        let params = NetworkResolver::new(self.client.clone()).resolve().await?;

        let info: AccountInfoDto = self
            .client
            .get_json("account_info", &format!("/accounts/{}", address))
            .await?;

        let currency_hex = params.currency_id.to_hex();
        let total = sum_matching(&info.account.mosaics, &currency_hex)?;

        tracing::debug!(address = %address, balance = %total, "Aggregated account balance");
        Ok(total)
    }
}

/// Sum the entries matching the currency asset. The account state holds
/// each asset at most once, but we fold anyway rather than trust that.
fn sum_matching(mosaics: &[MosaicDto], currency_hex: &str) -> LedgerResult<Amount> {
    let mut total: u64 = 0;
    for mosaic in mosaics {
        if mosaic.id.eq_ignore_ascii_case(currency_hex) {
            let value = crate::node::dto::parse_u64("account mosaic amount", &mosaic.amount)?;
            total = total.saturating_add(value);
        }
    }
    Ok(Amount(total))
}
