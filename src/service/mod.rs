//! Transfer pipeline façade.
//!
//! # Data Flow
//! ```text
//! TipjarConfig
//!     → TipjarService
//!         send_tip: resolve → build → sign → announce → wait
//!         balance / history: independent read path
//! ```
//!
//! # Design Decisions
//! - Each pipeline step resolves network parameters afresh, matching the
//!   stateless no-cache contract; steps are strictly sequential within
//!   one submission
//! - Nothing guards against a second concurrent submission; submissions
//!   are independent single-shot pipelines

use crate::account::{Account, Address, BalanceAggregator};
use crate::amount::Amount;
use crate::config::TipjarConfig;
use crate::confirm::ConfirmationWaiter;
use crate::error::{LedgerError, LedgerResult};
use crate::history::HistoryQuery;
use crate::network::NetworkResolver;
use crate::node::dto::ConfirmedTransfer;
use crate::node::NodeClient;
use crate::transaction::{sign_transfer, transfer_uri, Announcer, Hash256, TransferBuilder};

/// Outcome of a completed tip submission.
#[derive(Debug, Clone)]
pub struct TipOutcome {
    /// Hash the confirmation was tracked by.
    pub hash: Hash256,
    /// Import URI pairing the payload with its generation hash.
    pub uri: String,
    /// The confirmed transaction as observed on the network.
    pub record: ConfirmedTransfer,
}

/// End-to-end client over one node endpoint.
#[derive(Debug, Clone)]
pub struct TipjarService {
    client: NodeClient,
    config: TipjarConfig,
}

impl TipjarService {
    pub fn new(config: TipjarConfig) -> LedgerResult<Self> {
        let client = NodeClient::from_config(&config.node)?;
        Ok(Self { client, config })
    }

    /// The configured fixed recipient, parsed and validated.
    pub fn recipient(&self) -> LedgerResult<Address> {
        if self.config.transfer.recipient.is_empty() {
            return Err(LedgerError::Config(
                "transfer.recipient is not configured".to_string(),
            ));
        }
        Address::from_raw(&self.config.transfer.recipient)
    }

    /// Send a tip to the configured recipient and wait for confirmation.
    ///
    /// Runs the whole write path: resolve parameters, build, sign,
    /// announce, and wait. Parameters are re-fetched per step; each step
    /// failing ends the submission with that step's error.
    pub async fn send_tip(
        &self,
        private_key_hex: &str,
        amount: &str,
        message: &str,
    ) -> LedgerResult<TipOutcome> {
        let resolver = NetworkResolver::new(self.client.clone());
        let amount = Amount::from_decimal_str(amount)?;
        let recipient = self.recipient()?;

        let params = resolver.resolve().await?;
        let account = Account::from_private_key(private_key_hex, params.network_type)?;

        let unsigned = TransferBuilder::new(&params)
            .with_horizon(std::time::Duration::from_secs(
                self.config.transfer.deadline_hours * 3600,
            ))
            .with_max_message_bytes(self.config.transfer.max_message_bytes)
            .build(&recipient, amount, message)?;

        // Fresh parameters again before signing; the generation hash must
        // come from the node we are about to announce to.
        let params = resolver.resolve().await?;
        let signed = sign_transfer(&unsigned, &account, &params.generation_hash);
        let uri = transfer_uri(&signed);

        let receipt = Announcer::new(self.client.clone()).announce(&signed).await?;
        tracing::info!(hash = %signed.hash, node_message = %receipt.message, "Tip announced");

        let record = ConfirmationWaiter::new(self.client.clone())
            .wait(&account.address(), signed.hash)
            .await?;

        Ok(TipOutcome {
            hash: signed.hash,
            uri,
            record,
        })
    }

    /// Current currency balance of an address.
    pub async fn balance(&self, address: &str) -> LedgerResult<Amount> {
        let address = Address::from_raw(address)?;
        BalanceAggregator::new(self.client.clone())
            .balance_of(&address)
            .await
    }

    /// One page of confirmed transfers received by the configured
    /// recipient, newest first.
    pub async fn history(&self, page_number: u32) -> LedgerResult<Vec<ConfirmedTransfer>> {
        let recipient = self.recipient()?;
        HistoryQuery::new(self.client.clone())
            .recent_transfers(&recipient, self.config.history.page_size, page_number)
            .await
    }
}
