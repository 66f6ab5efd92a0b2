//! Transfer history queries.
//!
//! # Responsibilities
//! - List confirmed transfer-type transactions addressed to a recipient,
//!   newest first, one page at a time
//!
//! No aggregation or caching happens across pages; every call is a fresh
//! node read.

use crate::account::address::Address;
use crate::error::LedgerResult;
use crate::node::dto::{ConfirmedTransfer, TransactionPageDto};
use crate::node::NodeClient;
use crate::transaction::types::TRANSFER_TYPE;

/// Read-only pages of confirmed incoming transfers.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    client: NodeClient,
}

impl HistoryQuery {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }

    /// Fetch one page of confirmed transfers to the recipient, newest
    /// first. At most `page_size` records are returned even if the node
    /// over-delivers.
    pub async fn recent_transfers(
        &self,
        recipient: &Address,
        page_size: u32,
        page_number: u32,
    ) -> LedgerResult<Vec<ConfirmedTransfer>> {
        let path = format!(
            "/transactions/confirmed?recipientAddress={}&type={}&pageSize={}&pageNumber={}&order=desc",
            recipient, TRANSFER_TYPE, page_size, page_number
        );
        let page: TransactionPageDto = self.client.get_json("transaction_search", &path).await?;

        let mut records = Vec::with_capacity(page.data.len().min(page_size as usize));
        for dto in page.data.into_iter().take(page_size as usize) {
            records.push(ConfirmedTransfer::try_from(dto)?);
        }

        tracing::debug!(
            recipient = %recipient,
            page = page_number,
            count = records.len(),
            "Fetched transfer history page"
        );
        Ok(records)
    }
}

// Page capping and ordering are covered by the mock-node integration
// tests; the DTO conversion itself is tested in node::dto.
