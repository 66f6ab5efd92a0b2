//! Transaction announcement.
//!
//! Announcing hands the payload to a node for processing. The node
//! accepting the submission says nothing about confirmation; callers
//! track finality through the confirmation waiter.

use crate::error::{LedgerError, LedgerResult};
use crate::network::NetworkResolver;
use crate::node::dto::{AnnouncePayloadDto, AnnounceResponseDto, NodeErrorDto};
use crate::node::NodeClient;
use crate::observability::metrics;
use crate::transaction::types::SignedTransfer;

/// Node acknowledgement of an accepted submission.
#[derive(Debug, Clone)]
pub struct AnnounceReceipt {
    pub message: String,
}

/// Submits signed transfers to the node.
#[derive(Debug, Clone)]
pub struct Announcer {
    client: NodeClient,
}

impl Announcer {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }

    /// Submit a signed transfer for processing.
    ///
    /// Resolves as soon as the node accepts the submission. An outright
    /// refusal (malformed payload, insufficient fee) surfaces as
    /// `AnnounceRejected` with the node's reason.
    pub async fn announce(&self, signed: &SignedTransfer) -> LedgerResult<AnnounceReceipt> {
        let params = NetworkResolver::new(self.client.clone()).resolve().await?;

        // The deadline must still be strictly in the future on the
        // network clock; an expired one would only be discarded later.
        if !signed.deadline.is_future(params.epoch_adjustment_secs) {
            return Err(LedgerError::AnnounceRejected {
                code: "DeadlineExpired".to_string(),
                message: "transaction deadline is not in the future".to_string(),
            });
        }
        if signed.generation_hash != params.generation_hash {
            return Err(LedgerError::AnnounceRejected {
                code: "NetworkMismatch".to_string(),
                message: format!(
                    "payload signed for generation hash {}, node reports {}",
                    signed.generation_hash, params.generation_hash
                ),
            });
        }

        let body = AnnouncePayloadDto {
            payload: signed.payload_hex(),
        };
        let (status, text) = self.client.put_json("announce", "/transactions", &body).await?;

        if status.is_success() {
            metrics::record_announce(true);
            let message = serde_json::from_str::<AnnounceResponseDto>(&text)
                .map(|r| r.message)
                .unwrap_or_else(|_| "accepted".to_string());
            tracing::info!(hash = %signed.hash, "Transaction announced");
            return Ok(AnnounceReceipt { message });
        }

        metrics::record_announce(false);
        let (code, message) = match serde_json::from_str::<NodeErrorDto>(&text) {
            Ok(err) => (err.code, err.message),
            Err(_) => (status.to_string(), text),
        };
        tracing::warn!(hash = %signed.hash, code = %code, "Announce rejected");
        Err(LedgerError::AnnounceRejected { code, message })
    }
}
