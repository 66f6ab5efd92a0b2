//! Confirmation waiting.
//!
//! # Responsibilities
//! - Race the event subscription against a direct already-confirmed
//!   lookup covering the window between announce and subscription
//! - Settle exactly once; discard whichever path loses
//! - Release the stream connection on every exit path

use std::future::Future;

use tokio::sync::mpsc;

use crate::account::address::Address;
use crate::confirm::stream;
use crate::error::{LedgerError, LedgerResult};
use crate::node::dto::{ConfirmedTransactionDto, ConfirmedTransfer};
use crate::node::NodeClient;
use crate::observability::metrics;
use crate::transaction::types::Hash256;

/// Lifecycle of one confirmation wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    Idle,
    Subscribed,
    Confirmed,
    Failed,
}

/// Waits for a specific announced transaction to be confirmed.
#[derive(Debug, Clone)]
pub struct ConfirmationWaiter {
    client: NodeClient,
}

impl ConfirmationWaiter {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }

    /// Wait until the transaction is confirmed or the wait fails.
    ///
    /// No timeout is applied; dropping the returned future tears the
    /// stream connection down.
    pub async fn wait(
        &self,
        signer_address: &Address,
        hash: Hash256,
    ) -> LedgerResult<ConfirmedTransfer> {
        let mut phase = WaitPhase::Idle;
        tracing::debug!(hash = %hash, ?phase, "Starting confirmation wait");

        let subscribed = stream::subscribe(
            &self.client.ws_url(),
            signer_address,
            hash,
            self.client.timeout_duration(),
        )
        .await;

        let (handle, events) = match subscribed {
            Ok(pair) => pair,
            Err(e) => {
                metrics::record_confirmation(false);
                return Err(e);
            }
        };
        phase = WaitPhase::Subscribed;
        tracing::debug!(hash = %hash, ?phase, "Subscription established");

        // The subscription may have been established after the network
        // already confirmed the transaction; the direct lookup covers
        // that window.
        let lookup = lookup_confirmed(self.client.clone(), hash);
        let result = settle(events, lookup).await;

        // Single exit: the connection is released whatever the outcome.
        handle.close().await;

        phase = if result.is_ok() {
            WaitPhase::Confirmed
        } else {
            WaitPhase::Failed
        };
        metrics::record_confirmation(result.is_ok());
        match &result {
            Ok(record) => {
                tracing::info!(hash = %hash, height = record.height, ?phase, "Transaction confirmed")
            }
            Err(e) => tracing::warn!(hash = %hash, error = %e, ?phase, "Confirmation wait failed"),
        }

        result
    }
}

/// Direct check whether the transaction is already confirmed.
async fn lookup_confirmed(
    client: NodeClient,
    hash: Hash256,
) -> LedgerResult<Option<ConfirmedTransfer>> {
    let dto: Option<ConfirmedTransactionDto> = client
        .get_json_opt("confirmed_lookup", &format!("/transactions/confirmed/{}", hash))
        .await?;
    match dto {
        Some(dto) => Ok(Some(dto.try_into()?)),
        None => Ok(None),
    }
}

/// Race the subscription channel against the direct lookup.
///
/// First positive result wins and is returned exactly once. A lookup miss
/// does not settle the wait; the subscription keeps listening. A lookup
/// failure or stream failure settles the wait with that error.
async fn settle<F>(
    mut events: mpsc::Receiver<LedgerResult<ConfirmedTransfer>>,
    lookup: F,
) -> LedgerResult<ConfirmedTransfer>
where
    F: Future<Output = LedgerResult<Option<ConfirmedTransfer>>>,
{
    tokio::pin!(lookup);
    let mut lookup_pending = true;

    loop {
        tokio::select! {
            event = events.recv() => {
                return match event {
                    Some(Ok(record)) => Ok(record),
                    Some(Err(e)) => Err(e),
                    None => Err(LedgerError::ConfirmationStream(
                        "event stream ended before confirmation".to_string(),
                    )),
                };
            }
            looked_up = &mut lookup, if lookup_pending => {
                match looked_up {
                    Ok(Some(record)) => return Ok(record),
                    // Not confirmed yet: keep listening on the stream.
                    Ok(None) => lookup_pending = false,
                    Err(e) => return Err(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(tag: u8) -> ConfirmedTransfer {
        ConfirmedTransfer {
            hash: Hash256([tag; 32]),
            height: 100,
            signer_public_key: "AA".repeat(32),
            recipient: "TDQ5EXAMPLE".to_string(),
            mosaics: Vec::new(),
            message: None,
        }
    }

    #[tokio::test]
    async fn test_settles_once_when_both_paths_fire() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(Ok(record(1))).await.unwrap();
        // Lookup reports the same transaction as already confirmed.
        let lookup = async { Ok(Some(record(1))) };

        let settled = settle(rx, lookup).await.unwrap();
        assert_eq!(settled, record(1));
        // `settle` returned; whichever path lost was discarded without a
        // second resolution.
    }

    #[tokio::test]
    async fn test_lookup_miss_keeps_waiting_for_stream() {
        let (tx, rx) = mpsc::channel(4);
        let lookup = async { Ok(None) };

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = tx.send(Ok(record(2))).await;
        });

        let settled = settle(rx, lookup).await.unwrap();
        assert_eq!(settled.hash, Hash256([2u8; 32]));
    }

    #[tokio::test]
    async fn test_lookup_hit_wins_over_silent_stream() {
        let (_tx, rx) = mpsc::channel(4);
        let lookup = async { Ok(Some(record(3))) };

        let settled = settle(rx, lookup).await.unwrap();
        assert_eq!(settled.hash, Hash256([3u8; 32]));
    }

    #[tokio::test]
    async fn test_lookup_failure_settles_the_wait() {
        let (_tx, rx) = mpsc::channel(4);
        let lookup = async {
            Err(LedgerError::NetworkUnavailable("lookup failed".to_string()))
        };

        let err = settle(rx, lookup).await.unwrap_err();
        assert!(matches!(err, LedgerError::NetworkUnavailable(_)));
    }

    #[tokio::test]
    async fn test_stream_error_settles_the_wait() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(Err(LedgerError::ConfirmationStream("boom".to_string())))
            .await
            .unwrap();
        let lookup = std::future::pending();

        let err = settle(rx, lookup).await.unwrap_err();
        assert!(matches!(err, LedgerError::ConfirmationStream(_)));
    }

    #[tokio::test]
    async fn test_closed_stream_settles_the_wait() {
        let (tx, rx) = mpsc::channel::<LedgerResult<ConfirmedTransfer>>(4);
        drop(tx);
        let lookup = std::future::pending();

        let err = settle(rx, lookup).await.unwrap_err();
        assert!(matches!(err, LedgerError::ConfirmationStream(_)));
    }
}
