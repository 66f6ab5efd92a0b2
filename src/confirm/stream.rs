//! Event-stream subscription plumbing.
//!
//! # Responsibilities
//! - Open the node's websocket and complete the uid handshake
//! - Subscribe to the confirmed-transaction topic for one address and to
//!   the new-block keepalive topic
//! - Forward matching confirmation events to the waiter over a channel
//!
//! # Protocol
//! On connect the node sends `{"uid": "..."}`. Subscriptions are sent as
//! `{"uid": ..., "subscribe": "<topic>"}` frames. Events arrive as
//! `{"topic": "...", "data": {...}}`.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::account::address::Address;
use crate::error::{LedgerError, LedgerResult};
use crate::node::dto::{ConfirmedTransactionDto, ConfirmedTransfer};
use crate::transaction::types::Hash256;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Topic prefix for confirmed-transaction events.
const CONFIRMED_TOPIC: &str = "confirmedAdded";

/// Keepalive topic; events on it carry no resolving semantics.
const BLOCK_TOPIC: &str = "block";

#[derive(Debug, Deserialize)]
struct UidFrame {
    uid: String,
}

#[derive(Debug, Deserialize)]
struct EventFrame {
    topic: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// A live subscription: the write half for closing, the reader task that
/// owns the read half.
pub(crate) struct StreamHandle {
    sink: SplitSink<WsStream, Message>,
    reader: JoinHandle<()>,
}

impl StreamHandle {
    /// Close the connection. Called on every settlement path.
    pub(crate) async fn close(mut self) {
        let _ = self.sink.send(Message::Close(None)).await;
        self.reader.abort();
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        // An abandoned wait still tears the connection down.
        self.reader.abort();
    }
}

/// Connect, handshake, and subscribe for one transaction's confirmation.
///
/// The returned receiver yields at most one item: the matching confirmed
/// transfer, or the stream failure that ended the subscription.
pub(crate) async fn subscribe(
    ws_url: &str,
    address: &Address,
    expected_hash: Hash256,
    handshake_timeout: std::time::Duration,
) -> LedgerResult<(StreamHandle, mpsc::Receiver<LedgerResult<ConfirmedTransfer>>)> {
    let (ws, _response) = timeout(handshake_timeout, connect_async(ws_url))
        .await
        .map_err(|_| {
            LedgerError::ConfirmationStream(format!("connect to {} timed out", ws_url))
        })?
        .map_err(|e| LedgerError::ConfirmationStream(format!("connect to {}: {}", ws_url, e)))?;

    let (mut sink, mut stream) = ws.split();

    let uid = timeout(handshake_timeout, read_uid(&mut stream))
        .await
        .map_err(|_| LedgerError::ConfirmationStream("uid handshake timed out".to_string()))??;

    for topic in [format!("{}/{}", CONFIRMED_TOPIC, address), BLOCK_TOPIC.to_string()] {
        let frame = serde_json::json!({ "uid": &uid, "subscribe": &topic }).to_string();
        sink.send(Message::text(frame)).await.map_err(|e| {
            LedgerError::ConfirmationStream(format!("subscribe to {}: {}", topic, e))
        })?;
    }

    tracing::debug!(address = %address, hash = %expected_hash, "Subscribed to confirmation events");

    let (events_tx, events_rx) = mpsc::channel(4);
    let reader = tokio::spawn(read_loop(stream, expected_hash, events_tx));

    Ok((StreamHandle { sink, reader }, events_rx))
}

async fn read_uid(stream: &mut SplitStream<WsStream>) -> LedgerResult<String> {
    match stream.next().await {
        Some(Ok(Message::Text(text))) => {
            let frame: UidFrame = serde_json::from_str(text.as_str()).map_err(|e| {
                LedgerError::ConfirmationStream(format!("malformed uid frame: {}", e))
            })?;
            Ok(frame.uid)
        }
        Some(Ok(other)) => Err(LedgerError::ConfirmationStream(format!(
            "unexpected handshake frame: {:?}",
            other
        ))),
        Some(Err(e)) => Err(LedgerError::ConfirmationStream(e.to_string())),
        None => Err(LedgerError::ConfirmationStream(
            "stream closed during handshake".to_string(),
        )),
    }
}

async fn read_loop(
    mut stream: SplitStream<WsStream>,
    expected_hash: Hash256,
    events: mpsc::Sender<LedgerResult<ConfirmedTransfer>>,
) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let event: EventFrame = match serde_json::from_str(text.as_str()) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring malformed stream frame");
                        continue;
                    }
                };

                if event.topic == BLOCK_TOPIC {
                    tracing::trace!("Block keepalive event");
                    continue;
                }
                if !event.topic.starts_with(CONFIRMED_TOPIC) {
                    continue;
                }

                // The topic is scoped to the address, not the hash, so
                // the signer's unrelated confirmations arrive here too.
                // Unparseable ones only matter if they carry our hash.
                let event_hash = event
                    .data
                    .pointer("/meta/hash")
                    .and_then(|h| h.as_str())
                    .and_then(|h| h.parse::<Hash256>().ok());

                let parsed = serde_json::from_value::<ConfirmedTransactionDto>(event.data)
                    .map_err(|e| {
                        LedgerError::ConfirmationStream(format!("malformed event payload: {}", e))
                    })
                    .and_then(|dto| {
                        ConfirmedTransfer::try_from(dto)
                            .map_err(|e| LedgerError::ConfirmationStream(e.to_string()))
                    });

                match parsed {
                    Ok(transfer) if transfer.hash == expected_hash => {
                        let _ = events.send(Ok(transfer)).await;
                        return;
                    }
                    Ok(other) => {
                        tracing::trace!(hash = %other.hash, "Confirmation event for another transaction");
                    }
                    Err(e) if event_hash == Some(expected_hash) => {
                        let _ = events.send(Err(e)).await;
                        return;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring unparseable event for another transaction");
                    }
                }
            }
            Ok(Message::Close(_)) => {
                let _ = events
                    .send(Err(LedgerError::ConfirmationStream(
                        "stream closed by node".to_string(),
                    )))
                    .await;
                return;
            }
            Ok(_) => {} // binary / ping / pong
            Err(e) => {
                let _ = events
                    .send(Err(LedgerError::ConfirmationStream(e.to_string())))
                    .await;
                return;
            }
        }
    }
}
