//! Integration tests for the confirmation event stream.
//!
//! The mock node serves the websocket handshake and a scripted event
//! sequence on `/ws`, and answers every REST read with 404 so the direct
//! already-confirmed lookup always misses and the stream decides the wait.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use tipjar::account::Address;
use tipjar::error::LedgerError;
use tipjar::network::NetworkType;
use tipjar::node::NodeClient;
use tipjar::transaction::Hash256;
use tipjar::ConfirmationWaiter;

const UID: &str = "stream-uid-1";

fn expected_hash_hex() -> String {
    "D1".repeat(32)
}

fn foreign_hash_hex() -> String {
    "D2".repeat(32)
}

fn signer_address() -> Address {
    Address::from_public_key(&[4u8; 32], NetworkType::Testnet)
}

fn client_for(addr: SocketAddr) -> NodeClient {
    NodeClient::new(&format!("http://{}", addr), "/ws", 5).unwrap()
}

/// A confirmed transfer event on the signer's `confirmedAdded` topic.
fn transfer_event(address: &Address, hash: &str, message: &str) -> String {
    serde_json::json!({
        "topic": format!("confirmedAdded/{}", address),
        "data": {
            "meta": { "hash": hash, "height": "245176" },
            "transaction": {
                "signerPublicKey": "C2".repeat(32),
                "recipientAddress": "TDQ5EXAMPLE",
                "mosaics": [ { "id": "6BED913FA20223F8", "amount": "1500000" } ],
                "message": message
            }
        }
    })
    .to_string()
}

/// A confirmed transaction of some other type: it has a hash but no
/// transfer body, so it does not parse as a transfer.
fn non_transfer_event(address: &Address, hash: &str) -> String {
    serde_json::json!({
        "topic": format!("confirmedAdded/{}", address),
        "data": {
            "meta": { "hash": hash, "height": "245175" },
            "transaction": { "signerPublicKey": "C2".repeat(32) }
        }
    })
    .to_string()
}

/// Start a mock node: websocket sessions on `/ws`, 404 for every REST read.
async fn start_stream_node<F, Fut>(session: F) -> SocketAddr
where
    F: Fn(WebSocketStream<TcpStream>) -> Fut + Clone + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (socket, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => break,
            };
            let session = session.clone();
            tokio::spawn(async move {
                if is_stream_request(&socket).await {
                    if let Ok(ws) = tokio_tungstenite::accept_async(socket).await {
                        session(ws).await;
                    }
                } else {
                    serve_not_found(socket).await;
                }
            });
        }
    });

    addr
}

/// Peek at the request line without consuming it, so the websocket
/// handshake still sees the full upgrade request.
async fn is_stream_request(socket: &TcpStream) -> bool {
    let mut probe = [0u8; 8];
    loop {
        match socket.peek(&mut probe).await {
            Ok(n) if n >= probe.len() => return &probe == b"GET /ws ",
            Ok(0) | Err(_) => return false,
            Ok(_) => tokio::task::yield_now().await,
        }
    }
}

async fn serve_not_found(mut socket: TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    let body = r#"{"code":"ResourceNotFound","message":"no resource exists"}"#;
    let response = format!(
        "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Issue the uid and consume both subscribe frames, verifying the
/// handshake contract: each frame echoes the uid, one subscribes to the
/// signer's confirmed topic and one to the block keepalive topic.
async fn handshake(ws: &mut WebSocketStream<TcpStream>) {
    ws.send(Message::text(format!(r#"{{"uid":"{}"}}"#, UID)))
        .await
        .unwrap();

    let mut topics = Vec::new();
    for _ in 0..2 {
        match ws.next().await {
            Some(Ok(Message::Text(frame))) => {
                let value: serde_json::Value = serde_json::from_str(frame.as_str()).unwrap();
                assert_eq!(value["uid"], UID);
                topics.push(value["subscribe"].as_str().unwrap().to_string());
            }
            other => panic!("expected a subscribe frame, got {:?}", other),
        }
    }
    assert!(topics.iter().any(|t| t.starts_with("confirmedAdded/")));
    assert!(topics.iter().any(|t| t == "block"));
}

async fn session_with_noise(mut ws: WebSocketStream<TcpStream>) {
    handshake(&mut ws).await;
    let signer = signer_address();

    // A keepalive, a foreign transfer, and an unrelated non-transfer
    // confirmation all arrive first; none of them may settle the wait.
    let frames = [
        r#"{"topic":"block","data":{}}"#.to_string(),
        transfer_event(&signer, &foreign_hash_hex(), "someone else's tip"),
        non_transfer_event(&signer, &"D3".repeat(32)),
        transfer_event(&signer, &expected_hash_hex(), "finally"),
    ];
    for frame in frames {
        ws.send(Message::text(frame)).await.unwrap();
    }

    // Hold the connection open until the client closes it.
    while let Some(Ok(_)) = ws.next().await {}
}

async fn session_disconnect(mut ws: WebSocketStream<TcpStream>) {
    handshake(&mut ws).await;
    ws.send(Message::text(r#"{"topic":"block","data":{}}"#))
        .await
        .unwrap();
    let _ = ws.send(Message::Close(None)).await;
}

async fn session_malformed_tracked_event(mut ws: WebSocketStream<TcpStream>) {
    handshake(&mut ws).await;
    let signer = signer_address();
    ws.send(Message::text(non_transfer_event(&signer, &expected_hash_hex())))
        .await
        .unwrap();
    while let Some(Ok(_)) = ws.next().await {}
}

#[tokio::test]
async fn test_wait_resolves_on_matching_event_after_noise() {
    let addr = start_stream_node(session_with_noise).await;
    let hash: Hash256 = expected_hash_hex().parse().unwrap();

    let record = timeout(
        Duration::from_secs(10),
        ConfirmationWaiter::new(client_for(addr)).wait(&signer_address(), hash),
    )
    .await
    .expect("wait must settle")
    .unwrap();

    assert_eq!(record.hash, hash);
    assert_eq!(record.message.as_deref(), Some("finally"));
}

#[tokio::test]
async fn test_wait_fails_on_mid_wait_disconnect() {
    let addr = start_stream_node(session_disconnect).await;
    let hash: Hash256 = expected_hash_hex().parse().unwrap();

    let err = timeout(
        Duration::from_secs(10),
        ConfirmationWaiter::new(client_for(addr)).wait(&signer_address(), hash),
    )
    .await
    .expect("wait must settle")
    .unwrap_err();

    assert!(matches!(err, LedgerError::ConfirmationStream(_)));
}

#[tokio::test]
async fn test_unparseable_event_for_tracked_hash_fails_the_wait() {
    let addr = start_stream_node(session_malformed_tracked_event).await;
    let hash: Hash256 = expected_hash_hex().parse().unwrap();

    let err = timeout(
        Duration::from_secs(10),
        ConfirmationWaiter::new(client_for(addr)).wait(&signer_address(), hash),
    )
    .await
    .expect("wait must settle")
    .unwrap_err();

    assert!(matches!(err, LedgerError::ConfirmationStream(_)));
}
