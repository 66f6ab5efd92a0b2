//! HTTP client for the node REST gateway.
//!
//! # Responsibilities
//! - Issue JSON reads and writes against a node endpoint
//! - Enforce a per-request timeout
//! - Derive the event-stream URL from the HTTP base URL
//! - Map transport failures to `NetworkUnavailable`

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::timeout;
use url::Url;

use crate::config::NodeConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::observability::metrics;

/// Client for one node's REST gateway.
#[derive(Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: Url,
    ws_path: String,
    timeout_duration: Duration,
}

impl NodeClient {
    /// Create a client for the given node base URL.
    pub fn new(base_url: &str, ws_path: &str, timeout_secs: u64) -> LedgerResult<Self> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| LedgerError::Config(format!("invalid node URL '{}': {}", base_url, e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            ws_path: ws_path.to_string(),
            timeout_duration: Duration::from_secs(timeout_secs),
        })
    }

    /// Create a client from the node section of the configuration.
    ///
    /// Honors the `TIPJAR_NODE_URL` environment override.
    pub fn from_config(config: &NodeConfig) -> LedgerResult<Self> {
        Self::new(
            &config.effective_url(),
            &config.ws_path,
            config.request_timeout_secs,
        )
    }

    /// The per-request timeout, shared with the stream handshake.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout_duration
    }

    /// Derive the event-stream URL: scheme rewritten http→ws (https→wss)
    /// with the stream path appended.
    pub fn ws_url(&self) -> String {
        let mut url = self.base_url.clone();
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        // set_scheme only rejects special→non-special rewrites; ws is special.
        let _ = url.set_scheme(scheme);
        let base = url.as_str().trim_end_matches('/').to_string();
        format!("{}{}", base, self.ws_path)
    }

    fn endpoint(&self, path_and_query: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{}{}", base, path_and_query)
    }

    /// GET a JSON document from the node.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path_and_query: &str,
    ) -> LedgerResult<T> {
        match self.get_json_opt(operation, path_and_query).await? {
            Some(value) => Ok(value),
            None => Err(LedgerError::NetworkUnavailable(format!(
                "{}: node returned 404 for {}",
                operation, path_and_query
            ))),
        }
    }

    /// GET a JSON document, mapping 404 to `None`.
    ///
    /// Used where absence is a meaningful answer (a not-yet-confirmed
    /// transaction) rather than a failure.
    pub async fn get_json_opt<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path_and_query: &str,
    ) -> LedgerResult<Option<T>> {
        let request = self.http.get(self.endpoint(path_and_query)).send();

        let response = match timeout(self.timeout_duration, request).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                metrics::record_node_request(operation, false);
                return Err(LedgerError::NetworkUnavailable(format!("{}: {}", operation, e)));
            }
            Err(_) => {
                metrics::record_node_request(operation, false);
                return Err(LedgerError::NetworkUnavailable(format!(
                    "{}: node request timed out after {:?}",
                    operation, self.timeout_duration
                )));
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            metrics::record_node_request(operation, true);
            return Ok(None);
        }
        if !status.is_success() {
            metrics::record_node_request(operation, false);
            return Err(LedgerError::NetworkUnavailable(format!(
                "{}: node returned status {}",
                operation, status
            )));
        }

        let value = response.json::<T>().await.map_err(|e| {
            metrics::record_node_request(operation, false);
            LedgerError::NetworkUnavailable(format!("{}: malformed node response: {}", operation, e))
        })?;

        metrics::record_node_request(operation, true);
        Ok(Some(value))
    }

    /// PUT a JSON body to the node, returning the response status and raw
    /// body for caller-side interpretation.
    pub async fn put_json<B: serde::Serialize>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> LedgerResult<(reqwest::StatusCode, String)> {
        let request = self.http.put(self.endpoint(path)).json(body).send();

        let response = match timeout(self.timeout_duration, request).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                metrics::record_node_request(operation, false);
                return Err(LedgerError::NetworkUnavailable(format!("{}: {}", operation, e)));
            }
            Err(_) => {
                metrics::record_node_request(operation, false);
                return Err(LedgerError::NetworkUnavailable(format!(
                    "{}: node request timed out after {:?}",
                    operation, self.timeout_duration
                )));
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            metrics::record_node_request(operation, false);
            LedgerError::NetworkUnavailable(format!("{}: {}", operation, e))
        })?;

        metrics::record_node_request(operation, true);
        Ok((status, text))
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_url_derivation() {
        let client = NodeClient::new("http://node.example:3000", "/ws", 10).unwrap();
        assert_eq!(client.ws_url(), "ws://node.example:3000/ws");

        let client = NodeClient::new("https://node.example:3001/", "/ws", 10).unwrap();
        assert_eq!(client.ws_url(), "wss://node.example:3001/ws");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = NodeClient::new("not a url", "/ws", 10).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[tokio::test]
    async fn test_unreachable_node_is_network_unavailable() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let client = NodeClient::new("http://192.0.2.1:3000", "/ws", 1).unwrap();
        let err = client
            .get_json::<serde_json::Value>("node_info", "/node/info")
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NetworkUnavailable(_)));
    }
}
