//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured node URL.
pub const NODE_URL_ENV_VAR: &str = "TIPJAR_NODE_URL";

/// Root configuration for the transfer client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TipjarConfig {
    /// Node endpoint settings.
    pub node: NodeConfig,

    /// Transfer pipeline settings.
    pub transfer: TransferConfig,

    /// History query settings.
    pub history: HistoryConfig,
}

/// Node endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP base URL of the node REST gateway.
    pub url: String,

    /// Path appended to the scheme-rewritten node URL for the event stream.
    pub ws_path: String,

    /// Per-request timeout in seconds for node reads and writes.
    pub request_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            ws_path: "/ws".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl NodeConfig {
    /// Resolve the effective node URL: the `TIPJAR_NODE_URL` environment
    /// variable wins over the configured value.
    pub fn effective_url(&self) -> String {
        std::env::var(NODE_URL_ENV_VAR).unwrap_or_else(|_| self.url.clone())
    }
}

/// Transfer pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Fixed recipient address for outgoing tips.
    pub recipient: String,

    /// Deadline horizon in hours. A transaction not confirmed within
    /// this window after announce is discarded by the network.
    pub deadline_hours: u64,

    /// Maximum attached message length in bytes.
    pub max_message_bytes: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            deadline_hours: 2,
            max_message_bytes: 1023,
        }
    }
}

/// History query configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Records per page when listing received transfers.
    pub page_size: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { page_size: 25 }
    }
}
