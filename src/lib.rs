//! Ledger transfer client.
//!
//! Sends metered transfers of the network currency to a fixed recipient,
//! with a short attached message, and tracks confirmation, balance, and
//! received-transfer history against a node.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!                 │                 WRITE PATH                    │
//!                 │                                               │
//!  amount string ─┼▶ amount ──▶ transaction::builder ──▶ signer   │
//!                 │              ▲                        │       │
//!                 │              │ NetworkParameters      ▼       │
//!                 │            network::resolver      announce    │
//!                 │              ▲                        │       │
//!                 │              │                        ▼       │
//!                 │            node::client ◀──────── confirm     │
//!                 │              ▲            (stream + lookup)   │
//!                 ├──────────────┼───────────────────────────────┤
//!                 │              │         READ PATH              │
//!                 │   account::balance        history             │
//!                 └──────────────────────────────────────────────┘
//!
//!  Cross-cutting: config, error, observability
//! ```
//!
//! Amounts never pass through binary floating point; signatures are bound
//! to one network's generation hash; the confirmation wait races an event
//! subscription against a direct lookup and settles exactly once.

// Core pipeline
pub mod amount;
pub mod network;
pub mod node;
pub mod transaction;

// Confirmation tracking
pub mod confirm;

// Accounts and read paths
pub mod account;
pub mod history;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;

// Façade
pub mod service;

pub use account::{Account, Address, BalanceAggregator};
pub use amount::Amount;
pub use config::TipjarConfig;
pub use confirm::ConfirmationWaiter;
pub use error::{LedgerError, LedgerResult};
pub use history::HistoryQuery;
pub use network::{NetworkParameters, NetworkResolver, NetworkType};
pub use node::{ConfirmedTransfer, NodeClient};
pub use service::{TipOutcome, TipjarService};
pub use transaction::{Announcer, Hash256, SignedTransfer, TransferBuilder};
