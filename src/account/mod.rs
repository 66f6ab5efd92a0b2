//! Accounts, addresses, and balances.
//!
//! # Data Flow
//! ```text
//! private key (env var or hex string)
//!     → keypair.rs (Ed25519 account, network-scoped)
//!     → address.rs (check-encoded address derivation & validation)
//!     → balance.rs (currency-asset balance aggregation)
//! ```
//!
//! # Security Constraints
//! - Private keys only from explicit arguments or environment variables
//! - Key material is never logged or serialized

pub mod address;
pub mod balance;
pub mod keypair;

pub use address::Address;
pub use balance::BalanceAggregator;
pub use keypair::{Account, PRIVATE_KEY_ENV_VAR};
