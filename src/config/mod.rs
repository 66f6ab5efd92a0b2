//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TipjarConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The node URL can be overridden from the environment so the same
//!   config file works against mainnet and testnet nodes

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::{HistoryConfig, NodeConfig, TipjarConfig, TransferConfig};
