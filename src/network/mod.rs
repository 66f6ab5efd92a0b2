//! Live network parameter resolution.
//!
//! # Data Flow
//! ```text
//! NodeClient
//!     → resolver.rs (sequential reads: identity, properties, fees)
//!     → NetworkParameters (lifetime = one call, never cached)
//! ```
//!
//! # Design Decisions
//! - Parameters are fetched fresh on every resolution; callers needing
//!   them for several steps each pay the node round trips again. This is
//!   the stateless "freshest wins" contract, not an oversight.
//! - Any failed read fails the whole resolution

pub mod resolver;
pub mod types;

pub use resolver::NetworkResolver;
pub use types::{CurrencyId, GenerationHash, NetworkParameters, NetworkType};
