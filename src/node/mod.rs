//! Node gateway access.
//!
//! # Data Flow
//! ```text
//! configuration (HTTP base URL)
//!     → client.rs (timeout-wrapped JSON requests, derived stream URL)
//!     → dto.rs (wire DTOs, string-encoded 64-bit integers)
//!     → domain types consumed by network / account / transaction / confirm
//! ```
//!
//! # Design Decisions
//! - Every request carries the configured timeout; a timeout is a node
//!   read failure like any other
//! - 64-bit quantities travel as decimal strings on the wire and are
//!   parsed with integer arithmetic only

pub mod client;
pub mod dto;

pub use client::NodeClient;
pub use dto::{ConfirmedTransfer, MosaicAmount};
