//! Transfer transaction pipeline.
//!
//! # Data Flow
//! ```text
//! NetworkParameters + recipient + Amount + message
//!     → builder.rs (unsigned transfer, deadline, max-fee ceiling)
//!     → signer.rs (generation-hash-bound signature, payload, hash)
//!     → announce.rs (submit to node; acceptance ≠ confirmation)
//!     → uri.rs (payload + generation hash as an import URI)
//! ```
//!
//! # Design Decisions
//! - All transaction fields are fixed width, so the serialized size (and
//!   with it the max-fee ceiling) is known before signing
//! - The signature covers the generation hash, making the payload valid
//!   on exactly one network

pub mod announce;
pub mod builder;
pub mod deadline;
pub mod signer;
pub mod types;
pub mod uri;

pub use announce::{AnnounceReceipt, Announcer};
pub use builder::{TransferBuilder, UnsignedTransfer};
pub use deadline::Deadline;
pub use signer::{sign_transfer, verify_payload};
pub use types::{Hash256, SignedTransfer, TRANSFER_TYPE};
pub use uri::transfer_uri;
