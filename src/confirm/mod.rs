//! Confirmation tracking.
//!
//! # Data Flow
//! ```text
//! announced transaction hash + signer address
//!     → stream.rs (event subscription: confirmedAdded + block keepalive)
//!     → waiter.rs (race: subscription vs direct already-confirmed lookup)
//!     → ConfirmedTransfer
//! ```
//!
//! # Design Decisions
//! - The race is an explicit select over a channel and a future, not
//!   nested callbacks; the first positive result settles the wait exactly
//!   once and the loser is discarded
//! - The stream connection is scoped to one wait and released on every
//!   exit path
//! - The block topic is subscribed purely to keep the connection from
//!   idling out; it never settles the wait

pub mod stream;
pub mod waiter;

pub use waiter::{ConfirmationWaiter, WaitPhase};
