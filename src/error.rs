//! Error taxonomy for the transfer pipeline.
//!
//! Every core operation surfaces failure to its caller as one of these
//! variants; there are no retries and no partial rollback. A failed step
//! means the submission did not complete and the caller restarts from
//! scratch if it wants to.

use thiserror::Error;

/// Errors that can occur across the transfer pipeline and read paths.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The node was unreachable or a read against it failed.
    #[error("node unavailable: {0}")]
    NetworkUnavailable(String),

    /// Private key material could not be parsed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Amount string is malformed or exceeds the supported precision.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Recipient address failed checksum or network validation.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Attached message exceeds the supported length.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// The node refused a submitted transaction outright.
    #[error("announce rejected ({code}): {message}")]
    AnnounceRejected { code: String, message: String },

    /// The event-stream connection failed during a confirmation wait.
    #[error("confirmation stream error: {0}")]
    ConfirmationStream(String),

    /// Configuration could not be loaded or did not validate.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
