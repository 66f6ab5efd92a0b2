//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters for announces, confirmations, node errors)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; JSON for production, pretty for
//!   development
//! - Metric updates are cheap atomic increments and are no-ops until a
//!   recorder is installed, so the library never forces an exporter on
//!   its host

pub mod logging;
pub mod metrics;
