//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, page sizes bounded)
//! - Check the node URL parses and uses an http(s) scheme
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: TipjarConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::TipjarConfig;

/// Largest accepted history page.
const MAX_PAGE_SIZE: u32 = 100;

/// Largest accepted deadline horizon. The network discards transactions
/// whose deadline lies further out than a day.
const MAX_DEADLINE_HOURS: u64 = 24;

/// Largest accepted message bound. The wire format declares the message
/// length in a u16, so nothing larger can be serialized.
const MAX_MESSAGE_BYTES: usize = u16::MAX as usize;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &TipjarConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.node.url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        Ok(parsed) => errors.push(ValidationError {
            field: "node.url".to_string(),
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "node.url".to_string(),
            message: format!("not a valid URL: {}", e),
        }),
    }

    if !config.node.ws_path.starts_with('/') {
        errors.push(ValidationError {
            field: "node.ws_path".to_string(),
            message: "must start with '/'".to_string(),
        });
    }

    if config.node.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "node.request_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if config.transfer.deadline_hours == 0 || config.transfer.deadline_hours > MAX_DEADLINE_HOURS {
        errors.push(ValidationError {
            field: "transfer.deadline_hours".to_string(),
            message: format!("must be between 1 and {}", MAX_DEADLINE_HOURS),
        });
    }

    if config.transfer.max_message_bytes > MAX_MESSAGE_BYTES {
        errors.push(ValidationError {
            field: "transfer.max_message_bytes".to_string(),
            message: format!("must be at most {}", MAX_MESSAGE_BYTES),
        });
    }

    if config.history.page_size == 0 || config.history.page_size > MAX_PAGE_SIZE {
        errors.push(ValidationError {
            field: "history.page_size".to_string(),
            message: format!("must be between 1 and {}", MAX_PAGE_SIZE),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
