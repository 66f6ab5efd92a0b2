//! Configuration loading from disk.
//!
//! Loading shares the crate error taxonomy: a bad config file surfaces
//! as `LedgerError::Config`, the same variant the pipeline uses for any
//! other misconfiguration, so callers handle one error type throughout.

use std::fs;
use std::path::Path;

use crate::config::schema::TipjarConfig;
use crate::config::validation::validate_config;
use crate::error::{LedgerError, LedgerResult};

/// Load and validate configuration from a TOML file.
///
/// Validation problems are accumulated and reported together in one
/// `Config` error rather than one at a time.
pub fn load_config(path: &Path) -> LedgerResult<TipjarConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| LedgerError::Config(format!("cannot read '{}': {}", path.display(), e)))?;
    let config: TipjarConfig = toml::from_str(&content)
        .map_err(|e| LedgerError::Config(format!("cannot parse '{}': {}", path.display(), e)))?;

    validate_config(&config).map_err(|errors| {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        LedgerError::Config(joined)
    })?;

    Ok(config)
}
