//! Fixed-point amount handling.
//!
//! # Responsibilities
//! - Convert human decimal strings to the network's smallest unit
//! - Convert scaled integers back to decimal strings
//! - Reject amounts that exceed the supported precision
//!
//! # Design Decisions
//! - The network currency has exactly 6 decimal places of divisibility
//! - All arithmetic is 64-bit integer; no value ever passes through a
//!   binary float, so large balances round-trip without drift
//! - Excess fractional digits are an error, never silently truncated

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Number of decimal places in the network currency.
pub const DIVISIBILITY: u32 = 6;

/// Scale factor between whole units and the smallest indivisible unit.
pub const SCALE: u64 = 1_000_000;

/// A non-negative amount in the network's smallest indivisible unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Parse a decimal string (e.g. `"12.345678"`) into a scaled amount.
    ///
    /// The fractional part is right-padded with zeros to 6 digits. More
    /// than 6 fractional digits is rejected rather than truncated.
    pub fn from_decimal_str(s: &str) -> LedgerResult<Amount> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LedgerError::InvalidAmount("empty amount".to_string()));
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(LedgerError::InvalidAmount(format!("malformed amount '{}'", s)));
        }
        if frac_part.len() > DIVISIBILITY as usize {
            return Err(LedgerError::InvalidAmount(format!(
                "'{}' has {} fractional digits; at most {} are supported",
                s,
                frac_part.len(),
                DIVISIBILITY
            )));
        }

        let int_value: u64 = if int_part.is_empty() {
            0
        } else {
            parse_digits(int_part, s)?
        };

        // Right-pad to exactly 6 digits: "34" -> "340000".
        let frac_value: u64 = if frac_part.is_empty() {
            0
        } else {
            let padded = parse_digits(frac_part, s)?;
            padded * 10u64.pow(DIVISIBILITY - frac_part.len() as u32)
        };

        int_value
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac_value))
            .map(Amount)
            .ok_or_else(|| LedgerError::InvalidAmount(format!("'{}' overflows the amount range", s)))
    }

    /// Render the scaled amount as a decimal string.
    ///
    /// Trailing fractional zeros are stripped; a whole number is emitted
    /// without a decimal point.
    pub fn to_decimal_string(self) -> String {
        let int_part = self.0 / SCALE;
        let frac_part = self.0 % SCALE;

        if frac_part == 0 {
            return int_part.to_string();
        }

        let frac = format!("{:06}", frac_part);
        let frac = frac.trim_end_matches('0');
        format!("{}.{}", int_part, frac)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

fn parse_digits(part: &str, whole: &str) -> LedgerResult<u64> {
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::InvalidAmount(format!("malformed amount '{}'", whole)));
    }
    part.parse::<u64>()
        .map_err(|_| LedgerError::InvalidAmount(format!("'{}' overflows the amount range", whole)))
}
