//! Release size parsing.
//!
//! Sources report sizes as byte counts or as human strings in wildly
//! inconsistent formats ("1.4 GB", "700MB", "1,2 gb"). One explicit
//! function owns the conversion; unparsable input degrades to 0 bytes
//! (worst case for size-dependent penalties), never an error.

use once_cell::sync::Lazy;
use regex_lite::{Regex, RegexBuilder};

use super::types::ReleaseSize;

/// `<number> <unit>` with optional whitespace, decimal comma tolerated.
static SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"([\d,.]+)\s*(b|kb|mb|gb|tb)")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// Parse a reported size into bytes.
pub fn parse_size(size: &ReleaseSize) -> u64 {
    match size {
        ReleaseSize::Bytes(n) => *n,
        ReleaseSize::Text(s) => parse_size_str(s),
    }
}

/// Parse a human-readable size string into bytes.
///
/// Unit table (binary multiples): B=1, KB=1024, MB=1024², GB=1024³,
/// TB=1024⁴, case-insensitive. A decimal comma is read as a decimal point.
/// Without a recognized unit the numeric prefix is taken as a raw byte
/// count. Anything else parses to 0.
pub fn parse_size_str(input: &str) -> u64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if let Some(caps) = SIZE_RE.captures(trimmed) {
        let number = caps[1].replace(',', ".");
        let value: f64 = match number.parse() {
            Ok(v) => v,
            Err(_) => return 0,
        };
        let multiplier: f64 = match caps[2].to_lowercase().as_str() {
            "b" => 1.0,
            "kb" => 1024.0,
            "mb" => 1024.0 * 1024.0,
            "gb" => 1024.0 * 1024.0 * 1024.0,
            "tb" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
            _ => 1.0,
        };
        return round_to_bytes(value * multiplier);
    }

    // No unit: keep digits and dots, read as raw byte count
    let digits: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits
        .parse::<f64>()
        .map(round_to_bytes)
        .unwrap_or(0)
}

fn round_to_bytes(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}
