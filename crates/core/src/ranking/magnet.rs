//! Info-hash extraction from magnet-style references.

use once_cell::sync::Lazy;
use regex_lite::{Regex, RegexBuilder};

/// `btih:` followed by the 40 hex-char info-hash.
static BTIH_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"btih:([a-f0-9]{40})")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// Extract the 40-character hexadecimal info-hash from a magnet reference,
/// normalized to uppercase. Returns `None` for anything that does not carry
/// one.
pub fn extract_info_hash(magnet: &str) -> Option<String> {
    BTIH_RE
        .captures(magnet)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}
