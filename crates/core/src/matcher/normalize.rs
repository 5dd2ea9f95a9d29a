//! Title normalization and tokenization.
//!
//! Canonicalizes free-text release titles into a comparable form: lowercase,
//! diacritics stripped, punctuation flattened to spaces, Roman numeral tokens
//! converted to Arabic. Tokenization then applies two contextual filter sets:
//! a junk set (technical release tags, candidate side only) and a stop-word
//! set (linguistic filler, both sides).

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Technical release tags, removed from candidate tokens only.
static JUNK_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "h264", "x264", "h265", "x265", "hevc", "1080p", "720p", "4k", "2160p", "hdr", "web",
        "dl", "bluray", "rip", "ita", "eng", "multi", "sub", "ac3", "aac", "mkv", "mp4", "avi",
        "divx", "xvid", "dts", "truehd", "atmos", "vision", "repack", "remux", "proper",
        "complete", "pack", "uhd", "sdr", "season", "stagione", "episode", "episodio", "cam",
        "ts", "hdtv", "amzn", "dsnp", "nf", "series", "vol",
    ])
});

/// Linguistic filler, removed from both query and candidate tokens.
///
/// Includes "it" so a franchise prefix like "IT: Welcome to Derry" compares
/// equal to "Welcome to Derry".
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "il", "lo", "la", "i", "gli", "le", "un", "uno", "una", "the", "a", "an", "of", "in",
        "on", "at", "to", "for", "by", "with", "and", "it", "chapter", "capitolo",
    ])
});

/// Sequel/reboot markers that must not appear in a candidate unless the
/// query itself asked for them. Multi-word franchise markers are handled by
/// the spinoff guard instead.
static FORBIDDEN_EXPANSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "new",
        "blood",
        "resurrection",
        "returns",
        "reborn",
        "origins",
        "legacy",
        "revival",
        "sequel",
        "redemption",
        "evolution",
    ])
});

/// Roman numeral tokens eligible for Arabic conversion. Single `i` and `v`
/// are deliberately excluded as too ambiguous in titles.
const ROMAN_TOKENS: &[&str] = &["ii", "iii", "iv", "vi", "vii", "viii", "ix", "x"];

/// Canonicalize a title: lowercase, strip diacritics (NFD), flatten
/// punctuation and symbols to spaces, convert Roman numeral tokens, collapse
/// whitespace.
///
/// Idempotent: normalizing an already-normalized string returns it
/// unchanged. Never fails; empty input yields an empty string.
pub fn normalize_title(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let flattened: String = stripped
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    flattened
        .split_whitespace()
        .map(convert_roman_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a title into normalized non-empty tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    normalize_title(input)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Tokens of a query title with stop words removed.
pub fn query_tokens(title: &str) -> Vec<String> {
    tokenize(title)
        .into_iter()
        .filter(|t| !STOP_WORDS.contains(t.as_str()))
        .collect()
}

/// Tokens of a candidate title with both junk tags and stop words removed.
pub fn candidate_tokens(title: &str) -> Vec<String> {
    tokenize(title)
        .into_iter()
        .filter(|t| !JUNK_TOKENS.contains(t.as_str()) && !STOP_WORDS.contains(t.as_str()))
        .collect()
}

/// Whether a token is a sequel/reboot marker.
pub fn is_forbidden_expansion(token: &str) -> bool {
    FORBIDDEN_EXPANSIONS.contains(token)
}

fn convert_roman_token(token: &str) -> String {
    if ROMAN_TOKENS.contains(&token) {
        roman_to_arabic(token).to_string()
    } else {
        token.to_string()
    }
}

/// Subtractive Roman numeral parse over i/v/x/l/c. Unknown characters count
/// as zero.
fn roman_to_arabic(s: &str) -> u32 {
    let value = |c: char| match c {
        'i' => 1,
        'v' => 5,
        'x' => 10,
        'l' => 50,
        'c' => 100,
        _ => 0,
    };

    let mut total: i64 = 0;
    let mut prev: i64 = 0;
    for c in s.chars().rev() {
        let val = value(c) as i64;
        if val < prev {
            total -= val;
        } else {
            total += val;
        }
        prev = val;
    }
    total.max(0) as u32
}
