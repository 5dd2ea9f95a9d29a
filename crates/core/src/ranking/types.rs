//! Types for the release ranking system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::magnet::extract_info_hash;
use super::size::parse_size;

/// The query target: what the caller is actually looking for.
///
/// Immutable for the duration of one matching pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Display title.
    pub title: String,
    /// Original-language title, tried as a fallback for textual matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// Release year, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Whether the target is episodic.
    pub is_series: bool,
    /// Season number, meaningful only when `is_series`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    /// Episode number, meaningful only when `is_series`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
}

impl MediaDescriptor {
    /// A movie target.
    pub fn movie(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            original_title: None,
            year: None,
            is_series: false,
            season: None,
            episode: None,
        }
    }

    /// A specific episode of a series.
    pub fn episode(title: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            title: title.into(),
            original_title: None,
            year: None,
            is_series: true,
            season: Some(season),
            episode: Some(episode),
        }
    }

    /// Concrete season/episode numbers when the target is episodic.
    pub fn episode_target(&self) -> Option<(u32, u32)> {
        if self.is_series {
            Some((self.season?, self.episode?))
        } else {
            None
        }
    }
}

/// Release size as reported by a source: either a byte count or a
/// pre-formatted human string ("1.4 GB").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseSize {
    Bytes(u64),
    Text(String),
}

/// A torrent-style release listing gathered from a third-party source.
///
/// At least one of `magnet`/`url` is required; candidates lacking both are
/// invalid and dropped. Everything else is optional and noisy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRelease {
    /// Raw title/filename as reported by the source.
    pub title: String,
    /// Magnet-style reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet: Option<String>,
    /// Direct URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Reported size, human string or byte count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ReleaseSize>,
    /// Seeder count.
    #[serde(default)]
    pub seeders: u32,
    /// Peer/leecher count.
    #[serde(default)]
    pub peers: u32,
    /// Free-text name of the origin source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Release-group label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Publication timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    /// Age in seconds, a fallback when the source reports no timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<i64>,
    /// 40 hex-char content hash, when not derivable from the magnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl CandidateRelease {
    /// Minimal valid candidate with a magnet reference. Test/builder helper.
    pub fn new(title: impl Into<String>, magnet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            magnet: Some(magnet.into()),
            url: None,
            size: None,
            seeders: 0,
            peers: 0,
            source: None,
            group: None,
            published: None,
            age_seconds: None,
            hash: None,
        }
    }

    /// The locator for this release: magnet first, direct URL otherwise.
    pub fn reference(&self) -> Option<&str> {
        self.magnet.as_deref().or(self.url.as_deref())
    }

    /// Uppercase 40-hex info-hash: the explicit field when present, else
    /// extracted from the magnet reference.
    pub fn info_hash(&self) -> Option<String> {
        if let Some(h) = &self.hash {
            if h.len() == 40 && h.chars().all(|c| c.is_ascii_hexdigit()) {
                return Some(h.to_uppercase());
            }
        }
        self.magnet.as_deref().and_then(extract_info_hash)
    }

    /// Parsed size in bytes; 0 when absent or unparsable (worst case for
    /// size-dependent penalties).
    pub fn size_bytes(&self) -> u64 {
        self.size.as_ref().map(parse_size).unwrap_or(0)
    }
}

/// One named contribution to a candidate's total score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreContribution {
    /// Signal name ("language", "seeders", "cam", ...).
    pub factor: String,
    pub value: i64,
}

impl ScoreContribution {
    pub fn new(factor: &str, value: i64) -> Self {
        Self {
            factor: factor.to_string(),
            value,
        }
    }
}

/// An accepted candidate with its total score and explanation.
///
/// The breakdown is reproducible from the same inputs and configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRelease {
    pub release: CandidateRelease,
    /// Raw sum of all contributions, unclamped.
    pub score: i64,
    /// Ordered list of (factor, contribution) pairs.
    pub breakdown: Vec<ScoreContribution>,
}

/// A user report entry against a release.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserReport {
    /// Number of reports filed.
    pub reports: u32,
    /// Severity multiplier on the report penalty.
    pub severity: f64,
}

/// Caller-owned auxiliary sets, read-only for the duration of a call.
#[derive(Debug, Clone, Default)]
pub struct AuxiliaryData {
    /// Uppercase info-hashes previously verified as good content.
    pub verified_hashes: HashSet<String>,
    /// Report registry keyed by uppercase info-hash or raw reference.
    pub user_reports: HashMap<String, UserReport>,
}

impl AuxiliaryData {
    /// Whether the candidate's hash is in the verified set
    /// (case-insensitive).
    pub fn is_verified(&self, release: &CandidateRelease) -> bool {
        release
            .info_hash()
            .map(|h| self.verified_hashes.contains(&h))
            .unwrap_or(false)
    }

    /// Report entry for the candidate, looked up by hash then by reference.
    pub fn report_for(&self, release: &CandidateRelease) -> Option<&UserReport> {
        if let Some(h) = release.info_hash() {
            if let Some(report) = self.user_reports.get(&h) {
                return Some(report);
            }
        }
        release.reference().and_then(|r| self.user_reports.get(r))
    }
}
