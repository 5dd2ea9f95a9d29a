use regex_lite::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ConfigError;

/// Root configuration for the matching and ranking engine.
///
/// Every section has documented defaults, so a partial configuration
/// (TOML/env) deep-merges against `Config::default()` instead of failing.
/// The value is immutable for the duration of one ranking pass.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub heuristics: Heuristics,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub trust: TrustTables,
}

/// Per-signal scoring weights.
///
/// Magnitudes are empirically tuned; large negative values are intentional
/// hard penalties. Contributions are raw sums, never clamped.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Weights {
    /// Bonus for an Italian-language marker in the title.
    #[serde(default = "default_language_ita")]
    pub language_ita: i64,
    /// Bonus for a multi-language marker in the title.
    #[serde(default = "default_language_multi")]
    pub language_multi: i64,
    /// Bonus for a 4K/UHD marker.
    #[serde(default = "default_quality_4k")]
    pub quality_4k: i64,
    /// Bonus for a 1080p marker.
    #[serde(default = "default_quality_1080p")]
    pub quality_1080p: i64,
    /// Bonus when structural season/episode numbering matches the target.
    #[serde(default = "default_exact_episode_boost")]
    pub exact_episode_boost: i64,
    /// Penalty when the title reads as a season pack instead.
    #[serde(default = "default_pack_penalty")]
    pub pack_penalty: i64,
    /// Penalty for camcorder/telesync markers. Large enough to outrank
    /// almost every positive signal.
    #[serde(default = "default_cam_penalty")]
    pub cam_penalty: i64,
    /// Multiplier on the logarithmic seeders score.
    #[serde(default = "default_seeders_factor")]
    pub seeders_factor: f64,
    /// Flat bonus for well-seeded entries with a healthy peer ratio.
    #[serde(default = "default_seeders_trust_boost")]
    pub seeders_trust_boost: i64,
    /// Seeder count above which the trust boost applies.
    #[serde(default = "default_seeders_trust_threshold")]
    pub seeders_trust_threshold: u32,
    /// Score delta per elapsed day since publication (negative).
    #[serde(default = "default_age_decay_per_day")]
    pub age_decay_per_day: i64,
    /// Penalty for implausible sizes (below minimum, or tiny season packs).
    #[serde(default = "default_size_mismatch_penalty")]
    pub size_mismatch_penalty: i64,
    /// Bonus when the info-hash is in the caller-supplied verified set.
    #[serde(default = "default_hash_known_bonus")]
    pub hash_known_bonus: i64,
    /// Multiplier on release-group reputation.
    #[serde(default = "default_group_reputation_factor")]
    pub group_reputation_factor: f64,
    /// Penalty per user-report registry hit, scaled by severity.
    #[serde(default = "default_user_report_penalty")]
    pub user_report_penalty: i64,
    /// Publication recency window for the freshness bonus, in hours.
    #[serde(default = "default_freshness_boost_hours")]
    pub freshness_boost_hours: i64,
    /// Flat bonus when published within the freshness window.
    #[serde(default = "default_freshness_boost_value")]
    pub freshness_boost_value: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            language_ita: default_language_ita(),
            language_multi: default_language_multi(),
            quality_4k: default_quality_4k(),
            quality_1080p: default_quality_1080p(),
            exact_episode_boost: default_exact_episode_boost(),
            pack_penalty: default_pack_penalty(),
            cam_penalty: default_cam_penalty(),
            seeders_factor: default_seeders_factor(),
            seeders_trust_boost: default_seeders_trust_boost(),
            seeders_trust_threshold: default_seeders_trust_threshold(),
            age_decay_per_day: default_age_decay_per_day(),
            size_mismatch_penalty: default_size_mismatch_penalty(),
            hash_known_bonus: default_hash_known_bonus(),
            group_reputation_factor: default_group_reputation_factor(),
            user_report_penalty: default_user_report_penalty(),
            freshness_boost_hours: default_freshness_boost_hours(),
            freshness_boost_value: default_freshness_boost_value(),
        }
    }
}

fn default_language_ita() -> i64 {
    5000
}
fn default_language_multi() -> i64 {
    3000
}
fn default_quality_4k() -> i64 {
    1200
}
fn default_quality_1080p() -> i64 {
    800
}
fn default_exact_episode_boost() -> i64 {
    5000
}
fn default_pack_penalty() -> i64 {
    -2000
}
fn default_cam_penalty() -> i64 {
    -10000
}
fn default_seeders_factor() -> f64 {
    1.0
}
fn default_seeders_trust_boost() -> i64 {
    200
}
fn default_seeders_trust_threshold() -> u32 {
    50
}
fn default_age_decay_per_day() -> i64 {
    -2
}
fn default_size_mismatch_penalty() -> i64 {
    -1500
}
fn default_hash_known_bonus() -> i64 {
    2500
}
fn default_group_reputation_factor() -> f64 {
    1.0
}
fn default_user_report_penalty() -> i64 {
    -4000
}
fn default_freshness_boost_hours() -> i64 {
    48
}
fn default_freshness_boost_value() -> i64 {
    500
}

/// Declarative heuristic rule patterns.
///
/// Patterns are stored as strings so the matching/scoring behavior is data,
/// not code. They are compiled once per engine build (case-insensitively)
/// into a [`CompiledHeuristics`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Heuristics {
    /// Camcorder/telesync recording markers.
    #[serde(default = "default_cam_pattern")]
    pub cam_pattern: String,
    /// Season-pack markers.
    #[serde(default = "default_pack_pattern")]
    pub pack_pattern: String,
    /// Italian-language markers, strongest first.
    #[serde(default = "default_ita_patterns")]
    pub ita_patterns: Vec<String>,
    /// Multi-language markers.
    #[serde(default = "default_multi_patterns")]
    pub multi_patterns: Vec<String>,
    /// 4K/UHD quality markers.
    #[serde(default = "default_quality_4k_pattern")]
    pub quality_4k_pattern: String,
    /// 1080p quality markers.
    #[serde(default = "default_quality_1080p_pattern")]
    pub quality_1080p_pattern: String,
    /// Substrings that mark a release as sample/trailer/bonus junk.
    #[serde(default = "default_sample_markers")]
    pub sample_markers: Vec<String>,
    /// Releases smaller than this are implausible and dropped/penalized.
    #[serde(default = "default_min_size_bytes")]
    pub min_size_bytes: u64,
    /// Season packs smaller than this are implausible.
    #[serde(default = "default_min_pack_size_bytes")]
    pub min_pack_size_bytes: u64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            cam_pattern: default_cam_pattern(),
            pack_pattern: default_pack_pattern(),
            ita_patterns: default_ita_patterns(),
            multi_patterns: default_multi_patterns(),
            quality_4k_pattern: default_quality_4k_pattern(),
            quality_1080p_pattern: default_quality_1080p_pattern(),
            sample_markers: default_sample_markers(),
            min_size_bytes: default_min_size_bytes(),
            min_pack_size_bytes: default_min_pack_size_bytes(),
        }
    }
}

fn default_cam_pattern() -> String {
    r"\b(cam|ts|telecine|telesync|camrip)\b".to_string()
}
fn default_pack_pattern() -> String {
    r"\b(pack|complete|full ?season|season ?pack|stagione ?completa)\b".to_string()
}
fn default_ita_patterns() -> Vec<String> {
    vec![
        r"\b(ita|italian|it)\b".to_string(),
        r"\bsub.?ita\b|\bsottotitoli.?ita\b".to_string(),
        r"\bvo.?ita\b|\baud.?ita\b".to_string(),
    ]
}
fn default_multi_patterns() -> Vec<String> {
    vec![r"\b(multi|multilang|multilanguage|ita.eng)\b".to_string()]
}
fn default_quality_4k_pattern() -> String {
    r"2160p|4k|uhd".to_string()
}
fn default_quality_1080p_pattern() -> String {
    r"1080p".to_string()
}
fn default_sample_markers() -> Vec<String> {
    vec![
        "sample".to_string(),
        "trailer".to_string(),
        "bonus".to_string(),
    ]
}
fn default_min_size_bytes() -> u64 {
    512 * 1024
}
fn default_min_pack_size_bytes() -> u64 {
    50 * 1024 * 1024
}

/// Acceptance thresholds for the match decision engine.
///
/// Empirically tuned; calibrated against the default bigram similarity
/// scorer. Swapping the scorer means recalibrating these.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thresholds {
    /// Minimum query-token overlap for an exact-episode candidate.
    #[serde(default = "default_episode_token_overlap")]
    pub episode_token_overlap: f64,
    /// Minimum candidate-token ratio for the non-episodic branch.
    #[serde(default = "default_movie_token_overlap")]
    pub movie_token_overlap: f64,
    /// Fuzzy similarity fallback threshold (exact-episode candidates).
    #[serde(default = "default_fuzzy_accept")]
    pub fuzzy_accept: f64,
    /// Stricter fuzzy threshold (season packs, non-episodic titles).
    #[serde(default = "default_fuzzy_strict")]
    pub fuzzy_strict: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            episode_token_overlap: default_episode_token_overlap(),
            movie_token_overlap: default_movie_token_overlap(),
            fuzzy_accept: default_fuzzy_accept(),
            fuzzy_strict: default_fuzzy_strict(),
        }
    }
}

fn default_episode_token_overlap() -> f64 {
    0.6
}
fn default_movie_token_overlap() -> f64 {
    0.75
}
fn default_fuzzy_accept() -> f64 {
    0.8
}
fn default_fuzzy_strict() -> f64 {
    0.85
}

/// Reputation tables keyed by free-form source/group names.
///
/// Values are in [-1, 1] and scale to score contributions (×1000).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrustTables {
    #[serde(default = "default_source_trust")]
    pub source_trust: HashMap<String, f64>,
    #[serde(default = "default_group_reputation")]
    pub group_reputation: HashMap<String, f64>,
}

impl Default for TrustTables {
    fn default() -> Self {
        Self {
            source_trust: default_source_trust(),
            group_reputation: default_group_reputation(),
        }
    }
}

fn default_source_trust() -> HashMap<String, f64> {
    HashMap::from([
        ("Corsaro".to_string(), 0.9),
        ("1337x".to_string(), 0.7),
        ("ThePirateBay".to_string(), 0.7),
    ])
}

fn default_group_reputation() -> HashMap<String, f64> {
    HashMap::from([("YTS".to_string(), 0.9), ("RARBG".to_string(), 0.85)])
}

/// Heuristic patterns compiled for matching, built once per engine.
#[derive(Debug, Clone)]
pub struct CompiledHeuristics {
    pub cam: regex_lite::Regex,
    pub pack: regex_lite::Regex,
    pub ita: Vec<regex_lite::Regex>,
    pub multi: Vec<regex_lite::Regex>,
    pub quality_4k: regex_lite::Regex,
    pub quality_1080p: regex_lite::Regex,
    /// Lowercased junk substrings (sample/trailer/bonus).
    pub sample_markers: Vec<String>,
    pub min_size_bytes: u64,
    pub min_pack_size_bytes: u64,
}

impl Heuristics {
    /// Compile all rule patterns. Fails at engine construction, never
    /// per-candidate.
    pub fn compile(&self) -> Result<CompiledHeuristics, ConfigError> {
        Ok(CompiledHeuristics {
            cam: compile_pattern(&self.cam_pattern)?,
            pack: compile_pattern(&self.pack_pattern)?,
            ita: self
                .ita_patterns
                .iter()
                .map(|p| compile_pattern(p))
                .collect::<Result<_, _>>()?,
            multi: self
                .multi_patterns
                .iter()
                .map(|p| compile_pattern(p))
                .collect::<Result<_, _>>()?,
            quality_4k: compile_pattern(&self.quality_4k_pattern)?,
            quality_1080p: compile_pattern(&self.quality_1080p_pattern)?,
            sample_markers: self
                .sample_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            min_size_bytes: self.min_size_bytes,
            min_pack_size_bytes: self.min_pack_size_bytes,
        })
    }
}

fn compile_pattern(pattern: &str) -> Result<regex_lite::Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::InvalidPattern(pattern.to_string(), e.to_string()))
}
