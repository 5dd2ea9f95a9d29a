//! Title matching - deciding whether a release is the requested media.
//!
//! This module reconciles noisy, inconsistent release titles (multiple
//! languages, abbreviations, punctuation, release-group tags) against the
//! structured target descriptor:
//!
//! - [`normalize`]: canonical text form, tokenization, junk/stop filtering
//! - [`episode`]: structural `SxxEyy` / `NxM` / localized numbering
//! - [`spinoff`]: sibling-franchise rejection
//! - [`similarity`]: pluggable fuzzy string scorers
//! - [`engine`]: the combined accept/reject decision
//!
//! All of it is pure and per-candidate; no state is shared across
//! evaluations.

pub mod engine;
pub mod episode;
pub mod normalize;
pub mod similarity;
pub mod spinoff;

pub use engine::{MatchEngine, MatchVerdict, RejectReason};
pub use episode::{extract_episode, extract_season, EpisodeInfo};
pub use normalize::{candidate_tokens, normalize_title, query_tokens, tokenize};
pub use similarity::{DiceScorer, JaroWinklerScorer, SimilarityScorer};
pub use spinoff::is_unwanted_spinoff;
