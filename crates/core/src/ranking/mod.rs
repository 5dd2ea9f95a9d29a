//! Release ranking - turning accepted candidates into an ordered list.
//!
//! - [`types`]: target descriptor, candidate listings, scored output
//! - [`size`]: human size-string parsing
//! - [`magnet`]: info-hash extraction
//! - [`dedup`]: identity-based duplicate collapse
//! - [`score`]: the multi-factor scoring signals
//! - [`pipeline`]: the full dedup/match/gate/score/sort pass
//!
//! Scores are raw weighted sums, not probabilities; only their relative
//! order within one pass is meaningful.

pub mod dedup;
pub mod magnet;
pub mod pipeline;
pub mod score;
pub mod size;
pub mod types;

pub use dedup::deduplicate;
pub use magnet::extract_info_hash;
pub use pipeline::RankingEngine;
pub use score::Scorer;
pub use size::{parse_size, parse_size_str};
pub use types::{
    AuxiliaryData, CandidateRelease, MediaDescriptor, ReleaseSize, ScoreContribution,
    ScoredRelease, UserReport,
};
