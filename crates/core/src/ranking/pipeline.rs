//! End-to-end ranking pipeline.
//!
//! Owns the full pass over raw listings: drop invalid entries, collapse
//! duplicates, filter through the match engine, gate implausible sizes,
//! score and sort. Candidate-level problems never abort the pass; a bad
//! candidate costs itself, not its neighbours.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::config::{validate_config, CompiledHeuristics, Config, ConfigError};
use crate::matcher::{MatchEngine, MatchVerdict, SimilarityScorer};

use super::dedup::deduplicate;
use super::score::Scorer;
use super::types::{AuxiliaryData, CandidateRelease, MediaDescriptor, ScoredRelease};

/// The ranking engine, built once from validated configuration and reused
/// across queries. Holds no per-query state; one engine can serve
/// concurrent callers behind a shared reference.
pub struct RankingEngine {
    config: Config,
    heuristics: CompiledHeuristics,
    matcher: MatchEngine,
}

impl RankingEngine {
    /// Build an engine from configuration. Validates the numeric ranges and
    /// compiles every heuristic pattern up front, so a bad pattern fails
    /// here instead of mid-query.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        validate_config(&config)?;
        let heuristics = config.heuristics.compile()?;
        let matcher = MatchEngine::new(
            config.thresholds.clone(),
            config.heuristics.sample_markers.clone(),
        );
        Ok(Self {
            config,
            heuristics,
            matcher,
        })
    }

    /// Swap the fuzzy similarity backend used by the match engine.
    pub fn with_scorer(mut self, scorer: Box<dyn SimilarityScorer>) -> Self {
        self.matcher = self.matcher.with_scorer(scorer);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline for one target.
    ///
    /// Returns accepted candidates sorted by descending score; equal scores
    /// keep their post-dedup relative order. `now` is the single time
    /// reference for the whole pass, so repeated calls with the same inputs
    /// produce identical output.
    pub fn rank(
        &self,
        target: &MediaDescriptor,
        candidates: Vec<CandidateRelease>,
        aux: &AuxiliaryData,
        now: DateTime<Utc>,
    ) -> Vec<ScoredRelease> {
        let total = candidates.len();
        let candidates = deduplicate(candidates);
        let after_dedup = candidates.len();

        let scorer = Scorer::new(&self.config.weights, &self.config.trust, &self.heuristics);
        let mut scored: Vec<ScoredRelease> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.matcher.evaluate(target, &candidate.title) {
                MatchVerdict::Accept => {}
                MatchVerdict::Reject(reason) => {
                    trace!(title = %candidate.title, ?reason, "rejected candidate");
                    continue;
                }
            }
            if !self.plausible_size(&candidate) {
                trace!(
                    title = %candidate.title,
                    size = candidate.size_bytes(),
                    "dropped candidate with implausible size"
                );
                continue;
            }
            scored.push(scorer.score(candidate, target, aux, now));
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(
            query = %target.title,
            total,
            deduplicated = total - after_dedup,
            accepted = scored.len(),
            "ranking pass complete"
        );
        scored
    }

    /// Structural size gate. A reported size below the minimum is junk, not
    /// merely penalized; absent/unparsable sizes (0) pass through and take
    /// their chances with the scorer.
    fn plausible_size(&self, candidate: &CandidateRelease) -> bool {
        let size = candidate.size_bytes();
        size == 0 || size >= self.heuristics.min_size_bytes
    }
}
