//! Multi-factor scoring of accepted candidates.
//!
//! Each signal is computed independently and summed raw; large negative
//! weights are intentional hard penalties (a CAM marker is meant to sink a
//! release below everything clean). The breakdown lists every non-zero
//! contribution in a fixed order so the explanation is reproducible from
//! the same inputs and configuration.

use chrono::{DateTime, Utc};
use regex_lite::RegexBuilder;

use crate::config::{CompiledHeuristics, TrustTables, Weights};

use super::types::{
    AuxiliaryData, CandidateRelease, MediaDescriptor, ScoreContribution, ScoredRelease,
};

// Fake-entry heuristic: implausibly many seeders with near-zero peers
const SUSPICIOUS_SEEDERS: u32 = 5000;
const SUSPICIOUS_MAX_PEERS: u32 = 10;
const SUSPICIOUS_PENALTY: i64 = 2000;

/// Healthy peer/seeder ratio required for the seeders trust boost.
const TRUST_PEER_RATIO: f64 = 0.05;

/// Deterministic tiebreaker cap.
const TITLE_LENGTH_CAP: i64 = 100;

/// Computes score breakdowns for accepted candidates.
///
/// Borrows the configuration for one ranking pass; holds no per-candidate
/// state.
pub struct Scorer<'a> {
    weights: &'a Weights,
    trust: &'a TrustTables,
    heuristics: &'a CompiledHeuristics,
}

impl<'a> Scorer<'a> {
    pub fn new(
        weights: &'a Weights,
        trust: &'a TrustTables,
        heuristics: &'a CompiledHeuristics,
    ) -> Self {
        Self {
            weights,
            trust,
            heuristics,
        }
    }

    /// Score one candidate. Deterministic given the same candidate, target,
    /// configuration, auxiliary sets and `now`.
    pub fn score(
        &self,
        candidate: CandidateRelease,
        target: &MediaDescriptor,
        aux: &AuxiliaryData,
        now: DateTime<Utc>,
    ) -> ScoredRelease {
        let mut total: i64 = 0;
        let mut breakdown: Vec<ScoreContribution> = Vec::new();
        let mut push = |breakdown: &mut Vec<ScoreContribution>,
                        total: &mut i64,
                        factor: &str,
                        value: i64,
                        always: bool| {
            if value != 0 || always {
                *total += value;
                breakdown.push(ScoreContribution::new(factor, value));
            }
        };

        let title = candidate.title.as_str();

        push(&mut breakdown, &mut total, "language", self.language_score(title), false);
        push(&mut breakdown, &mut total, "quality", self.quality_score(title), false);
        // Seeders contribution is always listed, even at zero
        push(&mut breakdown, &mut total, "seeders", self.seeders_score(&candidate), true);
        push(&mut breakdown, &mut total, "source_trust", self.source_trust(&candidate), false);
        push(
            &mut breakdown,
            &mut total,
            "group_reputation",
            self.group_reputation(&candidate),
            false,
        );
        push(&mut breakdown, &mut total, "age", self.age_score(&candidate, now), false);
        push(
            &mut breakdown,
            &mut total,
            "freshness",
            self.freshness_bonus(&candidate, now),
            false,
        );
        push(
            &mut breakdown,
            &mut total,
            "episode",
            self.episode_score(title, target),
            false,
        );
        push(&mut breakdown, &mut total, "cam", self.cam_penalty(title), false);
        push(&mut breakdown, &mut total, "size", self.size_penalty(&candidate), false);
        push(
            &mut breakdown,
            &mut total,
            "known_hash",
            self.known_hash_bonus(&candidate, aux),
            false,
        );
        push(
            &mut breakdown,
            &mut total,
            "user_reports",
            self.user_report_penalty(&candidate, aux),
            false,
        );

        let tiebreak = (title.chars().count() as i64).min(TITLE_LENGTH_CAP);
        push(&mut breakdown, &mut total, "title_length", tiebreak, false);

        ScoredRelease {
            release: candidate,
            score: total,
            breakdown,
        }
    }

    /// Strongest Italian-language match wins, else multi-language, else 0.
    fn language_score(&self, title: &str) -> i64 {
        if self.heuristics.ita.iter().any(|p| p.is_match(title)) {
            return self.weights.language_ita;
        }
        if self.heuristics.multi.iter().any(|p| p.is_match(title)) {
            return self.weights.language_multi;
        }
        0
    }

    fn quality_score(&self, title: &str) -> i64 {
        if self.heuristics.quality_4k.is_match(title) {
            return self.weights.quality_4k;
        }
        if self.heuristics.quality_1080p.is_match(title) {
            return self.weights.quality_1080p;
        }
        0
    }

    /// Logarithmic seed health with a trust boost for healthy swarms and a
    /// penalty for suspicious seeder/peer shapes.
    fn seeders_score(&self, candidate: &CandidateRelease) -> i64 {
        let seeders = candidate.seeders;
        let peers = candidate.peers;

        let mut base = 0.0;
        if seeders > 0 {
            base = (f64::from(seeders) + 1.0).log10() * self.weights.seeders_factor * 100.0;
        }

        let mut score = base.round() as i64;
        let peer_ratio = f64::from(peers) / (f64::from(seeders) + 1.0);
        if seeders > self.weights.seeders_trust_threshold && peer_ratio > TRUST_PEER_RATIO {
            score += self.weights.seeders_trust_boost;
        }
        if seeders > SUSPICIOUS_SEEDERS && peers < SUSPICIOUS_MAX_PEERS {
            score -= SUSPICIOUS_PENALTY;
        }
        score
    }

    fn source_trust(&self, candidate: &CandidateRelease) -> i64 {
        let Some(source) = candidate.source.as_deref() else {
            return 0;
        };
        let trust = self.trust.source_trust.get(source).copied().unwrap_or(0.0);
        (trust * 1000.0).round() as i64
    }

    fn group_reputation(&self, candidate: &CandidateRelease) -> i64 {
        let Some(group) = candidate.group.as_deref() else {
            return 0;
        };
        let reputation = self
            .trust
            .group_reputation
            .get(group)
            .copied()
            .unwrap_or(0.0);
        (reputation * self.weights.group_reputation_factor * 1000.0).round() as i64
    }

    /// Publication timestamp, or the age-in-seconds fallback when the
    /// source reports only an age.
    fn published_at(&self, candidate: &CandidateRelease, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if let Some(published) = candidate.published {
            return Some(published);
        }
        candidate
            .age_seconds
            .and_then(|secs| now.checked_sub_signed(chrono::Duration::seconds(secs)))
    }

    fn age_score(&self, candidate: &CandidateRelease, now: DateTime<Utc>) -> i64 {
        let Some(published) = self.published_at(candidate, now) else {
            return 0;
        };
        let days = (now - published).num_days().max(0);
        self.weights.age_decay_per_day * days
    }

    /// Flat bonus for very recent publications. Requires a real timestamp;
    /// the age-seconds fallback does not qualify.
    fn freshness_bonus(&self, candidate: &CandidateRelease, now: DateTime<Utc>) -> i64 {
        let Some(published) = candidate.published else {
            return 0;
        };
        let hours = (now - published).num_hours();
        if hours < self.weights.freshness_boost_hours {
            self.weights.freshness_boost_value
        } else {
            0
        }
    }

    /// Exact-episode boost / season-pack penalty, recomputed independently
    /// of the acceptance decision.
    fn episode_score(&self, title: &str, target: &MediaDescriptor) -> i64 {
        let Some((season, episode)) = target.episode_target() else {
            return 0;
        };

        // Built per target, not per candidate; a build failure only costs
        // this contribution
        let exact = RegexBuilder::new(&format!("s{season:02}[^0-9]*e{episode:02}"))
            .case_insensitive(true)
            .build();
        let shorthand = RegexBuilder::new(&format!("{season}x{episode:02}"))
            .case_insensitive(true)
            .build();

        let exact_hit = exact.map(|re| re.is_match(title)).unwrap_or(false);
        let shorthand_hit = shorthand.map(|re| re.is_match(title)).unwrap_or(false);
        if exact_hit || shorthand_hit {
            return self.weights.exact_episode_boost;
        }
        if self.heuristics.pack.is_match(title) {
            return self.weights.pack_penalty;
        }
        0
    }

    fn cam_penalty(&self, title: &str) -> i64 {
        if self.heuristics.cam.is_match(title) {
            self.weights.cam_penalty
        } else {
            0
        }
    }

    /// Implausible-size penalty: below the minimal threshold, or a season
    /// pack far too small to actually hold a season.
    fn size_penalty(&self, candidate: &CandidateRelease) -> i64 {
        let size = candidate.size_bytes();
        if size == 0 {
            return 0;
        }
        if size < self.heuristics.min_size_bytes {
            return self.weights.size_mismatch_penalty;
        }
        if self.heuristics.pack.is_match(&candidate.title) && size < self.heuristics.min_pack_size_bytes
        {
            return self.weights.size_mismatch_penalty;
        }
        0
    }

    fn known_hash_bonus(&self, candidate: &CandidateRelease, aux: &AuxiliaryData) -> i64 {
        if aux.is_verified(candidate) {
            self.weights.hash_known_bonus
        } else {
            0
        }
    }

    fn user_report_penalty(&self, candidate: &CandidateRelease, aux: &AuxiliaryData) -> i64 {
        match aux.report_for(candidate) {
            Some(report) if report.reports > 0 => {
                (self.weights.user_report_penalty as f64 * report.severity).round() as i64
            }
            _ => 0,
        }
    }
}
