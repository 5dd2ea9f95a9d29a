//! Match decision engine: accept/reject verdicts for candidate releases.
//!
//! Strict on numbers, fuzzy on text: structural season/episode numbering
//! must agree exactly with the target, while titles are compared through
//! token overlap and pluggable string similarity. Ties and ambiguous partial
//! overlaps favor rejection; wrong content playable is worse than content
//! missing from results.

use tracing::trace;

use crate::config::Thresholds;
use crate::matcher::episode::{extract_episode, extract_season};
use crate::matcher::normalize::{
    candidate_tokens, is_forbidden_expansion, normalize_title, query_tokens,
};
use crate::matcher::similarity::{DiceScorer, SimilarityScorer};
use crate::matcher::spinoff::is_unwanted_spinoff;
use crate::ranking::MediaDescriptor;

/// Dominant reason a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Raw title is empty.
    MissingTitle,
    /// Sample/trailer/bonus marker in the raw title.
    JunkMarker,
    /// Candidate belongs to a sibling franchise the query did not ask for.
    Spinoff,
    /// Query title is empty after normalization and stop-filtering.
    EmptyQuery,
    /// Candidate carries a sequel/reboot marker absent from the query.
    ForbiddenExpansion,
    /// Structural season/episode numbers disagree with the target.
    EpisodeMismatch,
    /// Season-pack numbering disagrees with the target season.
    SeasonMismatch,
    /// Episodic target but the candidate carries no usable numbering.
    NoNumbering,
    /// Textual agreement below the configured thresholds.
    BelowThreshold,
}

/// Per-candidate accept/reject verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchVerdict {
    Accept,
    Reject(RejectReason),
}

impl MatchVerdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, MatchVerdict::Accept)
    }
}

/// Decides whether a loosely-labeled release actually corresponds to the
/// requested title/season/episode.
///
/// Stateless across candidates; every evaluation is independent.
pub struct MatchEngine {
    thresholds: Thresholds,
    /// Lowercased sample/trailer/bonus substrings.
    sample_markers: Vec<String>,
    scorer: Box<dyn SimilarityScorer>,
}

impl MatchEngine {
    pub fn new(thresholds: Thresholds, sample_markers: Vec<String>) -> Self {
        Self {
            thresholds,
            sample_markers,
            scorer: Box::new(DiceScorer),
        }
    }

    /// Swap the string-similarity backend. Thresholds are calibrated against
    /// the default scorer; recalibrate when changing it.
    pub fn with_scorer(mut self, scorer: Box<dyn SimilarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Evaluate one candidate title against the target descriptor.
    ///
    /// The descriptor's main title is tried first; textual rejections are
    /// retried against the original title when one is present. Numbering
    /// mismatches are final.
    pub fn evaluate(&self, target: &MediaDescriptor, candidate_title: &str) -> MatchVerdict {
        if candidate_title.is_empty() {
            return MatchVerdict::Reject(RejectReason::MissingTitle);
        }

        let raw_lower = candidate_title.to_lowercase();
        if self.sample_markers.iter().any(|m| raw_lower.contains(m)) {
            trace!(title = candidate_title, "rejected: junk marker");
            return MatchVerdict::Reject(RejectReason::JunkMarker);
        }

        let verdict = self.evaluate_title(&target.title, target, candidate_title);
        if verdict.is_accept() {
            return verdict;
        }

        if let (MatchVerdict::Reject(reason), Some(original)) =
            (verdict, target.original_title.as_deref())
        {
            let numbering_mismatch = matches!(
                reason,
                RejectReason::EpisodeMismatch
                    | RejectReason::SeasonMismatch
                    | RejectReason::NoNumbering
            );
            if !numbering_mismatch && original != target.title {
                return self.evaluate_title(original, target, candidate_title);
            }
        }

        trace!(title = candidate_title, ?verdict, "rejected");
        verdict
    }

    fn evaluate_title(
        &self,
        query_title: &str,
        target: &MediaDescriptor,
        candidate_title: &str,
    ) -> MatchVerdict {
        let clean_query = normalize_title(query_title);
        let clean_candidate = normalize_title(candidate_title);

        if is_unwanted_spinoff(&clean_query, &clean_candidate) {
            return MatchVerdict::Reject(RejectReason::Spinoff);
        }

        let m_tokens = query_tokens(query_title);
        if m_tokens.is_empty() {
            // Matching against nothing matches nothing
            return MatchVerdict::Reject(RejectReason::EmptyQuery);
        }
        let f_tokens = candidate_tokens(candidate_title);

        // A base title must not match an unrelated sequel/reboot release
        let query_is_clean = !m_tokens.iter().any(|t| is_forbidden_expansion(t));
        if query_is_clean && f_tokens.iter().any(|t| is_forbidden_expansion(t)) {
            return MatchVerdict::Reject(RejectReason::ForbiddenExpansion);
        }

        let joined_query = m_tokens.join(" ");
        let joined_candidate = f_tokens.join(" ");

        if let Some((season, episode)) = target.episode_target() {
            // Episodic branch: numbers are law, text is advisory
            if let Some(info) = extract_episode(candidate_title) {
                if info.season != season || info.episode != episode {
                    return MatchVerdict::Reject(RejectReason::EpisodeMismatch);
                }

                let overlap = query_token_overlap(&m_tokens, &f_tokens);
                if overlap >= self.thresholds.episode_token_overlap {
                    return MatchVerdict::Accept;
                }

                let similarity = self.scorer.similarity(&joined_query, &joined_candidate);
                if similarity > self.thresholds.fuzzy_accept {
                    return MatchVerdict::Accept;
                }
                return MatchVerdict::Reject(RejectReason::BelowThreshold);
            }

            if let Some(found_season) = extract_season(candidate_title) {
                if found_season != season {
                    return MatchVerdict::Reject(RejectReason::SeasonMismatch);
                }
                // Packs carry no episode number to corroborate, so the title
                // must pass the stricter bar
                let similarity = self.scorer.similarity(&joined_query, &joined_candidate);
                if similarity > self.thresholds.fuzzy_strict {
                    return MatchVerdict::Accept;
                }
                return MatchVerdict::Reject(RejectReason::BelowThreshold);
            }

            // An episodic target cannot be satisfied by an undated release
            return MatchVerdict::Reject(RejectReason::NoNumbering);
        }

        // Non-episodic branch: movie, or series without concrete numbering
        let similarity = self.scorer.similarity(&joined_query, &joined_candidate);
        if similarity > self.thresholds.fuzzy_strict {
            return MatchVerdict::Accept;
        }

        let ratio = candidate_token_ratio(&m_tokens, &f_tokens);
        if ratio >= self.thresholds.movie_token_overlap {
            return MatchVerdict::Accept;
        }

        MatchVerdict::Reject(RejectReason::BelowThreshold)
    }
}

/// Fraction of query tokens found (substring in either direction) among the
/// candidate tokens.
///
/// Query tokens shorter than 3 chars are abbreviation noise ("Dr", "MD") and
/// are excluded from the denominator, unless nothing longer survives.
fn query_token_overlap(m_tokens: &[String], f_tokens: &[String]) -> f64 {
    let significant: Vec<&String> = m_tokens.iter().filter(|t| t.len() >= 3).collect();
    let effective: Vec<&String> = if significant.is_empty() {
        m_tokens.iter().collect()
    } else {
        significant
    };
    if effective.is_empty() {
        return 0.0;
    }

    let matched = effective
        .iter()
        .filter(|mt| {
            f_tokens
                .iter()
                .any(|ft| ft.contains(mt.as_str()) || mt.contains(ft.as_str()))
        })
        .count();

    matched as f64 / effective.len() as f64
}

/// Fraction of candidate tokens found in the query token set: exact
/// equality, or substring containment when the query token is longer than
/// 3 chars.
///
/// Short candidate tokens and release-year tokens absent from the query are
/// labeling noise, not title content, and are excluded from the denominator.
fn candidate_token_ratio(m_tokens: &[String], f_tokens: &[String]) -> f64 {
    let effective: Vec<&String> = f_tokens
        .iter()
        .filter(|t| t.len() >= 3 && !(is_year_token(t) && !m_tokens.contains(t)))
        .collect();
    let effective: Vec<&String> = if effective.is_empty() {
        f_tokens.iter().collect()
    } else {
        effective
    };
    if effective.is_empty() {
        return 0.0;
    }

    let found = effective
        .iter()
        .filter(|ft| {
            m_tokens
                .iter()
                .any(|mt| mt == **ft || (mt.len() > 3 && ft.contains(mt.as_str())))
        })
        .count();

    found as f64 / effective.len() as f64
}

fn is_year_token(token: &str) -> bool {
    token.len() == 4
        && (token.starts_with("19") || token.starts_with("20"))
        && token.chars().all(|c| c.is_ascii_digit())
}
