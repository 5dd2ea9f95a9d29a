//! Pluggable string-similarity scorers.
//!
//! The match decision engine only needs a narrow capability: two
//! filtered/normalized token sequences rejoined into single strings in,
//! similarity in [0, 1] out. The concrete algorithm is swappable behind
//! [`SimilarityScorer`]; the acceptance thresholds in the configuration are
//! calibrated against the default bigram scorer.

/// String similarity in [0, 1], symmetric enough in practice that swapping
/// arguments does not change threshold decisions.
pub trait SimilarityScorer: Send + Sync {
    /// Scorer name for logging.
    fn name(&self) -> &str;

    /// Similarity between two normalized strings.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Sørensen–Dice coefficient over character bigrams. The default scorer:
/// tolerant of token reordering and minor spelling drift, which is what
/// release titles need.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiceScorer;

impl SimilarityScorer for DiceScorer {
    fn name(&self) -> &str {
        "sorensen-dice"
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return if a == b { 1.0 } else { 0.0 };
        }
        strsim::sorensen_dice(a, b)
    }
}

/// Jaro-Winkler similarity. Favors shared prefixes; an alternative when
/// titles are short and packs of bigrams get too sparse.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerScorer;

impl SimilarityScorer for JaroWinklerScorer {
    fn name(&self) -> &str {
        "jaro-winkler"
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return if a == b { 1.0 } else { 0.0 };
        }
        strsim::jaro_winkler(a, b)
    }
}
