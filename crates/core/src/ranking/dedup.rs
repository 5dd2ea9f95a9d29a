//! Deduplication of candidate releases by content identity.
//!
//! Multiple sources routinely list the same content. The identity key is
//! the 40-hex info-hash (case-insensitive) when one is present or derivable
//! from the magnet reference, else the raw reference string. The first
//! occurrence per key wins; later collisions are dropped. Runs in input
//! order so the result is deterministic.

use std::collections::HashSet;

use tracing::trace;

use super::types::CandidateRelease;

/// Identity key for a candidate. `None` for candidates with no reference at
/// all; those are invalid and filtered out before dedup runs.
fn identity_key(candidate: &CandidateRelease) -> Option<String> {
    if let Some(hash) = candidate.info_hash() {
        return Some(hash.to_lowercase());
    }
    candidate.reference().map(str::to_string)
}

/// Collapse candidates resolving to the same content identity, keeping the
/// first occurrence of each key.
pub fn deduplicate(candidates: Vec<CandidateRelease>) -> Vec<CandidateRelease> {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    let mut result = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match identity_key(&candidate) {
            Some(key) => {
                if seen.insert(key) {
                    result.push(candidate);
                } else {
                    trace!(title = %candidate.title, "dropped duplicate candidate");
                }
            }
            None => {
                trace!(title = %candidate.title, "dropped candidate without reference");
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const HASH_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn with_magnet(title: &str, hash: &str) -> CandidateRelease {
        CandidateRelease::new(title, format!("magnet:?xt=urn:btih:{hash}"))
    }

    fn with_url(title: &str, url: &str) -> CandidateRelease {
        CandidateRelease {
            magnet: None,
            url: Some(url.to_string()),
            ..CandidateRelease::new(title, "")
        }
    }

    #[test]
    fn test_same_hash_collapses_to_first() {
        let result = deduplicate(vec![
            with_magnet("First", HASH_A),
            with_magnet("Second", HASH_A),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "First");
    }

    #[test]
    fn test_hash_comparison_is_case_insensitive() {
        let result = deduplicate(vec![
            with_magnet("Lower", HASH_A),
            with_magnet("Upper", &HASH_A.to_uppercase()),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Lower");
    }

    #[test]
    fn test_distinct_hashes_kept_in_input_order() {
        let result = deduplicate(vec![
            with_magnet("A", HASH_A),
            with_magnet("B", HASH_B),
        ]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "A");
        assert_eq!(result[1].title, "B");
    }

    #[test]
    fn test_no_hash_falls_back_to_reference() {
        let result = deduplicate(vec![
            with_url("One", "https://example.org/x"),
            with_url("Two", "https://example.org/x"),
            with_url("Three", "https://example.org/y"),
        ]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "One");
        assert_eq!(result[1].title, "Three");
    }

    #[test]
    fn test_explicit_hash_field_joins_magnet_identity() {
        let by_magnet = with_magnet("Magnet", HASH_A);
        let by_field = CandidateRelease {
            magnet: None,
            url: Some("https://example.org/z".to_string()),
            hash: Some(HASH_A.to_uppercase()),
            ..CandidateRelease::new("Field", "")
        };
        let result = deduplicate(vec![by_magnet, by_field]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Magnet");
    }

    #[test]
    fn test_candidate_without_reference_dropped() {
        let invalid = CandidateRelease {
            magnet: None,
            url: None,
            ..CandidateRelease::new("Invalid", "")
        };
        let result = deduplicate(vec![invalid, with_magnet("Valid", HASH_B)]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Valid");
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(vec![]).is_empty());
    }
}
