//! Structural season/episode extraction from raw release titles.
//!
//! Operates on the raw (not normalized) title and is deliberately
//! independent of language content: only the numbering shape matters.

use once_cell::sync::Lazy;
use regex_lite::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Season/episode numbers extracted from a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub season: u32,
    pub episode: u32,
}

/// `S01E02`, `S01.E02`, `S01 E02`, `S1x02`
static SXE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"s(\d{1,2})(?:[._\s-]*e|x)(\d{1,3})")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// `1x02` shorthand. Word-bounded so resolution strings like `1920x1080`
/// do not read as numbering.
static NXM: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"\b(\d{1,2})x(\d{1,3})\b")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// Localized `Stagione 1 ... Episodio 2`.
static STAGIONE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"stagione\s*(\d{1,2}).*?episodio\s*(\d{1,3})")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// Looser season-only pattern for pack detection: `S01`, `Season 1`,
/// `Stagione 1`.
static SEASON_ONLY: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"\bs(?:eason|tagione)?\s*(\d{1,2})\b")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// Extract season/episode numbering from a raw title, trying the `SxxEyy`,
/// `NxM` and `Stagione N Episodio M` shapes in that order. Leading zeros
/// are ignored. Returns `None` when no shape matches.
pub fn extract_episode(title: &str) -> Option<EpisodeInfo> {
    for pattern in [&*SXE, &*NXM, &*STAGIONE] {
        if let Some(caps) = pattern.captures(title) {
            let season = caps.get(1)?.as_str().parse().ok()?;
            let episode = caps.get(2)?.as_str().parse().ok()?;
            return Some(EpisodeInfo { season, episode });
        }
    }
    None
}

/// Extract a season number from a season-pack style title (`S02`,
/// `Season 2`, `Stagione 2`). Used only when no per-episode numbering was
/// found.
pub fn extract_season(title: &str) -> Option<u32> {
    SEASON_ONLY
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sxe() {
        assert_eq!(
            extract_episode("Show.Name.S01E02.1080p"),
            Some(EpisodeInfo {
                season: 1,
                episode: 2
            })
        );
        assert_eq!(
            extract_episode("show name s3 e12"),
            Some(EpisodeInfo {
                season: 3,
                episode: 12
            })
        );
        assert_eq!(
            extract_episode("Show S02.E04 WEB"),
            Some(EpisodeInfo {
                season: 2,
                episode: 4
            })
        );
    }

    #[test]
    fn test_extract_sxe_case_insensitive_and_leading_zeros() {
        assert_eq!(
            extract_episode("show s03e05"),
            Some(EpisodeInfo {
                season: 3,
                episode: 5
            })
        );
        assert_eq!(
            extract_episode("SHOW S10E001"),
            // Leading zeros ignored by integer parse
            Some(EpisodeInfo {
                season: 10,
                episode: 1
            })
        );
    }

    #[test]
    fn test_extract_nxm() {
        assert_eq!(
            extract_episode("Show Name 1x01 ITA"),
            Some(EpisodeInfo {
                season: 1,
                episode: 1
            })
        );
        assert_eq!(
            extract_episode("Dr House 3x05"),
            Some(EpisodeInfo {
                season: 3,
                episode: 5
            })
        );
    }

    #[test]
    fn test_resolution_is_not_numbering() {
        assert_eq!(extract_episode("Movie.2024.1920x1080.mkv"), None);
    }

    #[test]
    fn test_extract_stagione_episodio() {
        assert_eq!(
            extract_episode("Serie Stagione 2 Episodio 13 ITA"),
            Some(EpisodeInfo {
                season: 2,
                episode: 13
            })
        );
    }

    #[test]
    fn test_no_numbering() {
        assert_eq!(extract_episode("Some Movie 2024 1080p"), None);
        assert_eq!(extract_episode(""), None);
    }

    #[test]
    fn test_extract_season_only() {
        assert_eq!(extract_season("Show.Name.S02.COMPLETE.1080p"), Some(2));
        assert_eq!(extract_season("Show Season 4 Pack"), Some(4));
        assert_eq!(extract_season("Serie Stagione 3 Completa"), Some(3));
        assert_eq!(extract_season("Some Movie 2024"), None);
    }
}
