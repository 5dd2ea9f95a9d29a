//! End-to-end ranking pipeline integration tests.
//!
//! These tests run the full engine over realistic release listings:
//! - matching accepts the right content and rejects wrong episodes,
//!   spinoffs and junk
//! - duplicates collapse by info-hash before scoring
//! - scoring orders results the way the weights say it should
//! - the whole pass is deterministic for a pinned clock

use chrono::{DateTime, TimeZone, Utc};

use corsaro_core::config::{load_config_from_str, Config};
use corsaro_core::ranking::{
    AuxiliaryData, CandidateRelease, MediaDescriptor, RankingEngine, ReleaseSize,
};

fn engine() -> RankingEngine {
    RankingEngine::new(Config::default()).expect("default config must build")
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn magnet(n: u8) -> String {
    format!("magnet:?xt=urn:btih:{}", format!("{n:02x}").repeat(20))
}

fn candidate(title: &str, n: u8) -> CandidateRelease {
    CandidateRelease::new(title, magnet(n))
}

fn titles(results: &[corsaro_core::ranking::ScoredRelease]) -> Vec<&str> {
    results.iter().map(|r| r.release.title.as_str()).collect()
}

#[test]
fn test_accepts_abbreviated_title_for_episode_target() {
    let e = engine();
    let target = MediaDescriptor::episode("Dr House", 3, 5);

    let results = e.rank(
        &target,
        vec![candidate("House.MD.S03E05.ITA.720p", 1)],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(results.len(), 1);
    assert!(results[0].score > 0);
}

#[test]
fn test_rejects_wrong_episode_and_season() {
    let e = engine();
    let target = MediaDescriptor::episode("Dr House", 3, 5);

    let results = e.rank(
        &target,
        vec![
            candidate("House.MD.S03E06.ITA.720p", 1),
            candidate("House.MD.S04E05.ITA.720p", 2),
            candidate("House.MD.S03E05.ITA.1080p", 3),
        ],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(titles(&results), vec!["House.MD.S03E05.ITA.1080p"]);
}

#[test]
fn test_franchise_prefix_does_not_block_match() {
    let e = engine();
    let target = MediaDescriptor::episode("IT: Welcome to Derry", 1, 2);

    let results = e.rank(
        &target,
        vec![
            candidate("Welcome.to.Derry.S01E02.ITA.1080p", 1),
            // The 2017 movie is not the series
            candidate("IT.2017.ITA.1080p.BluRay", 2),
        ],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(titles(&results), vec!["Welcome.to.Derry.S01E02.ITA.1080p"]);
}

#[test]
fn test_rejects_sibling_franchise() {
    let e = engine();
    let target = MediaDescriptor::episode("The Walking Dead", 1, 1);

    let results = e.rank(
        &target,
        vec![
            candidate("The.Walking.Dead.Dead.City.S01E01.ITA", 1),
            candidate("Fear.the.Walking.Dead.S01E01.ITA", 2),
            candidate("The.Walking.Dead.S01E01.ITA.1080p", 3),
        ],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(titles(&results), vec!["The.Walking.Dead.S01E01.ITA.1080p"]);
}

#[test]
fn test_rejects_sequel_marker_candidate() {
    let e = engine();
    let target = MediaDescriptor::episode("Dexter", 1, 1);

    let results = e.rank(
        &target,
        vec![
            candidate("Dexter.Resurrection.S01E01.ITA.1080p", 1),
            candidate("Dexter.S01E01.ITA.1080p", 2),
        ],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(titles(&results), vec!["Dexter.S01E01.ITA.1080p"]);
}

#[test]
fn test_rejects_sample_listings() {
    let e = engine();
    let target = MediaDescriptor::movie("Oppenheimer");

    let results = e.rank(
        &target,
        vec![
            candidate("Oppenheimer.2023.SAMPLE.1080p", 1),
            candidate("Oppenheimer.2023.Trailer.1080p", 2),
            candidate("Oppenheimer.2023.1080p", 3),
        ],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(titles(&results), vec!["Oppenheimer.2023.1080p"]);
}

#[test]
fn test_original_title_fallback() {
    let e = engine();
    let target = MediaDescriptor {
        original_title: Some("Money Heist".to_string()),
        ..MediaDescriptor::episode("La Casa di Carta", 1, 1)
    };

    let results = e.rank(
        &target,
        vec![candidate("Money.Heist.S01E01.ITA.1080p", 1)],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(results.len(), 1);
}

#[test]
fn test_duplicates_collapse_across_sources() {
    let e = engine();
    let target = MediaDescriptor::movie("Oppenheimer");

    let hash = "aa".repeat(20);
    let from_first_source = CandidateRelease {
        source: Some("Corsaro".to_string()),
        ..CandidateRelease::new(
            "Oppenheimer.2023.1080p",
            format!("magnet:?xt=urn:btih:{hash}"),
        )
    };
    let from_second_source = CandidateRelease {
        source: Some("1337x".to_string()),
        ..CandidateRelease::new(
            "Oppenheimer.2023.1080p.mirror",
            format!("magnet:?xt=urn:btih:{}", hash.to_uppercase()),
        )
    };

    let results = e.rank(
        &target,
        vec![from_first_source, from_second_source],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(titles(&results), vec!["Oppenheimer.2023.1080p"]);
}

#[test]
fn test_cam_release_ranks_below_clean_releases() {
    let e = engine();
    let target = MediaDescriptor::movie("Oppenheimer");

    let results = e.rank(
        &target,
        vec![
            candidate("Oppenheimer.2023.CAM.ITA.1080p", 1),
            candidate("Oppenheimer.2023.720p.WEB", 2),
            candidate("Oppenheimer.2023.ITA.2160p", 3),
        ],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(results.len(), 3);
    assert_eq!(
        results.last().unwrap().release.title,
        "Oppenheimer.2023.CAM.ITA.1080p"
    );
    assert!(results.last().unwrap().score < 0);
}

#[test]
fn test_exact_episode_outranks_season_pack() {
    let e = engine();
    let target = MediaDescriptor::episode("Breaking Bad", 2, 3);

    let mut pack = candidate("Breaking.Bad.S02.Season.Pack.ITA.1080p", 1);
    pack.size = Some(ReleaseSize::Text("18 GB".to_string()));
    let exact = candidate("Breaking.Bad.2x03.ITA.1080p", 2);

    let results = e.rank(
        &target,
        vec![pack, exact],
        &AuxiliaryData::default(),
        now(),
    );

    assert_eq!(
        titles(&results),
        vec![
            "Breaking.Bad.2x03.ITA.1080p",
            "Breaking.Bad.S02.Season.Pack.ITA.1080p"
        ]
    );
}

#[test]
fn test_ranking_is_deterministic() {
    let e = engine();
    let target = MediaDescriptor::episode("Breaking Bad", 2, 3);

    let mut seeded = candidate("Breaking.Bad.S02E03.ITA.1080p", 1);
    seeded.seeders = 350;
    seeded.peers = 90;
    seeded.published = Some(now() - chrono::Duration::days(7));
    seeded.size = Some(ReleaseSize::Text("1.4 GB".to_string()));
    let input = vec![seeded, candidate("Breaking.Bad.S02E03.720p", 2)];

    let first = e.rank(&target, input.clone(), &AuxiliaryData::default(), now());
    let second = e.rank(&target, input, &AuxiliaryData::default(), now());

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.release.title, b.release.title);
        assert_eq!(a.score, b.score);
        assert_eq!(a.breakdown, b.breakdown);
    }
}

#[test]
fn test_score_equals_breakdown_sum() {
    let e = engine();
    let target = MediaDescriptor::episode("Breaking Bad", 2, 3);

    let mut rich = candidate("Breaking.Bad.S02E03.ITA.2160p", 1);
    rich.seeders = 800;
    rich.peers = 200;
    rich.source = Some("Corsaro".to_string());
    rich.group = Some("RARBG".to_string());
    rich.published = Some(now() - chrono::Duration::hours(12));

    let results = e.rank(&target, vec![rich], &AuxiliaryData::default(), now());
    assert_eq!(results.len(), 1);
    let sum: i64 = results[0].breakdown.iter().map(|c| c.value).sum();
    assert_eq!(results[0].score, sum);
}

#[test]
fn test_verified_hash_and_reports_shift_order() {
    let e = engine();
    let target = MediaDescriptor::movie("Oppenheimer");

    let verified_hash = "ab".repeat(20).to_uppercase();
    let verified = CandidateRelease::new(
        "Oppenheimer.2023.1080p.WEB",
        format!("magnet:?xt=urn:btih:{verified_hash}"),
    );
    let reported = candidate("Oppenheimer.2023.1080p.BluRay", 2);
    let reported_hash = reported.info_hash().unwrap();

    let mut aux = AuxiliaryData::default();
    aux.verified_hashes.insert(verified_hash);
    aux.user_reports.insert(
        reported_hash,
        corsaro_core::ranking::UserReport {
            reports: 4,
            severity: 1.0,
        },
    );

    let results = e.rank(
        &target,
        vec![reported.clone(), verified.clone()],
        &AuxiliaryData::default(),
        now(),
    );
    // Without auxiliary data the longer title wins the tiebreak
    assert_eq!(results[0].release.title, "Oppenheimer.2023.1080p.BluRay");

    let results = e.rank(&target, vec![reported, verified], &aux, now());
    assert_eq!(results[0].release.title, "Oppenheimer.2023.1080p.WEB");
    assert!(results[1].score < 0);
}

#[test]
fn test_config_overrides_change_ranking() {
    let toml = r#"
        [weights]
        quality_4k = 100
        quality_1080p = 9000
    "#;
    let config = load_config_from_str(toml).expect("config must parse");
    let e = RankingEngine::new(config).expect("config must build");
    let target = MediaDescriptor::movie("Oppenheimer");

    let results = e.rank(
        &target,
        vec![
            candidate("Oppenheimer.2023.2160p", 1),
            candidate("Oppenheimer.2023.1080p", 2),
        ],
        &AuxiliaryData::default(),
        now(),
    );

    // With inverted quality weights the 1080p release wins
    assert_eq!(results[0].release.title, "Oppenheimer.2023.1080p");
}
