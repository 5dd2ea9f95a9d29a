//! Title matching and ranking for torrent-style release listings.
//!
//! Given a target media descriptor and a batch of raw listings gathered
//! from third-party sources, the crate decides which listings actually are
//! the requested content ([`matcher`]) and orders the survivors by a
//! multi-factor weighted score ([`ranking`]). All tunables live in
//! [`config`], loadable from TOML files and `CORSARO_`-prefixed
//! environment variables.
//!
//! Everything is synchronous and per-call pure: a [`ranking::RankingEngine`]
//! holds only validated configuration and can be shared across threads.

pub mod config;
pub mod matcher;
pub mod ranking;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use matcher::{MatchEngine, MatchVerdict, RejectReason};
pub use ranking::{
    AuxiliaryData, CandidateRelease, MediaDescriptor, RankingEngine, ScoredRelease,
};
