use super::{types::Config, ConfigError};

/// Validate configuration.
/// Currently validates:
/// - Thresholds are in [0, 1]
/// - Trust/reputation values are in [-1, 1]
/// - Penalties are non-positive
/// - Minimum size is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let t = &config.thresholds;
    for (name, value) in [
        ("thresholds.episode_token_overlap", t.episode_token_overlap),
        ("thresholds.movie_token_overlap", t.movie_token_overlap),
        ("thresholds.fuzzy_accept", t.fuzzy_accept),
        ("thresholds.fuzzy_strict", t.fuzzy_strict),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be in [0, 1], got {value}"
            )));
        }
    }

    for (table, entries) in [
        ("trust.source_trust", &config.trust.source_trust),
        ("trust.group_reputation", &config.trust.group_reputation),
    ] {
        for (key, value) in entries {
            if !(-1.0..=1.0).contains(value) {
                return Err(ConfigError::ValidationError(format!(
                    "{table}.{key} must be in [-1, 1], got {value}"
                )));
            }
        }
    }

    let w = &config.weights;
    for (name, value) in [
        ("weights.pack_penalty", w.pack_penalty),
        ("weights.cam_penalty", w.cam_penalty),
        ("weights.size_mismatch_penalty", w.size_mismatch_penalty),
        ("weights.user_report_penalty", w.user_report_penalty),
        ("weights.age_decay_per_day", w.age_decay_per_day),
    ] {
        if value > 0 {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be non-positive, got {value}"
            )));
        }
    }

    if config.heuristics.min_size_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "heuristics.min_size_bytes cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Thresholds};

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_threshold_out_of_range_fails() {
        let config = Config {
            thresholds: Thresholds {
                fuzzy_accept: 1.2,
                ..Thresholds::default()
            },
            ..Config::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_trust_out_of_range_fails() {
        let mut config = Config::default();
        config
            .trust
            .source_trust
            .insert("Shady".to_string(), 2.0);
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_positive_penalty_fails() {
        let mut config = Config::default();
        config.weights.cam_penalty = 10000;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_zero_min_size_fails() {
        let mut config = Config::default();
        config.heuristics.min_size_bytes = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
