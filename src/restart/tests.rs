use super::*;

#[test]
fn test_default_is_disabled() {
    let config = RestartConfig::default();
    assert!(!config.auto_restart);
    assert_eq!(config.delay, Duration::from_secs(1));
    assert_eq!(config.max_attempts, 0);
    assert_eq!(config, RestartConfig::disabled());
}

#[test]
fn test_zero_max_attempts_means_unlimited() {
    let config = RestartConfig::bounded(Duration::from_secs(1), 0);
    assert!(!config.attempts_exhausted(0));
    assert!(!config.attempts_exhausted(1_000_000));
}

#[test]
fn test_attempts_exhausted_at_limit() {
    let config = RestartConfig::bounded(Duration::from_secs(1), 3);
    assert!(!config.attempts_exhausted(0));
    assert!(!config.attempts_exhausted(2));
    assert!(config.attempts_exhausted(3));
    assert!(config.attempts_exhausted(4));
}

#[test]
fn test_delay_elapsed_without_prior_attempt() {
    let config = RestartConfig::bounded(Duration::from_secs(10), 0);
    assert!(config.delay_elapsed(None, Instant::now()));
}

#[test]
fn test_delay_elapsed_spacing() {
    let config = RestartConfig::bounded(Duration::from_millis(100), 0);
    let t0 = Instant::now();
    assert!(!config.delay_elapsed(Some(t0), t0));
    assert!(!config.delay_elapsed(Some(t0), t0 + Duration::from_millis(99)));
    assert!(config.delay_elapsed(Some(t0), t0 + Duration::from_millis(100)));
    assert!(config.delay_elapsed(Some(t0), t0 + Duration::from_secs(5)));
}

#[test]
fn test_serde_round_trip() {
    let config = RestartConfig {
        auto_restart: true,
        delay: Duration::from_millis(500),
        max_attempts: 3,
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert!(yaml.contains("500ms"));
    let parsed: RestartConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_deserialize_with_defaults() {
    let parsed: RestartConfig = serde_yaml::from_str("auto_restart: true\n").unwrap();
    assert!(parsed.auto_restart);
    assert_eq!(parsed.delay, Duration::from_secs(1));
    assert_eq!(parsed.max_attempts, 0);
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<RestartConfig, _> = serde_yaml::from_str("retries: 3\n");
    assert!(result.is_err());
}
