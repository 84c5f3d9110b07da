use course_assessment::config::Config;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const KEYS: &[&str] = &[
    "APP_ENV",
    "BIND_ADDR",
    "CONTENT_DIR",
    "PASS_THRESHOLD",
    "MARGINAL_THRESHOLD",
    "MAX_ACTIVE_ASSESSMENTS",
    "ASSESSMENT_IDLE_TIMEOUT_SECS",
    "APP__SERVER__BIND_ADDR",
    "APP__ASSESSMENT__PASS_THRESHOLD",
];

// No config/test.toml exists, so only the environment is read
fn isolated_env() {
    for key in KEYS {
        env::remove_var(key);
    }
    env::set_var("APP_ENV", "test");
}

#[test]
#[serial]
fn test_defaults_without_any_source() {
    isolated_env();
    let config = Config::load().unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0:8081");
    assert_eq!(config.content_dir, PathBuf::from("content"));
    assert_eq!(config.pass_threshold, None);
    assert_eq!(config.max_active_assessments, 10_000);
    assert_eq!(config.idle_timeout_secs, 3_600);
}

#[test]
#[serial]
fn test_plain_env_fallbacks() {
    isolated_env();
    env::set_var("BIND_ADDR", "127.0.0.1:9000");
    env::set_var("CONTENT_DIR", "/srv/content");
    env::set_var("PASS_THRESHOLD", "0.7");
    env::set_var("MARGINAL_THRESHOLD", "0.6");
    env::set_var("MAX_ACTIVE_ASSESSMENTS", "25");
    env::set_var("ASSESSMENT_IDLE_TIMEOUT_SECS", "900");

    let config = Config::load().unwrap();
    assert_eq!(config.bind_addr, "127.0.0.1:9000");
    assert_eq!(config.content_dir, PathBuf::from("/srv/content"));
    assert_eq!(config.pass_threshold, Some(0.7));
    assert_eq!(config.marginal_threshold, Some(0.6));
    assert_eq!(config.max_active_assessments, 25);
    assert_eq!(config.idle_timeout_secs, 900);
    isolated_env();
}

#[test]
#[serial]
fn test_prefixed_env_wins_over_plain() {
    isolated_env();
    env::set_var("BIND_ADDR", "127.0.0.1:9000");
    env::set_var("APP__SERVER__BIND_ADDR", "127.0.0.1:9100");
    env::set_var("APP__ASSESSMENT__PASS_THRESHOLD", "0.8");

    let config = Config::load().unwrap();
    assert_eq!(config.bind_addr, "127.0.0.1:9100");
    assert_eq!(config.pass_threshold, Some(0.8));
    isolated_env();
}

#[test]
#[serial]
fn test_inconsistent_thresholds_are_rejected() {
    isolated_env();
    env::set_var("PASS_THRESHOLD", "0.5");
    env::set_var("MARGINAL_THRESHOLD", "0.6");
    assert!(Config::load().is_err());

    isolated_env();
    env::set_var("MARGINAL_THRESHOLD", "0.6");
    assert!(Config::load().is_err());

    isolated_env();
    env::set_var("PASS_THRESHOLD", "seventy");
    assert!(Config::load().is_err());
    isolated_env();
}

#[test]
#[serial]
fn test_zero_capacity_is_rejected() {
    isolated_env();
    env::set_var("MAX_ACTIVE_ASSESSMENTS", "0");
    assert!(Config::load().is_err());

    isolated_env();
    env::set_var("ASSESSMENT_IDLE_TIMEOUT_SECS", "0");
    assert!(Config::load().is_err());
    isolated_env();
}
