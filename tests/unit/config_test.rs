//! Unit tests for configuration module

use std::io::Write;
use webboost_api::config::{Settings, StorageBackend};

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8001);
    assert_eq!(settings.server.route_prefix, "/api");
    assert!(settings.rate_limit.enabled);
    assert_eq!(settings.rate_limit.requests_per_minute, 20);
    assert_eq!(settings.rate_limit.burst_size, 10);
    assert_eq!(settings.rate_limit.prune_interval_secs, 60);
    assert_eq!(settings.llm.model, "gpt-4o-mini");
    assert_eq!(settings.llm.max_tokens, 800);
    assert_eq!(settings.storage.backend, StorageBackend::Memory);
}

#[test]
fn test_settings_validation_invalid_port() {
    let mut settings = Settings::default();
    settings.server.port = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_validation_zero_quota() {
    let mut settings = Settings::default();
    settings.rate_limit.requests_per_minute = 0;
    assert!(settings.validate().is_err());

    // A zero quota is irrelevant once limiting is off
    settings.rate_limit.enabled = false;
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_validation_zero_prune_interval() {
    let mut settings = Settings::default();
    settings.rate_limit.prune_interval_secs = 0;
    assert!(settings.validate().is_err());

    settings.rate_limit.enabled = false;
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_validation_zero_llm_timeout() {
    let mut settings = Settings::default();
    settings.llm.timeout_ms = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_route_prefix_trailing_slash() {
    let mut settings = Settings::default();
    settings.server.route_prefix = "/v2/".to_string();
    assert_eq!(settings.route_prefix(), "/v2");

    settings.server.route_prefix = "/".to_string();
    assert_eq!(settings.route_prefix(), "");
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from_path(dir.path().join("absent.yaml")).unwrap();

    assert_eq!(settings.server.port, 8001);
    assert_eq!(settings.storage.backend, StorageBackend::Memory);
}

#[test]
fn test_load_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("webboost.yaml");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "server:\n  port: 9000\nstorage:\n  backend: file\n  path: /tmp/webboost\ncors:\n  allowed_origins:\n    - https://weboostmartinique.com"
    )
    .unwrap();

    let settings = Settings::load_from_path(&path).unwrap();
    assert_eq!(settings.server.port, 9000);
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.storage.backend, StorageBackend::File);
    assert_eq!(settings.storage.path, "/tmp/webboost");
    assert!(!settings.cors.allows_any_origin());
    assert!(settings.validate().is_ok());
}

#[test]
fn test_serialized_defaults_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.yaml");

    let mut settings = Settings::default();
    settings.storage.backend = StorageBackend::Disabled;
    settings.llm.api_key = Some("sk-secret".to_string());

    let yaml = serde_yaml::to_string(&settings).unwrap();
    assert!(yaml.contains("backend: disabled"));
    assert!(!yaml.contains("sk-secret"));

    std::fs::write(&path, yaml).unwrap();
    let loaded = Settings::load_from_path(&path).unwrap();
    assert_eq!(loaded.storage.backend, StorageBackend::Disabled);
    assert_eq!(loaded.llm.api_key, None);
}

#[test]
fn test_environment_overrides_defaults() {
    std::env::set_var("WEBBOOST__LOGGING__LEVEL", "debug");
    let settings = Settings::load_from_path("does/not/exist.yaml").unwrap();
    std::env::remove_var("WEBBOOST__LOGGING__LEVEL");

    assert_eq!(settings.logging.level, "debug");
}
