//! Tests for YAML configuration loading and validation

use market::config::{AppConfig, StorageBackend};
use market::core::ConfigError;
use std::io::Write;

const FULL_CONFIG: &str = r#"
server:
  host: 0.0.0.0
  port: 8080
storage:
  backend: postgres
  url: postgres://market:market@db/market
  max_connections: 10
  seed: true
log:
  filter: market=debug
"#;

#[test]
fn test_full_config() {
    let config = AppConfig::from_yaml_str(FULL_CONFIG).unwrap();

    assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.storage.backend, StorageBackend::Postgres);
    assert_eq!(
        config.storage.url.as_deref(),
        Some("postgres://market:market@db/market")
    );
    assert_eq!(config.storage.max_connections, 10);
    assert!(config.storage.seed);
    assert_eq!(config.log.filter, "market=debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FULL_CONFIG.as_bytes()).unwrap();

    let config = AppConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yaml");

    let err = AppConfig::from_yaml_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("missing.yaml"));
}

#[test]
fn test_unknown_backend_is_parse_error() {
    let err = AppConfig::from_yaml_str("storage:\n  backend: redis\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_postgres_requires_url() {
    let config = AppConfig::from_yaml_str("storage:\n  backend: postgres\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("DATABASE_URL"));

    let fixed = config.with_database_url(Some("postgres://localhost/market".to_string()));
    assert!(fixed.validate().is_ok());
}

#[test]
fn test_port_zero_rejected() {
    let config = AppConfig::from_yaml_str("server:\n  port: 0\n").unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
    assert_eq!(config.storage.backend, StorageBackend::InMemory);
    assert!(!config.storage.seed);
    assert_eq!(config.log.filter, "market=info,tower_http=info");
    assert!(config.validate().is_ok());
}
