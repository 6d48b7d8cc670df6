//! Configuration loading from disk

use crate::common::ConfigFactory;
use alerta_notifications::{ChannelRegistry, Config, Notifier, NotifierError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_valid_file() {
    let file = write_config(&ConfigFactory::yaml("http://alerta.test/api", "http://hooks.test/x"));

    let config = Config::from_file(file.path()).await.unwrap();

    assert_eq!(config.alerta().api_key.as_deref(), Some("test-key"));
    assert_eq!(config.rules().len(), 1);
    assert!(!config.dry_run());
    assert!(Notifier::new(&config, false).is_ok());
}

#[tokio::test]
async fn test_missing_file_is_a_config_error() {
    let err = Config::from_file("/nonexistent/notifications.yml")
        .await
        .unwrap_err();
    assert!(matches!(err, NotifierError::Config(_)));
}

#[tokio::test]
async fn test_undeclared_channel_rejected() {
    let content = ConfigFactory::yaml("http://alerta.test/api", "http://hooks.test/x")
        .replace("channels: [ops]", "channels: [ops, pager]");
    let file = write_config(&content);

    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(err.to_string().contains("undeclared channel 'pager'"));
}

#[tokio::test]
async fn test_timeout_must_be_below_interval() {
    let content = ConfigFactory::yaml("http://alerta.test/api", "http://hooks.test/x")
        .replace("timeout: 5", "timeout: 30");
    let file = write_config(&content);

    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(err.to_string().contains("shorter"));
}

#[tokio::test]
async fn test_malformed_endpoint_rejected() {
    let content = ConfigFactory::yaml("alerta.test/api", "http://hooks.test/x");
    let file = write_config(&content);

    assert!(Config::from_file(file.path()).await.is_err());
}

#[test]
fn test_unknown_channel_type_fails_at_load() {
    let content = ConfigFactory::yaml("http://alerta.test/api", "http://hooks.test/x")
        .replace("type: slack", "type: sms");
    let config = Config::from_yaml(&content).unwrap();

    let err = ChannelRegistry::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("Unknown channel type sms"));
}
