//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! building a transport from the result.

use std::io::Write;

use talentfolio_core::UnauthorizedRegistry;
use talentfolio_domain::PortalError;
use talentfolio_infra::{config, ApiTransport};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
[api]
base_url = "/api/v1/"
origin = "https://portal.example.com"
timeout_secs = 10

[logging]
level = "talentfolio_infra=debug,info"
json = true
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config");

    assert_eq!(config.api.resolved_base_url(), "https://portal.example.com/api/v1");
    assert_eq!(config.api.timeout_secs, Some(10));
    assert_eq!(config.logging.level, "talentfolio_infra=debug,info");
    assert!(config.logging.json);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_empty_json_file_yields_defaults() {
    let path = write_config("{}", "json");

    let config = config::load_from_file(Some(path.clone())).expect("config");

    assert_eq!(config, talentfolio_domain::Config::default());
    assert_eq!(config.api.resolved_base_url(), "http://localhost:3000/api/v1");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_loaded_config_builds_transport() {
    let path = write_config(r#"{"api": {"base_url": "https://api.example.com/v1/"}}"#, "json");
    let config = config::load_from_file(Some(path.clone())).expect("config");

    let transport =
        ApiTransport::from_config(&config.api, UnauthorizedRegistry::new()).expect("transport");

    assert_eq!(transport.base_url(), "https://api.example.com/v1");
    assert_eq!(transport.url("/user"), "https://api.example.com/v1/user");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_unusable_origin_is_rejected_by_transport() {
    let path = write_config(r#"{"api": {"origin": "not a url"}}"#, "json");
    let config = config::load_from_file(Some(path.clone())).expect("config");

    let result = ApiTransport::from_config(&config.api, UnauthorizedRegistry::new());
    assert!(matches!(result, Err(PortalError::Config(_))));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/config.json".into()));

    match result {
        Err(PortalError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "this is": "not valid" "#, "json");

    match config::load_from_file(Some(path.clone())) {
        Err(PortalError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }

    std::fs::remove_file(path).ok();
}
