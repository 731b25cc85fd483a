//! Integration tests for settings loading

use frameconf::config::{ClientSettings, ConfigLoader, DEFAULT_API_URL, LOCAL_CONFIG_FILE};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_uses_local_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(LOCAL_CONFIG_FILE),
        r#"
api_url = "http://localhost:5000/api/"
app_config = "app.json"
"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("app.json"),
        r#"{ "appType": "via", "showHighlights": "always" }"#,
    )
    .unwrap();

    let settings = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(settings.api_url, "http://localhost:5000/api/");

    let app = settings.load_app_config().unwrap();
    assert_eq!(app["appType"], json!("via"));
    assert_eq!(app["showHighlights"], json!("always"));
}

#[test]
fn test_load_without_files_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("empty.toml");
    fs::write(&file, "").unwrap();

    let settings = ConfigLoader::load_from_file(&file).unwrap();
    if std::env::var("FRAMECONF_API_URL").is_err() {
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }
    assert!(settings.load_host_config().unwrap().is_empty());
    assert!(settings.load_app_config().unwrap().is_empty());
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("settings.toml");
    fs::write(&file, "api_url = \"not-a-url\"\n").unwrap();

    assert!(ConfigLoader::load_from_file(&file).is_err());
}

#[test]
fn test_host_config_must_be_object() {
    let temp_dir = TempDir::new().unwrap();
    let host = temp_dir.path().join("host.json");
    fs::write(&host, "[\"not\", \"an\", \"object\"]").unwrap();

    let settings = ClientSettings {
        host_config: Some(host),
        ..ClientSettings::default()
    };
    let err = settings.load_host_config().unwrap_err();
    assert!(err.to_string().contains("expected a JSON object"));
}
