//! Tests for the auth module

use super::*;
use crate::config::TapConfig;
use base64::Engine;

fn decode_basic(header: &str) -> String {
    let encoded = header.strip_prefix("Basic ").unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    String::from_utf8(decoded).unwrap()
}

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_basic_auth() {
    let auth = Authenticator::new(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    });

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    let auth_header = built
        .headers()
        .get("Authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(auth_header.starts_with("Basic "));
    assert_eq!(decode_basic(auth_header), "user:pass");
}

#[test]
fn test_basic_auth_from_tap_config() {
    let config: TapConfig = serde_json::from_value(serde_json::json!({
        "api_key": "token-123",
        "secret_key": "secret-456"
    }))
    .unwrap();

    let auth = Authenticator::new(AuthConfig::from_tap_config(&config));
    let client = reqwest::Client::new();
    let built = auth
        .apply(client.get("https://example.com/api"))
        .build()
        .unwrap();

    let auth_header = built
        .headers()
        .get("Authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(decode_basic(auth_header), "token-123:secret-456");
}

#[test]
fn test_auth_config_debug_redacts_password() {
    let config = AuthConfig::Basic {
        username: "user".to_string(),
        password: "hunter2".to_string(),
    };
    let debug = format!("{config:?}");
    assert!(debug.contains("user"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn test_auth_config_default() {
    let config = AuthConfig::default();
    assert!(matches!(config, AuthConfig::None));
}
