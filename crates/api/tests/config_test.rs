use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rstest::rstest;
use timemesh_api::config::{
    ApiConfig, DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_REFRESH_TOKEN_TTL, DEFAULT_TOKEN_CLEANUP_INTERVAL, parse_log_level,
};
use tracing::Level;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_with_only_database_url() {
    let config = ApiConfig::from_vars(lookup(&[("DATABASE_URL", "postgres://localhost/timemesh")])).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8000);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.access_token_ttl, DEFAULT_ACCESS_TOKEN_TTL);
    assert_eq!(config.refresh_token_ttl, DEFAULT_REFRESH_TOKEN_TTL);
    assert_eq!(config.token_cleanup_interval, DEFAULT_TOKEN_CLEANUP_INTERVAL as u64);
    assert_eq!(config.server_addr(), "0.0.0.0:8000");
}

#[test]
fn test_missing_database_url_is_an_error() {
    assert!(ApiConfig::from_vars(lookup(&[])).is_err());
}

#[test]
fn test_overrides() {
    let config = ApiConfig::from_vars(lookup(&[
        ("DATABASE_URL", "postgres://db/timemesh"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "9090"),
        ("LOG_LEVEL", "debug"),
        ("API_CORS_ORIGINS", "http://localhost:5173, https://timemesh.app,"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("ACCESS_TOKEN_TTL_SECONDS", "60"),
        ("REFRESH_TOKEN_TTL_SECONDS", "3600"),
        ("TOKEN_CLEANUP_INTERVAL_SECONDS", "600"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:9090");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:5173".to_string(),
            "https://timemesh.app".to_string()
        ])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.access_token_ttl, 60);
    assert_eq!(config.refresh_token_ttl, 3600);
    assert_eq!(config.token_cleanup_interval, 600);
}

#[rstest]
#[case("API_PORT", "eighty")]
#[case("ACCESS_TOKEN_TTL_SECONDS", "-5")]
#[case("REFRESH_TOKEN_TTL_SECONDS", "soon")]
#[case("TOKEN_CLEANUP_INTERVAL_SECONDS", "0")]
fn test_invalid_numbers_are_errors(#[case] key: &str, #[case] value: &str) {
    let result = ApiConfig::from_vars(lookup(&[("DATABASE_URL", "postgres://db/timemesh"), (key, value)]));
    assert!(result.is_err());
}

#[rstest]
#[case(Some("trace"), Level::TRACE)]
#[case(Some("WARN"), Level::WARN)]
#[case(Some("error"), Level::ERROR)]
#[case(Some("verbose"), Level::INFO)]
#[case(None, Level::INFO)]
fn test_log_level_parsing(#[case] value: Option<&str>, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}
