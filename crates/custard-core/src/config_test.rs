use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CUSTARD_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:4000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.timezone, chrono_tz::America::Chicago);
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(
        cfg.scraper_user_agent,
        "custard-tracker/0.1 (+flavor-of-the-day)"
    );
    assert_eq!(cfg.kopps_url, DEFAULT_KOPPS_URL);
    assert_eq!(cfg.gilles_url, DEFAULT_GILLES_URL);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("CUSTARD_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CUSTARD_BIND_ADDR"),
        "expected InvalidEnvVar(CUSTARD_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_accepts_timezone_override() {
    let mut map = HashMap::new();
    map.insert("CUSTARD_TIMEZONE", "America/New_York");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.timezone, chrono_tz::America::New_York);
}

#[test]
fn build_app_config_rejects_unknown_timezone() {
    let mut map = HashMap::new();
    map.insert("CUSTARD_TIMEZONE", "Mars/Olympus_Mons");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CUSTARD_TIMEZONE"),
        "expected InvalidEnvVar(CUSTARD_TIMEZONE), got: {result:?}"
    );
}

#[test]
fn scraper_timeout_override() {
    let mut map = HashMap::new();
    map.insert("CUSTARD_SCRAPER_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_request_timeout_secs, 5);
}

#[test]
fn scraper_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("CUSTARD_SCRAPER_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CUSTARD_SCRAPER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CUSTARD_SCRAPER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn scraper_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("CUSTARD_SCRAPER_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn source_urls_can_be_overridden() {
    let mut map = HashMap::new();
    map.insert("CUSTARD_KOPPS_URL", "http://127.0.0.1:9000/flavor-preview");
    map.insert("CUSTARD_GILLES_URL", " http://127.0.0.1:9001 ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.kopps_url, "http://127.0.0.1:9000/flavor-preview");
    assert_eq!(cfg.gilles_url, "http://127.0.0.1:9001");
}

#[test]
fn source_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("CUSTARD_GILLES_URL", "gillesfrozencustard.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CUSTARD_GILLES_URL"),
        "expected InvalidEnvVar(CUSTARD_GILLES_URL), got: {result:?}"
    );
}
