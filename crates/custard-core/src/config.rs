use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_KOPPS_URL: &str = "https://kopps.com/flavor-preview";
pub const DEFAULT_GILLES_URL: &str = "https://gillesfrozencustard.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// development config pointed at the live retailer pages.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("CUSTARD_ENV", "development"))?;

    let bind_addr = or_default("CUSTARD_BIND_ADDR", "0.0.0.0:4000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CUSTARD_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("CUSTARD_LOG_LEVEL", "info");

    let timezone = or_default("CUSTARD_TIMEZONE", "America/Chicago")
        .parse::<chrono_tz::Tz>()
        .map_err(|e| invalid("CUSTARD_TIMEZONE", e.to_string()))?;

    let scraper_request_timeout_secs = or_default("CUSTARD_SCRAPER_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("CUSTARD_SCRAPER_TIMEOUT_SECS", e.to_string()))?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "CUSTARD_SCRAPER_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    let scraper_user_agent = or_default(
        "CUSTARD_SCRAPER_USER_AGENT",
        "custard-tracker/0.1 (+flavor-of-the-day)",
    );

    let kopps_url = parse_url(&or_default("CUSTARD_KOPPS_URL", DEFAULT_KOPPS_URL))
        .map_err(|reason| invalid("CUSTARD_KOPPS_URL", reason))?;
    let gilles_url = parse_url(&or_default("CUSTARD_GILLES_URL", DEFAULT_GILLES_URL))
        .map_err(|reason| invalid("CUSTARD_GILLES_URL", reason))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        timezone,
        scraper_request_timeout_secs,
        scraper_user_agent,
        kopps_url,
        gilles_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CUSTARD_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

fn parse_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(format!("\"{trimmed}\" is not an http(s) URL"))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
