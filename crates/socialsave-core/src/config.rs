use std::env::VarError;
use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_DATA_DIR: &str = "./.socialsave";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Load `.env` into the process environment if present.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    load_dotenv();
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

/// Trimmed value of `var`, or `None` when unset or blank.
fn non_empty_var<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve `SOCIALSAVE_DATA_DIR` alone. No other setting is read.
pub fn build_data_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Result<String, VarError>,
{
    non_empty_var(&lookup, "SOCIALSAVE_DATA_DIR")
        .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from)
}

/// Resolve `SOCIALSAVE_LOG_LEVEL` alone. No other setting is read.
pub fn build_log_level<F>(lookup: F) -> String
where
    F: Fn(&str) -> Result<String, VarError>,
{
    non_empty_var(&lookup, "SOCIALSAVE_LOG_LEVEL")
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Nothing is strictly required: a missing Gemini key is reported later, at
/// analysis time, so history browsing keeps working without one.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    use std::net::SocketAddr;

    let non_empty = |var: &str| non_empty_var(&lookup, var);

    let or_default = |var: &str, default: &str| -> String {
        non_empty(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("SOCIALSAVE_ENV", "development"))?;

    let bind_addr = or_default("SOCIALSAVE_BIND_ADDR", "127.0.0.1:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SOCIALSAVE_BIND_ADDR", e.to_string()))?;

    let log_level = build_log_level(&lookup);
    let data_dir = build_data_dir(&lookup);

    let gemini_api_key = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"));
    let gemini_model = or_default("SOCIALSAVE_GEMINI_MODEL", "gemini-2.5-flash");
    let gemini_base_url = or_default(
        "SOCIALSAVE_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );

    let request_timeout_secs = match non_empty("SOCIALSAVE_REQUEST_TIMEOUT_SECS") {
        None => None,
        Some(raw) => {
            let secs = raw
                .parse::<u64>()
                .map_err(|e| invalid("SOCIALSAVE_REQUEST_TIMEOUT_SECS", e.to_string()))?;
            if secs == 0 {
                return Err(invalid(
                    "SOCIALSAVE_REQUEST_TIMEOUT_SECS",
                    "must be greater than zero".to_string(),
                ));
            }
            Some(secs)
        }
    };

    let user_agent = or_default("SOCIALSAVE_USER_AGENT", "socialsave/0.1 (post-archiver)");
    let thumbnail_base_url = or_default(
        "SOCIALSAVE_THUMBNAIL_BASE_URL",
        "https://picsum.photos/seed/",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        user_agent,
        thumbnail_base_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALSAVE_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
