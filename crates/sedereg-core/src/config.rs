use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from the process environment. Loading a
/// `.env` file first is the binary's job (`dotenvy` at the edge).
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing logic is decoupled from the actual environment so tests can
/// drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let portal_base_url = require("SEDEREG_PORTAL_BASE_URL")?;
    let log_level = or_default("SEDEREG_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SEDEREG_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SEDEREG_USER_AGENT", "sedereg/0.1 (site-registration)");

    Ok(AppConfig {
        portal_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}
