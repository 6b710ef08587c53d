use std::fmt::Display;
use std::str::FromStr;

use academy_core::notification::DEFAULT_TTL_DAYS;

use crate::auth::jwt::JwtConfig;

/// Value of `APP_ENV` that turns on cron trigger checks.
pub const ENV_PRODUCTION: &str = "production";

/// Runtime configuration, read once at startup.
///
/// | Env Var                 | Default                 |
/// |-------------------------|-------------------------|
/// | `HOST`                  | `0.0.0.0`               |
/// | `PORT`                  | `3000`                  |
/// | `CORS_ORIGINS`          | `http://localhost:3001` |
/// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
/// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
/// | `APP_ENV`               | `development`           |
/// | `CRON_SECRET`           | unset                   |
/// | `PUBLISH_INTERVAL_SECS` | `0` (loop disabled)     |
/// | `NOTIFICATION_TTL_DAYS` | `30`                    |
///
/// JWT settings are documented on [`JwtConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Grace period for background tasks after the listener closes.
    pub shutdown_timeout_secs: u64,
    pub app_env: String,
    /// Shared secret the external scheduler may send as a bearer token.
    pub cron_secret: Option<String>,
    /// `0` leaves the cron endpoint as the only trigger.
    pub publish_interval_secs: u64,
    pub notification_ttl_days: i64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// # Panics
    ///
    /// Panics on unparsable numeric values or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3001".into()),
            ),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            app_env: env_or("APP_ENV", "development".to_string()),
            cron_secret: std::env::var("CRON_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            publish_interval_secs: env_or("PUBLISH_INTERVAL_SECS", 0),
            notification_ttl_days: env_or("NOTIFICATION_TTL_DAYS", DEFAULT_TTL_DAYS),
            jwt: JwtConfig::from_env(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case(ENV_PRODUCTION)
    }
}

/// Parse `key` from the environment, or return `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
