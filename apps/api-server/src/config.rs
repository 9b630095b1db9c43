//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_core::domain::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use quill_infra::{DatabaseConfig, JwtConfig};

/// Configuration errors; the server refuses to start on any of them.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on in-memory storage.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    /// Key the rate limiter on `Forwarded`/`X-Forwarded-For` instead of the
    /// socket peer. Only safe behind a proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
    /// Default `per_page` of the blog listing.
    pub blog_page_size: u64,
    pub json_logs: bool,
    pub production: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = match get("DATABASE_URL") {
            Some(url) => {
                let mut database = DatabaseConfig::new(url);
                database.max_connections =
                    parsed(&get, "DB_MAX_CONNECTIONS", database.max_connections)?;
                database.min_connections =
                    parsed(&get, "DB_MIN_CONNECTIONS", database.min_connections)?;
                Some(database)
            }
            None => None,
        };

        let jwt = JwtConfig {
            secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            issuer: get("JWT_ISSUER"),
            audience: get("JWT_AUDIENCE"),
            admin_role: get("ADMIN_ROLE"),
        };

        let blog_page_size: u64 = parsed(&get, "BLOG_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if !(1..=MAX_PAGE_SIZE).contains(&blog_page_size) {
            return Err(ConfigError::Invalid {
                key: "BLOG_PAGE_SIZE",
                value: blog_page_size.to_string(),
            });
        }

        let rust_env = get("RUST_ENV").unwrap_or_default();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&get, "PORT", 8080)?,
            database,
            jwt,
            rate_limit_max_requests: parsed(&get, "RATE_LIMIT_MAX_REQUESTS", 5)?,
            rate_limit_window: Duration::from_secs(parsed(&get, "RATE_LIMIT_WINDOW_SECS", 60)?),
            trust_proxy_headers: parsed(&get, "TRUST_PROXY_HEADERS", false)?,
            blog_page_size,
            json_logs: get("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            production: rust_env == "production" || rust_env == "prod",
        })
    }
}

fn parsed<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_database() {
        let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.blog_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.jwt.admin_role, None);
        assert!(!config.json_logs);
        assert!(!config.trust_proxy_headers);
    }

    #[test]
    fn test_requires_jwt_secret() {
        assert!(matches!(
            load(&[]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        ));
        assert!(load(&[("JWT_SECRET", "  ")]).is_err());
    }

    #[test]
    fn test_reads_database_and_gate_settings() {
        let config = load(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_AUDIENCE", "authenticated"),
            ("ADMIN_ROLE", "admin"),
            ("DATABASE_URL", "postgres://localhost/quill"),
            ("DB_MAX_CONNECTIONS", "8"),
            ("LOG_FORMAT", "JSON"),
            ("TRUST_PROXY_HEADERS", "true"),
        ])
        .unwrap();

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/quill");
        assert_eq!(database.max_connections, 8);
        assert_eq!(config.jwt.audience.as_deref(), Some("authenticated"));
        assert_eq!(config.jwt.admin_role.as_deref(), Some("admin"));
        assert!(config.json_logs);
        assert!(config.trust_proxy_headers);
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        let err = load(&[("JWT_SECRET", "s"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = load(&[("JWT_SECRET", "s"), ("BLOG_PAGE_SIZE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BLOG_PAGE_SIZE", .. }));
    }
}
