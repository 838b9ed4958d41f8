//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface the HTTP server binds to
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Path of the SQLite database file
    pub database_path: String,
    /// Prefix every pokemon route is mounted under (e.g. `/api/v1`)
    pub api_prefix: String,
    /// TTL for cached pokemon lookups, `None` when caching is off
    pub cache_ttl: Option<Duration>,
    /// CORS allowed origins (comma-separated, or "*" for any); `None` disables CORS
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3001,
            database_path: "pokemons.db".to_string(),
            api_prefix: "/api/v1".to_string(),
            cache_ttl: None,
            cors_allowed_origins: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let server_port = match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            Some(port) => port
                .trim()
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            None => defaults.server_port,
        };

        let cache_ttl_secs: u64 = match lookup("POKEMON_CACHE_TTL_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .context("POKEMON_CACHE_TTL_SECS must be a whole number of seconds")?,
            None => 0,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty());

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            api_prefix: normalize_prefix(
                &lookup("API_PREFIX").unwrap_or(defaults.api_prefix),
            ),
            cache_ttl: (cache_ttl_secs > 0).then(|| Duration::from_secs(cache_ttl_secs)),
            cors_allowed_origins,
        })
    }
}

/// `"api/v1/"` -> `"/api/v1"`, `"/"` or `""` -> `""` (routes at the root).
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.database_path, "pokemons.db");
        assert_eq!(config.api_prefix, "/api/v1");
        assert!(config.cache_ttl.is_none());
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.server_port, 8080);

        let config = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "9000"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 9000);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn cache_ttl_zero_disables_cache() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("POKEMON_CACHE_TTL_SECS", "0")])).unwrap();
        assert!(config.cache_ttl.is_none());

        let config =
            AppConfig::from_lookup(lookup_from(&[("POKEMON_CACHE_TTL_SECS", "300")])).unwrap();
        assert_eq!(config.cache_ttl, Some(Duration::from_secs(300)));
    }

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(normalize_prefix("api/v2/"), "/api/v2");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://a.test, http://b.test ,",
        )]))
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );

        let config =
            AppConfig::from_lookup(lookup_from(&[("CORS_ALLOWED_ORIGINS", " , ")])).unwrap();
        assert!(config.cors_allowed_origins.is_none());
    }
}
