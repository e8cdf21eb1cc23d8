use std::time::Duration;

use airdrop_core::resilience::RetryPolicy;
use airdrop_postgrest::PostgrestConfig;

/// Which data source the catalog reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Direct PostgreSQL connection (`DATABASE_URL`).
    Postgres { database_url: String },
    /// Hosted REST endpoint (`SUPABASE_URL` + `SUPABASE_ANON_KEY`).
    Postgrest(PostgrestConfig),
    /// Neither is set; the catalog serves the built-in sample records.
    Unconfigured,
}

impl BackendConfig {
    /// A direct database URL wins over the REST pair. The REST backend
    /// needs both its URL and its key; either one alone is ignored.
    fn resolve(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        if let Some(database_url) = non_empty(lookup("DATABASE_URL")) {
            return Self::Postgres { database_url };
        }

        match (
            non_empty(lookup("SUPABASE_URL")),
            non_empty(lookup("SUPABASE_ANON_KEY")),
        ) {
            (Some(url), Some(key)) => Self::Postgrest(PostgrestConfig::new(url, key)),
            _ => Self::Unconfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::Unconfigured)
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Data source selection.
    pub backend: BackendConfig,
    /// Pool size for the direct database backend (default: `10`).
    pub db_max_connections: u32,
    /// Retry and cache defaults for every backend call.
    pub retry_policy: RetryPolicy,
    /// Serve sample records when a backend call fails (default: `true`).
    pub fixture_fallback: bool,
    /// Bearer token for the cache maintenance routes. They are not mounted
    /// when this is unset.
    pub cache_admin_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | unset                      |
    /// | `SUPABASE_URL`         | unset                      |
    /// | `SUPABASE_ANON_KEY`    | unset                      |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    /// | `CACHE_TTL_MS`         | `60000`                    |
    /// | `MAX_RETRIES`          | `3`                        |
    /// | `RETRY_BASE_DELAY_MS`  | `1000`                     |
    /// | `FIXTURE_FALLBACK`     | `true`                     |
    /// | `CACHE_ADMIN_TOKEN`    | unset                      |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    ///
    /// Panics on values that do not parse, so misconfiguration fails fast
    /// at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = parse_or(&lookup, "PORT", 3000);

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30);
        let db_max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10);

        let defaults = RetryPolicy::default();
        let retry_policy = RetryPolicy {
            max_retries: parse_or(&lookup, "MAX_RETRIES", defaults.max_retries),
            base_delay: Duration::from_millis(parse_or(
                &lookup,
                "RETRY_BASE_DELAY_MS",
                defaults.base_delay.as_millis() as u64,
            )),
            cache_ttl: Duration::from_millis(parse_or(
                &lookup,
                "CACHE_TTL_MS",
                defaults.cache_ttl.as_millis() as u64,
            )),
        };

        let fixture_fallback: bool = parse_or(&lookup, "FIXTURE_FALLBACK", true);
        let cache_admin_token = non_empty(lookup("CACHE_ADMIN_TOKEN"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend: BackendConfig::resolve(&lookup),
            db_max_connections,
            retry_policy,
            fixture_fallback,
            cache_admin_token,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(name)) {
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid {}: {e}", std::any::type_name::<T>())),
        None => default,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.retry_policy, RetryPolicy::default());
        assert!(config.fixture_fallback);
        assert_eq!(config.backend, BackendConfig::Unconfigured);
        assert_eq!(config.cache_admin_token, None);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = config_from(&[("CORS_ORIGINS", "http://a.test, http://b.test,,")]);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn resilience_settings_are_read() {
        let config = config_from(&[
            ("CACHE_TTL_MS", "5000"),
            ("MAX_RETRIES", "0"),
            ("RETRY_BASE_DELAY_MS", "250"),
            ("FIXTURE_FALLBACK", "false"),
        ]);

        assert_eq!(config.retry_policy.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.retry_policy.max_retries, 0);
        assert_eq!(config.retry_policy.base_delay, Duration::from_millis(250));
        assert!(!config.fixture_fallback);
    }

    #[test]
    fn database_url_wins_over_rest_pair() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/airdrops"),
            ("SUPABASE_URL", "https://project.example.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]);

        assert_eq!(
            config.backend,
            BackendConfig::Postgres {
                database_url: "postgres://localhost/airdrops".into()
            }
        );
    }

    #[test]
    fn rest_backend_needs_both_url_and_key() {
        let only_url = config_from(&[("SUPABASE_URL", "https://project.example.co")]);
        assert!(!only_url.backend.is_configured());

        let both = config_from(&[
            ("SUPABASE_URL", "https://project.example.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]);
        assert_eq!(
            both.backend,
            BackendConfig::Postgrest(PostgrestConfig::new("https://project.example.co", "anon"))
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[
            ("DATABASE_URL", "  "),
            ("PORT", ""),
            ("CACHE_ADMIN_TOKEN", " "),
        ]);
        assert_eq!(config.backend, BackendConfig::Unconfigured);
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_admin_token, None);
    }

    #[test]
    fn cache_admin_token_is_read() {
        let config = config_from(&[("CACHE_ADMIN_TOKEN", "s3cret")]);
        assert_eq!(config.cache_admin_token.as_deref(), Some("s3cret"));
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid")]
    fn invalid_port_fails_fast() {
        config_from(&[("PORT", "eighty")]);
    }
}
