use std::time::Duration;

use baba_core::visits::DEFAULT_CHECK_INTERVAL_SECS;

use crate::auth::jwt::JwtConfig;

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
    /// Upper bound on post-shutdown cleanup, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// Visit simulator settings.
    pub yard: YardConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            yard: YardConfig::from_env(),
        }
    }
}

/// Background visit simulator settings.
#[derive(Debug, Clone)]
pub struct YardConfig {
    /// Seconds between simulator passes.
    pub visit_check_interval_secs: u64,
    /// When `false`, visits only happen through `POST /yard/check-visits`.
    pub simulator_enabled: bool,
}

impl YardConfig {
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `VISIT_CHECK_INTERVAL_SECS` | `30`    |
    /// | `VISIT_SIMULATOR_ENABLED`   | `true`  |
    pub fn from_env() -> Self {
        let visit_check_interval_secs: u64 = std::env::var("VISIT_CHECK_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_CHECK_INTERVAL_SECS.to_string())
            .parse()
            .expect("VISIT_CHECK_INTERVAL_SECS must be a valid u64");
        assert!(
            visit_check_interval_secs > 0,
            "VISIT_CHECK_INTERVAL_SECS must be greater than zero"
        );

        let simulator_enabled: bool = std::env::var("VISIT_SIMULATOR_ENABLED")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("VISIT_SIMULATOR_ENABLED must be true or false");

        Self {
            visit_check_interval_secs,
            simulator_enabled,
        }
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.visit_check_interval_secs)
    }
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            visit_check_interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
            simulator_enabled: true,
        }
    }
}
