// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

/// How often the server sweeps expired sessions.
pub const SESSION_PURGE_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub log_dir: String,
    /// Idle time after which an unfinished session is discarded.
    pub session_ttl_secs: i64,
    pub seed_sample_data: bool,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://quiz.db?mode=rwc".to_string(),
            rust_log: "info".to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_dir: "logs".to_string(),
            session_ttl_secs: 2 * 60 * 60,
            seed_sample_data: true,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.bind_addr);

        let log_dir = env::var("LOG_DIR").unwrap_or(defaults.log_dir);

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &i64| *secs > 0)
            .unwrap_or(defaults.session_ttl_secs);

        let seed_sample_data = env::var("SEED_SAMPLE_DATA")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed_sample_data);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        Self {
            database_url,
            rust_log,
            bind_addr,
            log_dir,
            session_ttl_secs,
            seed_sample_data,
            cors_origins,
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_secs)
    }
}
