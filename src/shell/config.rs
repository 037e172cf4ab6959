// Process configuration read from the environment.
//
// Responsibilities
// - Resolve the listen port, with a fixed fallback.
// - Carry the database connection string. It is never compiled into the binary.

use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_NAME: &str = "budget_tracker";
pub const DEFAULT_JSON_BODY_LIMIT: usize = 100 * 1024;
pub const IN_MEMORY_DATABASE_URI: &str = "memory://";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JSON_BODY_LIMIT must be a positive number of bytes, got {0:?}")]
    InvalidBodyLimit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub database_uri: Option<String>,
    pub database_name: String,
    pub json_body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_uri: None,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            json_body_limit: DEFAULT_JSON_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let json_body_limit = match non_empty("JSON_BODY_LIMIT") {
            None => DEFAULT_JSON_BODY_LIMIT,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::InvalidBodyLimit(raw)),
            },
        };

        Ok(Self {
            port: parse_port(lookup("PORT").as_deref()),
            database_uri: non_empty("MONGODB_URI").or_else(|| non_empty("DATABASE_URL")),
            database_name: non_empty("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            json_body_limit,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn uses_in_memory_database(&self) -> bool {
        self.database_uri.as_deref() == Some(IN_MEMORY_DATABASE_URI)
    }
}

/// Absent, non-numeric or out of range values fall back to [`DEFAULT_PORT`].
pub fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
