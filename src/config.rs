//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of item snapshots the cache can hold
    pub max_entries: usize,
    /// Seconds a cached snapshot is served after it was put
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// SQLite database file; the in-memory store is used when unset
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 10)
    /// - `DEFAULT_TTL` - Cache expiry in seconds (default: 200)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 5)
    /// - `DATABASE_PATH` - SQLite file path (default: unset, in-memory store)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            database_path: env::var_os("DATABASE_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Cache expiry as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 10,
            default_ttl: 200,
            server_port: 8080,
            cleanup_interval: 5,
            database_path: None,
        }
    }
}
