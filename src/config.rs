//! Runtime configuration resolved from the environment

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DATA_DIR_NAME, DEFAULT_HISTORY_CAPACITY, DEFAULT_TIMEOUT_SECS};

/// Overrides the data directory
pub const HOME_ENV: &str = "TYPESHOT_HOME";
/// Overrides the history capacity
pub const HISTORY_LIMIT_ENV: &str = "TYPESHOT_HISTORY_LIMIT";
/// Overrides the HTTP timeout, in seconds
pub const TIMEOUT_ENV: &str = "TYPESHOT_TIMEOUT_SECS";

#[derive(Clone, Debug)]
pub struct Config {
    /// Where the form state, history and log file live
    pub data_dir: PathBuf,
    pub history_capacity: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build a config from the process environment, along with the names of
    /// variables whose values were ignored
    pub fn from_env() -> (Self, Vec<&'static str>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Values that fail to parse (or a zero capacity) fall back to the defaults
    /// and are reported back by variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<&'static str>) {
        let mut config = Config::default();
        let mut rejected = Vec::new();

        if let Some(dir) = lookup(HOME_ENV).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        match lookup(HISTORY_LIMIT_ENV).map(|v| v.trim().parse::<usize>()) {
            Some(Ok(limit)) if limit > 0 => config.history_capacity = limit,
            Some(_) => rejected.push(HISTORY_LIMIT_ENV),
            None => {}
        }

        match lookup(TIMEOUT_ENV).map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
            Some(_) => rejected.push(TIMEOUT_ENV),
            None => {}
        }

        (config, rejected)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
