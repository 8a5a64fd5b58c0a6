//! Server configuration.
//!
//! Every setting has a default and can be overridden by an environment
//! variable. Unparseable values are reported and the default is kept, so a
//! typo never stops the server from starting.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::cache::CacheConfig;

/// Address to listen on.
pub const ADDR_VAR: &str = "PLANNER_ADDR";
/// Path of the timetable file.
pub const TIMETABLE_VAR: &str = "PLANNER_TIMETABLE";
/// Directory of static assets.
pub const STATIC_DIR_VAR: &str = "PLANNER_STATIC_DIR";
/// Maximum number of cached searches.
pub const CACHE_CAPACITY_VAR: &str = "PLANNER_CACHE_CAPACITY";

/// Configuration for the web server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: SocketAddr,

    /// Timetable file loaded at startup.
    pub timetable_path: PathBuf,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Search cache settings.
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            timetable_path: PathBuf::from("timetable.txt"),
            static_dir: PathBuf::from("static"),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = parse_var(&lookup, ADDR_VAR) {
            config.bind_addr = addr;
        }
        if let Some(path) = lookup(TIMETABLE_VAR).filter(|s| !s.is_empty()) {
            config.timetable_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(STATIC_DIR_VAR).filter(|s| !s.is_empty()) {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(capacity) = parse_var(&lookup, CACHE_CAPACITY_VAR) {
            config.cache.max_capacity = capacity;
        }

        config
    }
}

/// Parse a variable, warning and returning `None` if it is set but invalid.
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(key, value = %value, error = %e, "ignoring invalid setting, using default");
            None
        }
    }
}
