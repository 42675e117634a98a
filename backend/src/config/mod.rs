//! Central module for application-wide configuration settings.
//!
//! This module loads the runtime parameters (store location, upstream
//! credential and endpoint, cache bounds, freshness window, risk model and
//! bind address) from environment variables, falling back to defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use jobrisk_adapters::{ResponseCache, BLS_API_URL};

use crate::services::risk_scorer::RiskModel;

pub const DEFAULT_FRESHNESS_DAYS: i64 = 90;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file; `None` runs without persistence.
    pub database_path: Option<PathBuf>,
    /// Upstream credential; `None` serves the offline sample series.
    pub bls_api_key: Option<String>,
    pub bls_api_url: String,
    pub http_timeout: Duration,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
    pub freshness_days: i64,
    pub risk_model: RiskModel,
    pub bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            bls_api_key: None,
            bls_api_url: BLS_API_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            cache_capacity: ResponseCache::DEFAULT_CAPACITY,
            cache_ttl: ResponseCache::DEFAULT_TTL,
            freshness_days: DEFAULT_FRESHNESS_DAYS,
            risk_model: RiskModel::Category,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unparsable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database_path: non_empty("DATABASE_PATH").map(PathBuf::from),
            bls_api_key: non_empty("BLS_API_KEY"),
            bls_api_url: non_empty("BLS_API_URL").unwrap_or(defaults.bls_api_url),
            http_timeout: lookup("BLS_HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            cache_capacity: lookup("RESPONSE_CACHE_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_capacity),
            cache_ttl: lookup("RESPONSE_CACHE_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            freshness_days: lookup("FRESHNESS_DAYS")
                .and_then(|v| v.parse().ok())
                .filter(|days: &i64| *days > 0)
                .unwrap_or(defaults.freshness_days),
            risk_model: lookup("RISK_MODEL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.risk_model),
            bind_addr: lookup("BIND_ADDR")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bind_addr),
        }
    }
}
