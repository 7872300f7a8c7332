//! Server configuration from environment variables
//!
//! | Variable                 | Default                                   |
//! |--------------------------|-------------------------------------------|
//! | `DATA_DIR`               | `data`                                    |
//! | `PORT`                   | `3000`                                    |
//! | `TRANSLATE_URL`          | `https://api.mymemory.translated.net/get` |
//! | `TRANSLATE_TIMEOUT_SECS` | `10`                                      |
//! | `CACHE_TTL_SECS`         | `300`                                     |
//! | `CACHE_CAPACITY`         | `10000`                                   |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::translate::mymemory::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub port: u16,
    pub translate_url: String,
    pub translate_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            port: 3000,
            translate_url: DEFAULT_BASE_URL.to_string(),
            translate_timeout: DEFAULT_TIMEOUT,
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 10_000,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            port: parse_or("PORT", &lookup, defaults.port),
            translate_url: lookup("TRANSLATE_URL").unwrap_or(defaults.translate_url),
            translate_timeout: Duration::from_secs(parse_or(
                "TRANSLATE_TIMEOUT_SECS",
                &lookup,
                defaults.translate_timeout.as_secs(),
            )),
            cache_ttl: Duration::from_secs(parse_or("CACHE_TTL_SECS", &lookup, defaults.cache_ttl.as_secs())),
            cache_capacity: parse_or("CACHE_CAPACITY", &lookup, defaults.cache_capacity),
        }
    }

    pub fn plants_path(&self) -> PathBuf {
        self.data_dir.join("plants.json")
    }

    pub fn images_path(&self) -> PathBuf {
        self.data_dir.join("images.json")
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Invalid {}={:?}, using default {}", key, raw, default);
                default
            }
        },
    }
}
