//! Configuration types for fixrec.
//!
//! [`Config::load`] reads `~/.config/fixrec/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::from_file`] layers
//! an explicit file over the defaults. [`Config::defaults`] returns the same
//! defaults without touching the filesystem (useful in tests).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::store::Columns;
use crate::types::Bookmaker;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[store]
dir                  = "data"
include_updated_at   = false
seed_seen_from_store = false

[scan]
# Reference date override, YYYY-MM-DD. Empty means the local date.
today = ""

[arbitrage]
investment = 100.0

[log]
filter = "info"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// `[store]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub include_updated_at: bool,
    /// Start each bulk collection with the identities already in the store.
    #[serde(default)]
    pub seed_seen_from_store: bool,
}

fn default_store_dir() -> PathBuf { PathBuf::from("data") }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            include_updated_at: false,
            seed_seen_from_store: false,
        }
    }
}

impl StoreConfig {
    /// Store file for `bookmaker`: `<dir>/<bookmaker>.csv`.
    pub fn path_for(&self, bookmaker: Bookmaker) -> PathBuf {
        self.dir.join(format!("{bookmaker}.csv"))
    }

    pub fn columns(&self) -> Columns {
        if self.include_updated_at {
            Columns::WithUpdatedAt
        } else {
            Columns::Base
        }
    }
}

/// `[scan]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub today: String,
}

impl ScanConfig {
    /// The configured reference date, if one is set.
    pub fn today(&self) -> anyhow::Result<Option<NaiveDate>> {
        let raw = self.today.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("scan.today {raw:?} is not YYYY-MM-DD: {e}"))?;
        Ok(Some(date))
    }
}

/// `[arbitrage]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArbitrageConfig {
    #[serde(default = "default_investment")]
    pub investment: f64,
}

fn default_investment() -> f64 { 100.0 }

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self { investment: default_investment() }
    }
}

/// `[log]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "info".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/fixrec/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(&path, false)
    }

    /// Load an explicit config file over the built-in defaults.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::layered(path.as_ref(), true)
    }

    fn layered(path: &Path, required: bool) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("fixrec")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
