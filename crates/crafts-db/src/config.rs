//! # Marketplace Configuration
//!
//! Which store backend to open and the marketplace-wide shipping defaults.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CRAFTS_STORE_BACKEND=memory                                        │
//! │     CRAFTS_DATABASE_PATH=./data/crafts.db                              │
//! │     CRAFTS_FREE_SHIPPING_THRESHOLD_CENTS=10000                         │
//! │     CRAFTS_CURRENCY=EUR                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $CRAFTS_CONFIG, or ./crafts.toml (optional)                        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SQLite at ./crafts.db, no marketplace threshold, USD               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # crafts.toml
//! [store]
//! backend = "sqlite"          # sqlite | memory
//! database_path = "crafts.db"
//! max_connections = 5
//!
//! [shipping]
//! free_shipping_threshold_cents = 15000
//! additional_unit_bps = 5000  # each extra unit ships at 50%
//! currency = "USD"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crafts_core::money::Money;
use crafts_core::shipping::rates::{DEFAULT_ADDITIONAL_UNIT_BPS, MAX_ADDITIONAL_UNIT_BPS};
use crafts_core::shipping::ShippingRules;
use crafts_core::validation::{validate_currency, validate_price};
use crafts_core::DEFAULT_CURRENCY;

use crate::error::{ConfigError, ConfigResult};
use crate::pool::DbConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CRAFTS_CONFIG";

/// Config file used when `CRAFTS_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "crafts.toml";

// =============================================================================
// Store Backend
// =============================================================================

/// Which [`DataStore`](crate::store::DataStore) implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// SQLite file with embedded migrations.
    #[default]
    Sqlite,

    /// Process-local maps. Contents vanish on exit.
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Sqlite => write!(f, "sqlite"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "sql" => Ok(StoreBackend::Sqlite),
            "memory" | "mem" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::invalid(
                "store.backend",
                format!("unknown backend '{}', valid options: sqlite, memory", other),
            )),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("crafts.db")
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            backend: StoreBackend::default(),
            database_path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[shipping]` section: marketplace-wide defaults.
///
/// A product's own free-shipping threshold takes precedence over
/// `free_shipping_threshold_cents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingSettings {
    #[serde(default)]
    pub free_shipping_threshold_cents: Option<i64>,

    #[serde(default = "default_additional_unit_bps")]
    pub additional_unit_bps: u32,

    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_additional_unit_bps() -> u32 {
    DEFAULT_ADDITIONAL_UNIT_BPS
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for ShippingSettings {
    fn default() -> Self {
        ShippingSettings {
            free_shipping_threshold_cents: None,
            additional_unit_bps: default_additional_unit_bps(),
            currency: default_currency(),
        }
    }
}

// =============================================================================
// Market Config
// =============================================================================

/// Complete configuration for the storage and quote layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub shipping: ShippingSettings,
}

impl MarketConfig {
    /// Loads configuration: file (if present), then environment, then
    /// validation.
    ///
    /// `config_path` wins over `CRAFTS_CONFIG`, which wins over
    /// `./crafts.toml`. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_file_or_default(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        info!(
            backend = %config.store.backend,
            currency = %config.shipping.currency,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn from_file_or_default(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `CRAFTS_*` overrides read through `lookup`.
    ///
    /// Unlike a missing variable, a present but unparsable one is an error.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("CRAFTS_STORE_BACKEND") {
            self.store.backend = backend.parse()?;
            debug!(backend = %self.store.backend, "Overriding store backend from environment");
        }

        if let Some(path) = lookup("CRAFTS_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.store.database_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("CRAFTS_FREE_SHIPPING_THRESHOLD_CENTS") {
            let raw = raw.trim();
            self.shipping.free_shipping_threshold_cents = if raw.is_empty() {
                None
            } else {
                let cents = raw.parse::<i64>().map_err(|e| {
                    ConfigError::invalid("CRAFTS_FREE_SHIPPING_THRESHOLD_CENTS", e)
                })?;
                Some(cents)
            };
        }

        if let Some(currency) = lookup("CRAFTS_CURRENCY") {
            self.shipping.currency = currency.trim().to_uppercase();
        }

        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.max_connections == 0 {
            return Err(ConfigError::invalid(
                "store.max_connections",
                "must be greater than 0",
            ));
        }

        if let Some(cents) = self.shipping.free_shipping_threshold_cents {
            validate_price("free_shipping_threshold", Money::from_cents(cents))
                .map_err(|e| ConfigError::invalid("shipping.free_shipping_threshold_cents", e))?;
        }

        if self.shipping.additional_unit_bps > MAX_ADDITIONAL_UNIT_BPS {
            return Err(ConfigError::invalid(
                "shipping.additional_unit_bps",
                format!("must be at most {}", MAX_ADDITIONAL_UNIT_BPS),
            ));
        }

        validate_currency(&self.shipping.currency)
            .map_err(|e| ConfigError::invalid("shipping.currency", e))?;

        Ok(())
    }

    /// Shipping rules for the core calculator.
    pub fn shipping_rules(&self) -> ShippingRules {
        let rules =
            ShippingRules::default().with_additional_unit_bps(self.shipping.additional_unit_bps);
        match self.shipping.free_shipping_threshold_cents {
            Some(cents) => rules.with_free_shipping_threshold(Money::from_cents(cents)),
            None => rules,
        }
    }

    /// Pool configuration for the SQLite backend.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.store.database_path).max_connections(self.store.max_connections)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.shipping.currency, "USD");
        assert_eq!(config.shipping.free_shipping_threshold_cents, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = MarketConfig::from_toml_str(
            r#"
            [store]
            backend = "memory"

            [shipping]
            free_shipping_threshold_cents = 15000
            "#,
        )
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.max_connections, 5);
        assert_eq!(config.shipping.additional_unit_bps, DEFAULT_ADDITIONAL_UNIT_BPS);

        let rules = config.shipping_rules();
        assert_eq!(rules.free_shipping_threshold, Some(Money::from_cents(15000)));
    }

    #[test]
    fn test_rejects_unknown_backend_in_file() {
        assert!(MarketConfig::from_toml_str("[store]\nbackend = \"postgres\"").is_err());
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = MarketConfig::from_toml_str("[shipping]\ncurrency = \"USD\"").unwrap();
        config
            .apply_overrides(env(&[
                ("CRAFTS_STORE_BACKEND", "memory"),
                ("CRAFTS_DATABASE_PATH", "/tmp/crafts-test.db"),
                ("CRAFTS_FREE_SHIPPING_THRESHOLD_CENTS", "9900"),
                ("CRAFTS_CURRENCY", "eur"),
            ]))
            .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.database_path, PathBuf::from("/tmp/crafts-test.db"));
        assert_eq!(config.shipping.free_shipping_threshold_cents, Some(9900));
        assert_eq!(config.shipping.currency, "EUR");
    }

    #[test]
    fn test_bad_env_value_is_an_error() {
        let mut config = MarketConfig::default();
        let err = config
            .apply_overrides(env(&[("CRAFTS_FREE_SHIPPING_THRESHOLD_CENTS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validation() {
        let mut config = MarketConfig::default();
        config.shipping.currency = "dollars".to_string();
        assert!(config.validate().is_err());

        let mut config = MarketConfig::default();
        config.shipping.free_shipping_threshold_cents = Some(-1);
        assert!(config.validate().is_err());

        let mut config = MarketConfig::default();
        config.store.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_additional_unit_bps_ceiling() {
        let mut config = MarketConfig::default();
        config.shipping.additional_unit_bps = MAX_ADDITIONAL_UNIT_BPS;
        assert!(config.validate().is_ok());

        config.shipping.additional_unit_bps = 4_000_000_000;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "shipping.additional_unit_bps"
        ));

        let config = MarketConfig::from_toml_str("[shipping]\nadditional_unit_bps = 20000\n")
            .and_then(|c| c.validate());
        assert!(config.is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config =
            MarketConfig::from_file_or_default(Path::new("/nonexistent/crafts.toml")).unwrap();
        assert_eq!(config, MarketConfig::default());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("SQLite".parse::<StoreBackend>().unwrap(), StoreBackend::Sqlite);
        assert_eq!("mem".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("redis".parse::<StoreBackend>().is_err());
    }
}
