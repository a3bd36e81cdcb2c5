//! Application configuration loaded from TOML.
//!
//! ```toml
//! store_path = "portfolio.csv"
//! log_level = "info"
//!
//! [market]
//! max_move = 0.05
//! seed = 42
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::feed::{RandomFeed, DEFAULT_MAX_MOVE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV file holding the portfolio.
    pub store_path: PathBuf,
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,
    pub market: MarketConfig,
}

/// Market simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Largest simulated move as a fraction; must be in `[0, 1)`.
    pub max_move: f64,
    /// Fixed seed for reproducible simulations.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("portfolio.csv"),
            log_level: "info".to_string(),
            market: MarketConfig::default(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            max_move: DEFAULT_MAX_MOVE,
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_move = self.market.max_move;
        if !(0.0..1.0).contains(&max_move) {
            return Err(ConfigError::Invalid(format!(
                "market.max_move must be in [0, 1), got {max_move}"
            )));
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store_path must not be empty".into()));
        }
        Ok(())
    }
}

impl MarketConfig {
    /// Seeded feed when a seed is configured, otherwise entropy-seeded.
    pub fn feed(&self) -> RandomFeed {
        match self.seed {
            Some(seed) => RandomFeed::seeded(seed, self.max_move),
            None => RandomFeed::from_entropy(self.max_move),
        }
    }
}
