//! YAML loading for [`SimConfig`].

use haul_core::SimConfig;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

/// Parse a config document; omitted keys keep their defaults.
pub fn parse_config(text: &str) -> Result<SimConfig, ConfigError> {
    let cfg: SimConfig =
        serde_yaml::from_str(text).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    check(&cfg)?;
    Ok(cfg)
}

/// Read and parse a config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimConfig, ConfigError> {
    let text = fs::read_to_string(path.as_ref())?;
    let cfg = parse_config(&text)?;
    info!(path = %path.as_ref().display(), seed = cfg.rng_seed, "config loaded");
    Ok(cfg)
}

fn check(cfg: &SimConfig) -> Result<(), ConfigError> {
    if cfg.starting_capital < Decimal::ZERO {
        return Err(ConfigError::Invalid("starting_capital must be >= 0".into()));
    }
    if cfg.bankruptcy_threshold > Decimal::ZERO {
        return Err(ConfigError::Invalid("bankruptcy_threshold must be <= 0".into()));
    }
    if cfg.event_log_cap == 0 {
        return Err(ConfigError::Invalid("event_log_cap must be > 0".into()));
    }
    Ok(())
}
