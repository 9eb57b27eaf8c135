//! Configuration for the trading-sim driver.
//!
//! Layering, lowest to highest precedence:
//! - built-in defaults (`MarketConfig::default()`)
//! - TOML file passed with `--config`
//! - environment variables:
//!   - `TRADING_SEED`          (u64, simulator seed)
//!   - `TRADING_HISTORY_LIMIT` (usize, default trade-history length)
//! - command-line flags (applied by `main`)

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use trading_core::MarketConfig;

pub const ENV_SEED: &str = "TRADING_SEED";
pub const ENV_HISTORY_LIMIT: &str = "TRADING_HISTORY_LIMIT";

/// Load the market config from `path`, or defaults when `None`, then
/// apply environment overrides.
pub fn load(path: Option<&Path>) -> Result<MarketConfig> {
    let config = match path {
        Some(path) => from_file(path)?,
        None => MarketConfig::default(),
    };
    apply_overrides(config, |key| env::var(key).ok())
}

pub fn from_file(path: &Path) -> Result<MarketConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    from_toml(&text).with_context(|| format!("parsing config file {}", path.display()))
}

pub fn from_toml(text: &str) -> Result<MarketConfig> {
    Ok(toml::from_str(text)?)
}

/// Apply overrides found through `lookup` (normally `env::var`).
pub fn apply_overrides<F>(mut config: MarketConfig, lookup: F) -> Result<MarketConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(seed) = read_override::<u64, _>(&lookup, ENV_SEED)? {
        config.seed = Some(seed);
    }
    if let Some(limit) = read_override::<usize, _>(&lookup, ENV_HISTORY_LIMIT)? {
        config.history_limit = limit;
    }
    Ok(config)
}

fn read_override<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let parsed = val
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {}: {:?}", key, val))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}
