//! Market configuration.
//!
//! Plain `serde` structs; loading them from a file is the driver's job.
//! Every field has a default so a partial TOML table is enough:
//!
//! ```toml
//! price_floor = 1.0
//! max_move_pct = 5.0
//! seed = 42
//!
//! [[instruments]]
//! symbol = "AAPL"
//! name = "Apple Inc."
//! price = 150.0
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TradingError};
use crate::money::Price;

/// Minimum price any simulated move may produce.
pub const DEFAULT_PRICE_FLOOR: f64 = 1.0;

/// Largest per-tick move, in percent of the current price.
pub const DEFAULT_MAX_MOVE_PCT: f64 = 5.0;

/// Number of trades in the standard "recent history" view.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub symbol: String,
    pub name: String,
    pub price: f64,
}

impl InstrumentSpec {
    pub fn new(symbol: &str, name: &str, price: f64) -> Self {
        InstrumentSpec {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub price_floor: f64,
    pub max_move_pct: f64,
    pub history_limit: usize,

    /// Seed for the market simulator; `None` draws from OS entropy.
    pub seed: Option<u64>,

    pub instruments: Vec<InstrumentSpec>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            price_floor: DEFAULT_PRICE_FLOOR,
            max_move_pct: DEFAULT_MAX_MOVE_PCT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            seed: None,
            instruments: default_catalog(),
        }
    }
}

impl MarketConfig {
    pub fn floor(&self) -> Price {
        Price::from_float(self.price_floor)
    }

    /// Max move as a fraction (`5.0` percent -> `0.05`).
    pub fn max_move(&self) -> f64 {
        self.max_move_pct / 100.0
    }

    /// The floor must be a positive price and the move band must stay
    /// strictly inside `(-100%, +100%)`, or prices could reach zero.
    pub fn validate(&self) -> Result<()> {
        if !self.price_floor.is_finite() || self.floor() <= Price::ZERO {
            return Err(TradingError::InvalidConfig(format!(
                "price_floor must be positive, got {}",
                self.price_floor
            )));
        }
        if !self.max_move_pct.is_finite() || !(0.0..100.0).contains(&self.max_move_pct) {
            return Err(TradingError::InvalidConfig(format!(
                "max_move_pct must be in [0, 100), got {}",
                self.max_move_pct
            )));
        }
        Ok(())
    }
}

/// The eight instruments listed at startup.
pub fn default_catalog() -> Vec<InstrumentSpec> {
    vec![
        InstrumentSpec::new("AAPL", "Apple Inc.", 150.00),
        InstrumentSpec::new("GOOGL", "Alphabet Inc.", 2500.00),
        InstrumentSpec::new("MSFT", "Microsoft Corp.", 300.00),
        InstrumentSpec::new("TSLA", "Tesla Inc.", 800.00),
        InstrumentSpec::new("AMZN", "Amazon.com Inc.", 3200.00),
        InstrumentSpec::new("NVDA", "NVIDIA Corp.", 220.00),
        InstrumentSpec::new("META", "Meta Platforms Inc.", 320.00),
        InstrumentSpec::new("NFLX", "Netflix Inc.", 400.00),
    ]
}
