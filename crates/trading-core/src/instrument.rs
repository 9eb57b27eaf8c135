//! A single tradable instrument and its price state.

use serde::{Deserialize, Serialize};

use crate::money::Price;

/// A tradable symbol with current/previous price and full price history.
///
/// Invariant: `history` is never empty and its last element always
/// equals `price`.
#[derive(Debug, Clone)]
pub struct Instrument {
    symbol: String,
    name: String,
    price: Price,
    previous_price: Price,
    history: Vec<Price>,
}

impl Instrument {
    /// New instrument; previous price starts equal to the initial price
    /// and the history holds just that price.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Instrument {
            symbol: symbol.into(),
            name: name.into(),
            price,
            previous_price: price,
            history: vec![price],
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn previous_price(&self) -> Price {
        self.previous_price
    }

    /// Every price this instrument has had, oldest first.
    pub fn history(&self) -> &[Price] {
        &self.history
    }

    /// Shift current into previous and record `new_price`.
    ///
    /// No floor is applied here; the market simulator clamps before
    /// calling.
    pub fn update_price(&mut self, new_price: Price) {
        self.previous_price = self.price;
        self.price = new_price;
        self.history.push(new_price);
    }

    pub fn price_change(&self) -> PriceChange {
        PriceChange::between(self.previous_price, self.price)
    }

    pub fn snapshot(&self) -> InstrumentSnapshot {
        InstrumentSnapshot {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            price: self.price,
            previous_price: self.previous_price,
        }
    }
}

/// Difference between the previous and current price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    /// `current - previous`.
    pub delta: Price,
    /// `delta / previous * 100`.
    pub percent: f64,
}

impl PriceChange {
    pub fn between(previous: Price, current: Price) -> Self {
        let delta = current - previous;
        let percent = if previous.raw() == 0 {
            0.0
        } else {
            delta.raw() as f64 / previous.raw() as f64 * 100.0
        };
        PriceChange { delta, percent }
    }
}

/// Read-only copy of an instrument's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSnapshot {
    pub symbol: String,
    pub name: String,
    pub price: Price,
    pub previous_price: Price,
}

impl InstrumentSnapshot {
    pub fn change(&self) -> PriceChange {
        PriceChange::between(self.previous_price, self.price)
    }
}
