//! Instrument registry: the fixed catalog of tradable instruments.
//!
//! Owns every [`Instrument`] exclusively. Iteration order is the order
//! instruments were listed, which keeps market views and simulator
//! ticks deterministic for a given seed.

use indexmap::IndexMap;

use crate::config::InstrumentSpec;
use crate::error::{Result, TradingError};
use crate::instrument::{Instrument, InstrumentSnapshot, PriceChange};
use crate::money::Price;

#[derive(Debug, Default)]
pub struct InstrumentRegistry {
    /// Symbol -> Instrument, in listing order.
    instruments: IndexMap<String, Instrument>,
}

impl InstrumentRegistry {
    pub fn new() -> Self {
        InstrumentRegistry::default()
    }

    /// Build a registry from catalog entries, rejecting any price below
    /// `floor` and any duplicate symbol. `floor` itself must be positive.
    pub fn from_specs(specs: &[InstrumentSpec], floor: Price) -> Result<Self> {
        if floor <= Price::ZERO {
            return Err(TradingError::InvalidConfig(format!(
                "price floor must be positive, got {}",
                floor
            )));
        }
        let mut registry = InstrumentRegistry::new();
        for spec in specs {
            let price = Price::from_float(spec.price);
            if price < floor {
                return Err(TradingError::InvalidPrice {
                    symbol: spec.symbol.clone(),
                    price,
                    floor,
                });
            }
            registry.list_instrument(Instrument::new(
                spec.symbol.to_ascii_uppercase(),
                spec.name.clone(),
                price,
            ))?;
        }
        Ok(registry)
    }

    /// Add an instrument to the catalog.
    pub fn list_instrument(&mut self, instrument: Instrument) -> Result<()> {
        if self.instruments.contains_key(instrument.symbol()) {
            return Err(TradingError::DuplicateInstrument(
                instrument.symbol().to_string(),
            ));
        }
        self.instruments
            .insert(instrument.symbol().to_string(), instrument);
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.instruments.contains_key(symbol)
    }

    /// Current price of `symbol`.
    pub fn price(&self, symbol: &str) -> Result<Price> {
        self.lookup(symbol).map(Instrument::price)
    }

    /// Set a new current price. The floor is the caller's concern.
    pub fn update_price(&mut self, symbol: &str, new_price: Price) -> Result<()> {
        let instrument = self
            .instruments
            .get_mut(symbol)
            .ok_or_else(|| TradingError::InstrumentNotFound(symbol.to_string()))?;
        instrument.update_price(new_price);
        Ok(())
    }

    pub fn price_change(&self, symbol: &str) -> Result<PriceChange> {
        self.lookup(symbol).map(Instrument::price_change)
    }

    pub fn price_history(&self, symbol: &str) -> Result<&[Price]> {
        self.lookup(symbol).map(Instrument::history)
    }

    /// Snapshot of every instrument, in listing order.
    pub fn list(&self) -> Vec<InstrumentSnapshot> {
        self.instruments.values().map(Instrument::snapshot).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.instruments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    fn lookup(&self, symbol: &str) -> Result<&Instrument> {
        self.instruments
            .get(symbol)
            .ok_or_else(|| TradingError::InstrumentNotFound(symbol.to_string()))
    }
}
