//! Market simulator: random per-tick price perturbations.
//!
//! Each tick draws one independent move per instrument, uniform in
//! `[-max_move, +max_move]` of the current price. The result is snapped
//! onto the fixed-point grid, kept inside the exact move band, and then
//! raised to the price floor if needed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::MarketConfig;
use crate::error::Result;
use crate::money::Price;
use crate::registry::InstrumentRegistry;

#[derive(Debug)]
pub struct MarketSimulator<R: Rng = StdRng> {
    rng: R,
    /// Fraction, e.g. `0.05` for ±5%.
    max_move: f64,
    floor: Price,
}

impl MarketSimulator<StdRng> {
    /// Seeded from the config when it has a seed, from OS entropy otherwise.
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(MarketSimulator::with_rng(rng, config.max_move(), config.floor()))
    }

    /// Default bounds with a fixed seed; same seed, same price path.
    pub fn seeded(seed: u64) -> Self {
        let config = MarketConfig::default();
        MarketSimulator::with_rng(StdRng::seed_from_u64(seed), config.max_move(), config.floor())
    }
}

impl<R: Rng> MarketSimulator<R> {
    pub fn with_rng(rng: R, max_move: f64, floor: Price) -> Self {
        MarketSimulator {
            rng,
            max_move: max_move.abs(),
            floor,
        }
    }

    /// Move every instrument in `registry` by one independent draw.
    pub fn tick(&mut self, registry: &mut InstrumentRegistry) {
        let moves: Vec<(String, Price)> = registry
            .iter()
            .map(|instrument| {
                let perturbation = self.draw();
                let next = self.next_price(instrument.price(), perturbation);
                (instrument.symbol().to_string(), next)
            })
            .collect();

        for (symbol, next) in moves {
            // Symbols came from this registry a moment ago.
            if registry.update_price(&symbol, next).is_ok() {
                debug!(%symbol, price = %next, "price moved");
            }
        }
    }

    fn draw(&mut self) -> f64 {
        if self.max_move == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-self.max_move..=self.max_move)
    }

    /// Apply `perturbation` to `current`, then clamp into the move band
    /// and lift to the floor.
    fn next_price(&self, current: Price, perturbation: f64) -> Price {
        let raw = current.raw();
        let proposed = (raw as f64 * (1.0 + perturbation)).round() as i64;

        // Exact integer band [ceil(raw·(1-m)), floor(raw·(1+m))], in basis
        // points so the bounds never depend on float rounding.
        let bps = (self.max_move * 10_000.0).round() as i128;
        let raw_wide = raw as i128;
        let lo_num = raw_wide * (10_000 - bps);
        let lo = (lo_num + 9_999).div_euclid(10_000);
        let hi = (raw_wide * (10_000 + bps)).div_euclid(10_000);
        let banded = (proposed as i128).clamp(lo.min(hi), hi.max(lo)) as i64;

        Price(banded).max(self.floor)
    }
}
