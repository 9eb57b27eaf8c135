//! trading-sim
//!
//! Batch driver for the trading simulator: loads configuration, builds
//! a desk, and replays command scripts through it.

pub mod config;
pub mod runner;
pub mod logging;
