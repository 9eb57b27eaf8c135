//! trading-core
//!
//! Pure trading simulator logic:
//! - money (fixed-point prices, cash, share counts)
//! - instrument registry with price history
//! - account ledger (balances + holdings)
//! - append-only transaction log
//! - trading engine (price capture -> ledger -> log)
//! - market simulator (seedable random price moves)
//! - desk (request/response front with an explicit session)

pub mod money;
pub mod side;
pub mod error;
pub mod config;
pub mod instrument;
pub mod registry;
pub mod account;
pub mod portfolio;
pub mod ledger;
pub mod transaction_log;
pub mod simulator;
pub mod trading_engine;
pub mod messages;
pub mod desk;

pub use money::{Cash, Price, Quantity, PRICE_SCALE};
pub use side::Side;
pub use error::{Result, TradingError};
pub use config::{InstrumentSpec, MarketConfig};
pub use instrument::{Instrument, InstrumentSnapshot, PriceChange};
pub use registry::InstrumentRegistry;
pub use account::Account;
pub use portfolio::{PortfolioView, Position};
pub use ledger::AccountLedger;
pub use transaction_log::{TradeRecord, TransactionLog};
pub use simulator::MarketSimulator;
pub use trading_engine::{Session, TradingEngine};
pub use messages::{PortfolioSummary, Request, Response};
pub use desk::TradingDesk;
