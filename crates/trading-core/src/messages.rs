//! Message types consumed and produced by the trading desk.
//!
//! These are **transport-agnostic** logical messages:
//! - [`Request`]: what the desk consumes.
//! - [`Response`]: what the desk produces.
//!
//! Text encoding lives in the `trading-protocol` crate; this module is
//! purely logical.

use crate::error::TradingError;
use crate::instrument::InstrumentSnapshot;
use crate::money::{Cash, Price, Quantity};
use crate::portfolio::Position;
use crate::transaction_log::TradeRecord;

/// A request into the trading desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Open a new account.
    Register { username: String, initial_balance: Cash },

    /// Make `username` the active session.
    Login { username: String },

    /// Drop the active session.
    Logout,

    /// Quote every listed instrument.
    Market,

    Buy { symbol: String, quantity: Quantity },

    Sell { symbol: String, quantity: Quantity },

    /// Value the active account.
    Portfolio,

    /// Most recent trades across all users; `None` means the configured default.
    History { limit: Option<usize> },

    /// Every recorded price of one instrument.
    PriceHistory { symbol: String },

    /// Run one market simulator pass.
    Tick,
}

/// An event emitted by the trading desk.
///
/// One request may produce several responses (a quote per instrument,
/// a position per holding, a line per trade).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Registered { username: String, balance: Cash },

    LoggedIn { username: String },

    LoggedOut { username: String },

    Quote(InstrumentSnapshot),

    /// A trade executed for the active session.
    Filled(TradeRecord),

    /// Header of a portfolio view; followed by one `Position` per holding.
    Portfolio(PortfolioSummary),

    Position(Position),

    /// One line of trade history.
    Trade(TradeRecord),

    PriceHistory { symbol: String, prices: Vec<Price> },

    /// Prices moved; `instruments` is how many were updated.
    MarketUpdated { instruments: usize },

    /// The request failed; no state changed.
    Rejected(TradingError),
}

/// Totals of a portfolio view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSummary {
    pub username: String,
    pub balance: Cash,
    pub holdings_value: Cash,
    pub total_value: Cash,
}

impl Response {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Response::Rejected(_))
    }
}

impl From<TradingError> for Response {
    fn from(err: TradingError) -> Self {
        Response::Rejected(err)
    }
}
