//! Point-in-time valuation of an account.

use serde::{Deserialize, Serialize};

use crate::money::{Cash, Price, Quantity};

/// One holding valued at the current market price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub shares: Quantity,
    pub price: Price,
    /// `shares × price`.
    pub value: Cash,
}

/// Account valuation, recomputed from live prices on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioView {
    pub username: String,
    pub balance: Cash,
    /// Sorted by symbol.
    pub positions: Vec<Position>,
    /// Sum of every position's value.
    pub holdings_value: Cash,
    /// `balance + holdings_value`.
    pub total_value: Cash,
}
