//! Append-only log of executed trades.
//!
//! Records hold denormalized snapshot fields only (username, symbol,
//! price at execution) and never point back at accounts or
//! instruments. There is no update or delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Cash, Price, Quantity};
use crate::side::Side;

/// One executed trade. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    username: String,
    side: Side,
    symbol: String,
    quantity: Quantity,
    price: Price,
    timestamp: DateTime<Utc>,
}

impl TradeRecord {
    pub fn new(
        username: impl Into<String>,
        side: Side,
        symbol: impl Into<String>,
        quantity: Quantity,
        price: Price,
        timestamp: DateTime<Utc>,
    ) -> Self {
        TradeRecord {
            username: username.into(),
            side,
            symbol: symbol.into(),
            quantity,
            price,
            timestamp,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Execution price captured when the ledger was mutated.
    pub fn price(&self) -> Price {
        self.price
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// `quantity × price`. Always representable: the ledger rejected
    /// the trade otherwise.
    pub fn notional(&self) -> Cash {
        self.price * self.quantity
    }
}

#[derive(Debug, Default)]
pub struct TransactionLog {
    records: Vec<TradeRecord>,
}

impl TransactionLog {
    pub fn new() -> Self {
        TransactionLog::default()
    }

    pub fn append(&mut self, record: TradeRecord) -> &TradeRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// The last `n` records (all of them if fewer exist), oldest first.
    pub fn recent(&self, n: usize) -> &[TradeRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn all(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Records belonging to one user, oldest first.
    pub fn for_user<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a TradeRecord> + 'a {
        self.records.iter().filter(move |r| r.username == username)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
