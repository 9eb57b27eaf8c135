//! A registered user's cash balance and share holdings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::{Cash, Quantity};

/// Account state. Mutated only through the ledger.
///
/// Holdings never store a zero count: a symbol whose shares drop to
/// zero is removed, so "absent" and "zero" read the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    username: String,
    balance: Cash,
    holdings: BTreeMap<String, Quantity>,
}

impl Account {
    pub(crate) fn new(username: impl Into<String>, balance: Cash) -> Self {
        Account {
            username: username.into(),
            balance,
            holdings: BTreeMap::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn balance(&self) -> Cash {
        self.balance
    }

    /// Symbol -> share count, sorted by symbol.
    pub fn holdings(&self) -> &BTreeMap<String, Quantity> {
        &self.holdings
    }

    /// Shares held of `symbol`; zero when absent.
    pub fn shares(&self, symbol: &str) -> Quantity {
        self.holdings.get(symbol).copied().unwrap_or(Quantity::ZERO)
    }

    // Both setters below are only called once the ledger has checked
    // every precondition, so they cannot leave a half-applied trade.

    pub(crate) fn set_balance(&mut self, balance: Cash) {
        self.balance = balance;
    }

    pub(crate) fn set_shares(&mut self, symbol: &str, shares: Quantity) {
        if shares.is_zero() {
            self.holdings.remove(symbol);
        } else {
            self.holdings.insert(symbol.to_string(), shares);
        }
    }
}
