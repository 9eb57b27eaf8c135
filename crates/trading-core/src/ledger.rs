//! Account ledger: per-user balances and holdings.
//!
//! `buy` / `sell` are crate-private. Outside callers go through
//! [`TradingEngine`](crate::trading_engine::TradingEngine), which keeps
//! every ledger mutation paired with its trade record.
//!
//! Each mutation computes the complete post-trade state first and only
//! writes it once every check has passed; a rejected trade leaves the
//! account untouched.

use std::collections::HashMap;

use crate::account::Account;
use crate::error::{Result, TradingError};
use crate::money::{Cash, Price, Quantity};
use crate::portfolio::{PortfolioView, Position};
use crate::registry::InstrumentRegistry;

#[derive(Debug, Default)]
pub struct AccountLedger {
    /// Username -> Account.
    accounts: HashMap<String, Account>,
}

impl AccountLedger {
    pub fn new() -> Self {
        AccountLedger::default()
    }

    /// Open a new account with `initial_balance` in cash.
    pub fn register(&mut self, username: &str, initial_balance: Cash) -> Result<&Account> {
        if initial_balance.is_negative() {
            return Err(TradingError::NegativeBalance(initial_balance));
        }
        if self.accounts.contains_key(username) {
            return Err(TradingError::AlreadyExists(username.to_string()));
        }

        let account = self
            .accounts
            .entry(username.to_string())
            .or_insert_with(|| Account::new(username, initial_balance));
        Ok(account)
    }

    pub fn lookup(&self, username: &str) -> Result<&Account> {
        self.accounts
            .get(username)
            .ok_or_else(|| TradingError::AccountNotFound(username.to_string()))
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Debit `quantity × price` and credit the shares.
    ///
    /// Returns the cost on success.
    pub(crate) fn buy(
        &mut self,
        username: &str,
        symbol: &str,
        quantity: Quantity,
        price: Price,
    ) -> Result<Cash> {
        if quantity.is_zero() {
            return Err(TradingError::InvalidQuantity(quantity));
        }
        let account = self.lookup_mut(username)?;

        let cost = price
            .checked_mul_qty(quantity)
            .ok_or(TradingError::AmountOverflow)?;
        if account.balance() < cost {
            return Err(TradingError::InsufficientFunds {
                required: cost,
                available: account.balance(),
            });
        }
        let new_balance = account
            .balance()
            .checked_sub(cost)
            .ok_or(TradingError::AmountOverflow)?;
        let new_shares = account
            .shares(symbol)
            .checked_add(quantity)
            .ok_or(TradingError::AmountOverflow)?;

        account.set_balance(new_balance);
        account.set_shares(symbol, new_shares);
        Ok(cost)
    }

    /// Credit `quantity × price` and remove the shares.
    ///
    /// Returns the proceeds on success. Holding nothing of `symbol` is
    /// reported as [`TradingError::NoSuchHolding`]; holding too few as
    /// [`TradingError::InsufficientShares`].
    pub(crate) fn sell(
        &mut self,
        username: &str,
        symbol: &str,
        quantity: Quantity,
        price: Price,
    ) -> Result<Cash> {
        if quantity.is_zero() {
            return Err(TradingError::InvalidQuantity(quantity));
        }
        let account = self.lookup_mut(username)?;

        let held = account.shares(symbol);
        if held.is_zero() {
            return Err(TradingError::NoSuchHolding(symbol.to_string()));
        }
        let remaining = held
            .checked_sub(quantity)
            .ok_or_else(|| TradingError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: quantity,
                held,
            })?;

        let proceeds = price
            .checked_mul_qty(quantity)
            .ok_or(TradingError::AmountOverflow)?;
        let new_balance = account
            .balance()
            .checked_add(proceeds)
            .ok_or(TradingError::AmountOverflow)?;

        account.set_balance(new_balance);
        account.set_shares(symbol, remaining);
        Ok(proceeds)
    }

    /// Cash plus the current market value of every holding.
    ///
    /// Holdings whose symbol the registry no longer knows are skipped.
    pub fn portfolio_value(&self, username: &str, registry: &InstrumentRegistry) -> Result<Cash> {
        self.portfolio(username, registry).map(|view| view.total_value)
    }

    /// Full valuation of one account against current prices.
    pub fn portfolio(&self, username: &str, registry: &InstrumentRegistry) -> Result<PortfolioView> {
        let account = self.lookup(username)?;

        let mut positions = Vec::with_capacity(account.holdings().len());
        for (symbol, &shares) in account.holdings() {
            let Some(instrument) = registry.get(symbol) else {
                continue;
            };
            let price = instrument.price();
            let value = price
                .checked_mul_qty(shares)
                .ok_or(TradingError::AmountOverflow)?;
            positions.push(Position {
                symbol: symbol.clone(),
                shares,
                price,
                value,
            });
        }

        let holdings_value = positions
            .iter()
            .try_fold(Cash::ZERO, |acc, p| acc.checked_add(p.value))
            .ok_or(TradingError::AmountOverflow)?;
        let total_value = account
            .balance()
            .checked_add(holdings_value)
            .ok_or(TradingError::AmountOverflow)?;

        Ok(PortfolioView {
            username: account.username().to_string(),
            balance: account.balance(),
            positions,
            holdings_value,
            total_value,
        })
    }

    fn lookup_mut(&mut self, username: &str) -> Result<&mut Account> {
        self.accounts
            .get_mut(username)
            .ok_or_else(|| TradingError::AccountNotFound(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstrumentSpec;

    fn usd(units: i64) -> Cash {
        Cash::from_units(units)
    }

    #[test]
    fn buy_debits_and_credits_together() {
        let mut ledger = AccountLedger::new();
        ledger.register("alice", usd(1000)).unwrap();

        let cost = ledger
            .buy("alice", "AAPL", Quantity(5), Price::from_units(150))
            .unwrap();

        assert_eq!(cost, usd(750));
        let alice = ledger.lookup("alice").unwrap();
        assert_eq!(alice.balance(), usd(250));
        assert_eq!(alice.shares("AAPL"), Quantity(5));
    }

    #[test]
    fn buy_with_exact_balance_succeeds() {
        let mut ledger = AccountLedger::new();
        ledger.register("alice", usd(750)).unwrap();

        ledger
            .buy("alice", "AAPL", Quantity(5), Price::from_units(150))
            .unwrap();

        assert_eq!(ledger.lookup("alice").unwrap().balance(), Cash::ZERO);
    }

    #[test]
    fn rejected_buy_leaves_account_untouched() {
        let mut ledger = AccountLedger::new();
        ledger.register("bob", usd(100)).unwrap();
        let before = ledger.lookup("bob").unwrap().clone();

        let err = ledger
            .buy("bob", "GOOGL", Quantity(1), Price::from_units(2500))
            .unwrap_err();

        assert_eq!(
            err,
            TradingError::InsufficientFunds {
                required: usd(2500),
                available: usd(100),
            }
        );
        assert_eq!(ledger.lookup("bob").unwrap(), &before);
    }

    #[test]
    fn sell_to_zero_removes_the_symbol() {
        let mut ledger = AccountLedger::new();
        ledger.register("alice", usd(1000)).unwrap();
        ledger
            .buy("alice", "AAPL", Quantity(5), Price::from_units(150))
            .unwrap();

        let proceeds = ledger
            .sell("alice", "AAPL", Quantity(5), Price::from_units(150))
            .unwrap();

        assert_eq!(proceeds, usd(750));
        let alice = ledger.lookup("alice").unwrap();
        assert_eq!(alice.balance(), usd(1000));
        assert!(alice.holdings().is_empty());
    }

    #[test]
    fn sell_distinguishes_no_holding_from_too_few() {
        let mut ledger = AccountLedger::new();
        ledger.register("carol", usd(1000)).unwrap();

        assert_eq!(
            ledger.sell("carol", "TSLA", Quantity(1), Price::from_units(800)),
            Err(TradingError::NoSuchHolding("TSLA".to_string()))
        );

        ledger
            .buy("carol", "AAPL", Quantity(2), Price::from_units(150))
            .unwrap();
        let before = ledger.lookup("carol").unwrap().clone();
        assert_eq!(
            ledger.sell("carol", "AAPL", Quantity(3), Price::from_units(150)),
            Err(TradingError::InsufficientShares {
                symbol: "AAPL".to_string(),
                requested: Quantity(3),
                held: Quantity(2),
            })
        );
        assert_eq!(ledger.lookup("carol").unwrap(), &before);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut ledger = AccountLedger::new();
        ledger.register("alice", usd(1000)).unwrap();

        assert_eq!(
            ledger.buy("alice", "AAPL", Quantity::ZERO, Price::from_units(150)),
            Err(TradingError::InvalidQuantity(Quantity::ZERO))
        );
    }

    #[test]
    fn overflowing_cost_is_an_error_not_a_panic() {
        let mut ledger = AccountLedger::new();
        ledger.register("alice", usd(1000)).unwrap();

        assert_eq!(
            ledger.buy("alice", "AAPL", Quantity(u64::MAX), Price::from_units(150)),
            Err(TradingError::AmountOverflow)
        );
    }

    #[test]
    fn register_validates_input() {
        let mut ledger = AccountLedger::new();
        ledger.register("alice", usd(10)).unwrap();

        assert_eq!(
            ledger.register("alice", usd(20)).unwrap_err(),
            TradingError::AlreadyExists("alice".to_string())
        );
        assert_eq!(
            ledger.register("dave", Cash(-1)).unwrap_err(),
            TradingError::NegativeBalance(Cash(-1))
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn valuation_skips_symbols_the_registry_does_not_know() {
        let mut ledger = AccountLedger::new();
        ledger.register("alice", usd(1000)).unwrap();
        ledger
            .buy("alice", "AAPL", Quantity(2), Price::from_units(150))
            .unwrap();
        ledger
            .buy("alice", "MSFT", Quantity(1), Price::from_units(300))
            .unwrap();

        let specs = [InstrumentSpec::new("AAPL", "Apple Inc.", 150.0)];
        let registry = InstrumentRegistry::from_specs(&specs, Price::from_units(1)).unwrap();

        let view = ledger.portfolio("alice", &registry).unwrap();
        assert_eq!(view.balance, usd(400));
        assert_eq!(view.positions.len(), 1);
        assert_eq!(view.positions[0].symbol, "AAPL");
        assert_eq!(view.holdings_value, usd(300));
        assert_eq!(view.total_value, usd(700));
        assert_eq!(ledger.portfolio_value("alice", &registry), Ok(usd(700)));

        // Still held, just not valued.
        assert_eq!(ledger.lookup("alice").unwrap().shares("MSFT"), Quantity(1));
    }
}
