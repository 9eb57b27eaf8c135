//! Trading engine: the context object that owns all simulator state.
//!
//! - Owns the [`InstrumentRegistry`], [`AccountLedger`],
//!   [`TransactionLog`] and [`MarketSimulator`].
//! - `execute_buy` / `execute_sell` are the only mutation entry points
//!   for trades. Each captures the price once, hands that same price to
//!   the ledger, and logs it only if the ledger accepted the trade.
//! - Callers identify themselves with a [`Session`] issued by `login`
//!   instead of a process-wide "current user".

use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{info, warn};

use crate::account::Account;
use crate::config::MarketConfig;
use crate::error::Result;
use crate::instrument::InstrumentSnapshot;
use crate::ledger::AccountLedger;
use crate::money::{Cash, Quantity};
use crate::portfolio::PortfolioView;
use crate::registry::InstrumentRegistry;
use crate::side::Side;
use crate::simulator::MarketSimulator;
use crate::transaction_log::{TradeRecord, TransactionLog};

/// Proof of a successful login. Only [`TradingEngine::login`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug)]
pub struct TradingEngine<R: Rng = StdRng> {
    registry: InstrumentRegistry,
    ledger: AccountLedger,
    log: TransactionLog,
    simulator: MarketSimulator<R>,
    history_limit: usize,
}

impl TradingEngine<StdRng> {
    /// Build the catalog and simulator described by `config`.
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        config.validate()?;
        let registry = InstrumentRegistry::from_specs(&config.instruments, config.floor())?;
        let simulator = MarketSimulator::from_config(config)?;
        Ok(TradingEngine::with_parts(registry, simulator, config.history_limit))
    }
}

impl<R: Rng> TradingEngine<R> {
    pub fn with_parts(
        registry: InstrumentRegistry,
        simulator: MarketSimulator<R>,
        history_limit: usize,
    ) -> Self {
        TradingEngine {
            registry,
            ledger: AccountLedger::new(),
            log: TransactionLog::new(),
            simulator,
            history_limit,
        }
    }

    // -------------------------------------------------------------------------
    // Accounts
    // -------------------------------------------------------------------------

    pub fn register(&mut self, username: &str, initial_balance: Cash) -> Result<&Account> {
        let account = self.ledger.register(username, initial_balance)?;
        info!(username, balance = %initial_balance, "account registered");
        Ok(account)
    }

    pub fn login(&self, username: &str) -> Result<Session> {
        let account = self.ledger.lookup(username)?;
        info!(username, "logged in");
        Ok(Session {
            username: account.username().to_string(),
        })
    }

    pub fn account(&self, session: &Session) -> Result<&Account> {
        self.ledger.lookup(session.username())
    }

    pub fn portfolio(&self, session: &Session) -> Result<PortfolioView> {
        self.ledger.portfolio(session.username(), &self.registry)
    }

    pub fn portfolio_value(&self, session: &Session) -> Result<Cash> {
        self.ledger.portfolio_value(session.username(), &self.registry)
    }

    // -------------------------------------------------------------------------
    // Trading
    // -------------------------------------------------------------------------

    pub fn execute_buy(
        &mut self,
        session: &Session,
        symbol: &str,
        quantity: Quantity,
    ) -> Result<TradeRecord> {
        self.execute(session, Side::Buy, symbol, quantity)
    }

    pub fn execute_sell(
        &mut self,
        session: &Session,
        symbol: &str,
        quantity: Quantity,
    ) -> Result<TradeRecord> {
        self.execute(session, Side::Sell, symbol, quantity)
    }

    fn execute(
        &mut self,
        session: &Session,
        side: Side,
        symbol: &str,
        quantity: Quantity,
    ) -> Result<TradeRecord> {
        let username = session.username();
        self.ledger.lookup(username)?;
        let price = self.registry.price(symbol)?;

        let outcome = match side {
            Side::Buy => self.ledger.buy(username, symbol, quantity, price),
            Side::Sell => self.ledger.sell(username, symbol, quantity, price),
        };
        let amount = match outcome {
            Ok(amount) => amount,
            Err(err) => {
                warn!(username, %side, symbol, %quantity, %price, error = %err, "trade rejected");
                return Err(err);
            }
        };

        // Same `price` the ledger just used; nothing runs in between.
        let record = TradeRecord::new(username, side, symbol, quantity, price, Utc::now());
        info!(username, %side, symbol, %quantity, %price, %amount, "trade executed");
        Ok(self.log.append(record).clone())
    }

    // -------------------------------------------------------------------------
    // Market
    // -------------------------------------------------------------------------

    /// One simulator pass over every instrument.
    pub fn tick(&mut self) {
        self.simulator.tick(&mut self.registry);
        info!(instruments = self.registry.len(), "market ticked");
    }

    pub fn market(&self) -> Vec<InstrumentSnapshot> {
        self.registry.list()
    }

    /// Last `limit` trades, or the configured default count.
    pub fn recent_trades(&self, limit: Option<usize>) -> &[TradeRecord] {
        self.log.recent(limit.unwrap_or(self.history_limit))
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn registry(&self) -> &InstrumentRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }
}
