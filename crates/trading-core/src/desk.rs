//! Trading desk: request/response front of the engine.
//!
//! Holds the engine plus at most one active [`Session`] and turns each
//! [`Request`] into zero or more [`Response`]s. Requests that act on
//! "my account" fail with [`TradingError::NotLoggedIn`] when no session
//! is active.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::MarketConfig;
use crate::error::{Result, TradingError};
use crate::messages::{PortfolioSummary, Request, Response};
use crate::money::{Cash, Quantity};
use crate::side::Side;
use crate::trading_engine::{Session, TradingEngine};

#[derive(Debug)]
pub struct TradingDesk<R: Rng = StdRng> {
    engine: TradingEngine<R>,
    session: Option<Session>,
}

impl TradingDesk<StdRng> {
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        Ok(TradingDesk::new(TradingEngine::from_config(config)?))
    }
}

impl<R: Rng> TradingDesk<R> {
    pub fn new(engine: TradingEngine<R>) -> Self {
        TradingDesk {
            engine,
            session: None,
        }
    }

    pub fn engine(&self) -> &TradingEngine<R> {
        &self.engine
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Process a single request and return its responses.
    ///
    /// Failures come back as a single [`Response::Rejected`]; they never
    /// change state.
    pub fn process_message(&mut self, msg: Request) -> Vec<Response> {
        let result = match msg {
            Request::Register {
                username,
                initial_balance,
            } => self.process_register(&username, initial_balance),
            Request::Login { username } => self.process_login(&username),
            Request::Logout => self.process_logout(),
            Request::Market => Ok(self.process_market()),
            Request::Buy { symbol, quantity } => self.process_trade(Side::Buy, &symbol, quantity),
            Request::Sell { symbol, quantity } => self.process_trade(Side::Sell, &symbol, quantity),
            Request::Portfolio => self.process_portfolio(),
            Request::History { limit } => Ok(self.process_history(limit)),
            Request::PriceHistory { symbol } => self.process_price_history(&symbol),
            Request::Tick => Ok(self.process_tick()),
        };

        result.unwrap_or_else(|err| vec![Response::Rejected(err)])
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn process_register(&mut self, username: &str, initial_balance: Cash) -> Result<Vec<Response>> {
        let account = self.engine.register(username, initial_balance)?;
        Ok(vec![Response::Registered {
            username: account.username().to_string(),
            balance: account.balance(),
        }])
    }

    /// Logging in while another session is active replaces it.
    fn process_login(&mut self, username: &str) -> Result<Vec<Response>> {
        let session = self.engine.login(username)?;
        let response = Response::LoggedIn {
            username: session.username().to_string(),
        };
        self.session = Some(session);
        Ok(vec![response])
    }

    fn process_logout(&mut self) -> Result<Vec<Response>> {
        let session = self.session.take().ok_or(TradingError::NotLoggedIn)?;
        Ok(vec![Response::LoggedOut {
            username: session.username().to_string(),
        }])
    }

    fn process_market(&self) -> Vec<Response> {
        self.engine.market().into_iter().map(Response::Quote).collect()
    }

    fn process_trade(&mut self, side: Side, symbol: &str, quantity: Quantity) -> Result<Vec<Response>> {
        let session = self.session.as_ref().ok_or(TradingError::NotLoggedIn)?;
        let record = match side {
            Side::Buy => self.engine.execute_buy(session, symbol, quantity)?,
            Side::Sell => self.engine.execute_sell(session, symbol, quantity)?,
        };
        Ok(vec![Response::Filled(record)])
    }

    fn process_portfolio(&self) -> Result<Vec<Response>> {
        let session = self.session.as_ref().ok_or(TradingError::NotLoggedIn)?;
        let view = self.engine.portfolio(session)?;

        let mut outputs = Vec::with_capacity(view.positions.len() + 1);
        outputs.push(Response::Portfolio(PortfolioSummary {
            username: view.username,
            balance: view.balance,
            holdings_value: view.holdings_value,
            total_value: view.total_value,
        }));
        outputs.extend(view.positions.into_iter().map(Response::Position));
        Ok(outputs)
    }

    fn process_history(&self, limit: Option<usize>) -> Vec<Response> {
        self.engine
            .recent_trades(limit)
            .iter()
            .cloned()
            .map(Response::Trade)
            .collect()
    }

    fn process_price_history(&self, symbol: &str) -> Result<Vec<Response>> {
        let prices = self.engine.registry().price_history(symbol)?;
        Ok(vec![Response::PriceHistory {
            symbol: symbol.to_string(),
            prices: prices.to_vec(),
        }])
    }

    fn process_tick(&mut self) -> Vec<Response> {
        self.engine.tick();
        vec![Response::MarketUpdated {
            instruments: self.engine.registry().len(),
        }]
    }
}
