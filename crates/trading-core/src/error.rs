//! Error types for the trading core.
//!
//! Every failure here is a normal, recoverable outcome: the caller
//! renders it and carries on. A failed operation leaves registry,
//! ledger and log exactly as they were.

use thiserror::Error;

use crate::money::{Cash, Price, Quantity};

pub type Result<T> = std::result::Result<T, TradingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradingError {
    /// The requested symbol is not in the registry.
    #[error("instrument not found: {0}")]
    InstrumentNotFound(String),

    /// No account is registered under this username.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("username already exists: {0}")]
    AlreadyExists(String),

    #[error("instrument already listed: {0}")]
    DuplicateInstrument(String),

    #[error("insufficient funds: cost {required}, balance {available}")]
    InsufficientFunds { required: Cash, available: Cash },

    #[error("insufficient shares of {symbol}: requested {requested}, held {held}")]
    InsufficientShares {
        symbol: String,
        requested: Quantity,
        held: Quantity,
    },

    /// Sell attempted on a symbol the account holds zero shares of.
    #[error("no holding in {0}")]
    NoSuchHolding(String),

    /// An operation needing a session was called without one.
    #[error("not logged in")]
    NotLoggedIn,

    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(Quantity),

    #[error("initial balance must not be negative, got {0}")]
    NegativeBalance(Cash),

    #[error("price {price} for {symbol} is below the floor {floor}")]
    InvalidPrice {
        symbol: String,
        price: Price,
        floor: Price,
    },

    #[error("amount overflow")]
    AmountOverflow,

    /// Market configuration that would break price invariants.
    #[error("invalid market config: {0}")]
    InvalidConfig(String),
}
