// crates/trading-protocol/src/command_codec.rs

//! Command-line codec.
//!
//! Input format (lines → `Request`), keywords case-insensitive:
//!
//! - Register:      `REGISTER, username, initialBalance(decimal)`
//! - Login:         `LOGIN, username`
//! - Logout:        `LOGOUT`
//! - Market data:   `MARKET`
//! - Buy:           `BUY, symbol, qty(int)`
//! - Sell:          `SELL, symbol, qty(int)`
//! - Portfolio:     `PORTFOLIO`
//! - Trade history: `HISTORY` or `HISTORY, n(int)`
//! - Price history: `PRICES, symbol`
//! - Market tick:   `TICK`
//!
//! Symbols are upper-cased while parsing.
//!
//! Output format (`Response` → line):
//!
//! - Registered:   `R, username, balance`
//! - LoggedIn:     `L, username`
//! - LoggedOut:    `O, username`
//! - Quote:        `Q, symbol, name, price, change(signed), changePct(signed)%`
//! - Filled:       `F, side, symbol, qty, price, notional, username`
//! - Portfolio:    `P, username, cash, holdingsValue, totalValue`
//! - Position:     `H, symbol, shares, price, value`
//! - Trade:        `T, yyyy-mm-dd HH:MM:SS, side, symbol, qty, price, username`
//! - PriceHistory: `S, symbol, price, price, ...`
//! - MarketUpdate: `M, instrumentCount`
//! - Rejected:     `E, message`

use std::num::ParseIntError;

use trading_core::{Cash, Price, Quantity, Request, Response, TradeRecord};

/// Parse a single command line into a `Request`.
///
/// Returns `None` for blank lines, comments (starting with `#`) and
/// anything malformed (unknown keyword, wrong arity, non-numeric amount).
pub fn parse_command_line(line: &str) -> Option<Request> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let tokens = split_and_trim(trimmed, ',');
    let keyword = tokens.first()?.to_ascii_uppercase();

    match keyword.as_str() {
        "REGISTER" => parse_register(&tokens),
        "LOGIN" => parse_login(&tokens),
        "BUY" => parse_trade(&tokens).map(|(symbol, quantity)| Request::Buy { symbol, quantity }),
        "SELL" => parse_trade(&tokens).map(|(symbol, quantity)| Request::Sell { symbol, quantity }),
        "HISTORY" => parse_history(&tokens),
        "PRICES" => parse_prices(&tokens),
        "LOGOUT" => bare(&tokens, Request::Logout),
        "MARKET" => bare(&tokens, Request::Market),
        "PORTFOLIO" => bare(&tokens, Request::Portfolio),
        "TICK" => bare(&tokens, Request::Tick),
        _ => None,
    }
}

fn parse_register(tokens: &[String]) -> Option<Request> {
    // REGISTER, username, balance
    if tokens.len() != 3 || tokens[1].is_empty() {
        return None;
    }

    let initial_balance = tokens[2].parse::<Cash>().ok()?;
    Some(Request::Register {
        username: tokens[1].clone(),
        initial_balance,
    })
}

fn parse_login(tokens: &[String]) -> Option<Request> {
    // LOGIN, username
    if tokens.len() != 2 || tokens[1].is_empty() {
        return None;
    }

    Some(Request::Login {
        username: tokens[1].clone(),
    })
}

fn parse_trade(tokens: &[String]) -> Option<(String, Quantity)> {
    // BUY|SELL, symbol, qty
    if tokens.len() != 3 || tokens[1].is_empty() {
        return None;
    }

    let symbol = tokens[1].to_ascii_uppercase();
    let quantity = parse_u64(&tokens[2]).ok()?;
    Some((symbol, Quantity(quantity)))
}

fn parse_history(tokens: &[String]) -> Option<Request> {
    // HISTORY[, n]
    match tokens.len() {
        1 => Some(Request::History { limit: None }),
        2 => {
            let limit = tokens[1].parse::<usize>().ok()?;
            Some(Request::History { limit: Some(limit) })
        }
        _ => None,
    }
}

fn parse_prices(tokens: &[String]) -> Option<Request> {
    // PRICES, symbol
    if tokens.len() != 2 || tokens[1].is_empty() {
        return None;
    }

    Some(Request::PriceHistory {
        symbol: tokens[1].to_ascii_uppercase(),
    })
}

fn bare(tokens: &[String], request: Request) -> Option<Request> {
    if tokens.len() == 1 {
        Some(request)
    } else {
        None
    }
}

/// Format a `Response` as a single line.
pub fn format_response(msg: &Response) -> String {
    match msg {
        Response::Registered { username, balance } => format!("R, {}, {}", username, balance),
        Response::LoggedIn { username } => format!("L, {}", username),
        Response::LoggedOut { username } => format!("O, {}", username),
        Response::Quote(q) => {
            let change = q.change();
            let delta = signed(change.delta);
            let percent = signed_percent(&delta, change.percent);
            format!("Q, {}, {}, {}, {}, {}", q.symbol, q.name, q.price, delta, percent)
        }
        Response::Filled(r) => format!(
            "F, {}, {}, {}, {}, {}, {}",
            r.side(),
            r.symbol(),
            r.quantity(),
            r.price(),
            r.notional(),
            r.username()
        ),
        Response::Portfolio(p) => format!(
            "P, {}, {}, {}, {}",
            p.username, p.balance, p.holdings_value, p.total_value
        ),
        Response::Position(p) => format!("H, {}, {}, {}, {}", p.symbol, p.shares, p.price, p.value),
        Response::Trade(r) => format_trade(r),
        Response::PriceHistory { symbol, prices } => {
            let mut line = format!("S, {}", symbol);
            for price in prices {
                line.push_str(", ");
                line.push_str(&price.to_string());
            }
            line
        }
        Response::MarketUpdated { instruments } => format!("M, {}", instruments),
        Response::Rejected(err) => format!("E, {}", err),
    }
}

fn format_trade(r: &TradeRecord) -> String {
    format!(
        "T, {}, {}, {}, {}, {}, {}",
        r.timestamp().format("%Y-%m-%d %H:%M:%S"),
        r.side(),
        r.symbol(),
        r.quantity(),
        r.price(),
        r.username()
    )
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|tok| tok.trim().to_string())
        .collect()
}

fn parse_u64(s: &str) -> Result<u64, ParseIntError> {
    s.parse::<u64>()
}

/// `+1.25` / `-0.40`; anything that rounds to zero renders as `+0.00`.
fn signed(p: Price) -> String {
    let shown = p.to_string();
    if shown.starts_with('-') {
        shown
    } else {
        format!("+{}", shown)
    }
}

/// Percent with the same sign as the already-rendered delta.
fn signed_percent(delta: &str, percent: f64) -> String {
    let sign = if delta.starts_with('-') { '-' } else { '+' };
    format!("{}{:.2}%", sign, percent.abs())
}
