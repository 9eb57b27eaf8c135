//! Fixed-point money and share quantities.
//!
//! Prices and cash balances are stored as integers scaled by
//! [`PRICE_SCALE`] (4 decimal places), so `Price(1_500_000)` is $150.00.
//! Accounting never touches floating point; only the market simulator
//! goes through `f64` when drawing a perturbation.

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use derive_more::{Add, AddAssign, From, Into, Neg, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scale factor: 10,000 means 4 decimal places.
/// - `10000` = $1.00
/// - `1`     = $0.0001
pub const PRICE_SCALE: i64 = 10_000;

const SCALE_DIGITS: usize = 4;

// =============================================================================
// Quantity
// =============================================================================

/// Number of shares.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Quantity(pub u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn checked_sub(self, rhs: Quantity) -> Option<Quantity> {
        self.0.checked_sub(rhs.0).map(Quantity)
    }

    #[inline]
    pub fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        self.0.checked_add(rhs.0).map(Quantity)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<u64> for Quantity {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Price
// =============================================================================

/// Fixed-point price with 4 decimal places.
///
/// Signed so that a price *change* (current minus previous) can be
/// expressed with the same type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    From,
    Into,
)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Whole-unit constructor, `Price::from_units(150)` is $150.00.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Price(units * PRICE_SCALE)
    }

    #[inline]
    pub fn from_float(v: f64) -> Self {
        Price((v * PRICE_SCALE as f64).round() as i64)
    }

    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// `self × qty`, or `None` if the product does not fit.
    pub fn checked_mul_qty(self, qty: Quantity) -> Option<Cash> {
        let qty = i64::try_from(qty.0).ok()?;
        self.0.checked_mul(qty).map(Cash)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed(f, self.0)
    }
}

impl FromStr for Price {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s).map(Price)
    }
}

// =============================================================================
// Cash
// =============================================================================

/// Fixed-point cash amount with 4 decimal places.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Cash(pub i64);

impl Cash {
    pub const ZERO: Cash = Cash(0);

    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Cash(units * PRICE_SCALE)
    }

    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Cash) -> Option<Cash> {
        self.0.checked_add(rhs.0).map(Cash)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Cash) -> Option<Cash> {
        self.0.checked_sub(rhs.0).map(Cash)
    }
}

impl fmt::Display for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed(f, self.0)
    }
}

impl FromStr for Cash {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s).map(Cash)
    }
}

// =============================================================================
// Price-Quantity Operations
// =============================================================================

impl Mul<Quantity> for Price {
    type Output = Cash;

    /// Unchecked; use [`Price::checked_mul_qty`] on accounting paths.
    fn mul(self, qty: Quantity) -> Cash {
        Cash(self.0 * qty.0 as i64)
    }
}

// =============================================================================
// Parsing / formatting
// =============================================================================

/// Error returned when a decimal string cannot be turned into a fixed-point amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount: {0:?}")]
    Invalid(String),

    #[error("too many decimal places in {0:?} (max 4)")]
    TooPrecise(String),

    #[error("amount out of range: {0:?}")]
    OutOfRange(String),
}

fn parse_fixed(s: &str) -> Result<i64, ParseAmountError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let (negative, digits) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(ParseAmountError::Invalid(s.to_string()));
    }
    if frac.len() > SCALE_DIGITS {
        return Err(ParseAmountError::TooPrecise(s.to_string()));
    }

    let out_of_range = || ParseAmountError::OutOfRange(s.to_string());

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| out_of_range())?
    };
    let mut frac_value: i64 = if frac.is_empty() {
        0
    } else {
        frac.parse().map_err(|_| out_of_range())?
    };
    for _ in frac.len()..SCALE_DIGITS {
        frac_value *= 10;
    }

    let raw = whole
        .checked_mul(PRICE_SCALE)
        .and_then(|w| w.checked_add(frac_value))
        .ok_or_else(out_of_range)?;

    Ok(if negative { -raw } else { raw })
}

/// Two decimal places, rounded half away from zero.
fn write_fixed(f: &mut fmt::Formatter<'_>, raw: i64) -> fmt::Result {
    const CENT: i64 = PRICE_SCALE / 100;

    let negative = raw < 0;
    let magnitude = raw.unsigned_abs();
    let cents = (magnitude + (CENT as u64) / 2) / CENT as u64;
    let sign = if negative && cents != 0 { "-" } else { "" };

    write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
}
