// core/src/money.rs

//! Monetary amounts as integer cents.
//!
//! Prices are summed and multiplied exactly; rounding to two decimals only
//! happens when an amount is rendered with `Display`.

use crate::error::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
  pub const ZERO: Money = Money(0);

  pub const fn from_cents(cents: i64) -> Self {
    Money(cents)
  }

  pub const fn cents(self) -> i64 {
    self.0
  }

  /// Multiplies by a count (a quantity or an inventory level), saturating on overflow.
  pub fn times(self, count: i64) -> Money {
    Money(self.0.saturating_mul(count))
  }

  /// Parses a plain decimal such as `"799.99"`, `"12.5"` or `"3"`.
  ///
  /// At most two fractional digits are accepted; signs, exponents and
  /// thousands separators are rejected.
  pub fn parse(input: &str) -> ShopResult<Money> {
    let trimmed = input.trim();
    let invalid = |reason: &str| ShopError::InvalidAmount {
      input: input.to_string(),
      reason: reason.to_string(),
    };

    if trimmed.is_empty() {
      return Err(invalid("amount is empty"));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
      Some((w, f)) => (w, f),
      None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
      return Err(invalid("amount has no digits"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
      return Err(invalid("only digits and a single decimal point are allowed"));
    }
    if fraction.len() > 2 {
      return Err(invalid("at most two decimal places are allowed"));
    }

    let whole_units: i64 = if whole.is_empty() {
      0
    } else {
      whole.parse().map_err(|_| invalid("amount is too large"))?
    };
    let fraction_cents: i64 = match fraction.len() {
      0 => 0,
      1 => fraction.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
      _ => fraction.parse::<i64>().map_err(|_| invalid("bad fraction"))?,
    };

    whole_units
      .checked_mul(100)
      .and_then(|c| c.checked_add(fraction_cents))
      .map(Money)
      .ok_or_else(|| invalid("amount is too large"))
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if self.0 < 0 { "-" } else { "" };
    let abs = self.0.unsigned_abs();
    write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
  }
}

impl Add for Money {
  type Output = Money;

  fn add(self, rhs: Money) -> Money {
    Money(self.0.saturating_add(rhs.0))
  }
}

impl AddAssign for Money {
  fn add_assign(&mut self, rhs: Money) {
    *self = *self + rhs;
  }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
    iter.fold(Money::ZERO, Add::add)
  }
}
