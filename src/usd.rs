use anyhow::bail;
use serde_with::DeserializeFromStr;

use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign, Mul},
    str::FromStr,
};

/// Represents an amount of money in USD currency.
///
/// The amount is stored internally as an integer number of cents, so sums and
/// quantity multiples are exact, but the [`Display`] implementation formats it
/// for display as dollars to 2 decimal places.
#[derive(Clone, Copy, Default, DeserializeFromStr, Eq, PartialEq, Ord, PartialOrd)]
pub struct Usd(i64);

impl Usd {
    /// Creates an amount from a whole number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount as a whole number of cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the amount in dollars, for writing to formats that store
    /// numbers as floats (such as spreadsheet cells).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_dollars_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Debug for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}

impl FromStr for Usd {
    type Err = anyhow::Error;

    /// Parses amounts such as `5`, `5.0`, `5.00`, `1,234.56`, `$3.99`, with
    /// an optional leading minus sign. More than two decimal places, an
    /// empty fraction part, misplaced thousands separators, or any other
    /// character, is an error.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut amount = s.trim();
        let negative = amount.starts_with('-');
        if negative {
            amount = &amount[1..];
        }
        amount = amount.strip_prefix('$').unwrap_or(amount);
        let (dollars, frac) = match amount.split_once('.') {
            Some((dollars, frac)) => (dollars, Some(frac)),
            None => (amount, None),
        };
        if let Some(frac) = frac {
            if frac.is_empty() || frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                bail!("invalid currency amount: {s:?}");
            }
        }
        // Commas, if present, must group digits in threes.
        let groups: Vec<&str> = dollars.split(',').collect();
        let digits_only = groups
            .iter()
            .all(|g| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit()));
        let well_grouped = groups.len() == 1
            || (groups[0].len() <= 3 && groups[1..].iter().all(|g| g.len() == 3));
        if !digits_only || !well_grouped {
            bail!("invalid currency amount: {s:?}");
        }
        let mut cents = groups.concat().parse::<i64>()? * 100;
        if let Some(frac) = frac {
            let mut frac_cents = frac.parse::<i64>()?;
            if frac.len() == 1 {
                frac_cents *= 10;
            }
            cents += frac_cents;
        }
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Add for Usd {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Usd {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Usd {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * i64::from(rhs))
    }
}

impl Sum for Usd {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, amount| acc + amount)
    }
}
