use std::{fmt, str::FromStr};

use crate::LedgerError;

/// Signed money amount represented as **whole rupiah**.
///
/// The rupiah carries no fractional unit in this ledger, so the stored
/// integer already is the smallest currency unit and every sum stays in
/// integer arithmetic. Use this type at the presentation seam to format and
/// parse id-ID grouped strings; storage and aggregation work on raw `i64`.
///
/// The value is signed so balances can be displayed directly:
/// - positive = income / increase
/// - negative = expense / decrease
///
/// # Examples
///
/// ```rust
/// use ledger::Rupiah;
///
/// let amount = Rupiah::new(1_000_000);
/// assert_eq!(amount.to_string(), "1.000.000");
/// assert_eq!("1.000.000".parse::<Rupiah>().unwrap(), amount);
/// ```
///
/// Parsing from user input (accepts grouping separators and an optional
/// `Rp` prefix; rejects any other character):
///
/// ```rust
/// use ledger::Rupiah;
///
/// assert_eq!("250000".parse::<Rupiah>().unwrap().minor(), 250_000);
/// assert_eq!("Rp 250.000".parse::<Rupiah>().unwrap().minor(), 250_000);
/// assert!("25rb".parse::<Rupiah>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Rupiah(i64);

impl Rupiah {
    pub const ZERO: Rupiah = Rupiah(0);

    /// Creates a new amount from whole rupiah.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in whole rupiah.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Rupiah) -> Option<Rupiah> {
        self.0.checked_add(rhs.0).map(Rupiah)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Rupiah) -> Option<Rupiah> {
        self.0.checked_sub(rhs.0).map(Rupiah)
    }

    /// Full currency rendering with the `Rp` symbol, e.g. `Rp 1.000.000`.
    #[must_use]
    pub fn to_currency_string(self) -> String {
        format!("Rp {self}")
    }
}

impl fmt::Display for Rupiah {
    /// Formats with id-ID digit grouping: `1000000` becomes `1.000.000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.char_indices() {
            if i != 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}{grouped}")
    }
}

impl From<i64> for Rupiah {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Rupiah> for i64 {
    fn from(value: Rupiah) -> Self {
        value.0
    }
}

impl FromStr for Rupiah {
    type Err = LedgerError;

    /// Parses an id-ID formatted amount into whole rupiah.
    ///
    /// Accepts an optional `Rp` prefix and `.`/`,`/space grouping
    /// separators, so everything the formatter emits parses back to the
    /// same integer.
    ///
    /// Validation rules:
    /// - at least one digit
    /// - no characters beyond digits, separators and the prefix
    /// - rejects values past `i64::MAX`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || LedgerError::InvalidAmount("empty amount".to_string());
        let invalid = || LedgerError::InvalidAmount("invalid amount".to_string());
        let overflow = || LedgerError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        let rest = trimmed
            .strip_prefix("Rp")
            .or_else(|| trimmed.strip_prefix("rp"))
            .unwrap_or(trimmed);

        let mut value: i64 = 0;
        let mut digits = 0usize;
        for ch in rest.chars() {
            match ch {
                '0'..='9' => {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(i64::from(ch as u8 - b'0')))
                        .ok_or_else(overflow)?;
                    digits += 1;
                }
                '.' | ',' | ' ' => {}
                _ => return Err(invalid()),
            }
        }
        if digits == 0 {
            return Err(empty());
        }

        Ok(Rupiah(value))
    }
}
