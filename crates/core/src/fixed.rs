//! Fixed-point decimal amounts
//!
//! Prices, sizes and notionals travel as decimal strings on the wire. `Fixed`
//! keeps them exact (rust_decimal underneath) and renders them back without
//! exponent notation or float rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Exact decimal amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed(Decimal);

impl Fixed {
    pub const ZERO: Fixed = Fixed(Decimal::ZERO);
    pub const ONE: Fixed = Fixed(Decimal::ONE);

    pub fn from_decimal(value: Decimal) -> Self {
        Fixed(value)
    }

    pub fn from_i64(value: i64) -> Self {
        Fixed(Decimal::from(value))
    }

    /// Parse a decimal string exactly; rejects empty and non-numeric input
    pub fn from_str_exact(s: &str) -> Result<Self, FixedError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FixedError::Empty);
        }
        Decimal::from_str_exact(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Fixed)
            .map_err(|_| FixedError::InvalidValue(trimmed.to_string()))
    }

    pub fn to_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(&self) -> Self {
        Fixed(self.0.abs())
    }

    /// Drop trailing zeros: `1.2300` -> `1.23`
    pub fn normalize(&self) -> Self {
        Fixed(self.0.normalize())
    }

    pub fn round_dp(&self, dp: u32) -> Self {
        Fixed(self.0.round_dp(dp))
    }

    pub fn checked_mul(&self, rhs: Fixed) -> Option<Fixed> {
        self.0.checked_mul(rhs.0).map(Fixed)
    }
}

/// Fixed-point parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixedError {
    #[error("Empty decimal value")]
    Empty,
    #[error("Invalid decimal value: {0}")]
    InvalidValue(String),
}

impl FromStr for Fixed {
    type Err = FixedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fixed::from_str_exact(s)
    }
}

impl From<Decimal> for Fixed {
    fn from(value: Decimal) -> Self {
        Fixed(value)
    }
}

impl Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Self) -> Self::Output {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Self) -> Self::Output {
        Fixed(self.0 - rhs.0)
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    fn mul(self, rhs: Self) -> Self::Output {
        Fixed(self.0 * rhs.0)
    }
}
