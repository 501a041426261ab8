//! Delivery fee amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Fee`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    /// Fees cannot be negative.
    #[error("fee cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative delivery fee in Brazilian reais.
///
/// Amounts are kept at two decimal places (centavos) and serialize as decimal
/// strings, so `7.85` never turns into `7.8499999`.
///
/// ```
/// use delivery_core::Fee;
///
/// let fee = Fee::from_centavos(785);
/// assert_eq!(fee.to_string(), "R$ 7.85");
/// assert_eq!(fee.amount().to_string(), "7.85");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Fee(Decimal);

impl Fee {
    /// Build a fee from an amount in centavos.
    #[must_use]
    pub const fn from_centavos(centavos: u32) -> Self {
        Self(Decimal::from_parts(centavos, 0, 0, false, 2))
    }

    /// Build a fee from a decimal amount in reais, rounded to centavos.
    ///
    /// # Errors
    ///
    /// Returns [`FeeError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, FeeError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FeeError::Negative(amount));
        }
        Ok(Self(amount.round_dp(2)))
    }

    /// The fee amount in reais.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Fee {
    type Error = FeeError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Fee> for Decimal {
    fn from(fee: Fee) -> Self {
        fee.0
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}
