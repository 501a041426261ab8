//! CNPJ (Brazilian company registry number) type.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`Cnpj`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CnpjError {
    /// The input does not have exactly 14 characters.
    #[error("cnpj must have {expected} digits (got {actual})")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
        /// Number of characters in the input.
        actual: usize,
    },
    /// The input contains something other than ASCII digits.
    #[error("cnpj must contain digits only")]
    NonDigit,
}

/// A CNPJ in its bare 14-digit form.
///
/// Unlike [`Cep`](crate::Cep), no punctuation is stripped: sellers submit the
/// digits only.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cnpj(String);

impl Cnpj {
    /// Number of digits in a CNPJ.
    pub const LENGTH: usize = 14;

    /// Parse a `Cnpj` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 14 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, CnpjError> {
        let actual = s.chars().count();
        if actual != Self::LENGTH {
            return Err(CnpjError::WrongLength {
                expected: Self::LENGTH,
                actual,
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CnpjError::NonDigit);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the CNPJ digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cnpj {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Cnpj {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
