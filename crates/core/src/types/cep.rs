//! Brazilian postal code (CEP) type.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Cep`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CepError {
    /// The input does not have exactly eight characters once hyphens are removed.
    #[error("cep must have {expected} digits (got {actual})")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
        /// Number of characters left after stripping hyphens.
        actual: usize,
    },
    /// The input contains something other than ASCII digits and hyphens.
    #[error("cep must contain digits only")]
    NonDigit,
}

/// A normalized Brazilian postal code.
///
/// ## Constraints
///
/// - Every `-` in the input is stripped before validation
/// - Exactly 8 characters remain, all ASCII digits
///
/// Hyphen stripping is normalization, not a format requirement: both
/// `"04555-000"` and `"04555000"` produce the same value.
///
/// ## Examples
///
/// ```
/// use delivery_core::Cep;
///
/// assert_eq!(Cep::parse("04555-000").unwrap().as_str(), "04555000");
/// assert_eq!(Cep::parse("04851280").unwrap().formatted(), "04851-280");
///
/// assert!(Cep::parse("").is_err());
/// assert!(Cep::parse("123456789").is_err());
/// assert!(Cep::parse("04555A00").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Number of digits in a CEP.
    pub const LENGTH: usize = 8;

    /// Parse and normalize a `Cep` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::WrongLength`] if, after removing hyphens, the input
    /// does not have exactly 8 characters, and [`CepError::NonDigit`] if any
    /// remaining character is not an ASCII digit.
    pub fn parse(s: &str) -> Result<Self, CepError> {
        let stripped: String = s.chars().filter(|c| *c != '-').collect();

        let actual = stripped.chars().count();
        if actual != Self::LENGTH {
            return Err(CepError::WrongLength {
                expected: Self::LENGTH,
                actual,
            });
        }

        if !stripped.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CepError::NonDigit);
        }

        Ok(Self(stripped))
    }

    /// Returns the 8 digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Cep` and returns the 8-digit string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the CEP in its conventional `NNNNN-NNN` display form.
    #[must_use]
    pub fn formatted(&self) -> String {
        let (prefix, suffix) = self.0.split_at(5);
        format!("{prefix}-{suffix}")
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Cep {
    type Err = CepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cep {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Cep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Cep {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Cep {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(&s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Cep {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
