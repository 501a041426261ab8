//! Brazilian federative units (UF) and their regions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known UF code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown state code: {0:?}")]
pub struct StateCodeError(pub String);

/// Geographic region a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Norte => "Norte",
            Self::Nordeste => "Nordeste",
            Self::CentroOeste => "Centro-Oeste",
            Self::Sudeste => "Sudeste",
            Self::Sul => "Sul",
        };
        f.write_str(name)
    }
}

/// Two-letter code of a Brazilian state or the Federal District.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateCode {
    AC,
    AL,
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl StateCode {
    /// Every UF, in alphabetical order of the state name.
    pub const ALL: [Self; 27] = [
        Self::AC,
        Self::AL,
        Self::AP,
        Self::AM,
        Self::BA,
        Self::CE,
        Self::DF,
        Self::ES,
        Self::GO,
        Self::MA,
        Self::MT,
        Self::MS,
        Self::MG,
        Self::PA,
        Self::PB,
        Self::PR,
        Self::PE,
        Self::PI,
        Self::RJ,
        Self::RN,
        Self::RS,
        Self::RO,
        Self::RR,
        Self::SC,
        Self::SP,
        Self::SE,
        Self::TO,
    ];

    /// Parse a UF code, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`StateCodeError`] if the input is not one of the 27 codes.
    pub fn parse(s: &str) -> Result<Self, StateCodeError> {
        let code = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == code)
            .ok_or_else(|| StateCodeError(s.to_owned()))
    }

    /// The two-letter code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AC => "AC",
            Self::AL => "AL",
            Self::AP => "AP",
            Self::AM => "AM",
            Self::BA => "BA",
            Self::CE => "CE",
            Self::DF => "DF",
            Self::ES => "ES",
            Self::GO => "GO",
            Self::MA => "MA",
            Self::MT => "MT",
            Self::MS => "MS",
            Self::MG => "MG",
            Self::PA => "PA",
            Self::PB => "PB",
            Self::PR => "PR",
            Self::PE => "PE",
            Self::PI => "PI",
            Self::RJ => "RJ",
            Self::RN => "RN",
            Self::RS => "RS",
            Self::RO => "RO",
            Self::RR => "RR",
            Self::SC => "SC",
            Self::SP => "SP",
            Self::SE => "SE",
            Self::TO => "TO",
        }
    }

    /// The region this state belongs to.
    #[must_use]
    pub const fn region(&self) -> Region {
        match self {
            Self::AC | Self::AP | Self::AM | Self::PA | Self::RO | Self::RR | Self::TO => {
                Region::Norte
            }
            Self::AL
            | Self::BA
            | Self::CE
            | Self::MA
            | Self::PB
            | Self::PE
            | Self::PI
            | Self::RN
            | Self::SE => Region::Nordeste,
            Self::DF | Self::GO | Self::MT | Self::MS => Region::CentroOeste,
            Self::ES | Self::MG | Self::RJ | Self::SP => Region::Sudeste,
            Self::PR | Self::RS | Self::SC => Region::Sul,
        }
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StateCode {
    type Err = StateCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(StateCode::parse("SP"), Ok(StateCode::SP));
        assert_eq!(StateCode::parse(" sp "), Ok(StateCode::SP));
        assert_eq!(StateCode::parse("Df"), Ok(StateCode::DF));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(StateCode::parse("").is_err());
        assert!(StateCode::parse("XX").is_err());
        assert!(StateCode::parse("SAO").is_err());
    }

    #[test]
    fn test_all_codes_round_trip_through_parse() {
        for state in StateCode::ALL {
            assert_eq!(StateCode::parse(state.as_str()), Ok(state));
        }
    }

    #[test]
    fn test_region_sizes() {
        let count = |region: Region| {
            StateCode::ALL
                .iter()
                .filter(|state| state.region() == region)
                .count()
        };
        assert_eq!(count(Region::Norte), 7);
        assert_eq!(count(Region::Nordeste), 9);
        assert_eq!(count(Region::CentroOeste), 4);
        assert_eq!(count(Region::Sudeste), 4);
        assert_eq!(count(Region::Sul), 3);
    }

    #[test]
    fn test_serde_uses_uf_code() {
        assert_eq!(serde_json::to_string(&StateCode::SP).unwrap(), "\"SP\"");
        assert_eq!(
            serde_json::to_string(&Region::CentroOeste).unwrap(),
            "\"centro-oeste\""
        );
    }
}
