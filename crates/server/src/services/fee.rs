//! Delivery fee table and calculator.
//!
//! Fees are charged per region; every state inherits its region's rate.
//! Addresses whose state code is unknown pay the default rate.

use std::collections::HashMap;
use std::sync::LazyLock;

use delivery_core::{Fee, Region, StateCode};

use super::quote::FeeQuote;
use super::resolver::ResolvedAddress;

/// Fee charged when the state code is missing from the table.
pub const DEFAULT_FEE: Fee = Fee::from_centavos(2083);

static STANDARD_TABLE: LazyLock<FeeTable> = LazyLock::new(|| {
    FeeTable::by_region(
        |region| match region {
            Region::Sudeste => Fee::from_centavos(785),
            Region::CentroOeste => Fee::from_centavos(1250),
            Region::Nordeste => Fee::from_centavos(1598),
            Region::Sul => Fee::from_centavos(1730),
            Region::Norte => Fee::from_centavos(2083),
        },
        DEFAULT_FEE,
    )
});

/// Immutable mapping from state code to fee, with an explicit default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeTable {
    fees: HashMap<StateCode, Fee>,
    default: Fee,
}

impl FeeTable {
    /// The process-wide standard table.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_TABLE
    }

    /// Build a table assigning every state its region's fee.
    pub fn by_region(fee_for_region: impl Fn(Region) -> Fee, default: Fee) -> Self {
        let fees = StateCode::ALL
            .iter()
            .map(|state| (*state, fee_for_region(state.region())))
            .collect();
        Self { fees, default }
    }

    /// Build a table from explicit entries.
    #[must_use]
    pub const fn new(fees: HashMap<StateCode, Fee>, default: Fee) -> Self {
        Self { fees, default }
    }

    /// Fee for a state, falling back to the default entry.
    #[must_use]
    pub fn fee_for(&self, state: Option<StateCode>) -> Fee {
        state
            .and_then(|code| self.fees.get(&code).copied())
            .unwrap_or(self.default)
    }

    /// The fallback fee.
    #[must_use]
    pub const fn default_fee(&self) -> Fee {
        self.default
    }
}

/// Maps resolved addresses to fee quotes. Pure; never fails.
#[derive(Debug, Clone, Copy)]
pub struct FeeCalculator {
    table: &'static FeeTable,
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::new(FeeTable::standard())
    }
}

impl FeeCalculator {
    #[must_use]
    pub const fn new(table: &'static FeeTable) -> Self {
        Self { table }
    }

    /// Quote the fee for an address.
    #[must_use]
    pub fn fee_for(&self, address: &ResolvedAddress) -> FeeQuote {
        FeeQuote {
            fee: self.table.fee_for(address.state_code),
            address: address.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use delivery_core::Cep;
    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;

    fn address_in(state: &str) -> ResolvedAddress {
        ResolvedAddress {
            cep: Cep::parse("04851280").unwrap(),
            street: String::new(),
            complement: String::new(),
            district: String::new(),
            city: String::new(),
            state: state.to_owned(),
            state_code: StateCode::parse(state).ok(),
        }
    }

    #[test]
    fn test_calculator_quotes_sao_paulo() {
        let quote = FeeCalculator::default().fee_for(&address_in("SP"));
        assert_eq!(quote.fee.amount().to_string(), "7.85");
        assert_eq!(quote.address.state, "SP");
    }

    #[test]
    fn test_calculator_unknown_state_gets_default() {
        let quote = FeeCalculator::default().fee_for(&address_in("ZZ"));
        assert_eq!(quote.fee, DEFAULT_FEE);
    }

    #[test]
    fn test_calculator_is_deterministic_across_threads() {
        let address = Arc::new(address_in("RS"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let address = Arc::clone(&address);
                std::thread::spawn(move || FeeCalculator::default().fee_for(&address).fee)
            })
            .collect();

        let fees: Vec<Fee> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(fees.iter().all(|fee| *fee == Fee::from_centavos(1730)));
    }

    #[rstest]
    #[case::sao_paulo(StateCode::SP, "7.85")]
    #[case::rio(StateCode::RJ, "7.85")]
    #[case::distrito_federal(StateCode::DF, "12.50")]
    #[case::bahia(StateCode::BA, "15.98")]
    #[case::parana(StateCode::PR, "17.30")]
    #[case::amazonas(StateCode::AM, "20.83")]
    fn test_standard_fees(#[case] state: StateCode, #[case] expected: &str) {
        let fee = FeeTable::standard().fee_for(Some(state));
        assert_eq!(fee.amount(), expected.parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_every_state_uses_its_region_rate() {
        let table = FeeTable::standard();
        for state in StateCode::ALL {
            let same_region = StateCode::ALL
                .iter()
                .find(|other| other.region() == state.region())
                .unwrap();
            assert_eq!(
                table.fee_for(Some(state)),
                table.fee_for(Some(*same_region)),
                "{state} differs from {same_region}"
            );
        }
    }

    #[test]
    fn test_unknown_state_uses_default() {
        let table = FeeTable::standard();
        assert_eq!(table.fee_for(None), DEFAULT_FEE);
        assert_eq!(table.default_fee().amount().to_string(), "20.83");
    }

    #[test]
    fn test_explicit_table_falls_back_for_missing_entries() {
        let mut fees = HashMap::new();
        fees.insert(StateCode::SP, Fee::from_centavos(100));
        let table = FeeTable::new(fees, Fee::from_centavos(999));

        assert_eq!(table.fee_for(Some(StateCode::SP)), Fee::from_centavos(100));
        assert_eq!(table.fee_for(Some(StateCode::RS)), Fee::from_centavos(999));
    }
}
