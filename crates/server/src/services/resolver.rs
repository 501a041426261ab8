//! CEP validation and address resolution.

use std::sync::Arc;

use delivery_core::{Cep, StateCode};
use serde::Serialize;
use tracing::instrument;

use super::lookup::{AddressLookupClient, AddressRecord, LookupError};
use super::quote::QuoteError;

/// An address returned by the lookup directory for a valid CEP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAddress {
    /// The normalized CEP that was looked up.
    pub cep: Cep,
    pub street: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    /// State code exactly as reported upstream.
    pub state: String,
    /// Parsed state code, `None` when the directory returned something unknown.
    #[serde(skip)]
    pub state_code: Option<StateCode>,
}

impl ResolvedAddress {
    /// Build from a lookup record.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Decode` if the record carries no state code.
    pub fn from_record(cep: Cep, record: AddressRecord) -> Result<Self, LookupError> {
        let state = record.state.trim().to_owned();
        if state.is_empty() {
            return Err(LookupError::Decode(format!(
                "address for cep {cep} has no state code"
            )));
        }

        let state_code = StateCode::parse(&state).ok();

        Ok(Self {
            cep,
            street: record.street,
            complement: record.complement,
            district: record.district,
            city: record.city,
            state,
            state_code,
        })
    }
}

/// Validates raw CEP input and resolves it through an [`AddressLookupClient`].
#[derive(Clone)]
pub struct AddressResolver {
    client: Arc<dyn AddressLookupClient>,
}

impl AddressResolver {
    #[must_use]
    pub fn new(client: Arc<dyn AddressLookupClient>) -> Self {
        Self { client }
    }

    /// Resolve raw user input into an address.
    ///
    /// Hyphens are stripped before validation, so `"04555-000"` and
    /// `"04555000"` are equivalent. The lookup client is called at most once.
    ///
    /// # Errors
    ///
    /// - `QuoteError::Validation` if the input is not 8 digits
    /// - `QuoteError::NotFound` if the directory does not know the CEP
    /// - `QuoteError::Upstream` for transport, timeout, status or payload failures
    #[instrument(skip(self))]
    pub async fn resolve(&self, cep_input: &str) -> Result<ResolvedAddress, QuoteError> {
        let cep = Cep::parse(cep_input).map_err(|e| {
            tracing::debug!(error = %e, "rejected cep input");
            QuoteError::Validation
        })?;

        let record = self
            .client
            .lookup(&cep)
            .await
            .map_err(QuoteError::Upstream)?
            .ok_or(QuoteError::NotFound)?;

        let address = ResolvedAddress::from_record(cep, record).map_err(QuoteError::Upstream)?;

        if address.state_code.is_none() {
            tracing::warn!(state = %address.state, "lookup returned an unknown state code");
        }

        Ok(address)
    }
}
