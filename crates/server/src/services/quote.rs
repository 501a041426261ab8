//! Fee quoting: CEP validation, address resolution and fee calculation.

use delivery_core::Fee;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use super::fee::FeeCalculator;
use super::lookup::LookupError;
use super::resolver::{AddressResolver, ResolvedAddress};

/// Errors from resolving a CEP or quoting a fee.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Input is not 8 digits after stripping hyphens.
    #[error("Please verify if cep has 8 numbers, and numbers only.")]
    Validation,

    /// The lookup directory reported the CEP as unknown.
    #[error("Address not found for given cep.")]
    NotFound,

    /// The lookup directory could not be used.
    #[error("Address lookup failed: {0}")]
    Upstream(#[source] LookupError),
}

/// A computed delivery fee together with the address it was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeQuote {
    pub fee: Fee,
    pub address: ResolvedAddress,
}

/// Orchestrates resolution and calculation for a single CEP.
#[derive(Clone)]
pub struct FeeQuoteService {
    resolver: AddressResolver,
    calculator: FeeCalculator,
}

impl FeeQuoteService {
    #[must_use]
    pub const fn new(resolver: AddressResolver, calculator: FeeCalculator) -> Self {
        Self {
            resolver,
            calculator,
        }
    }

    /// Quote the delivery fee for raw CEP input.
    ///
    /// The first resolver error is returned unchanged. No retries.
    ///
    /// # Errors
    ///
    /// See [`AddressResolver::resolve`].
    #[instrument(skip(self))]
    pub async fn quote(&self, cep_input: &str) -> Result<FeeQuote, QuoteError> {
        let address = self.resolver.resolve(cep_input).await?;
        let quote = self.calculator.fee_for(&address);

        tracing::info!(
            cep = %quote.address.cep,
            state = %quote.address.state,
            fee = %quote.fee.amount(),
            "fee quoted"
        );

        Ok(quote)
    }
}
