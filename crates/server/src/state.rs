//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ViaCepConfig;
use crate::db::{AddressRepository, PgAddressRepository, PgSellerRepository, SellerRepository};
use crate::services::{
    AddressLookupClient, AddressResolver, AddressService, FeeCalculator, FeeQuoteService,
    SellerService,
};
use crate::viacep::ViaCepClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the database pool and the service layer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    quotes: FeeQuoteService,
    sellers: SellerService,
    addresses: AddressService,
}

impl AppState {
    /// Create the production state: ViaCEP lookups and `PostgreSQL` repositories.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for ViaCEP cannot be built.
    pub fn new(viacep: &ViaCepConfig, pool: PgPool) -> Result<Self, reqwest::Error> {
        let lookup = Arc::new(ViaCepClient::new(viacep)?);
        let sellers = Arc::new(PgSellerRepository::new(pool.clone()));
        let addresses = Arc::new(PgAddressRepository::new(pool.clone()));

        Ok(Self::from_parts(pool, lookup, sellers, addresses))
    }

    /// Assemble state from explicit collaborators.
    #[must_use]
    pub fn from_parts(
        pool: PgPool,
        lookup: Arc<dyn AddressLookupClient>,
        sellers: Arc<dyn SellerRepository>,
        addresses: Arc<dyn AddressRepository>,
    ) -> Self {
        let resolver = AddressResolver::new(lookup);

        Self {
            inner: Arc::new(AppStateInner {
                pool,
                quotes: FeeQuoteService::new(resolver.clone(), FeeCalculator::default()),
                sellers: SellerService::new(sellers),
                addresses: AddressService::new(resolver, addresses),
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Fee quoting service.
    #[must_use]
    pub fn quotes(&self) -> &FeeQuoteService {
        &self.inner.quotes
    }

    /// Seller service.
    #[must_use]
    pub fn sellers(&self) -> &SellerService {
        &self.inner.sellers
    }

    /// Address service.
    #[must_use]
    pub fn addresses(&self) -> &AddressService {
        &self.inner.addresses
    }
}
