//! Delivery address registration by CEP.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use crate::db::{AddressRepository, RepositoryError};
use crate::models::{AddressForm, AddressResponse, NewAddress};

use super::quote::QuoteError;
use super::resolver::AddressResolver;

/// Errors from address operations.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Address number must not be null.")]
    MissingNumber,

    /// CEP validation or lookup failed; same messages as fee quoting.
    #[error(transparent)]
    Resolve(#[from] QuoteError),

    #[error("Could not register address by cep.")]
    Register(#[source] RepositoryError),

    #[error("Could not list addresses.")]
    List(#[source] RepositoryError),
}

/// Address use cases: resolve through the shared resolver, then persist.
#[derive(Clone)]
pub struct AddressService {
    resolver: AddressResolver,
    repository: Arc<dyn AddressRepository>,
}

impl AddressService {
    #[must_use]
    pub fn new(resolver: AddressResolver, repository: Arc<dyn AddressRepository>) -> Self {
        Self {
            resolver,
            repository,
        }
    }

    /// Resolve `form.cep` and store the resulting address.
    ///
    /// A non-empty `complement` in the form replaces the one from the lookup.
    ///
    /// # Errors
    ///
    /// `MissingNumber` when no number is given, `Resolve` for CEP failures,
    /// `Register` if persistence fails.
    #[instrument(skip(self, form), fields(cep = %form.cep))]
    pub async fn register_by_cep(&self, form: AddressForm) -> Result<AddressResponse, AddressError> {
        let number = form.number.ok_or(AddressError::MissingNumber)?;
        let resolved = self.resolver.resolve(&form.cep).await?;

        let complement = form
            .complement
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(resolved.complement);

        let address = NewAddress {
            cep: resolved.cep,
            street: resolved.street,
            complement,
            district: resolved.district,
            city: resolved.city,
            state: resolved.state,
            number,
        };

        let address = self
            .repository
            .insert(&address)
            .await
            .map_err(AddressError::Register)?;

        tracing::info!(address_id = %address.id, "address registered");
        Ok(address.into())
    }

    /// All stored addresses.
    ///
    /// # Errors
    ///
    /// `List` if the repository fails.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<AddressResponse>, AddressError> {
        let addresses = self.repository.find_all().await.map_err(AddressError::List)?;
        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use delivery_core::AddressId;

    use super::*;
    use crate::db::MockAddressRepository;
    use crate::models::Address;
    use crate::services::lookup::{AddressRecord, MockAddressLookupClient};

    fn lookup_sao_paulo() -> MockAddressLookupClient {
        let mut client = MockAddressLookupClient::new();
        client.expect_lookup().returning(|_| {
            Ok(Some(AddressRecord {
                street: "Avenida Santo Amaro".to_owned(),
                complement: "de 3001 a 5553 - lado ímpar".to_owned(),
                district: "Brooklin".to_owned(),
                city: "São Paulo".to_owned(),
                state: "SP".to_owned(),
            }))
        });
        client
    }

    fn stored(new: &NewAddress) -> Address {
        Address {
            id: AddressId::new(1),
            cep: new.cep.clone(),
            street: new.street.clone(),
            complement: new.complement.clone(),
            district: new.district.clone(),
            city: new.city.clone(),
            state: new.state.clone(),
            number: new.number,
            created_at: Utc::now(),
        }
    }

    fn service(client: MockAddressLookupClient, repo: MockAddressRepository) -> AddressService {
        AddressService::new(AddressResolver::new(Arc::new(client)), Arc::new(repo))
    }

    fn form(cep: &str, number: Option<i32>) -> AddressForm {
        AddressForm {
            cep: cep.to_owned(),
            complement: Some(String::new()),
            number,
        }
    }

    #[tokio::test]
    async fn test_register_address_by_cep() {
        let mut repo = MockAddressRepository::new();
        repo.expect_insert()
            .withf(|a| a.cep.as_str() == "04555000" && a.state == "SP" && a.number == 123)
            .times(1)
            .returning(|a| Ok(stored(a)));

        let address = service(lookup_sao_paulo(), repo)
            .register_by_cep(form("04555-000", Some(123)))
            .await
            .unwrap();

        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.complement, "de 3001 a 5553 - lado ímpar");
    }

    #[tokio::test]
    async fn test_register_keeps_explicit_complement() {
        let mut repo = MockAddressRepository::new();
        repo.expect_insert().returning(|a| Ok(stored(a)));

        let address = service(lookup_sao_paulo(), repo)
            .register_by_cep(AddressForm {
                complement: Some("apto 42".to_owned()),
                ..form("04555000", Some(10))
            })
            .await
            .unwrap();

        assert_eq!(address.complement, "apto 42");
    }

    #[tokio::test]
    async fn test_register_invalid_cep_is_not_saved() {
        let mut client = MockAddressLookupClient::new();
        client.expect_lookup().times(0);
        let mut repo = MockAddressRepository::new();
        repo.expect_insert().times(0);

        let err = service(client, repo)
            .register_by_cep(form("04555A00", Some(123)))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Please verify if cep has 8 numbers, and numbers only."
        );
    }

    #[tokio::test]
    async fn test_register_missing_number() {
        let mut client = MockAddressLookupClient::new();
        client.expect_lookup().times(0);
        let mut repo = MockAddressRepository::new();
        repo.expect_insert().times(0);

        let err = service(client, repo)
            .register_by_cep(form("04555-000", None))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Address number must not be null.");
    }

    #[tokio::test]
    async fn test_register_repository_failure() {
        let mut repo = MockAddressRepository::new();
        repo.expect_insert()
            .return_once(|_| Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)));

        let err = service(lookup_sao_paulo(), repo)
            .register_by_cep(form("04555-000", Some(123)))
            .await
            .unwrap_err();

        assert!(matches!(err, AddressError::Register(_)));
        assert_eq!(err.to_string(), "Could not register address by cep.");
    }

    #[tokio::test]
    async fn test_find_all() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_all().times(1).returning(|| {
            Ok(vec![stored(&NewAddress {
                cep: delivery_core::Cep::parse("04555000").unwrap(),
                street: String::new(),
                complement: String::new(),
                district: String::new(),
                city: String::new(),
                state: "SP".to_owned(),
                number: 1,
            })])
        });

        let addresses = service(MockAddressLookupClient::new(), repo)
            .find_all()
            .await
            .unwrap();
        assert_eq!(addresses.len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_all().times(1).returning(|| Ok(Vec::new()));

        let addresses = service(MockAddressLookupClient::new(), repo)
            .find_all()
            .await
            .unwrap();
        assert!(addresses.is_empty());
    }
}
