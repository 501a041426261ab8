//! Address repository backed by `PostgreSQL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use delivery_core::{AddressId, Cep};

use super::{AddressRepository, RepositoryError};
use crate::models::{Address, NewAddress};

/// Raw `address` row. The CEP column decodes straight into a validated [`Cep`].
#[derive(Debug, FromRow)]
struct AddressRow {
    id: AddressId,
    cep: Cep,
    street: String,
    complement: String,
    district: String,
    city: String,
    state: String,
    number: i32,
    created_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            cep: row.cep,
            street: row.street,
            complement: row.complement,
            district: row.district,
            city: row.city,
            state: row.state,
            number: row.number,
            created_at: row.created_at,
        }
    }
}

/// `PostgreSQL` implementation of [`AddressRepository`].
#[derive(Clone)]
pub struct PgAddressRepository {
    pool: PgPool,
}

impl PgAddressRepository {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn find_all(&self) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, cep, street, complement, district, city, state, number, created_at
            FROM address
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn insert(&self, address: &NewAddress) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            INSERT INTO address (cep, street, complement, district, city, state, number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, cep, street, complement, district, city, state, number, created_at
            ",
        )
        .bind(&address.cep)
        .bind(&address.street)
        .bind(&address.complement)
        .bind(&address.district)
        .bind(&address.city)
        .bind(&address.state)
        .bind(address.number)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
