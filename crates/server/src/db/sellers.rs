//! Seller repository backed by `PostgreSQL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use delivery_core::{Cnpj, Email, SellerId};

use super::{RepositoryError, SellerRepository, map_unique_violation};
use crate::models::{NewSeller, Seller};

const SELLER_COLUMNS: &str = "id, name, email, cnpj, phone_number, password_hash, \
                              email_verified, created_at, updated_at";

/// Raw `seller` row; converted to [`Seller`] after validating stored values.
#[derive(Debug, FromRow)]
struct SellerRow {
    id: SellerId,
    name: String,
    email: String,
    cnpj: String,
    phone_number: Option<i64>,
    password_hash: String,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SellerRow> for Seller {
    type Error = RepositoryError;

    fn try_from(row: SellerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let cnpj = Cnpj::parse(&row.cnpj).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid cnpj in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            cnpj,
            phone_number: row.phone_number,
            password_hash: row.password_hash,
            email_verified: row.email_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `PostgreSQL` implementation of [`SellerRepository`].
#[derive(Clone)]
pub struct PgSellerRepository {
    pool: PgPool,
}

impl PgSellerRepository {
    /// Create a new seller repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<Seller>, RepositoryError> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM seller WHERE {column} = $1");
        sqlx::query_as::<_, SellerRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?
            .map(Seller::try_from)
            .transpose()
    }
}

#[async_trait]
impl SellerRepository for PgSellerRepository {
    async fn find_all(&self) -> Result<Vec<Seller>, RepositoryError> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM seller ORDER BY created_at, id");
        sqlx::query_as::<_, SellerRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Seller::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, RepositoryError> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM seller WHERE id = $1");
        sqlx::query_as::<_, SellerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Seller::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Seller>, RepositoryError> {
        self.fetch_one_by("email", email.as_str()).await
    }

    async fn find_by_cnpj(&self, cnpj: &Cnpj) -> Result<Option<Seller>, RepositoryError> {
        self.fetch_one_by("cnpj", cnpj.as_str()).await
    }

    async fn insert(&self, seller: &NewSeller) -> Result<Seller, RepositoryError> {
        let sql = format!(
            "INSERT INTO seller (id, name, email, cnpj, phone_number, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {SELLER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SellerRow>(&sql)
            .bind(seller.id)
            .bind(&seller.name)
            .bind(seller.email.as_str())
            .bind(seller.cnpj.as_str())
            .bind(seller.phone_number)
            .bind(&seller.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        Seller::try_from(row)
    }

    async fn update(&self, seller: &Seller) -> Result<Seller, RepositoryError> {
        let sql = format!(
            "UPDATE seller \
             SET name = $2, email = $3, cnpj = $4, phone_number = $5, \
                 password_hash = $6, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SELLER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SellerRow>(&sql)
            .bind(seller.id)
            .bind(&seller.name)
            .bind(seller.email.as_str())
            .bind(seller.cnpj.as_str())
            .bind(seller.phone_number)
            .bind(&seller.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique_violation)?
            .ok_or(RepositoryError::NotFound)?;

        Seller::try_from(row)
    }

    async fn delete(&self, id: SellerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM seller WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
