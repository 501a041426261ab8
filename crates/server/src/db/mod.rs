//! Database operations for the delivery `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `seller` - Registered sellers (unique email and CNPJ)
//! - `address` - Delivery addresses resolved from a CEP
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p delivery-cli -- migrate
//! ```
//!
//! Services depend on the [`SellerRepository`] and [`AddressRepository`]
//! traits; the `Pg*` types are the `PostgreSQL` implementations.

pub mod addresses;
pub mod sellers;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use delivery_core::{Cnpj, Email, SellerId};

use crate::models::{Address, NewAddress, NewSeller, Seller};

pub use addresses::PgAddressRepository;
pub use sellers::PgSellerRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation; carries the offending column (`email`, `cnpj`).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Persistence port for sellers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// All sellers, oldest first.
    async fn find_all(&self) -> Result<Vec<Seller>, RepositoryError>;

    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Seller>, RepositoryError>;

    async fn find_by_cnpj(&self, cnpj: &Cnpj) -> Result<Option<Seller>, RepositoryError>;

    /// Insert a new seller.
    ///
    /// Returns `RepositoryError::Conflict` on a unique violation.
    async fn insert(&self, seller: &NewSeller) -> Result<Seller, RepositoryError>;

    /// Overwrite every mutable column of an existing seller.
    ///
    /// Returns `RepositoryError::NotFound` if the row vanished.
    async fn update(&self, seller: &Seller) -> Result<Seller, RepositoryError>;

    /// Delete a seller. Returns `false` if no row matched.
    async fn delete(&self, id: SellerId) -> Result<bool, RepositoryError>;
}

/// Persistence port for delivery addresses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// All addresses, oldest first.
    async fn find_all(&self) -> Result<Vec<Address>, RepositoryError>;

    async fn insert(&self, address: &NewAddress) -> Result<Address, RepositoryError>;
}

/// Map a unique violation to `Conflict`, naming the column from the constraint.
fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let column = match db_err.constraint() {
            Some(c) if c.contains("cnpj") => "cnpj",
            Some(c) if c.contains("email") => "email",
            _ => "unknown",
        };
        return RepositoryError::Conflict(column.to_owned());
    }
    RepositoryError::Database(e)
}
