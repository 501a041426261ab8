//! Seller registration and management.
//!
//! Field validation always runs before any repository call, so an invalid
//! form never reaches the database.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::instrument;

use delivery_core::{Cnpj, Email, SellerId};

use crate::db::{RepositoryError, SellerRepository};
use crate::models::{NewSeller, Seller, SellerForm, SellerResponse, SellerUpdateForm};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum trimmed name length in characters.
pub const MIN_NAME_LENGTH: usize = 3;

/// Errors from seller operations. Display strings are client-facing.
#[derive(Debug, Error)]
pub enum SellerError {
    #[error("Email has incorrect format.")]
    InvalidEmail,

    #[error("Password must be at least 8 char long.")]
    WeakPassword,

    #[error("Name must be neither null nor shorter than 3.")]
    InvalidName,

    #[error("Cnpj must have 14 numbers, and numbers only.")]
    InvalidCnpj,

    #[error("Email already in use.")]
    EmailInUse,

    #[error("Cnpj already in use.")]
    CnpjInUse,

    #[error("Seller not found.")]
    NotFound,

    #[error("Could not register seller.")]
    Register(#[source] RepositoryError),

    #[error("Could not update seller.")]
    Update(#[source] RepositoryError),

    #[error("Could not find seller by id: {id}")]
    Find {
        id: SellerId,
        #[source]
        source: RepositoryError,
    },

    #[error("Could not delete seller with id: {id}")]
    Delete {
        id: SellerId,
        #[source]
        source: RepositoryError,
    },

    #[error("Could not list sellers.")]
    List(#[source] RepositoryError),

    #[error("Could not hash password.")]
    PasswordHash,
}

impl SellerError {
    /// Whether the client sent something invalid (as opposed to a server fault).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEmail | Self::WeakPassword | Self::InvalidName | Self::InvalidCnpj
        )
    }

    /// Whether the error is a uniqueness conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailInUse | Self::CnpjInUse)
    }
}

/// Seller use cases over a [`SellerRepository`].
#[derive(Clone)]
pub struct SellerService {
    repository: Arc<dyn SellerRepository>,
}

impl SellerService {
    #[must_use]
    pub fn new(repository: Arc<dyn SellerRepository>) -> Self {
        Self { repository }
    }

    /// Validate and register a new seller.
    ///
    /// # Errors
    ///
    /// Validation errors first, then `EmailInUse` / `CnpjInUse`, then
    /// `Register` if persistence fails.
    #[instrument(skip(self, form))]
    pub async fn register(&self, form: SellerForm) -> Result<SellerResponse, SellerError> {
        let email = parse_email(form.email.as_deref())?;
        let password = validate_password(form.password.as_deref())?;
        let name = validate_name(form.name.as_deref())?;
        let cnpj = parse_cnpj(form.cnpj.as_deref())?;

        if self
            .repository
            .find_by_email(&email)
            .await
            .map_err(SellerError::Register)?
            .is_some()
        {
            return Err(SellerError::EmailInUse);
        }
        if self
            .repository
            .find_by_cnpj(&cnpj)
            .await
            .map_err(SellerError::Register)?
            .is_some()
        {
            return Err(SellerError::CnpjInUse);
        }

        let seller = NewSeller {
            id: SellerId::generate(),
            name,
            email,
            cnpj,
            phone_number: form.phone_number,
            password_hash: hash_password(password)?,
        };

        let seller = self
            .repository
            .insert(&seller)
            .await
            .map_err(|e| conflict_or(e, SellerError::Register))?;

        tracing::info!(seller_id = %seller.id, "seller registered");
        Ok(seller.into())
    }

    /// Apply the supplied fields of `form` to an existing seller.
    ///
    /// # Errors
    ///
    /// `NotFound` if the seller does not exist, validation and uniqueness
    /// errors for supplied fields, `Update` if persistence fails.
    #[instrument(skip(self, form), fields(seller_id = %form.id))]
    pub async fn update(&self, form: SellerUpdateForm) -> Result<SellerResponse, SellerError> {
        let mut seller = self
            .repository
            .find_by_id(form.id)
            .await
            .map_err(SellerError::Update)?
            .ok_or(SellerError::NotFound)?;

        let email = form.email.as_deref().map(|e| parse_email(Some(e))).transpose()?;
        let password = form
            .password
            .as_deref()
            .map(|p| validate_password(Some(p)))
            .transpose()?;
        let name = form.name.as_deref().map(|n| validate_name(Some(n))).transpose()?;
        let cnpj = form.cnpj.as_deref().map(|c| parse_cnpj(Some(c))).transpose()?;

        if let Some(email) = email.filter(|e| *e != seller.email) {
            if self
                .repository
                .find_by_email(&email)
                .await
                .map_err(SellerError::Update)?
                .is_some_and(|other| other.id != seller.id)
            {
                return Err(SellerError::EmailInUse);
            }
            seller.email = email;
        }
        if let Some(cnpj) = cnpj.filter(|c| *c != seller.cnpj) {
            if self
                .repository
                .find_by_cnpj(&cnpj)
                .await
                .map_err(SellerError::Update)?
                .is_some_and(|other| other.id != seller.id)
            {
                return Err(SellerError::CnpjInUse);
            }
            seller.cnpj = cnpj;
        }
        if let Some(name) = name {
            seller.name = name;
        }
        if let Some(password) = password {
            seller.password_hash = hash_password(password)?;
        }
        if form.phone_number.is_some() {
            seller.phone_number = form.phone_number;
        }

        let seller = self.repository.update(&seller).await.map_err(|e| match e {
            RepositoryError::NotFound => SellerError::NotFound,
            other => conflict_or(other, SellerError::Update),
        })?;

        tracing::info!("seller updated");
        Ok(seller.into())
    }

    /// Find a seller by id.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Find` if the repository fails.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: SellerId) -> Result<SellerResponse, SellerError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|source| SellerError::Find { id, source })?
            .map(SellerResponse::from)
            .ok_or(SellerError::NotFound)
    }

    /// All sellers; an empty list is not an error.
    ///
    /// # Errors
    ///
    /// `List` if the repository fails.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<SellerResponse>, SellerError> {
        let sellers = self.repository.find_all().await.map_err(SellerError::List)?;
        Ok(sellers.into_iter().map(SellerResponse::from).collect())
    }

    /// Delete a seller that must already exist.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Delete` if the repository fails.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: SellerId) -> Result<(), SellerError> {
        let delete_failed = |source| SellerError::Delete { id, source };

        self.repository
            .find_by_id(id)
            .await
            .map_err(delete_failed)?
            .ok_or(SellerError::NotFound)?;

        if !self.repository.delete(id).await.map_err(delete_failed)? {
            return Err(SellerError::NotFound);
        }

        tracing::info!("seller deleted");
        Ok(())
    }
}

/// Map a repository unique violation to the matching "in use" error.
fn conflict_or(e: RepositoryError, fallback: fn(RepositoryError) -> SellerError) -> SellerError {
    match e {
        RepositoryError::Conflict(ref column) if column == "email" => SellerError::EmailInUse,
        RepositoryError::Conflict(ref column) if column == "cnpj" => SellerError::CnpjInUse,
        other => fallback(other),
    }
}

fn parse_email(raw: Option<&str>) -> Result<Email, SellerError> {
    raw.and_then(|e| Email::parse(e).ok())
        .ok_or(SellerError::InvalidEmail)
}

fn validate_password(raw: Option<&str>) -> Result<&str, SellerError> {
    match raw {
        Some(p) if p.chars().count() >= MIN_PASSWORD_LENGTH => Ok(p),
        _ => Err(SellerError::WeakPassword),
    }
}

fn validate_name(raw: Option<&str>) -> Result<String, SellerError> {
    match raw.map(str::trim) {
        Some(n) if n.chars().count() >= MIN_NAME_LENGTH => Ok(n.to_owned()),
        _ => Err(SellerError::InvalidName),
    }
}

fn parse_cnpj(raw: Option<&str>) -> Result<Cnpj, SellerError> {
    raw.and_then(|c| Cnpj::parse(c).ok())
        .ok_or(SellerError::InvalidCnpj)
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, SellerError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| SellerError::PasswordHash)
}
