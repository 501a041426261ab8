//! Seller domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use delivery_core::{Cnpj, Email, SellerId};

/// A registered seller (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    /// Unique seller ID.
    pub id: SellerId,
    /// Display name.
    pub name: String,
    /// Login email, unique across sellers.
    pub email: Email,
    /// Company registration number, unique across sellers.
    pub cnpj: Cnpj,
    /// Contact phone number.
    pub phone_number: Option<i64>,
    /// Argon2 PHC string. Never serialized.
    pub password_hash: String,
    /// Whether the email has been verified.
    pub email_verified: bool,
    /// When the seller was created.
    pub created_at: DateTime<Utc>,
    /// When the seller was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A validated seller ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeller {
    pub id: SellerId,
    pub name: String,
    pub email: Email,
    pub cnpj: Cnpj,
    pub phone_number: Option<i64>,
    pub password_hash: String,
}

/// Registration request body.
///
/// Every field is optional at the wire level so that missing values surface
/// as validation messages instead of deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<i64>,
    pub cnpj: Option<String>,
}

/// Update request body. Absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerUpdateForm {
    pub id: SellerId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<i64>,
    pub cnpj: Option<String>,
}

/// Seller as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerResponse {
    pub id: SellerId,
    pub name: String,
    pub email: Email,
    pub cnpj: Cnpj,
    pub phone_number: Option<i64>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Seller> for SellerResponse {
    fn from(seller: Seller) -> Self {
        Self {
            id: seller.id,
            name: seller.name,
            email: seller.email,
            cnpj: seller.cnpj,
            phone_number: seller.phone_number,
            email_verified: seller.email_verified,
            created_at: seller.created_at,
            updated_at: seller.updated_at,
        }
    }
}
