//! Delivery address types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use delivery_core::{AddressId, Cep};

/// A stored delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub cep: Cep,
    pub street: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    /// State code as reported by the lookup directory.
    pub state: String,
    pub number: i32,
    pub created_at: DateTime<Utc>,
}

/// An address resolved from a CEP, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub cep: Cep,
    pub street: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub number: i32,
}

/// Register-by-CEP request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    #[serde(default)]
    pub cep: String,
    /// Overrides the complement returned by the lookup when non-empty.
    #[serde(default)]
    pub complement: Option<String>,
    pub number: Option<i32>,
}

/// Address as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: AddressId,
    pub cep: Cep,
    pub street: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub number: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            cep: address.cep,
            street: address.street,
            complement: address.complement,
            district: address.district,
            city: address.city,
            state: address.state,
            number: address.number,
            created_at: address.created_at,
        }
    }
}
