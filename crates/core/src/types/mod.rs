//! Core types for the delivery backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cep;
pub mod cnpj;
pub mod email;
pub mod fee;
pub mod id;
pub mod state;

pub use cep::{Cep, CepError};
pub use cnpj::{Cnpj, CnpjError};
pub use email::{Email, EmailError};
pub use fee::{Fee, FeeError};
pub use id::*;
pub use state::{Region, StateCode, StateCodeError};
