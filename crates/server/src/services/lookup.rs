//! Outbound address lookup port.
//!
//! The resolver only knows this trait; [`ViaCepClient`](crate::viacep::ViaCepClient)
//! is the production implementation and tests substitute mocks or stubs.

use async_trait::async_trait;
use delivery_core::Cep;
use thiserror::Error;

/// Address data as reported by the lookup directory.
///
/// Fields are kept as the directory returns them; validation of the state code
/// happens in the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressRecord {
    /// Street name (logradouro).
    pub street: String,
    /// Complement such as "lado ímpar".
    pub complement: String,
    /// District (bairro).
    pub district: String,
    /// City (localidade).
    pub city: String,
    /// Two-letter state code (UF).
    pub state: String,
}

/// Errors raised by lookup clients.
///
/// "Not found" is not an error here: clients return `Ok(None)` for unknown
/// CEPs so callers can tell it apart from failures worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Connection refused, DNS failure, reset, ...
    #[error("lookup transport error: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("lookup timed out: {0}")]
    Timeout(String),

    /// The directory answered with an unexpected HTTP status.
    #[error("lookup returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Short preview of the response body.
        message: String,
    },

    /// The payload could not be decoded into an address.
    #[error("lookup returned a malformed payload: {0}")]
    Decode(String),
}

/// Coarse classification of a [`LookupError`], used in error bodies and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamFailure {
    Transport,
    Timeout,
    Status,
    Decode,
}

impl UpstreamFailure {
    /// Stable machine-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::Decode => "decode",
        }
    }
}

impl LookupError {
    /// The failure kind of this error.
    #[must_use]
    pub const fn failure(&self) -> UpstreamFailure {
        match self {
            Self::Transport(_) => UpstreamFailure::Transport,
            Self::Timeout(_) => UpstreamFailure::Timeout,
            Self::Status { .. } => UpstreamFailure::Status,
            Self::Decode(_) => UpstreamFailure::Decode,
        }
    }
}

/// Port for resolving a normalized CEP into address data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressLookupClient: Send + Sync {
    /// Look up a CEP.
    ///
    /// Returns `Ok(None)` when the directory reports the CEP as unknown.
    async fn lookup(&self, cep: &Cep) -> Result<Option<AddressRecord>, LookupError>;
}
