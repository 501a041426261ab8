//! One-off fee quote against the configured ViaCEP endpoint.
//!
//! # Usage
//!
//! ```bash
//! delivery-cli quote 04851-280
//! VIACEP_BASE_URL=http://localhost:9000 delivery-cli quote 04851280
//! ```
//!
//! Prints the quote as JSON on stdout; errors go to the log on stderr.

use std::sync::Arc;

use thiserror::Error;

use delivery_server::config::{ConfigError, ViaCepConfig};
use delivery_server::services::{AddressResolver, FeeCalculator, FeeQuoteService, QuoteError};
use delivery_server::viacep::ViaCepClient;

/// Errors that can occur while quoting.
#[derive(Debug, Error)]
pub enum QuoteCommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("Could not serialize quote: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Quote `cep` and print the result.
///
/// # Errors
///
/// Returns `QuoteCommandError` for configuration, validation, lookup or
/// serialization failures.
pub async fn run(cep: &str) -> Result<(), QuoteCommandError> {
    dotenvy::dotenv().ok();

    let config = ViaCepConfig::from_env()?;
    let client = ViaCepClient::new(&config)?;
    let service = FeeQuoteService::new(
        AddressResolver::new(Arc::new(client)),
        FeeCalculator::default(),
    );

    let quote = service.quote(cep).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    }
    Ok(())
}
