//! ViaCEP address lookup client.
//!
//! Implements [`AddressLookupClient`] against the public ViaCEP JSON API:
//!
//! ```text
//! GET {base_url}/ws/{cep}/json/
//! ```
//!
//! ViaCEP answers unknown CEPs with `200 {"erro": true}`; both that payload and
//! a `404` are reported as "not found". Every other non-success status is an
//! upstream error.

mod types;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::instrument;

use delivery_core::Cep;

pub use types::{ErrorFlag, ViaCepResponse};

use crate::config::ViaCepConfig;
use crate::services::{AddressLookupClient, AddressRecord, LookupError};

/// Reqwest-backed ViaCEP client. Cheap to clone; the connection pool is shared.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: Url,
}

impl ViaCepClient {
    /// Build a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &ViaCepConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// The URL queried for `cep`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Transport` if the base URL cannot carry a path.
    pub fn lookup_url(&self, cep: &Cep) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                LookupError::Transport(format!("base url {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(["ws", cep.as_str(), "json", ""]);
        Ok(url)
    }
}

#[async_trait]
impl AddressLookupClient for ViaCepClient {
    #[instrument(skip(self), fields(cep = %cep))]
    async fn lookup(&self, cep: &Cep) -> Result<Option<AddressRecord>, LookupError> {
        let url = self.lookup_url(cep)?;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("viacep returned 404");
            return Ok(None);
        }
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            tracing::warn!(error = %error, "viacep lookup failed");
            return Err(error);
        }

        let record = parse_record(body.as_ref())?;
        if record.is_none() {
            tracing::debug!("viacep reported cep as unknown");
        }
        Ok(record)
    }
}

fn parse_record(body: &[u8]) -> Result<Option<AddressRecord>, LookupError> {
    let decoded: ViaCepResponse = serde_json::from_slice(body).map_err(|error| {
        LookupError::Decode(format!("invalid ViaCEP JSON payload: {error}"))
    })?;
    Ok(decoded.into_record())
}

fn map_transport_error(error: reqwest::Error) -> LookupError {
    if error.is_timeout() {
        LookupError::Timeout(error.to_string())
    } else {
        LookupError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LookupError {
    let message = body_preview(body);

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            LookupError::Timeout(format!("status {}", status.as_u16()))
        }
        _ => LookupError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
