//! Fee quote endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::services::FeeQuote;
use crate::state::AppState;

/// Request body for a fee quote.
///
/// `cep` is taken as any JSON value so that `null`, numbers and a missing
/// field reach CEP validation instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct CepForm {
    #[serde(default)]
    pub cep: Option<Value>,
}

impl CepForm {
    /// The submitted CEP text; empty when `cep` is absent or not a string.
    #[must_use]
    pub fn raw_cep(&self) -> &str {
        match &self.cep {
            Some(Value::String(cep)) => cep,
            _ => "",
        }
    }
}

/// Quote the delivery fee for a CEP.
///
/// `POST /v1/consulta-endereco` with `{ "cep": "04851-280" }`.
#[tracing::instrument(skip(state, payload))]
pub async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CepForm>, JsonRejection>,
) -> Result<Json<FeeQuote>> {
    let Json(form) = payload?;
    let quote = state.quotes().quote(form.raw_cep()).await?;
    Ok(Json(quote))
}
