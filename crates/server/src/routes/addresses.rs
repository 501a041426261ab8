//! Address endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::Result;
use crate::models::{AddressForm, AddressResponse};
use crate::state::AppState;

/// `POST /address` - resolve a CEP and store the address.
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddressForm>, JsonRejection>,
) -> Result<(StatusCode, Json<AddressResponse>)> {
    let Json(form) = payload?;
    let address = state.addresses().register_by_cep(form).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// `GET /address` - list addresses; `204 No Content` when there are none.
#[tracing::instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Response> {
    let addresses = state.addresses().find_all().await?;
    if addresses.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(addresses).into_response())
}
