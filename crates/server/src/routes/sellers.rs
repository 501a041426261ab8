//! Seller CRUD endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use delivery_core::SellerId;

use crate::error::{AppError, Result};
use crate::models::{SellerForm, SellerResponse, SellerUpdateForm};
use crate::state::AppState;

fn parse_id(raw: &str) -> Result<SellerId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid seller id: {raw}")))
}

/// `POST /seller` - register a seller.
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SellerForm>, JsonRejection>,
) -> Result<(StatusCode, Json<SellerResponse>)> {
    let Json(form) = payload?;
    let seller = state.sellers().register(form).await?;
    Ok((StatusCode::CREATED, Json(seller)))
}

/// `GET /seller` - list sellers; `204 No Content` when there are none.
#[tracing::instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Response> {
    let sellers = state.sellers().find_all().await?;
    if sellers.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(sellers).into_response())
}

/// `GET /seller/{id}`.
#[tracing::instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SellerResponse>> {
    let seller = state.sellers().find_by_id(parse_id(&id)?).await?;
    Ok(Json(seller))
}

/// `PUT /seller` - update the seller named by `id` in the body.
#[tracing::instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SellerUpdateForm>, JsonRejection>,
) -> Result<Json<SellerResponse>> {
    let Json(form) = payload?;
    let seller = state.sellers().update(form).await?;
    Ok(Json(seller))
}

/// `DELETE /seller/{id}`.
#[tracing::instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.sellers().delete_by_id(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
