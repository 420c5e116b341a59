//! Route handlers
//!
//! Bodies are taken as `Result<Json<_>, JsonRejection>` so that malformed
//! input gets the same `{error, kind}` shape as every other failure.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use super::AppState;
use super::error::ApiError;
use crate::readme::{
    DocumentResponse, GenerateRequest, RefineRequest, RefineResponse, RepositoryRequest,
};

pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let Json(request) = payload?;
    let document = state.service.handle_generate(request).await?;
    Ok(Json(document.into()))
}

pub async fn generate_repository(
    State(state): State<AppState>,
    payload: Result<Json<RepositoryRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let Json(request) = payload?;
    let document = state.service.handle_repository(request).await?;
    Ok(Json(document.into()))
}

pub async fn refine(
    State(state): State<AppState>,
    payload: Result<Json<RefineRequest>, JsonRejection>,
) -> Result<Json<RefineResponse>, ApiError> {
    let Json(request) = payload?;
    let outcome = state.service.handle_refine(request).await?;
    Ok(Json(outcome.into()))
}

pub async fn health_check() -> &'static str {
    "OK"
}
