//! Customer routes, read-only.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::customer::{CustomerField, CustomerRow};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TableParams {
    #[serde(default)]
    pub query: String,
}

/// GET /api/customers — all customers as `{id, name}`, name ascending.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CustomerField>>>, AppError> {
    let customers = state.store.fetch_customers().await?;
    Ok(ApiResponse::success(customers))
}

/// GET /api/customers/table — filtered customers with invoice aggregates.
///
/// Requires a live database; in fallback mode this responds 503.
pub async fn table(
    State(state): State<AppState>,
    Query(params): Query<TableParams>,
) -> Result<Json<ApiResponse<Vec<CustomerRow>>>, AppError> {
    let customers = state.store.fetch_filtered_customers(&params.query).await?;
    Ok(ApiResponse::success(customers))
}
