//! Raw read endpoint: the 10 most recent invoice `{amount, name}` pairs.
//!
//! Unlike the dashboard reads, this endpoint has no fallback path and no
//! response envelope: a missing database configuration is itself an error,
//! answered as `500 {"error": ...}`. Kept deliberately (see DESIGN.md).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::invoice::InvoiceAmount;
use crate::AppState;

#[derive(Debug, Serialize)]
struct QueryData {
    data: Vec<InvoiceAmount>,
}

#[derive(Debug, Serialize)]
struct QueryError {
    error: String,
}

/// GET /query — latest 10 invoices as raw JSON.
pub async fn latest_invoices(State(state): State<AppState>) -> Response {
    match state.store.fetch_invoice_amounts().await {
        Ok(data) => (StatusCode::OK, Json(QueryData { data })).into_response(),
        Err(AppError::Unconfigured(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(QueryError {
                error: "POSTGRES_URL/DATABASE_URL is not configured".to_string(),
            }),
        )
            .into_response(),
        // Query failure already logged when the store wrapped it
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(QueryError {
                error: "Failed to fetch invoices".to_string(),
            }),
        )
            .into_response(),
    }
}
