//! Dashboard routes: revenue chart, latest invoices, and card statistics.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::card::CardData;
use crate::models::invoice::LatestInvoice;
use crate::models::revenue::Revenue;
use crate::AppState;

/// GET /api/revenue — full revenue collection for the chart.
pub async fn revenue(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Revenue>>>, AppError> {
    let revenue = state.store.fetch_revenue().await?;
    Ok(ApiResponse::success(revenue))
}

/// GET /api/invoices/latest — 5 most recent invoices with customer details.
pub async fn latest_invoices(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LatestInvoice>>>, AppError> {
    let invoices = state.store.fetch_latest_invoices().await?;
    Ok(ApiResponse::success(invoices))
}

/// GET /api/dashboard/cards — aggregated card totals for the overview page.
pub async fn cards(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CardData>>, AppError> {
    let cards = state.store.fetch_card_data().await?;
    Ok(ApiResponse::success(cards))
}
