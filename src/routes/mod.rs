//! Route definitions for the invoicing dashboard API.

pub mod customers;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod query;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router. Shared by `main` and the
/// integration tests so the wiring is exercised exactly as deployed.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/revenue", get(dashboard::revenue))
        .route("/dashboard/cards", get(dashboard::cards))
        .route("/invoices", get(invoices::list))
        .route("/invoices/latest", get(dashboard::latest_invoices))
        .route("/invoices/pages", get(invoices::pages))
        .route("/invoices/{id}", get(invoices::get_by_id))
        .route("/customers", get(customers::list))
        .route("/customers/table", get(customers::table));

    Router::new()
        .nest("/api", api)
        .route("/invoices", post(invoices::create))
        .route("/invoices/{id}", post(invoices::update))
        .route("/invoices/{id}/delete", post(invoices::delete))
        .route("/query", get(query::latest_invoices))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
