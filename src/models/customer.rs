//! Customer models. Customers are read-only from this service's perspective.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Minimal `{id, name}` projection for select dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// Filtered customers table row: customer fields left-joined with aggregated
/// invoice counts and status-partitioned sums, sums currency-formatted.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}
