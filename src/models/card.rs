//! Aggregate card statistics for the dashboard overview.

use serde::Serialize;

/// Dashboard card totals. The two invoice totals are status-partitioned
/// amount sums, currency-formatted for display.
#[derive(Debug, Serialize)]
pub struct CardData {
    pub number_of_customers: i64,
    pub number_of_invoices: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}
