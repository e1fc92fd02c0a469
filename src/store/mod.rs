//! Dual-mode data access layer.
//!
//! Every read operation runs either against a configured Postgres database
//! ([`pg::PgStore`]) or over the static seed dataset ([`seed::SeedStore`]).
//! The implementation is chosen once at startup from `AppConfig` and
//! injected as `Arc<dyn DataStore>`, so no call site branches on the
//! environment.

pub mod pg;
pub mod seed;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::card::CardData;
use crate::models::customer::{CustomerField, CustomerRow};
use crate::models::invoice::{
    InvoiceAmount, InvoiceForm, InvoiceRow, InvoiceUpdate, LatestInvoice, NewInvoice,
};
use crate::models::revenue::Revenue;

/// Page size for the invoices table, fixed system-wide.
pub const ITEMS_PER_PAGE: i64 = 6;

/// Total pages for a given number of matching rows.
pub fn page_count(matching_rows: i64) -> i64 {
    (matching_rows + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
}

/// Data access operations backing the dashboard.
///
/// Live-mode failures surface as [`AppError::Store`] with a generic
/// per-operation message; fallback-mode reads cannot fail except for the
/// two operations with no fallback path, which return
/// [`AppError::Unconfigured`]. Mutations silently no-op in fallback mode.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// `"live"` or `"fallback"`, for the readiness probe.
    fn mode(&self) -> &'static str;

    /// Backend connectivity check.
    async fn ping(&self) -> Result<(), AppError>;

    /// Full revenue collection, unmodified.
    async fn fetch_revenue(&self) -> Result<Vec<Revenue>, AppError>;

    /// Top 5 invoices by date descending, joined with customer display
    /// fields, amounts currency-formatted.
    async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, AppError>;

    /// Customer/invoice counts plus status-partitioned amount sums.
    async fn fetch_card_data(&self) -> Result<CardData, AppError>;

    /// Case-insensitive substring search over the invoice/customer join
    /// (customer name, email, amount as text, date as text, status), date
    /// descending, sliced to the requested 1-based page.
    async fn fetch_filtered_invoices(
        &self,
        query: &str,
        page: i64,
    ) -> Result<Vec<InvoiceRow>, AppError>;

    /// Total page count for the same predicate as
    /// [`fetch_filtered_invoices`](Self::fetch_filtered_invoices).
    async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, AppError>;

    /// Single invoice with amount converted cents to dollars. `None` is the
    /// not-found signal; callers render a not-found state, not a failure.
    async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>, AppError>;

    /// All customers as `{id, name}`, name ascending.
    async fn fetch_customers(&self) -> Result<Vec<CustomerField>, AppError>;

    /// Customers matching a name/email substring, left-joined with invoice
    /// counts and status-partitioned sums. No fallback path: requires a
    /// live database.
    async fn fetch_filtered_customers(&self, query: &str) -> Result<Vec<CustomerRow>, AppError>;

    /// The 10 most recent `{amount, name}` pairs for the raw read endpoint.
    /// No fallback path: requires a live database.
    async fn fetch_invoice_amounts(&self) -> Result<Vec<InvoiceAmount>, AppError>;

    /// Insert a new invoice stamped with the current UTC date.
    async fn create_invoice(&self, input: &NewInvoice) -> Result<(), AppError>;

    /// Update customer, amount, and status for an existing invoice. The
    /// invoice date is immutable after creation.
    async fn update_invoice(&self, id: &str, input: &InvoiceUpdate) -> Result<(), AppError>;

    /// Delete an invoice by id. Deleting an absent id is not an error.
    async fn delete_invoice(&self, id: &str) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(6), 1);
        assert_eq!(page_count(7), 2);
        assert_eq!(page_count(13), 3);
    }
}
