//! Fallback store computing every read over the static seed dataset.
//!
//! Pure in-memory filtering and sorting; reads with a fallback path cannot
//! fail. Mutations are silent no-ops so that callers keep their
//! invalidate-and-redirect contract even without a database.

use async_trait::async_trait;

use crate::currency::format_currency;
use crate::errors::AppError;
use crate::models::card::CardData;
use crate::models::customer::{Customer, CustomerField, CustomerRow};
use crate::models::invoice::{
    InvoiceAmount, InvoiceForm, InvoiceRow, InvoiceUpdate, LatestInvoice, NewInvoice,
};
use crate::models::revenue::Revenue;
use crate::seed::{self, SeedInvoice};
use crate::store::{page_count, DataStore, ITEMS_PER_PAGE};

pub struct SeedStore {
    customers: Vec<Customer>,
    invoices: Vec<SeedInvoice>,
    revenue: Vec<Revenue>,
}

impl SeedStore {
    /// Store over the built-in seed dataset.
    pub fn new() -> Self {
        Self::with_data(seed::customers(), seed::invoices(), seed::revenue())
    }

    /// Store over a caller-supplied dataset, for tests.
    pub fn with_data(
        customers: Vec<Customer>,
        invoices: Vec<SeedInvoice>,
        revenue: Vec<Revenue>,
    ) -> Self {
        Self {
            customers,
            invoices,
            revenue,
        }
    }

    fn customer(&self, id: uuid::Uuid) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Search predicate: case-insensitive substring match over customer
    /// name, customer email, amount as text (cents), date as text, and
    /// status. An empty query matches every invoice.
    fn matches(&self, invoice: &SeedInvoice, query_lower: &str) -> bool {
        let customer_hit = self.customer(invoice.customer_id).is_some_and(|c| {
            c.name.to_lowercase().contains(query_lower)
                || c.email.to_lowercase().contains(query_lower)
        });
        customer_hit
            || invoice.amount.to_string().contains(query_lower)
            || invoice.date.to_string().contains(query_lower)
            || invoice.status.as_str().contains(query_lower)
    }

    /// Matching invoices sorted by date descending.
    fn filtered_sorted(&self, query: &str) -> Vec<&SeedInvoice> {
        let query_lower = query.to_lowercase();
        let mut rows: Vec<&SeedInvoice> = self
            .invoices
            .iter()
            .filter(|invoice| self.matches(invoice, &query_lower))
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}

impl Default for SeedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataStore for SeedStore {
    fn mode(&self) -> &'static str {
        "fallback"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn fetch_revenue(&self) -> Result<Vec<Revenue>, AppError> {
        Ok(self.revenue.clone())
    }

    async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, AppError> {
        let mut rows: Vec<&SeedInvoice> = self.invoices.iter().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));

        // Positional synthetic ids: "0".."4" by list position, not stable
        // across data changes.
        let latest = rows
            .into_iter()
            .take(5)
            .enumerate()
            .map(|(index, invoice)| {
                let customer = self.customer(invoice.customer_id);
                LatestInvoice {
                    id: index.to_string(),
                    name: customer.map_or_else(|| "Unknown".to_string(), |c| c.name.clone()),
                    image_url: customer.map_or_else(String::new, |c| c.image_url.clone()),
                    email: customer.map_or_else(String::new, |c| c.email.clone()),
                    amount: format_currency(invoice.amount),
                }
            })
            .collect();
        Ok(latest)
    }

    async fn fetch_card_data(&self) -> Result<CardData, AppError> {
        let (paid, pending) = status_totals(&self.invoices);
        Ok(CardData {
            number_of_customers: self.customers.len() as i64,
            number_of_invoices: self.invoices.len() as i64,
            total_paid_invoices: format_currency(paid),
            total_pending_invoices: format_currency(pending),
        })
    }

    async fn fetch_filtered_invoices(
        &self,
        query: &str,
        page: i64,
    ) -> Result<Vec<InvoiceRow>, AppError> {
        let offset = (page.max(1) - 1) * ITEMS_PER_PAGE;

        // Synthetic ids restart at "0" on every page slice.
        let rows = self
            .filtered_sorted(query)
            .into_iter()
            .skip(offset as usize)
            .take(ITEMS_PER_PAGE as usize)
            .enumerate()
            .map(|(index, invoice)| {
                let customer = self.customer(invoice.customer_id);
                InvoiceRow {
                    id: index.to_string(),
                    amount: invoice.amount,
                    date: invoice.date.to_string(),
                    status: invoice.status,
                    name: customer.map_or_else(|| "Unknown".to_string(), |c| c.name.clone()),
                    email: customer.map_or_else(String::new, |c| c.email.clone()),
                    image_url: customer.map_or_else(String::new, |c| c.image_url.clone()),
                }
            })
            .collect();
        Ok(rows)
    }

    async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, AppError> {
        Ok(page_count(self.filtered_sorted(query).len() as i64))
    }

    async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>, AppError> {
        // The synthetic id is an index into the unfiltered seed list here,
        // unlike the per-page ids of the list views. Carried over as-is.
        let Ok(index) = id.parse::<usize>() else {
            return Ok(None);
        };
        Ok(self.invoices.get(index).map(|invoice| InvoiceForm {
            id: id.to_string(),
            customer_id: invoice.customer_id.to_string(),
            amount: invoice.amount as f64 / 100.0,
            status: invoice.status,
        }))
    }

    async fn fetch_customers(&self) -> Result<Vec<CustomerField>, AppError> {
        // Seed customers are pre-sorted by name; no explicit sort.
        Ok(self
            .customers
            .iter()
            .map(|c| CustomerField {
                id: c.id.to_string(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn fetch_filtered_customers(&self, _query: &str) -> Result<Vec<CustomerRow>, AppError> {
        Err(AppError::Unconfigured(
            "the customers table requires a live database".to_string(),
        ))
    }

    async fn fetch_invoice_amounts(&self) -> Result<Vec<InvoiceAmount>, AppError> {
        Err(AppError::Unconfigured(
            "POSTGRES_URL/DATABASE_URL is not configured".to_string(),
        ))
    }

    async fn create_invoice(&self, _input: &NewInvoice) -> Result<(), AppError> {
        tracing::info!("No database configured, skipping invoice creation");
        Ok(())
    }

    async fn update_invoice(&self, id: &str, _input: &InvoiceUpdate) -> Result<(), AppError> {
        tracing::info!(id, "No database configured, skipping invoice update");
        Ok(())
    }

    async fn delete_invoice(&self, id: &str) -> Result<(), AppError> {
        tracing::info!(id, "No database configured, skipping invoice deletion");
        Ok(())
    }
}

/// Sum invoice amounts partitioned by status: `(paid, pending)` in cents.
fn status_totals(invoices: &[SeedInvoice]) -> (i64, i64) {
    invoices.iter().fold((0, 0), |(paid, pending), invoice| {
        match invoice.status {
            crate::models::invoice::InvoiceStatus::Paid => (paid + invoice.amount, pending),
            crate::models::invoice::InvoiceStatus::Pending => (paid, pending + invoice.amount),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::InvoiceStatus;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn customer(name: &str, email: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            image_url: String::new(),
        }
    }

    fn invoice(customer_id: Uuid, amount: i64, status: InvoiceStatus, date: &str) -> SeedInvoice {
        SeedInvoice {
            customer_id,
            amount,
            status,
            date: date.parse::<NaiveDate>().unwrap(),
        }
    }

    /// 7 invoices matching "li" across a 6-row page size: page 1 has 6
    /// rows, page 2 has 1, and the page count is 2.
    #[tokio::test]
    async fn seven_matches_span_two_pages() {
        let lily = customer("Lily Potter", "lily@potter.com");
        let bob = customer("Bob Stone", "bob@stone.com");
        let mut invoices = Vec::new();
        for day in 1..=7i64 {
            invoices.push(invoice(
                lily.id,
                1000 + day,
                InvoiceStatus::Paid,
                &format!("2024-03-{day:02}"),
            ));
        }
        invoices.push(invoice(bob.id, 2000, InvoiceStatus::Paid, "2024-02-01"));
        let store = SeedStore::with_data(vec![lily, bob], invoices, vec![]);

        assert_eq!(store.fetch_invoices_pages("li").await.unwrap(), 2);
        let page1 = store.fetch_filtered_invoices("li", 1).await.unwrap();
        let page2 = store.fetch_filtered_invoices("li", 2).await.unwrap();
        assert_eq!(page1.len(), 6);
        assert_eq!(page2.len(), 1);
        assert!(page1.iter().all(|row| row.name == "Lily Potter"));
    }

    /// Concatenating all pages yields the full filtered set, date
    /// descending, with no duplicates or gaps.
    #[tokio::test]
    async fn pages_cover_filtered_set_exactly() {
        let store = SeedStore::new();
        let pages = store.fetch_invoices_pages("").await.unwrap();
        assert_eq!(pages, 3); // 13 seed invoices at 6 per page

        let mut collected = Vec::new();
        for page in 1..=pages {
            let rows = store.fetch_filtered_invoices("", page).await.unwrap();
            assert!(rows.len() as i64 <= ITEMS_PER_PAGE);
            collected.extend(rows);
        }
        assert_eq!(collected.len(), 13);

        let dates: Vec<String> = collected.iter().map(|row| row.date.clone()).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);

        let mut keys: Vec<(String, i64)> = collected
            .iter()
            .map(|row| (row.date.clone(), row.amount))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 13);
    }

    #[tokio::test]
    async fn positional_ids_restart_on_each_page() {
        let store = SeedStore::new();
        let page1 = store.fetch_filtered_invoices("", 1).await.unwrap();
        let page2 = store.fetch_filtered_invoices("", 2).await.unwrap();
        assert_eq!(page1[0].id, "0");
        assert_eq!(page1[5].id, "5");
        assert_eq!(page2[0].id, "0");
    }

    #[tokio::test]
    async fn search_matches_each_field() {
        let store = SeedStore::new();

        // Customer name, case-insensitive
        let by_name = store.fetch_filtered_invoices("EVIL", 1).await.unwrap();
        assert_eq!(by_name.len(), 2);

        // Customer email
        let by_email = store.fetch_filtered_invoices("@orban", 1).await.unwrap();
        assert_eq!(by_email.len(), 3);

        // Amount as text, in cents
        let by_amount = store.fetch_filtered_invoices("44800", 1).await.unwrap();
        assert_eq!(by_amount.len(), 1);
        assert_eq!(by_amount[0].name, "Michael Novotny");

        // Date substring
        let by_date = store.fetch_filtered_invoices("2022-1", 1).await.unwrap();
        assert_eq!(by_date.len(), 3);

        // Status
        let pending = store.fetch_filtered_invoices("pending", 1).await.unwrap();
        assert_eq!(store.fetch_invoices_pages("pending").await.unwrap(), 1);
        assert_eq!(pending.len(), 5);
    }

    #[tokio::test]
    async fn latest_invoices_top_five_with_positional_ids() {
        let store = SeedStore::new();
        let latest = store.fetch_latest_invoices().await.unwrap();
        assert_eq!(latest.len(), 5);
        let ids: Vec<&str> = latest.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2", "3", "4"]);
        // 2023-09-10 is the most recent seed invoice
        assert_eq!(latest[0].name, "Michael Novotny");
        assert_eq!(latest[0].amount, "$448.00");
    }

    #[tokio::test]
    async fn card_data_partitions_amounts_by_status() {
        let store = SeedStore::new();
        let cards = store.fetch_card_data().await.unwrap();
        assert_eq!(cards.number_of_customers, 6);
        assert_eq!(cards.number_of_invoices, 13);

        let (paid, pending) = status_totals(&store.invoices);
        let total: i64 = store.invoices.iter().map(|invoice| invoice.amount).sum();
        assert_eq!(paid + pending, total);
        assert_eq!(cards.total_paid_invoices, format_currency(paid));
        assert_eq!(cards.total_pending_invoices, format_currency(pending));
    }

    #[tokio::test]
    async fn invoice_by_id_converts_cents_to_dollars() {
        let store = SeedStore::new();
        let form = store.fetch_invoice_by_id("0").await.unwrap().unwrap();
        assert_eq!(form.amount, 157.95); // stored as 15795 cents
        assert_eq!(form.status, InvoiceStatus::Pending);

        assert!(store.fetch_invoice_by_id("99").await.unwrap().is_none());
        assert!(store.fetch_invoice_by_id("not-a-number").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn customers_projected_to_id_name() {
        let store = SeedStore::new();
        let customers = store.fetch_customers().await.unwrap();
        assert_eq!(customers.len(), 6);
        assert_eq!(customers[0].name, "Amy Burns");
    }

    #[tokio::test]
    async fn filtered_customers_requires_live_database() {
        let store = SeedStore::new();
        let err = store.fetch_filtered_customers("amy").await.unwrap_err();
        assert!(matches!(err, AppError::Unconfigured(_)));
    }

    #[tokio::test]
    async fn mutations_are_silent_noops() {
        let store = SeedStore::new();
        let before = store.invoices.len();
        store.delete_invoice("3").await.unwrap();
        // Idempotent: the second delete succeeds too
        store.delete_invoice("3").await.unwrap();
        assert_eq!(store.invoices.len(), before);
    }
}
