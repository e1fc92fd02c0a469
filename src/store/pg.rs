//! Live store running every operation against Postgres.
//!
//! Each query failure is logged and re-raised as a generic per-operation
//! [`AppError::Store`] message; raw driver errors never reach callers.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::currency::format_currency;
use crate::errors::AppError;
use crate::models::card::CardData;
use crate::models::customer::{CustomerField, CustomerRow};
use crate::models::invoice::{
    InvoiceAmount, InvoiceForm, InvoiceRow, InvoiceStatus, InvoiceUpdate, LatestInvoice,
    NewInvoice,
};
use crate::models::revenue::Revenue;
use crate::store::{page_count, DataStore, ITEMS_PER_PAGE};

pub struct PgStore {
    pool: PgPool,
    revenue_fetch_delay: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, revenue_fetch_delay: Duration) -> Self {
        Self {
            pool,
            revenue_fetch_delay,
        }
    }

    fn parse_invoice_id(id: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(id)
            .map_err(|_| AppError::Validation(format!("id: '{id}' is not a valid invoice id")))
    }

    fn parse_customer_id(id: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(id)
            .map_err(|_| AppError::Validation(format!("customer_id: '{id}' is not a valid customer id")))
    }
}

/// Raw latest-invoice row before currency formatting.
#[derive(Debug, sqlx::FromRow)]
struct LatestInvoiceRaw {
    id: String,
    name: String,
    image_url: String,
    email: String,
    amount: i64,
}

/// Conditional aggregation row for the status-partitioned sums.
#[derive(Debug, sqlx::FromRow)]
struct StatusSums {
    paid: i64,
    pending: i64,
}

/// Invoice form row with the amount still in cents.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceFormRaw {
    id: String,
    customer_id: String,
    amount: i64,
    status: InvoiceStatus,
}

/// Filtered-customers row with unformatted sums.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRowRaw {
    id: String,
    name: String,
    email: String,
    image_url: String,
    total_invoices: i64,
    total_pending: i64,
    total_paid: i64,
}

#[async_trait]
impl DataStore for PgStore {
    fn mode(&self) -> &'static str {
        "live"
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::store("Failed to reach the database", e))?;
        Ok(())
    }

    async fn fetch_revenue(&self) -> Result<Vec<Revenue>, AppError> {
        // Optional simulated latency for demonstrating loading states.
        if !self.revenue_fetch_delay.is_zero() {
            tracing::debug!(delay = ?self.revenue_fetch_delay, "Delaying revenue fetch");
            tokio::time::sleep(self.revenue_fetch_delay).await;
        }

        sqlx::query_as::<_, Revenue>("SELECT month, revenue FROM revenue")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::store("Failed to fetch revenue data", e))
    }

    async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, AppError> {
        let rows = sqlx::query_as::<_, LatestInvoiceRaw>(
            r#"
            SELECT invoices.id::text AS id, customers.name, customers.image_url,
                   customers.email, invoices.amount
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            ORDER BY invoices.date DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to fetch the latest invoices", e))?;

        Ok(rows
            .into_iter()
            .map(|row| LatestInvoice {
                id: row.id,
                name: row.name,
                image_url: row.image_url,
                email: row.email,
                amount: format_currency(row.amount),
            })
            .collect())
    }

    async fn fetch_card_data(&self) -> Result<CardData, AppError> {
        // Three independent aggregates joined concurrently; a failure in
        // any one aborts the whole operation.
        let invoice_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool);
        let customer_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool);
        let status_sums = sqlx::query_as::<_, StatusSums>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN status = 'paid'    THEN amount ELSE 0 END), 0) AS paid,
                COALESCE(SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END), 0) AS pending
            FROM invoices
            "#,
        )
        .fetch_one(&self.pool);

        let (number_of_invoices, number_of_customers, sums) =
            tokio::try_join!(invoice_count, customer_count, status_sums)
                .map_err(|e| AppError::store("Failed to fetch card data", e))?;

        Ok(CardData {
            number_of_customers,
            number_of_invoices,
            total_paid_invoices: format_currency(sums.paid),
            total_pending_invoices: format_currency(sums.pending),
        })
    }

    async fn fetch_filtered_invoices(
        &self,
        query: &str,
        page: i64,
    ) -> Result<Vec<InvoiceRow>, AppError> {
        let offset = (page.max(1) - 1) * ITEMS_PER_PAGE;
        let pattern = format!("%{query}%");

        sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT
                invoices.id::text AS id,
                invoices.amount,
                invoices.date::text AS date,
                invoices.status,
                customers.name,
                customers.email,
                customers.image_url
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE
                customers.name ILIKE $1 OR
                customers.email ILIKE $1 OR
                invoices.amount::text ILIKE $1 OR
                invoices.date::text ILIKE $1 OR
                invoices.status::text ILIKE $1
            ORDER BY invoices.date DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(ITEMS_PER_PAGE)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to fetch invoices", e))
    }

    async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, AppError> {
        let pattern = format!("%{query}%");
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE
                customers.name ILIKE $1 OR
                customers.email ILIKE $1 OR
                invoices.amount::text ILIKE $1 OR
                invoices.date::text ILIKE $1 OR
                invoices.status::text ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to fetch total number of invoices", e))?;

        Ok(page_count(count))
    }

    async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>, AppError> {
        // Unparseable ids cannot match a row; same not-found signal.
        let Ok(invoice_id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, InvoiceFormRaw>(
            r#"
            SELECT id::text AS id, customer_id::text AS customer_id, amount, status
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to fetch invoice", e))?;

        Ok(row.map(|raw| InvoiceForm {
            id: raw.id,
            customer_id: raw.customer_id,
            amount: raw.amount as f64 / 100.0,
            status: raw.status,
        }))
    }

    async fn fetch_customers(&self) -> Result<Vec<CustomerField>, AppError> {
        sqlx::query_as::<_, CustomerField>(
            "SELECT id::text AS id, name FROM customers ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to fetch all customers", e))
    }

    async fn fetch_filtered_customers(&self, query: &str) -> Result<Vec<CustomerRow>, AppError> {
        let pattern = format!("%{query}%");
        let rows = sqlx::query_as::<_, CustomerRowRaw>(
            r#"
            SELECT
                customers.id::text AS id,
                customers.name,
                customers.email,
                customers.image_url,
                COUNT(invoices.id) AS total_invoices,
                COALESCE(SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END), 0) AS total_pending,
                COALESCE(SUM(CASE WHEN invoices.status = 'paid'    THEN invoices.amount ELSE 0 END), 0) AS total_paid
            FROM customers
            LEFT JOIN invoices ON customers.id = invoices.customer_id
            WHERE
                customers.name ILIKE $1 OR
                customers.email ILIKE $1
            GROUP BY customers.id, customers.name, customers.email, customers.image_url
            ORDER BY customers.name ASC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to fetch customer table", e))?;

        Ok(rows
            .into_iter()
            .map(|row| CustomerRow {
                id: row.id,
                name: row.name,
                email: row.email,
                image_url: row.image_url,
                total_invoices: row.total_invoices,
                total_pending: format_currency(row.total_pending),
                total_paid: format_currency(row.total_paid),
            })
            .collect())
    }

    async fn fetch_invoice_amounts(&self) -> Result<Vec<InvoiceAmount>, AppError> {
        sqlx::query_as::<_, InvoiceAmount>(
            r#"
            SELECT invoices.amount, customers.name
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            ORDER BY invoices.date DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to fetch invoices", e))
    }

    async fn create_invoice(&self, input: &NewInvoice) -> Result<(), AppError> {
        let customer_id = Self::parse_customer_id(&input.customer_id)?;
        let date = Utc::now().date_naive();

        sqlx::query(
            "INSERT INTO invoices (customer_id, amount, status, date) VALUES ($1, $2, $3, $4)",
        )
        .bind(customer_id)
        .bind(input.amount_in_cents)
        .bind(input.status)
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to create invoice", e))?;
        Ok(())
    }

    async fn update_invoice(&self, id: &str, input: &InvoiceUpdate) -> Result<(), AppError> {
        let invoice_id = Self::parse_invoice_id(id)?;
        let customer_id = Self::parse_customer_id(&input.customer_id)?;

        // date is immutable after creation and deliberately not touched
        sqlx::query(
            "UPDATE invoices SET customer_id = $2, amount = $3, status = $4 WHERE id = $1",
        )
        .bind(invoice_id)
        .bind(customer_id)
        .bind(input.amount_in_cents)
        .bind(input.status)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to update invoice", e))?;
        Ok(())
    }

    async fn delete_invoice(&self, id: &str) -> Result<(), AppError> {
        let invoice_id = Self::parse_invoice_id(id)?;

        // Deleting an already-absent row affects zero rows and succeeds.
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(invoice_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::store("Failed to delete invoice", e))?;
        Ok(())
    }
}
