//! Invoice routes: paginated search, single-invoice lookup, and the three
//! mutation actions (create, update, delete).
//!
//! Mutations accept form-encoded payloads. Validation failures abort before
//! any store interaction with a field-level 400; successful calls (including
//! fallback-mode no-ops) invalidate the invoice list view and redirect to
//! the invoice list route.

use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::{Form, Json};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::invoice::{InvoiceForm, InvoiceRow, InvoiceStatus, InvoiceUpdate, NewInvoice};
use crate::AppState;

/// Route the caller lands on after every mutation.
const INVOICES_PATH: &str = "/dashboard/invoices";

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<i64>,
}

/// GET /api/invoices?query=&page= — filtered, paginated invoice search.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<InvoiceRow>>>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let invoices = state
        .store
        .fetch_filtered_invoices(&params.query, page)
        .await?;
    Ok(ApiResponse::success(invoices))
}

/// GET /api/invoices/pages?query= — total page count for the same filter.
pub async fn pages(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<i64>>, AppError> {
    let total_pages = state.store.fetch_invoices_pages(&params.query).await?;
    Ok(ApiResponse::success(total_pages))
}

/// GET /api/invoices/{id} — single invoice for the edit form, amount in
/// dollars. 404 when absent so the caller renders a not-found state.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<InvoiceForm>>, AppError> {
    let invoice = state
        .store
        .fetch_invoice_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;
    Ok(ApiResponse::success(invoice))
}

/// Raw mutation form payload: `amount` arrives as a numeric string in
/// dollars, `status` as text. Field names accept both snake_case and the
/// camelCase the form components submit.
#[derive(Debug, Deserialize)]
pub struct InvoiceFormData {
    #[serde(alias = "customerId")]
    pub customer_id: String,
    pub amount: String,
    pub status: String,
}

/// Validate and convert a mutation form: amount coerced to a number and
/// converted to cents, status restricted to the closed enum.
fn parse_invoice_form(form: &InvoiceFormData) -> Result<(String, i64, InvoiceStatus), AppError> {
    if form.customer_id.trim().is_empty() {
        return Err(AppError::Validation(
            "customer_id: must not be empty".to_string(),
        ));
    }

    let amount: f64 = form.amount.trim().parse().map_err(|_| {
        AppError::Validation(format!("amount: '{}' is not a number", form.amount))
    })?;
    let status: InvoiceStatus = form.status.parse()?;

    Ok((
        form.customer_id.clone(),
        (amount * 100.0).round() as i64,
        status,
    ))
}

/// POST /invoices — create an invoice, then invalidate and redirect.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<InvoiceFormData>,
) -> Result<Redirect, AppError> {
    let (customer_id, amount_in_cents, status) = parse_invoice_form(&form)?;
    state
        .store
        .create_invoice(&NewInvoice {
            customer_id,
            amount_in_cents,
            status,
        })
        .await?;

    let version = state.invalidate_invoice_list();
    tracing::debug!(version, "Invoice list invalidated after create");
    Ok(Redirect::to(INVOICES_PATH))
}

/// POST /invoices/{id} — update an invoice in place. The stored date is
/// immutable; only customer, amount, and status change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<InvoiceFormData>,
) -> Result<Redirect, AppError> {
    let (customer_id, amount_in_cents, status) = parse_invoice_form(&form)?;
    state
        .store
        .update_invoice(
            &id,
            &InvoiceUpdate {
                customer_id,
                amount_in_cents,
                status,
            },
        )
        .await?;

    let version = state.invalidate_invoice_list();
    tracing::debug!(version, id, "Invoice list invalidated after update");
    Ok(Redirect::to(INVOICES_PATH))
}

/// POST /invoices/{id}/delete — delete an invoice by id.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.store.delete_invoice(&id).await?;

    let version = state.invalidate_invoice_list();
    tracing::debug!(version, id, "Invoice list invalidated after delete");
    Ok(Redirect::to(INVOICES_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(customer_id: &str, amount: &str, status: &str) -> InvoiceFormData {
        InvoiceFormData {
            customer_id: customer_id.to_string(),
            amount: amount.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn parses_valid_form_to_cents() {
        let (customer_id, cents, status) =
            parse_invoice_form(&form("cust-1", "50.00", "paid")).unwrap();
        assert_eq!(customer_id, "cust-1");
        assert_eq!(cents, 5000);
        assert_eq!(status, InvoiceStatus::Paid);
    }

    #[test]
    fn rounds_fractional_cents() {
        let (_, cents, _) = parse_invoice_form(&form("c", "19.99", "pending")).unwrap();
        assert_eq!(cents, 1999);
        let (_, cents, _) = parse_invoice_form(&form("c", "0.1", "pending")).unwrap();
        assert_eq!(cents, 10);
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let err = parse_invoice_form(&form("c", "fifty", "paid")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("amount:")));
    }

    #[test]
    fn rejects_unknown_status() {
        let err = parse_invoice_form(&form("c", "10", "overdue")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("status:")));
    }

    #[test]
    fn rejects_empty_customer() {
        let err = parse_invoice_form(&form("  ", "10", "paid")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("customer_id:")));
    }
}
