//! Invoice models and DTOs.
//!
//! Amounts are integer cents in every persisted or seeded representation;
//! only `InvoiceForm` (dollars) and the formatted view DTOs convert.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// Closed invoice status enum. Any status may transition to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(AppError::Validation(format!(
                "status: '{other}' must be 'pending' or 'paid'"
            ))),
        }
    }
}

/// Latest-invoices view row: invoice joined with its customer, amount
/// pre-formatted as currency text.
///
/// `id` is the invoice UUID in live mode. In fallback mode it is a
/// positional index into the freshly sorted list ("0", "1", ...) — a
/// non-stable synthetic key, not a primary key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: String,
}

/// Paginated invoice search result row. Same synthetic-id caveat as
/// [`LatestInvoice`] in fallback mode; `amount` stays in cents here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceRow {
    pub id: String,
    pub amount: i64,
    pub date: String,
    pub status: InvoiceStatus,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Single invoice projection for the edit form, amount in dollars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// `{amount, name}` pair for the raw latest-invoices endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceAmount {
    pub amount: i64,
    pub name: String,
}

/// Validated payload for invoice creation. The store stamps the date.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

/// Validated payload for invoice update. `id` and `date` are immutable
/// after creation and never part of the update.
#[derive(Debug, Clone)]
pub struct InvoiceUpdate {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&InvoiceStatus::Paid).unwrap(), "\"paid\"");
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn status_round_trip() {
        let status: InvoiceStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, InvoiceStatus::Pending);
    }

    #[test]
    fn status_from_str_rejects_unknown() {
        assert_eq!("paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert!("overdue".parse::<InvoiceStatus>().is_err());
        // Closed enum: no case folding at the boundary
        assert!("Paid".parse::<InvoiceStatus>().is_err());
    }
}
