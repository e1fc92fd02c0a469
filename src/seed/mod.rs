//! Static seed dataset with the live schema's shape.
//!
//! Serves two purposes: the fallback store reads it directly when no
//! database is configured, and the `seed` binary loads it into a live
//! database. Deterministic and read-only; every invoice's `customer_id`
//! references a seeded customer.

use chrono::NaiveDate;
use uuid::{uuid, Uuid};

use crate::models::customer::Customer;
use crate::models::invoice::InvoiceStatus;
use crate::models::revenue::Revenue;

const EVIL_RABBIT: Uuid = uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa");
const DELBA: Uuid = uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a");
const LEE: Uuid = uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a");
const MICHAEL: Uuid = uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2");
const AMY: Uuid = uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9");
const BALAZS: Uuid = uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb");

/// Seed customers, sorted by name ascending to match the live query's
/// `ORDER BY name ASC`.
pub fn customers() -> Vec<Customer> {
    let rows = [
        (AMY, "Amy Burns", "amy@burns.com", "/customers/amy-burns.png"),
        (
            BALAZS,
            "Balazs Orban",
            "balazs@orban.com",
            "/customers/balazs-orban.png",
        ),
        (
            DELBA,
            "Delba de Oliveira",
            "delba@oliveira.com",
            "/customers/delba-de-oliveira.png",
        ),
        (
            EVIL_RABBIT,
            "Evil Rabbit",
            "evil@rabbit.com",
            "/customers/evil-rabbit.png",
        ),
        (
            LEE,
            "Lee Robinson",
            "lee@robinson.com",
            "/customers/lee-robinson.png",
        ),
        (
            MICHAEL,
            "Michael Novotny",
            "michael@novotny.com",
            "/customers/michael-novotny.png",
        ),
    ];

    rows.into_iter()
        .map(|(id, name, email, image_url)| Customer {
            id,
            name: name.to_string(),
            email: email.to_string(),
            image_url: image_url.to_string(),
        })
        .collect()
}

/// Invoice record as seeded. No primary key: the fallback store derives
/// positional synthetic ids, and the live database generates UUIDs.
#[derive(Debug, Clone)]
pub struct SeedInvoice {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Seed invoices, amounts in cents.
pub fn invoices() -> Vec<SeedInvoice> {
    use InvoiceStatus::{Paid, Pending};

    let rows = [
        (EVIL_RABBIT, 15795, Pending, (2022, 12, 6)),
        (DELBA, 20348, Pending, (2022, 11, 14)),
        (AMY, 3040, Paid, (2022, 10, 29)),
        (MICHAEL, 44800, Paid, (2023, 9, 10)),
        (BALAZS, 34577, Pending, (2023, 8, 5)),
        (LEE, 54246, Pending, (2023, 7, 16)),
        (EVIL_RABBIT, 666, Pending, (2023, 6, 27)),
        (MICHAEL, 32545, Paid, (2023, 6, 9)),
        (AMY, 1250, Paid, (2023, 6, 17)),
        (BALAZS, 8546, Paid, (2023, 6, 7)),
        (DELBA, 500, Paid, (2023, 8, 19)),
        (BALAZS, 8945, Paid, (2023, 6, 3)),
        (LEE, 1000, Paid, (2022, 6, 5)),
    ];

    rows.into_iter()
        .map(|(customer_id, amount, status, (y, m, d))| SeedInvoice {
            customer_id,
            amount,
            status,
            date: date(y, m, d),
        })
        .collect()
}

/// Twelve months of aggregate revenue.
pub fn revenue() -> Vec<Revenue> {
    let rows = [
        ("Jan", 2000),
        ("Feb", 1800),
        ("Mar", 2200),
        ("Apr", 2500),
        ("May", 2300),
        ("Jun", 3200),
        ("Jul", 3500),
        ("Aug", 3700),
        ("Sep", 2500),
        ("Oct", 2800),
        ("Nov", 3000),
        ("Dec", 4800),
    ];

    rows.into_iter()
        .map(|(month, revenue)| Revenue {
            month: month.to_string(),
            revenue,
        })
        .collect()
}

/// All literal dates above are valid; total to keep construction infallible.
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customers_sorted_by_name() {
        let customers = customers();
        assert_eq!(customers.len(), 6);
        let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn invoices_reference_seeded_customers() {
        let customer_ids: Vec<Uuid> = customers().iter().map(|c| c.id).collect();
        for invoice in invoices() {
            assert!(customer_ids.contains(&invoice.customer_id));
        }
    }

    #[test]
    fn dataset_sizes() {
        assert_eq!(invoices().len(), 13);
        assert_eq!(revenue().len(), 12);
    }
}
