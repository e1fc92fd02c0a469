//! Seed script for development — populates a fresh database with the same
//! dataset the fallback store serves.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `POSTGRES_URL` or `DATABASE_URL` (reads .env). Idempotent:
//! tables that already contain rows are left untouched.

use sqlx::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = invoicedeck::config::AppConfig::from_env();
    let db_url = config
        .database_url
        .expect("POSTGRES_URL or DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== invoicedeck seed script ===");

    seed_customers(&pool).await?;
    seed_invoices(&pool).await?;
    seed_revenue(&pool).await?;

    println!("\n=== Seed complete! ===");

    Ok(())
}

async fn seed_customers(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Customers already exist ({count})");
        return Ok(());
    }

    let customers = invoicedeck::seed::customers();
    for customer in &customers {
        sqlx::query("INSERT INTO customers (id, name, email, image_url) VALUES ($1, $2, $3, $4)")
            .bind(customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.image_url)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} customers", customers.len());
    Ok(())
}

async fn seed_invoices(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Invoices already exist ({count})");
        return Ok(());
    }

    let invoices = invoicedeck::seed::invoices();
    for invoice in &invoices {
        sqlx::query(
            "INSERT INTO invoices (customer_id, amount, status, date) VALUES ($1, $2, $3, $4)",
        )
        .bind(invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status)
        .bind(invoice.date)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} invoices", invoices.len());
    Ok(())
}

async fn seed_revenue(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM revenue")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Revenue already exists ({count})");
        return Ok(());
    }

    let revenue = invoicedeck::seed::revenue();
    for entry in &revenue {
        sqlx::query("INSERT INTO revenue (month, revenue) VALUES ($1, $2)")
            .bind(&entry.month)
            .bind(entry.revenue)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} revenue rows", revenue.len());
    Ok(())
}
