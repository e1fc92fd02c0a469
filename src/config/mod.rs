use std::env;

/// Application configuration loaded from environment variables.
///
/// `database_url` is optional: when neither `POSTGRES_URL` nor
/// `DATABASE_URL` is set, the server runs in fallback mode against the
/// in-memory seed dataset instead of Postgres.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub revenue_fetch_delay_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: first_non_empty(&["POSTGRES_URL", "DATABASE_URL"]),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            // Artificial delay on the live revenue query, used to exercise
            // loading states in the dashboard. Off by default.
            revenue_fetch_delay_ms: env::var("REVENUE_FETCH_DELAY_MS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .unwrap_or(0),
        }
    }
}

/// First non-empty value among the named environment variables.
fn first_non_empty(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
