//! Monthly revenue reference data, read-only.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Revenue {
    pub month: String,
    pub revenue: i64,
}
