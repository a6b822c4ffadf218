use mutabaah_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `month_activations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthActivation {
    pub id: DbId,
    pub employee_id: DbId,
    pub month_key: String,
    pub activated: bool,
    pub activated_at: Timestamp,
}
