use mutabaah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `manual_reports` table. `payload` holds one of the three
/// legacy encodings; it is decoded by `mutabaah_core::normalize` at
/// aggregation time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ManualReport {
    pub id: DbId,
    pub employee_id: DbId,
    pub month_key: String,
    pub activity_id: String,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for recording a manual activity log.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateManualReport {
    pub employee_id: DbId,
    pub month_key: String,
    pub activity_id: String,
    pub payload: serde_json::Value,
}
