use chrono::NaiveDate;
use mutabaah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `adhoc_requests` table: a single-stage request reviewed
/// by the employee's current mentor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdhocRequest {
    pub id: DbId,
    pub employee_id: DbId,
    pub kind: String,
    pub occurred_on: NaiveDate,
    pub description: Option<String>,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub review_notes: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing an ad-hoc request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdhocRequest {
    pub employee_id: DbId,
    pub kind: String,
    pub occurred_on: NaiveDate,
    pub description: Option<String>,
}
