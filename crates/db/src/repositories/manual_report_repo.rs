//! Repository for the `manual_reports` raw source.

use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::manual_report::{CreateManualReport, ManualReport};

/// Column list for manual report queries.
const COLUMNS: &str = "id, employee_id, month_key, activity_id, payload, created_at";

/// Reader for the free-form manual activity log source.
pub struct ManualReportRepo;

impl ManualReportRepo {
    /// Insert a manual report row, returning the created row. The payload
    /// is stored as received; decoding happens at aggregation time.
    pub async fn create(
        pool: &PgPool,
        input: &CreateManualReport,
    ) -> Result<ManualReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO manual_reports (employee_id, month_key, activity_id, payload) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ManualReport>(&query)
            .bind(input.employee_id)
            .bind(&input.month_key)
            .bind(&input.activity_id)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// All rows for an employee set within a calendar year, bounded by
    /// month key.
    pub async fn list_for_employees_in_year(
        pool: &PgPool,
        employee_ids: &[DbId],
        year: i32,
    ) -> Result<Vec<ManualReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manual_reports \
             WHERE employee_id = ANY($1) AND month_key >= $2 AND month_key <= $3 \
             ORDER BY month_key ASC"
        );
        sqlx::query_as::<_, ManualReport>(&query)
            .bind(employee_ids)
            .bind(format!("{year:04}-01"))
            .bind(format!("{year:04}-12"))
            .fetch_all(pool)
            .await
    }
}
