//! Repository for the `activity_sessions` raw source.

use chrono::NaiveDate;
use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{ActivitySession, CreateActivitySession};

/// Column list for activity session queries.
const COLUMNS: &str = "id, employee_id, session_date, session_type, created_at";

/// Reader for the activity-session attendance source.
pub struct ActivitySessionRepo;

impl ActivitySessionRepo {
    /// Insert a session row, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivitySession,
    ) -> Result<ActivitySession, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_sessions (employee_id, session_date, session_type) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivitySession>(&query)
            .bind(input.employee_id)
            .bind(input.session_date)
            .bind(&input.session_type)
            .fetch_one(pool)
            .await
    }

    /// All rows for an employee set within an inclusive date range.
    pub async fn list_for_employees_in_range(
        pool: &PgPool,
        employee_ids: &[DbId],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ActivitySession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_sessions \
             WHERE employee_id = ANY($1) AND session_date BETWEEN $2 AND $3 \
             ORDER BY session_date ASC"
        );
        sqlx::query_as::<_, ActivitySession>(&query)
            .bind(employee_ids)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
