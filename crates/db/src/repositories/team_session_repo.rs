//! Repository for the `team_sessions` raw source.

use chrono::NaiveDate;
use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{CreateTeamSession, TeamSession};

/// Column list for team session queries.
const COLUMNS: &str = "id, employee_id, session_date, session_type, created_at";

/// Reader for the team-session attendance source.
pub struct TeamSessionRepo;

impl TeamSessionRepo {
    /// Insert a session row, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTeamSession,
    ) -> Result<TeamSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_sessions (employee_id, session_date, session_type) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamSession>(&query)
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
    ) -> Result<Vec<TeamSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_sessions \
             WHERE employee_id = ANY($1) AND session_date BETWEEN $2 AND $3 \
             ORDER BY session_date ASC"
        );
        sqlx::query_as::<_, TeamSession>(&query)
            .bind(employee_ids)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
