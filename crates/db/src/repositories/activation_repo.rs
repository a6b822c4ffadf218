//! Repository for the `month_activations` table.

use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::activation::MonthActivation;

/// Column list for activation queries.
const COLUMNS: &str = "id, employee_id, month_key, activated, activated_at";

/// Provides the explicit per-employee per-month activation switch.
pub struct ActivationRepo;

impl ActivationRepo {
    /// Activate a month for an employee.
    ///
    /// Idempotent: activating an already-activated month is a no-op that
    /// returns the existing row.
    pub async fn activate(
        pool: &PgPool,
        employee_id: DbId,
        month_key: &str,
    ) -> Result<MonthActivation, sqlx::Error> {
        let query = format!(
            "INSERT INTO month_activations (employee_id, month_key) \
             VALUES ($1, $2) \
             ON CONFLICT (employee_id, month_key) DO UPDATE SET activated = TRUE \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MonthActivation>(&query)
            .bind(employee_id)
            .bind(month_key)
            .fetch_one(pool)
            .await
    }

    /// Whether the month is activated for the employee.
    pub async fn is_activated(
        pool: &PgPool,
        employee_id: DbId,
        month_key: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                SELECT 1 FROM month_activations \
                WHERE employee_id = $1 AND month_key = $2 AND activated \
             )",
        )
        .bind(employee_id)
        .bind(month_key)
        .fetch_one(pool)
        .await
    }

    /// All activation records for one employee within a calendar year.
    pub async fn list_for_employee_in_year(
        pool: &PgPool,
        employee_id: DbId,
        year: i32,
    ) -> Result<Vec<MonthActivation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM month_activations \
             WHERE employee_id = $1 AND month_key >= $2 AND month_key <= $3 \
             ORDER BY month_key ASC"
        );
        sqlx::query_as::<_, MonthActivation>(&query)
            .bind(employee_id)
            .bind(format!("{year:04}-01"))
            .bind(format!("{year:04}-12"))
            .fetch_all(pool)
            .await
    }

    /// All activation records for an employee set within a calendar year;
    /// consumed by the aggregation engine's month-inclusion check.
    pub async fn list_for_employees_in_year(
        pool: &PgPool,
        employee_ids: &[DbId],
        year: i32,
    ) -> Result<Vec<MonthActivation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM month_activations \
             WHERE employee_id = ANY($1) AND month_key >= $2 AND month_key <= $3"
        );
        sqlx::query_as::<_, MonthActivation>(&query)
            .bind(employee_ids)
            .bind(format!("{year:04}-01"))
            .bind(format!("{year:04}-12"))
            .fetch_all(pool)
            .await
    }
}
