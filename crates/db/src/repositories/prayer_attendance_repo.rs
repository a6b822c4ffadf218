//! Repository for the `prayer_attendances` raw source.

use chrono::NaiveDate;
use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{CreatePrayerAttendance, PrayerAttendance};

/// Column list for prayer attendance queries.
const COLUMNS: &str = "id, employee_id, prayer_date, prayer_name, created_at";

/// Reader for the prayer-attendance source.
pub struct PrayerAttendanceRepo;

impl PrayerAttendanceRepo {
    /// Insert an attendance row, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePrayerAttendance,
    ) -> Result<PrayerAttendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO prayer_attendances (employee_id, prayer_date, prayer_name) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PrayerAttendance>(&query)
            .bind(input.employee_id)
            .bind(input.prayer_date)
            .bind(&input.prayer_name)
            .fetch_one(pool)
            .await
    }

    /// All rows for an employee set within an inclusive date range.
    pub async fn list_for_employees_in_range(
        pool: &PgPool,
        employee_ids: &[DbId],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PrayerAttendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prayer_attendances \
             WHERE employee_id = ANY($1) AND prayer_date BETWEEN $2 AND $3 \
             ORDER BY prayer_date ASC"
        );
        sqlx::query_as::<_, PrayerAttendance>(&query)
            .bind(employee_ids)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
