//! Row types for the three attendance-style raw sources.

use chrono::NaiveDate;
use mutabaah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `prayer_attendances` table. Every row feeds the
/// congregational-prayer activity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrayerAttendance {
    pub id: DbId,
    pub employee_id: DbId,
    pub prayer_date: NaiveDate,
    pub prayer_name: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrayerAttendance {
    pub employee_id: DbId,
    pub prayer_date: NaiveDate,
    pub prayer_name: Option<String>,
}

/// A row from the `team_sessions` table. The free-text `session_type` is
/// mapped to an activity id (or dropped) during normalization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamSession {
    pub id: DbId,
    pub employee_id: DbId,
    pub session_date: NaiveDate,
    pub session_type: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamSession {
    pub employee_id: DbId,
    pub session_date: NaiveDate,
    pub session_type: String,
}

/// A row from the `activity_sessions` table; same shape as team sessions
/// with its own normalization table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivitySession {
    pub id: DbId,
    pub employee_id: DbId,
    pub session_date: NaiveDate,
    pub session_type: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivitySession {
    pub employee_id: DbId,
    pub session_date: NaiveDate,
    pub session_type: String,
}
