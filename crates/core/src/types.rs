/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Canonical activity identifiers come from the static catalog and therefore
/// live for the whole program.
pub type ActivityId = &'static str;
