//! Repository for the `adhoc_requests` table.

use mutabaah_core::approval::ADHOC_STATUS_PENDING;
use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::adhoc::{AdhocRequest, CreateAdhocRequest};

/// Column list for ad-hoc request queries.
const COLUMNS: &str = "\
    id, employee_id, kind, occurred_on, description, status, \
    reviewed_by, review_notes, reviewed_at, created_at, updated_at";

/// Provides the single-stage ad-hoc request machine.
pub struct AdhocRequestRepo;

impl AdhocRequestRepo {
    /// Insert a new pending request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdhocRequest,
    ) -> Result<AdhocRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO adhoc_requests (employee_id, kind, occurred_on, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdhocRequest>(&query)
            .bind(input.employee_id)
            .bind(&input.kind)
            .bind(input.occurred_on)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a request by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdhocRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adhoc_requests WHERE id = $1");
        sqlx::query_as::<_, AdhocRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a review decision, guarded on the request still being
    /// pending. Returns `None` without writing when it is not.
    pub async fn apply_review(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
        reviewed_by: DbId,
        notes: Option<&str>,
    ) -> Result<Option<AdhocRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE adhoc_requests SET \
                 status = $2, \
                 reviewed_by = $3, \
                 review_notes = $4, \
                 reviewed_at = NOW(), \
                 updated_at = NOW() \
             WHERE id = $1 AND status = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdhocRequest>(&query)
            .bind(id)
            .bind(new_status)
            .bind(reviewed_by)
            .bind(notes)
            .bind(ADHOC_STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Pending requests whose employee's *current* mentor is the given
    /// reviewer -- the ad-hoc half of the review queue. Ad-hoc requests
    /// carry no snapshot; the live mentor edge decides.
    pub async fn list_pending_for_mentor(
        pool: &PgPool,
        mentor_id: DbId,
    ) -> Result<Vec<AdhocRequest>, sqlx::Error> {
        let prefixed: String = COLUMNS
            .split(", ")
            .map(|c| format!("ar.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "SELECT {prefixed} FROM adhoc_requests ar \
             JOIN employees e ON e.id = ar.employee_id \
             WHERE ar.status = $1 AND e.mentor_id = $2 \
             ORDER BY ar.created_at ASC, ar.id ASC"
        );
        sqlx::query_as::<_, AdhocRequest>(&query)
            .bind(ADHOC_STATUS_PENDING)
            .bind(mentor_id)
            .fetch_all(pool)
            .await
    }
}
