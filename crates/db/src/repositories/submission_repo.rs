//! Repository for the `monthly_submissions` and `submission_decisions`
//! tables.
//!
//! Status transitions are applied as conditional updates guarded by the
//! expected current status, so two concurrent review actions cannot both
//! succeed: the loser's update matches zero rows and surfaces as a stale
//! transition.

use mutabaah_core::roles::RoleAssignments;
use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::submission::{MonthlySubmission, NewDecision, SubmissionDecision};

/// Column list for monthly submission queries.
const COLUMNS: &str = "\
    id, employee_id, month_key, status, mentor_id, supervisor_id, \
    manager_id, ka_unit_id, created_at, updated_at";

/// Column list for decision queries.
const DECISION_COLUMNS: &str =
    "id, submission_id, stage, decision, notes, decided_by, decided_at";

/// Provides submission lifecycle and review-decision operations.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a new submission with the reviewer snapshot taken from the
    /// employee's current assignments.
    pub async fn create(
        pool: &PgPool,
        employee_id: DbId,
        month_key: &str,
        status: &str,
        snapshot: &RoleAssignments,
    ) -> Result<MonthlySubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO monthly_submissions \
                (employee_id, month_key, status, mentor_id, supervisor_id, manager_id, ka_unit_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MonthlySubmission>(&query)
            .bind(employee_id)
            .bind(month_key)
            .bind(status)
            .bind(snapshot.mentor_id)
            .bind(snapshot.supervisor_id)
            .bind(snapshot.manager_id)
            .bind(snapshot.ka_unit_id)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MonthlySubmission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM monthly_submissions WHERE id = $1");
        sqlx::query_as::<_, MonthlySubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the submission for one employee and month.
    pub async fn find_by_employee_month(
        pool: &PgPool,
        employee_id: DbId,
        month_key: &str,
    ) -> Result<Option<MonthlySubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM monthly_submissions \
             WHERE employee_id = $1 AND month_key = $2"
        );
        sqlx::query_as::<_, MonthlySubmission>(&query)
            .bind(employee_id)
            .bind(month_key)
            .fetch_optional(pool)
            .await
    }

    /// All submissions for an employee set within a calendar year; the
    /// aggregation engine reads their statuses for approval gating.
    pub async fn list_for_employees_in_year(
        pool: &PgPool,
        employee_ids: &[DbId],
        year: i32,
    ) -> Result<Vec<MonthlySubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM monthly_submissions \
             WHERE employee_id = ANY($1) AND month_key >= $2 AND month_key <= $3"
        );
        sqlx::query_as::<_, MonthlySubmission>(&query)
            .bind(employee_ids)
            .bind(format!("{year:04}-01"))
            .bind(format!("{year:04}-12"))
            .fetch_all(pool)
            .await
    }

    /// Apply a review transition and append its decision atomically.
    ///
    /// The update is guarded by `expected_status`; returns `None` without
    /// writing anything when the stored status no longer matches (a
    /// concurrent reviewer won the race, or the submission is terminal).
    pub async fn apply_review(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
        new_status: &str,
        decision: &NewDecision,
    ) -> Result<Option<MonthlySubmission>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update = format!(
            "UPDATE monthly_submissions SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, MonthlySubmission>(&update)
            .bind(id)
            .bind(expected_status)
            .bind(new_status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(submission) = updated else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO submission_decisions \
                (submission_id, stage, decision, notes, decided_by) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&decision.stage)
        .bind(&decision.decision)
        .bind(&decision.notes)
        .bind(decision.decided_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(submission))
    }

    /// Reset a rejected submission for re-submission, refreshing the
    /// reviewer snapshot. Guarded by the expected current status like
    /// `apply_review`; the decision history is kept.
    pub async fn resubmit(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
        new_status: &str,
        snapshot: &RoleAssignments,
    ) -> Result<Option<MonthlySubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE monthly_submissions SET \
                 status = $3, \
                 mentor_id = $4, \
                 supervisor_id = $5, \
                 manager_id = $6, \
                 ka_unit_id = $7, \
                 updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MonthlySubmission>(&query)
            .bind(id)
            .bind(expected_status)
            .bind(new_status)
            .bind(snapshot.mentor_id)
            .bind(snapshot.supervisor_id)
            .bind(snapshot.manager_id)
            .bind(snapshot.ka_unit_id)
            .fetch_optional(pool)
            .await
    }

    /// Full decision history for a submission, newest first.
    pub async fn list_decisions(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<SubmissionDecision>, sqlx::Error> {
        let query = format!(
            "SELECT {DECISION_COLUMNS} FROM submission_decisions \
             WHERE submission_id = $1 \
             ORDER BY decided_at DESC, id DESC"
        );
        sqlx::query_as::<_, SubmissionDecision>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent decision per stage, for display against each step
    /// of the chain.
    pub async fn latest_decisions(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<SubmissionDecision>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (stage) {DECISION_COLUMNS} \
             FROM submission_decisions \
             WHERE submission_id = $1 \
             ORDER BY stage, decided_at DESC, id DESC"
        );
        sqlx::query_as::<_, SubmissionDecision>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    /// Submissions pending at a stage whose snapshotted reviewer is the
    /// given employee -- the monthly half of the review queue.
    pub async fn list_pending_for_reviewer(
        pool: &PgPool,
        reviewer_id: DbId,
    ) -> Result<Vec<MonthlySubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM monthly_submissions \
             WHERE (status = 'pending_mentor' AND mentor_id = $1) \
                OR (status = 'pending_supervisor' AND supervisor_id = $1) \
                OR (status = 'pending_kaunit' AND ka_unit_id = $1) \
                OR (status = 'pending_manager' AND manager_id = $1) \
             ORDER BY month_key ASC, id ASC"
        );
        sqlx::query_as::<_, MonthlySubmission>(&query)
            .bind(reviewer_id)
            .fetch_all(pool)
            .await
    }
}
