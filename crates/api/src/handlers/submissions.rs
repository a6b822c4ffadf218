//! Handlers for the monthly-submission approval chain and the unified
//! review queue.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use mutabaah_core::approval::{
    authorize_reviewer, first_stage, is_terminal, pending_status, rejected_status,
    resolve_next_stage, stage_of_pending, validate_decision, validate_rejection_notes,
    DECISION_REJECTED, STATUS_APPROVED,
};
use mutabaah_core::error::CoreError;
use mutabaah_core::types::DbId;
use mutabaah_db::models::adhoc::AdhocRequest;
use mutabaah_db::models::submission::{
    CreateSubmission, MonthlySubmission, NewDecision, ReviewRequest, SubmissionDecision,
};
use mutabaah_db::repositories::{AdhocRequestRepo, EmployeeRepo, SubmissionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A submission with the most recent decision per stage.
#[derive(Debug, Serialize)]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: MonthlySubmission,
    pub decisions: Vec<SubmissionDecision>,
}

/// The unified review-queue presentation. Monthly submissions and ad-hoc
/// requests share one response but stay structurally distinct; only the
/// former walk the multi-stage chain.
#[derive(Debug, Serialize)]
pub struct ReviewQueue {
    pub monthly_submissions: Vec<MonthlySubmission>,
    pub adhoc_requests: Vec<AdhocRequest>,
}

/// POST /api/v1/submissions
///
/// Create the monthly submission for review, snapshotting the employee's
/// current reviewer assignments. A rejected submission for the same month is
/// reset and re-snapshotted; an in-flight or approved one conflicts.
pub async fn create_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSubmission>,
) -> AppResult<impl IntoResponse> {
    auth.ensure_self_or_admin(input.employee_id)?;
    mutabaah_core::month::validate_month_key(&input.month_key)?;

    let employee = EmployeeRepo::find_by_id(&state.pool, input.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        }))?;
    let assignments = employee.role_assignments();

    // A submission with no assigned reviewer anywhere is approved on entry.
    let status = first_stage(&assignments)
        .map(pending_status)
        .unwrap_or(STATUS_APPROVED);

    let existing =
        SubmissionRepo::find_by_employee_month(&state.pool, input.employee_id, &input.month_key)
            .await?;

    let submission = match existing {
        None => {
            SubmissionRepo::create(
                &state.pool,
                input.employee_id,
                &input.month_key,
                status,
                &assignments,
            )
            .await?
        }
        Some(previous) if previous.status.starts_with("rejected_") => {
            SubmissionRepo::resubmit(
                &state.pool,
                previous.id,
                &previous.status,
                status,
                &assignments,
            )
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(
                    "Submission changed concurrently; retry".into(),
                ))
            })?
        }
        Some(previous) => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Month {} already has a submission in status '{}'",
                input.month_key, previous.status
            ))));
        }
    };

    tracing::info!(
        submission_id = submission.id,
        employee_id = submission.employee_id,
        month = %submission.month_key,
        status = %submission.status,
        "submission created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: submission })))
}

/// GET /api/v1/submissions/{submission_id}
///
/// Submission with the most recent decision per stage.
pub async fn get_submission(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let submission = SubmissionRepo::find_by_id(&state.pool, submission_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id: submission_id,
        }))?;

    let decisions = SubmissionRepo::latest_decisions(&state.pool, submission_id).await?;

    Ok(Json(DataResponse {
        data: SubmissionDetail {
            submission,
            decisions,
        },
    }))
}

/// POST /api/v1/submissions/{submission_id}/review
///
/// Apply one review decision. The caller must be the snapshotted reviewer
/// for the current stage or the live holder of that role; the transition is
/// a status-guarded conditional update, so a concurrent reviewer loses with
/// a retryable conflict.
pub async fn review_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    validate_decision(&input.decision)?;
    validate_rejection_notes(&input.decision, input.notes.as_deref())?;

    let submission = SubmissionRepo::find_by_id(&state.pool, submission_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id: submission_id,
        }))?;

    if is_terminal(&submission.status) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Submission is already finalized as '{}'",
            submission.status
        ))));
    }

    let stage = stage_of_pending(&submission.status).ok_or_else(|| {
        AppError::InternalError(format!("Unknown submission status '{}'", submission.status))
    })?;

    // Live assignments, when the roster still has the employee. Authorization
    // falls back to the snapshot when it does not.
    let live = EmployeeRepo::find_by_id(&state.pool, submission.employee_id)
        .await?
        .map(|e| e.role_assignments());

    if !authorize_reviewer(
        stage,
        submission.snapshot_reviewer(stage),
        live.as_ref(),
        auth.user_id,
    ) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Not authorized to review at the {} stage",
            stage.as_str()
        ))));
    }

    let new_status = if input.decision == DECISION_REJECTED {
        rejected_status(stage)
    } else {
        resolve_next_stage(stage, &submission.snapshot_assignments())
            .map(pending_status)
            .unwrap_or(STATUS_APPROVED)
    };

    let decision = NewDecision {
        stage: stage.as_str().to_string(),
        decision: input.decision.clone(),
        notes: input.notes.clone(),
        decided_by: auth.user_id,
    };

    let updated = SubmissionRepo::apply_review(
        &state.pool,
        submission_id,
        &submission.status,
        new_status,
        &decision,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Submission status changed concurrently; retry".into(),
        ))
    })?;

    tracing::info!(
        submission_id,
        reviewer_id = auth.user_id,
        stage = stage.as_str(),
        decision = %input.decision,
        from = %submission.status,
        to = %updated.status,
        "submission reviewed"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/review-queue
///
/// Everything waiting on the caller: monthly submissions pending at a stage
/// they are snapshotted for, plus ad-hoc requests from their current
/// mentees.
pub async fn get_review_queue(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let monthly_submissions =
        SubmissionRepo::list_pending_for_reviewer(&state.pool, auth.user_id).await?;
    let adhoc_requests =
        AdhocRequestRepo::list_pending_for_mentor(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: ReviewQueue {
            monthly_submissions,
            adhoc_requests,
        },
    }))
}
