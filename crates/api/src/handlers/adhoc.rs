//! Handlers for ad-hoc missed-prayer and manual study-session requests.
//!
//! A single-stage machine (`pending -> approved | rejected`) reviewed
//! solely by the employee's current mentor; deliberately separate from the
//! multi-stage monthly chain.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use mutabaah_core::approval::{
    validate_adhoc_kind, validate_decision, validate_rejection_notes,
    ADHOC_STATUS_APPROVED, ADHOC_STATUS_PENDING, ADHOC_STATUS_REJECTED, DECISION_REJECTED,
};
use mutabaah_core::error::CoreError;
use mutabaah_core::types::DbId;
use mutabaah_db::models::adhoc::CreateAdhocRequest;
use mutabaah_db::models::submission::ReviewRequest;
use mutabaah_db::repositories::{AdhocRequestRepo, EmployeeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/adhoc-requests
///
/// File a missed-prayer or manual-session request for mentor review.
pub async fn create_adhoc_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAdhocRequest>,
) -> AppResult<impl IntoResponse> {
    auth.ensure_self_or_admin(input.employee_id)?;
    validate_adhoc_kind(&input.kind)?;

    EmployeeRepo::find_by_id(&state.pool, input.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        }))?;

    let request = AdhocRequestRepo::create(&state.pool, &input).await?;

    tracing::info!(
        request_id = request.id,
        employee_id = request.employee_id,
        kind = %request.kind,
        "ad-hoc request filed"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// POST /api/v1/adhoc-requests/{request_id}/review
///
/// Mentor decision on an ad-hoc request. Guarded on the request still being
/// pending; re-review conflicts.
pub async fn review_adhoc_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    validate_decision(&input.decision)?;
    validate_rejection_notes(&input.decision, input.notes.as_deref())?;

    let request = AdhocRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdhocRequest",
            id: request_id,
        }))?;

    if request.status != ADHOC_STATUS_PENDING {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Request is already finalized as '{}'",
            request.status
        ))));
    }

    // Ad-hoc requests carry no snapshot: the current mentor edge decides.
    let is_mentor = EmployeeRepo::find_by_id(&state.pool, request.employee_id)
        .await?
        .is_some_and(|e| e.mentor_id == Some(auth.user_id));
    if !is_mentor {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the employee's current mentor may review this request".into(),
        )));
    }

    let new_status = if input.decision == DECISION_REJECTED {
        ADHOC_STATUS_REJECTED
    } else {
        ADHOC_STATUS_APPROVED
    };

    let updated = AdhocRequestRepo::apply_review(
        &state.pool,
        request_id,
        new_status,
        auth.user_id,
        input.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Request status changed concurrently; retry".into(),
        ))
    })?;

    tracing::info!(
        request_id,
        reviewer_id = auth.user_id,
        decision = %input.decision,
        "ad-hoc request reviewed"
    );

    Ok(Json(DataResponse { data: updated }))
}
