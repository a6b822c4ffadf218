//! Handler for recording free-form manual activity logs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use mutabaah_core::catalog::find_activity;
use mutabaah_core::error::CoreError;
use mutabaah_core::month::validate_month_key;
use mutabaah_core::normalize::ManualPayload;
use mutabaah_db::models::manual_report::CreateManualReport;
use mutabaah_db::repositories::{ActivationRepo, ManualReportRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/manual-reports
///
/// Record a manual activity log. The payload must match one of the three
/// supported encodings and the month must be activated first.
pub async fn create_manual_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateManualReport>,
) -> AppResult<impl IntoResponse> {
    auth.ensure_self_or_admin(input.employee_id)?;
    validate_month_key(&input.month_key)?;

    if find_activity(&input.activity_id).is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown activity '{}'",
            input.activity_id
        ))));
    }

    // Reject payloads no normalization variant can decode, so the
    // aggregation engine never has to drop a row this service accepted.
    if serde_json::from_value::<ManualPayload>(input.payload.clone()).is_err() {
        return Err(AppError::Core(CoreError::Validation(
            "Payload must contain 'entries', 'book_entries', or 'completed_at'".into(),
        )));
    }

    // The activation gate: daily entry is permitted only for activated
    // months, and activation is never created implicitly.
    if !ActivationRepo::is_activated(&state.pool, input.employee_id, &input.month_key).await? {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Month {} is not activated for this employee",
            input.month_key
        ))));
    }

    let report = ManualReportRepo::create(&state.pool, &input).await?;

    tracing::info!(
        employee_id = input.employee_id,
        month = %input.month_key,
        activity = %input.activity_id,
        "manual report recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}
