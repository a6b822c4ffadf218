//! Handlers for the per-employee per-month activation gate.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use mutabaah_core::error::CoreError;
use mutabaah_core::month::validate_month_key;
use mutabaah_core::types::DbId;
use mutabaah_db::repositories::{ActivationRepo, EmployeeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::YearParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the activation endpoint.
#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub employee_id: DbId,
    /// Month key, `YYYY-MM`.
    pub month: String,
}

/// POST /api/v1/activations
///
/// Explicitly activate a month for an employee. Idempotent: activating an
/// already-activated month succeeds and changes nothing.
pub async fn activate_month(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ActivateRequest>,
) -> AppResult<impl IntoResponse> {
    auth.ensure_self_or_admin(input.employee_id)?;
    validate_month_key(&input.month)?;

    EmployeeRepo::find_by_id(&state.pool, input.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        }))?;

    let activation =
        ActivationRepo::activate(&state.pool, input.employee_id, &input.month).await?;

    tracing::info!(
        employee_id = input.employee_id,
        month = %input.month,
        "month activated"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: activation })))
}

/// GET /api/v1/employees/{employee_id}/activations?year=YYYY
///
/// List an employee's activation records for one calendar year.
pub async fn list_activations(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
    Query(params): Query<YearParams>,
) -> AppResult<impl IntoResponse> {
    auth.ensure_self_or_admin(employee_id)?;
    let year = params.year.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "The 'year' query parameter is required".into(),
        ))
    })?;

    let activations =
        ActivationRepo::list_for_employee_in_year(&state.pool, employee_id, year).await?;
    Ok(Json(DataResponse { data: activations }))
}
