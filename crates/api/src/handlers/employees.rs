//! Handlers for the employee directory and the administrative
//! role-assignment update.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use mutabaah_core::error::CoreError;
use mutabaah_core::types::DbId;
use mutabaah_db::models::employee::{CreateEmployee, UpdateRoleAssignments};
use mutabaah_db::repositories::{EmployeeRepo, HospitalRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/employees
///
/// Create a directory entry. Admin only.
pub async fn create_employee(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    HospitalRepo::find_by_id(&state.pool, input.hospital_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Hospital",
            id: input.hospital_id,
        }))?;

    let employee = EmployeeRepo::create(&state.pool, &input).await?;

    tracing::info!(employee_id = employee.id, "employee created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// GET /api/v1/employees/{employee_id}
///
/// Directory lookup including the reviewer assignment fields.
pub async fn get_employee(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        }))?;

    Ok(Json(DataResponse { data: employee }))
}

/// PUT /api/v1/employees/{employee_id}/assignments
///
/// Administrative full replace of the five reviewer links. Submissions
/// already in flight keep their snapshots; this affects future submissions
/// and the live-holder authorization fallback. No cycle check is performed.
pub async fn update_assignments(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
    Json(input): Json<UpdateRoleAssignments>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::update_assignments(&state.pool, employee_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        }))?;

    tracing::info!(
        employee_id,
        admin_id = admin.user_id,
        "role assignments updated"
    );

    Ok(Json(DataResponse { data: employee }))
}
