//! Handlers for the Mutaba'ah report query service and its export variant.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use mutabaah_core::error::CoreError;
use mutabaah_db::models::employee::RosterFilter;
use mutabaah_db::repositories::HospitalRepo;

use crate::engine::report::{
    query_report, ReportPage, DEFAULT_PAGE_LIMIT, EXPORT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the report endpoints. Filters accept `"all"` (or
/// absence) to mean unfiltered.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub year: Option<i32>,
    pub hospital: Option<String>,
    pub unit: Option<String>,
    pub profession: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/v1/reports/mutabaah
///
/// Paginated, filterable aggregated report for one calendar year.
pub async fn get_mutabaah_report(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let page = build_report(&state, params, false).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/reports/mutabaah/export
///
/// Export variant: identical aggregation path with a materially higher page
/// size, so exported numbers always match the interactive report.
pub async fn export_mutabaah_report(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let page = build_report(&state, params, true).await?;
    Ok(Json(DataResponse { data: page }))
}

async fn build_report(
    state: &AppState,
    params: ReportParams,
    export: bool,
) -> Result<ReportPage, AppError> {
    let year = params.year.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "The 'year' query parameter is required".into(),
        ))
    })?;

    let mut filter = RosterFilter {
        hospital_id: None,
        unit: none_if_all(params.unit),
        profession: none_if_all(params.profession),
        search: params.search.filter(|s| !s.trim().is_empty()),
    };

    // Resolve the hospital filter to a canonical row first; an identifier
    // that matches nothing yields an empty page rather than an error.
    if let Some(ident) = none_if_all(params.hospital) {
        match HospitalRepo::resolve(&state.pool, &ident).await? {
            Some(hospital) => filter.hospital_id = Some(hospital.id),
            None => return Ok(ReportPage::empty(1)),
        }
    }

    let (page, limit) = if export {
        (1, EXPORT_PAGE_LIMIT)
    } else {
        (
            params.page.unwrap_or(1).max(1),
            params
                .limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
        )
    };

    query_report(&state.pool, year, &filter, page, limit).await
}

/// Treat an absent, empty, or `"all"` filter value as unfiltered.
fn none_if_all(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && v != "all")
}
