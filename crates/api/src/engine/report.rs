//! Report aggregation: roster pagination, concurrent source fan-out, and
//! row assembly.
//!
//! Every request recomputes from the raw sources; nothing is cached across
//! requests. The five source reads (plus activation records) are
//! independent and issued concurrently, then joined before the per-employee
//! loop. Any read failure fails the whole request -- a partially aggregated
//! matrix would silently understate achievement.

use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;

use mutabaah_core::aggregation::{aggregate_year, EmployeeYearInput, YearlyScore};
use mutabaah_core::approval::STATUS_APPROVED;
use mutabaah_core::month::{parse_month_key, year_bounds};
use mutabaah_core::normalize::{
    activity_session_activity, normalize_manual, team_session_activity, ManualPayload,
    NormalizeStats,
};
use mutabaah_core::types::DbId;
use mutabaah_db::models::employee::{Employee, RosterFilter};
use mutabaah_db::repositories::{
    ActivationRepo, ActivitySessionRepo, EmployeeRepo, HospitalRepo, ManualReportRepo,
    PrayerAttendanceRepo, SubmissionRepo, TeamSessionRepo,
};
use mutabaah_db::DbPool;

use crate::error::AppError;

/// Default page size for the interactive report.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Upper bound on the interactive page size.
pub const MAX_PAGE_LIMIT: i64 = 200;

/// Page size used by the export variant. Export reuses this exact query
/// path so report and export numbers can never diverge.
pub const EXPORT_PAGE_LIMIT: i64 = 1000;

/// One aggregated report row: employee static fields joined with the
/// category and total scores.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub employee_id: DbId,
    pub name: String,
    pub unit: String,
    pub profession: String,
    pub hospital: Option<String>,
    pub mentor_name: Option<String>,
    #[serde(flatten)]
    pub scores: YearlyScore,
}

/// One page of the aggregated report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPage {
    pub records: Vec<ReportRow>,
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
}

impl ReportPage {
    pub fn empty(page: i64) -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            total_pages: 0,
            page,
        }
    }
}

/// Run the report query: paginate the filtered roster, then aggregate only
/// the employees on the requested page. `total`/`total_pages` come from the
/// roster count, independent of aggregation results.
pub async fn query_report(
    pool: &DbPool,
    year: i32,
    filter: &RosterFilter,
    page: i64,
    limit: i64,
) -> Result<ReportPage, AppError> {
    let total = EmployeeRepo::count_roster(pool, filter).await?;
    let offset = (page - 1) * limit;
    let employees = EmployeeRepo::filter_roster(pool, filter, limit, offset).await?;

    let records = aggregate_employees(pool, year, &employees).await?;

    Ok(ReportPage {
        records,
        total,
        total_pages: (total + limit - 1) / limit,
        page,
    })
}

/// Aggregate a set of employees for one year into report rows.
async fn aggregate_employees(
    pool: &DbPool,
    year: i32,
    employees: &[Employee],
) -> Result<Vec<ReportRow>, AppError> {
    if employees.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<DbId> = employees.iter().map(|e| e.id).collect();
    let (from, to) = year_bounds(year);

    // Fan out to the independent raw sources, fan in before the
    // per-employee loop.
    let (prayers, team_sessions, activity_sessions, manual_reports, submissions, activations) =
        tokio::try_join!(
            PrayerAttendanceRepo::list_for_employees_in_range(pool, &ids, from, to),
            TeamSessionRepo::list_for_employees_in_range(pool, &ids, from, to),
            ActivitySessionRepo::list_for_employees_in_range(pool, &ids, from, to),
            ManualReportRepo::list_for_employees_in_year(pool, &ids, year),
            SubmissionRepo::list_for_employees_in_year(pool, &ids, year),
            ActivationRepo::list_for_employees_in_year(pool, &ids, year),
        )?;

    let mut stats = NormalizeStats::default();
    let mut inputs: HashMap<DbId, EmployeeYearInput> = ids
        .iter()
        .map(|&id| (id, EmployeeYearInput::default()))
        .collect();

    for row in &prayers {
        if let Some(input) = inputs.get_mut(&row.employee_id) {
            input.matrix.mark(
                row.prayer_date.month(),
                row.prayer_date.day(),
                "shalat_berjamaah",
            );
        }
    }

    for row in &team_sessions {
        let Some(input) = inputs.get_mut(&row.employee_id) else {
            continue;
        };
        match team_session_activity(&row.session_type) {
            Some(activity) => {
                input
                    .matrix
                    .mark(row.session_date.month(), row.session_date.day(), activity);
            }
            None => stats.record_drop("team_sessions", &row.session_type),
        }
    }

    for row in &activity_sessions {
        let Some(input) = inputs.get_mut(&row.employee_id) else {
            continue;
        };
        match activity_session_activity(&row.session_type) {
            Some(activity) => {
                input
                    .matrix
                    .mark(row.session_date.month(), row.session_date.day(), activity);
            }
            None => stats.record_drop("activity_sessions", &row.session_type),
        }
    }

    for report in &manual_reports {
        let Some(input) = inputs.get_mut(&report.employee_id) else {
            continue;
        };
        let Ok((_, month)) = parse_month_key(&report.month_key) else {
            stats.record_drop("manual_reports", &report.month_key);
            continue;
        };
        let Some(activity) = mutabaah_core::catalog::find_activity(&report.activity_id)
        else {
            stats.record_drop("manual_reports", &report.activity_id);
            continue;
        };
        match serde_json::from_value::<ManualPayload>(report.payload.clone()) {
            Ok(payload) => {
                let normalized = normalize_manual(&payload, year);
                for day in &normalized.days {
                    input.matrix.mark(day.month(), day.day(), activity.id);
                }
                input.record_manual_count(month, activity.id, normalized.count);
            }
            Err(_) => stats.record_drop("manual_reports", &report.activity_id),
        }
    }

    for submission in &submissions {
        if submission.status != STATUS_APPROVED {
            continue;
        }
        if let (Some(input), Ok((_, month))) = (
            inputs.get_mut(&submission.employee_id),
            parse_month_key(&submission.month_key),
        ) {
            input.approved_months.insert(month);
        }
    }

    for activation in &activations {
        if !activation.activated {
            continue;
        }
        if let (Some(input), Ok((_, month))) = (
            inputs.get_mut(&activation.employee_id),
            parse_month_key(&activation.month_key),
        ) {
            input.activated_months.insert(month);
        }
    }

    if stats.dropped_rows > 0 {
        tracing::warn!(
            dropped = stats.dropped_rows,
            year,
            "ignored unrecognized raw-source rows during aggregation"
        );
    }

    // Resolve mentor and hospital names for the static row fields.
    let mut mentor_ids: Vec<DbId> = employees.iter().filter_map(|e| e.mentor_id).collect();
    mentor_ids.sort_unstable();
    mentor_ids.dedup();
    let mentor_names: HashMap<DbId, String> = EmployeeRepo::find_by_ids(pool, &mentor_ids)
        .await?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();

    let mut hospital_ids: Vec<DbId> = employees.iter().map(|e| e.hospital_id).collect();
    hospital_ids.sort_unstable();
    hospital_ids.dedup();
    let hospital_names: HashMap<DbId, String> = HospitalRepo::find_by_ids(pool, &hospital_ids)
        .await?
        .into_iter()
        .map(|h| (h.id, h.name))
        .collect();

    let rows = employees
        .iter()
        .map(|employee| {
            let input = inputs
                .remove(&employee.id)
                .unwrap_or_default();
            ReportRow {
                employee_id: employee.id,
                name: employee.name.clone(),
                unit: employee.unit.clone(),
                profession: employee.profession.clone(),
                hospital: hospital_names.get(&employee.hospital_id).cloned(),
                mentor_name: employee
                    .mentor_id
                    .and_then(|id| mentor_names.get(&id).cloned()),
                scores: aggregate_year(&input),
            }
        })
        .collect();

    Ok(rows)
}
