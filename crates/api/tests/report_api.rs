//! Integration tests for the report query service: validation, pagination,
//! approval gating, and the export variant.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_json, get, token_for};
use sqlx::PgPool;

use mutabaah_core::approval::{STATUS_APPROVED, STATUS_PENDING_SUPERVISOR};
use mutabaah_core::roles::{RoleAssignments, ROLE_STAFF};
use mutabaah_core::types::DbId;
use mutabaah_db::models::attendance::CreatePrayerAttendance;
use mutabaah_db::models::employee::CreateEmployee;
use mutabaah_db::models::hospital::CreateHospital;
use mutabaah_db::repositories::{
    ActivationRepo, EmployeeRepo, HospitalRepo, PrayerAttendanceRepo, SubmissionRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_hospital(pool: &PgPool, name: &str, brand: &str) -> DbId {
    HospitalRepo::create(
        pool,
        &CreateHospital {
            name: name.to_string(),
            brand: brand.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_employee(pool: &PgPool, hospital_id: DbId, name: &str, unit: &str) -> DbId {
    EmployeeRepo::create(
        pool,
        &CreateEmployee {
            name: name.to_string(),
            unit: unit.to_string(),
            profession: "Perawat".to_string(),
            profession_category: None,
            hospital_id,
            account_role: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Seed one employee with 15 prayer-attendance days in March 2025, an
/// activation record, and a submission in the given status.
async fn seed_march_scenario(
    pool: &PgPool,
    hospital_id: DbId,
    name: &str,
    submission_status: &str,
) -> DbId {
    let employee_id = seed_employee(pool, hospital_id, name, "IGD").await;

    for day in 1..=15 {
        PrayerAttendanceRepo::create(
            pool,
            &CreatePrayerAttendance {
                employee_id,
                prayer_date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
                prayer_name: Some("dzuhur".to_string()),
            },
        )
        .await
        .unwrap();
    }

    ActivationRepo::activate(pool, employee_id, "2025-03").await.unwrap();

    SubmissionRepo::create(
        pool,
        employee_id,
        "2025-03",
        submission_status,
        &RoleAssignments::default(),
    )
    .await
    .unwrap();

    employee_id
}

// ---------------------------------------------------------------------------
// Validation and authorization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_year_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(1, ROLE_STAFF);

    let response = get(app, "/api/v1/reports/mutabaah", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("year"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unauthenticated_caller_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/reports/mutabaah?year=2025", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Pagination over the roster
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_roster_yields_empty_page(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(1, ROLE_STAFF);

    let response = get(app, "/api/v1/reports/mutabaah?year=2025", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["records"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn second_page_of_fifteen_holds_five_records(pool: PgPool) {
    let hospital_id = seed_hospital(&pool, "RS Medika", "medika").await;
    for i in 0..15 {
        seed_employee(&pool, hospital_id, &format!("Perawat {i:02}"), "IGD").await;
    }

    let app = common::build_test_app(pool.clone());
    let token = token_for(1, ROLE_STAFF);

    let response = get(
        app,
        "/api/v1/reports/mutabaah?year=2025&page=2&limit=10",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["records"].as_array().unwrap().len(), 5);
    assert_eq!(json["data"]["total"], 15);
    assert_eq!(json["data"]["total_pages"], 2);
    assert_eq!(json["data"]["page"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unresolvable_hospital_filter_yields_empty_page(pool: PgPool) {
    let hospital_id = seed_hospital(&pool, "RS Medika", "medika").await;
    seed_employee(&pool, hospital_id, "Perawat Satu", "IGD").await;

    let app = common::build_test_app(pool.clone());
    let token = token_for(1, ROLE_STAFF);

    let response = get(
        app,
        "/api/v1/reports/mutabaah?year=2025&hospital=nonexistent",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 0);
    assert_eq!(json["data"]["records"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn hospital_filter_resolves_by_brand(pool: PgPool) {
    let medika = seed_hospital(&pool, "RS Medika", "medika").await;
    let other = seed_hospital(&pool, "RS Lain", "lain").await;
    seed_employee(&pool, medika, "Perawat Medika", "IGD").await;
    seed_employee(&pool, other, "Perawat Lain", "IGD").await;

    let app = common::build_test_app(pool.clone());
    let token = token_for(1, ROLE_STAFF);

    let response = get(
        app,
        "/api/v1/reports/mutabaah?year=2025&hospital=medika",
        Some(&token),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["records"][0]["name"], "Perawat Medika");
    assert_eq!(json["data"]["records"][0]["hospital"], "RS Medika");
}

// ---------------------------------------------------------------------------
// Aggregation semantics through the HTTP surface
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn approved_march_contributes_achievement(pool: PgPool) {
    let hospital_id = seed_hospital(&pool, "RS Medika", "medika").await;
    seed_march_scenario(&pool, hospital_id, "Aisyah", STATUS_APPROVED).await;

    let app = common::build_test_app(pool.clone());
    let token = token_for(1, ROLE_STAFF);

    let response = get(app, "/api/v1/reports/mutabaah?year=2025", Some(&token)).await;
    let json = body_json(response).await;
    let row = &json["data"]["records"][0];

    assert_eq!(row["months_count"], 1);
    // 15 prayer days against the integrity targets for one observed month
    // (shalat_berjamaah 20 + qiyamul_lail 4 + puasa_sunnah 4).
    assert_eq!(row["integrity"]["achieved"], 15);
    assert_eq!(row["integrity"]["target"], 28);
    assert_eq!(row["integrity"]["percentage"], 54);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn pending_month_accrues_target_with_zero_achieved(pool: PgPool) {
    let hospital_id = seed_hospital(&pool, "RS Medika", "medika").await;
    seed_march_scenario(&pool, hospital_id, "Budi", STATUS_PENDING_SUPERVISOR).await;

    let app = common::build_test_app(pool.clone());
    let token = token_for(1, ROLE_STAFF);

    let response = get(app, "/api/v1/reports/mutabaah?year=2025", Some(&token)).await;
    let json = body_json(response).await;
    let row = &json["data"]["records"][0];

    // The month still counts and its targets still accrue; only the
    // achievement is gated to zero until approval.
    assert_eq!(row["months_count"], 1);
    assert_eq!(row["integrity"]["achieved"], 0);
    assert_eq!(row["integrity"]["target"], 28);
    assert_eq!(row["integrity"]["percentage"], 0);
}

// ---------------------------------------------------------------------------
// Export variant
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn export_returns_all_records_in_one_page(pool: PgPool) {
    let hospital_id = seed_hospital(&pool, "RS Medika", "medika").await;
    for i in 0..15 {
        seed_employee(&pool, hospital_id, &format!("Perawat {i:02}"), "IGD").await;
    }

    let app = common::build_test_app(pool.clone());
    let token = token_for(1, ROLE_STAFF);

    let response = get(
        app,
        "/api/v1/reports/mutabaah/export?year=2025",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["records"].as_array().unwrap().len(), 15);
    assert_eq!(json["data"]["total"], 15);
    assert_eq!(json["data"]["page"], 1);
}
