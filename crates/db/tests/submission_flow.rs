//! Integration tests for the monthly-submission review flow:
//! status-guarded transitions, decision history, and re-submission.

use mutabaah_core::approval::{
    DECISION_APPROVED, DECISION_REJECTED, STATUS_APPROVED, STATUS_PENDING_MENTOR,
    STATUS_PENDING_SUPERVISOR, STATUS_REJECTED_SUPERVISOR,
};
use mutabaah_core::roles::RoleAssignments;
use mutabaah_core::types::DbId;
use mutabaah_db::models::employee::CreateEmployee;
use mutabaah_db::models::hospital::CreateHospital;
use mutabaah_db::models::submission::NewDecision;
use mutabaah_db::repositories::{EmployeeRepo, HospitalRepo, SubmissionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_employee(pool: &PgPool, name: &str) -> DbId {
    let hospital = HospitalRepo::create(
        pool,
        &CreateHospital {
            name: format!("RS {name}"),
            brand: format!("brand-{name}"),
        },
    )
    .await
    .unwrap();

    EmployeeRepo::create(
        pool,
        &CreateEmployee {
            name: name.to_string(),
            unit: "Farmasi".to_string(),
            profession: "Apoteker".to_string(),
            profession_category: None,
            hospital_id: hospital.id,
            account_role: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn decision(stage: &str, decision: &str, by: DbId) -> NewDecision {
    NewDecision {
        stage: stage.to_string(),
        decision: decision.to_string(),
        notes: Some("ok".to_string()),
        decided_by: by,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn review_advances_with_matching_status_guard(pool: PgPool) {
    let employee_id = seed_employee(&pool, "Aisyah").await;
    let mentor_id = seed_employee(&pool, "Mentor").await;

    let snapshot = RoleAssignments {
        mentor_id: Some(mentor_id),
        supervisor_id: Some(99),
        ..Default::default()
    };
    let submission = SubmissionRepo::create(
        &pool,
        employee_id,
        "2025-03",
        STATUS_PENDING_MENTOR,
        &snapshot,
    )
    .await
    .unwrap();

    let updated = SubmissionRepo::apply_review(
        &pool,
        submission.id,
        STATUS_PENDING_MENTOR,
        STATUS_PENDING_SUPERVISOR,
        &decision("mentor", DECISION_APPROVED, mentor_id),
    )
    .await
    .unwrap()
    .expect("guard matches current status");

    assert_eq!(updated.status, STATUS_PENDING_SUPERVISOR);

    let decisions = SubmissionRepo::list_decisions(&pool, submission.id)
        .await
        .unwrap();
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].stage, "mentor");
    assert_eq!(decisions[0].decision, DECISION_APPROVED);
}

#[sqlx::test(migrations = "./migrations")]
async fn stale_status_guard_writes_nothing(pool: PgPool) {
    let employee_id = seed_employee(&pool, "Budi").await;
    let mentor_id = seed_employee(&pool, "MentorB").await;

    let submission = SubmissionRepo::create(
        &pool,
        employee_id,
        "2025-04",
        STATUS_PENDING_SUPERVISOR,
        &RoleAssignments::default(),
    )
    .await
    .unwrap();

    // A reviewer acting on an outdated view of the submission: the stored
    // status no longer matches the guard, so the update loses.
    let result = SubmissionRepo::apply_review(
        &pool,
        submission.id,
        STATUS_PENDING_MENTOR,
        STATUS_APPROVED,
        &decision("mentor", DECISION_APPROVED, mentor_id),
    )
    .await
    .unwrap();
    assert!(result.is_none());

    // Neither the status nor the decision history changed.
    let stored = SubmissionRepo::find_by_id(&pool, submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, STATUS_PENDING_SUPERVISOR);
    assert!(SubmissionRepo::list_decisions(&pool, submission.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn terminal_submission_rejects_further_reviews(pool: PgPool) {
    let employee_id = seed_employee(&pool, "Citra").await;
    let reviewer_id = seed_employee(&pool, "Supervisor").await;

    let submission = SubmissionRepo::create(
        &pool,
        employee_id,
        "2025-05",
        STATUS_APPROVED,
        &RoleAssignments::default(),
    )
    .await
    .unwrap();

    let result = SubmissionRepo::apply_review(
        &pool,
        submission.id,
        STATUS_PENDING_SUPERVISOR,
        STATUS_REJECTED_SUPERVISOR,
        &decision("supervisor", DECISION_REJECTED, reviewer_id),
    )
    .await
    .unwrap();
    assert!(result.is_none());

    let stored = SubmissionRepo::find_by_id(&pool, submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, STATUS_APPROVED);
}

#[sqlx::test(migrations = "./migrations")]
async fn resubmit_resets_status_and_refreshes_snapshot(pool: PgPool) {
    let employee_id = seed_employee(&pool, "Dewi").await;
    let old_mentor = seed_employee(&pool, "OldMentor").await;
    let new_mentor = seed_employee(&pool, "NewMentor").await;

    let submission = SubmissionRepo::create(
        &pool,
        employee_id,
        "2025-06",
        STATUS_REJECTED_SUPERVISOR,
        &RoleAssignments {
            mentor_id: Some(old_mentor),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let resubmitted = SubmissionRepo::resubmit(
        &pool,
        submission.id,
        STATUS_REJECTED_SUPERVISOR,
        STATUS_PENDING_MENTOR,
        &RoleAssignments {
            mentor_id: Some(new_mentor),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("rejected submission can be resubmitted");

    assert_eq!(resubmitted.status, STATUS_PENDING_MENTOR);
    assert_eq!(resubmitted.mentor_id, Some(new_mentor));
}

#[sqlx::test(migrations = "./migrations")]
async fn latest_decisions_returns_most_recent_per_stage(pool: PgPool) {
    let employee_id = seed_employee(&pool, "Eka").await;
    let mentor_id = seed_employee(&pool, "MentorE").await;

    let submission = SubmissionRepo::create(
        &pool,
        employee_id,
        "2025-07",
        STATUS_PENDING_MENTOR,
        &RoleAssignments {
            mentor_id: Some(mentor_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Reject, resubmit, approve: two mentor decisions on record.
    SubmissionRepo::apply_review(
        &pool,
        submission.id,
        STATUS_PENDING_MENTOR,
        "rejected_mentor",
        &NewDecision {
            stage: "mentor".to_string(),
            decision: DECISION_REJECTED.to_string(),
            notes: Some("missing days".to_string()),
            decided_by: mentor_id,
        },
    )
    .await
    .unwrap()
    .unwrap();

    SubmissionRepo::resubmit(
        &pool,
        submission.id,
        "rejected_mentor",
        STATUS_PENDING_MENTOR,
        &RoleAssignments {
            mentor_id: Some(mentor_id),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    SubmissionRepo::apply_review(
        &pool,
        submission.id,
        STATUS_PENDING_MENTOR,
        STATUS_APPROVED,
        &NewDecision {
            stage: "mentor".to_string(),
            decision: DECISION_APPROVED.to_string(),
            notes: None,
            decided_by: mentor_id,
        },
    )
    .await
    .unwrap()
    .unwrap();

    let history = SubmissionRepo::list_decisions(&pool, submission.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);

    let latest = SubmissionRepo::latest_decisions(&pool, submission.id)
        .await
        .unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].decision, DECISION_APPROVED);
}

#[sqlx::test(migrations = "./migrations")]
async fn pending_queue_matches_snapshot_reviewer_per_stage(pool: PgPool) {
    let employee_id = seed_employee(&pool, "Fikri").await;
    let mentor_id = seed_employee(&pool, "MentorF").await;
    let supervisor_id = seed_employee(&pool, "SupervisorF").await;

    SubmissionRepo::create(
        &pool,
        employee_id,
        "2025-01",
        STATUS_PENDING_MENTOR,
        &RoleAssignments {
            mentor_id: Some(mentor_id),
            supervisor_id: Some(supervisor_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let mentor_queue = SubmissionRepo::list_pending_for_reviewer(&pool, mentor_id)
        .await
        .unwrap();
    assert_eq!(mentor_queue.len(), 1);

    // The supervisor sees nothing until the submission reaches their stage.
    let supervisor_queue =
        SubmissionRepo::list_pending_for_reviewer(&pool, supervisor_id)
            .await
            .unwrap();
    assert!(supervisor_queue.is_empty());
}
