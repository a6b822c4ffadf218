//! Monthly submission rows and their append-only review decisions.

use mutabaah_core::approval::Stage;
use mutabaah_core::roles::RoleAssignments;
use mutabaah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `monthly_submissions` table.
///
/// The four reviewer columns are the snapshot taken at submission time;
/// they deliberately do not follow later changes to the live employee
/// record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlySubmission {
    pub id: DbId,
    pub employee_id: DbId,
    pub month_key: String,
    pub status: String,
    pub mentor_id: Option<DbId>,
    pub supervisor_id: Option<DbId>,
    pub manager_id: Option<DbId>,
    pub ka_unit_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MonthlySubmission {
    /// The snapshotted reviewer for one stage.
    pub fn snapshot_reviewer(&self, stage: Stage) -> Option<DbId> {
        match stage {
            Stage::Mentor => self.mentor_id,
            Stage::Supervisor => self.supervisor_id,
            Stage::KaUnit => self.ka_unit_id,
            Stage::Manager => self.manager_id,
        }
    }

    /// The snapshot as an assignment graph, for next-stage resolution.
    pub fn snapshot_assignments(&self) -> RoleAssignments {
        RoleAssignments {
            mentor_id: self.mentor_id,
            supervisor_id: self.supervisor_id,
            manager_id: self.manager_id,
            ka_unit_id: self.ka_unit_id,
            dirut_id: None,
        }
    }
}

/// A row from the `submission_decisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionDecision {
    pub id: DbId,
    pub submission_id: DbId,
    pub stage: String,
    pub decision: String,
    pub notes: Option<String>,
    pub decided_by: DbId,
    pub decided_at: Timestamp,
}

/// A decision to append together with a status transition.
#[derive(Debug, Clone)]
pub struct NewDecision {
    pub stage: String,
    pub decision: String,
    pub notes: Option<String>,
    pub decided_by: DbId,
}

/// Request body for creating a monthly submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmission {
    pub employee_id: DbId,
    pub month_key: String,
}

/// Request body for the review endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub decision: String,
    pub notes: Option<String>,
}
