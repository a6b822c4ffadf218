//! The monthly-submission approval chain and the single-stage ad-hoc
//! request machine.
//!
//! A submission moves through an ordered chain of reviewer stages. The chain
//! is not fixed: stages whose reviewer role is unassigned for the employee
//! are skipped, and the branch taken after the supervisor stage depends on
//! which of the kaunit/manager roles are set. All resolution here is pure;
//! the db layer applies transitions as status-guarded conditional updates.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::RoleAssignments;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Decisions
-------------------------------------------------------------------------- */

/// The review passed this stage.
pub const DECISION_APPROVED: &str = "approved";

/// The review rejected the submission; terminal for the whole chain.
pub const DECISION_REJECTED: &str = "rejected";

/// All valid decision values.
pub const VALID_DECISIONS: &[&str] = &[DECISION_APPROVED, DECISION_REJECTED];

/// Validate that a decision string is one of the accepted values.
pub fn validate_decision(decision: &str) -> Result<(), CoreError> {
    if VALID_DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid decision '{decision}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        )))
    }
}

/// Rejections must carry reviewer notes; approvals may omit them.
pub fn validate_rejection_notes(
    decision: &str,
    notes: Option<&str>,
) -> Result<(), CoreError> {
    if decision == DECISION_REJECTED
        && !notes.is_some_and(|n| !n.trim().is_empty())
    {
        return Err(CoreError::Validation(
            "A rejection must include reviewer notes".to_string(),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Stages and statuses
-------------------------------------------------------------------------- */

/// One step of the ordered approval chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Mentor,
    Supervisor,
    KaUnit,
    Manager,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Mentor => "mentor",
            Stage::Supervisor => "supervisor",
            Stage::KaUnit => "kaunit",
            Stage::Manager => "manager",
        }
    }

    /// The reviewer this stage resolves to under the given assignments.
    pub fn reviewer_in(&self, assignments: &RoleAssignments) -> Option<DbId> {
        match self {
            Stage::Mentor => assignments.mentor_id,
            Stage::Supervisor => assignments.supervisor_id,
            Stage::KaUnit => assignments.ka_unit_id,
            Stage::Manager => assignments.manager_id,
        }
    }
}

pub const STATUS_PENDING_MENTOR: &str = "pending_mentor";
pub const STATUS_PENDING_SUPERVISOR: &str = "pending_supervisor";
pub const STATUS_PENDING_KAUNIT: &str = "pending_kaunit";
pub const STATUS_PENDING_MANAGER: &str = "pending_manager";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED_MENTOR: &str = "rejected_mentor";
pub const STATUS_REJECTED_SUPERVISOR: &str = "rejected_supervisor";
pub const STATUS_REJECTED_KAUNIT: &str = "rejected_kaunit";
pub const STATUS_REJECTED_MANAGER: &str = "rejected_manager";

/// The pending status for a stage.
pub fn pending_status(stage: Stage) -> &'static str {
    match stage {
        Stage::Mentor => STATUS_PENDING_MENTOR,
        Stage::Supervisor => STATUS_PENDING_SUPERVISOR,
        Stage::KaUnit => STATUS_PENDING_KAUNIT,
        Stage::Manager => STATUS_PENDING_MANAGER,
    }
}

/// The absorbing rejection status for a stage.
pub fn rejected_status(stage: Stage) -> &'static str {
    match stage {
        Stage::Mentor => STATUS_REJECTED_MENTOR,
        Stage::Supervisor => STATUS_REJECTED_SUPERVISOR,
        Stage::KaUnit => STATUS_REJECTED_KAUNIT,
        Stage::Manager => STATUS_REJECTED_MANAGER,
    }
}

/// The stage a pending status is waiting on, `None` for terminal or unknown
/// statuses.
pub fn stage_of_pending(status: &str) -> Option<Stage> {
    match status {
        STATUS_PENDING_MENTOR => Some(Stage::Mentor),
        STATUS_PENDING_SUPERVISOR => Some(Stage::Supervisor),
        STATUS_PENDING_KAUNIT => Some(Stage::KaUnit),
        STATUS_PENDING_MANAGER => Some(Stage::Manager),
        _ => None,
    }
}

/// Approved and every `rejected_*` status are terminal; re-review of a
/// terminal submission is an error, never a silent overwrite.
pub fn is_terminal(status: &str) -> bool {
    matches!(
        status,
        STATUS_APPROVED
            | STATUS_REJECTED_MENTOR
            | STATUS_REJECTED_SUPERVISOR
            | STATUS_REJECTED_KAUNIT
            | STATUS_REJECTED_MANAGER
    )
}

/* --------------------------------------------------------------------------
Chain resolution
-------------------------------------------------------------------------- */

/// The stage a fresh submission starts at: the first assigned role in
/// mentor, supervisor, kaunit, manager order. `None` means no reviewer is
/// assigned at all and the submission is immediately approved.
pub fn first_stage(assignments: &RoleAssignments) -> Option<Stage> {
    [Stage::Mentor, Stage::Supervisor, Stage::KaUnit, Stage::Manager]
        .into_iter()
        .find(|stage| stage.reviewer_in(assignments).is_some())
}

/// The stage that follows an approval at `current`, or `None` when the
/// submission is fully approved.
///
/// The branch after each stage is fixed by the reviewing flow: the mentor
/// hands off to the supervisor only, and the supervisor hands off to the
/// kaunit when one is assigned, otherwise the manager. Kaunit and manager
/// are both final stages. An employee with a manager but no supervisor
/// therefore goes straight from mentor approval to approved.
pub fn resolve_next_stage(
    current: Stage,
    assignments: &RoleAssignments,
) -> Option<Stage> {
    match current {
        Stage::Mentor => assignments.supervisor_id.map(|_| Stage::Supervisor),
        Stage::Supervisor => {
            if assignments.ka_unit_id.is_some() {
                Some(Stage::KaUnit)
            } else if assignments.manager_id.is_some() {
                Some(Stage::Manager)
            } else {
                None
            }
        }
        Stage::KaUnit | Stage::Manager => None,
    }
}

/* --------------------------------------------------------------------------
Reviewer authorization
-------------------------------------------------------------------------- */

/// Dual authorization check for a review action.
///
/// The snapshot captured at submission time is authoritative; the live
/// assignment graph is the fallback for role changes made after submission.
/// When the live lookup is unavailable (roster not loaded), the snapshot
/// alone decides -- and with no snapshot either, the review is permitted,
/// which is the intentional tolerance for callers reviewing before the
/// roster loads.
pub fn authorize_reviewer(
    stage: Stage,
    snapshot: Option<DbId>,
    live: Option<&RoleAssignments>,
    actor: DbId,
) -> bool {
    match snapshot {
        Some(id) if id == actor => true,
        _ => match live {
            Some(assignments) => stage.reviewer_in(assignments) == Some(actor),
            None => snapshot.is_none(),
        },
    }
}

/* --------------------------------------------------------------------------
Ad-hoc requests
-------------------------------------------------------------------------- */

/// Ad-hoc missed-prayer make-up request.
pub const ADHOC_KIND_MISSED_PRAYER: &str = "missed_prayer";

/// Ad-hoc manual tadarus/study-session report.
pub const ADHOC_KIND_MANUAL_SESSION: &str = "manual_session";

/// All valid ad-hoc request kinds.
pub const VALID_ADHOC_KINDS: &[&str] =
    &[ADHOC_KIND_MISSED_PRAYER, ADHOC_KIND_MANUAL_SESSION];

pub const ADHOC_STATUS_PENDING: &str = "pending";
pub const ADHOC_STATUS_APPROVED: &str = "approved";
pub const ADHOC_STATUS_REJECTED: &str = "rejected";

/// Validate that an ad-hoc kind string is one of the accepted values.
pub fn validate_adhoc_kind(kind: &str) -> Result<(), CoreError> {
    if VALID_ADHOC_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid request kind '{kind}'. Must be one of: {}",
            VALID_ADHOC_KINDS.join(", ")
        )))
    }
}
