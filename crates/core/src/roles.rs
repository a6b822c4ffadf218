//! Account roles and the per-employee reviewer assignment graph.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Administrative account role (directory maintenance, role assignment).
pub const ROLE_ADMIN: &str = "admin";

/// Regular hospital-group employee account role.
pub const ROLE_STAFF: &str = "staff";

/// Reviewer links carried on every employee record.
///
/// Each field is an independent nullable pointer to another employee. This is
/// a per-employee-configurable assignment graph, not an org tree: any
/// combination of fields may be set, and the approval chain skips stages
/// whose field is unset. Acyclicity is assumed by convention, never checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignments {
    pub mentor_id: Option<DbId>,
    pub supervisor_id: Option<DbId>,
    pub manager_id: Option<DbId>,
    pub ka_unit_id: Option<DbId>,
    pub dirut_id: Option<DbId>,
}

impl RoleAssignments {
    /// True when no reviewer role is assigned at all.
    pub fn is_empty(&self) -> bool {
        self.mentor_id.is_none()
            && self.supervisor_id.is_none()
            && self.manager_id.is_none()
            && self.ka_unit_id.is_none()
    }
}
