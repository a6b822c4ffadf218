use mutabaah_core::roles::RoleAssignments;
use mutabaah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `employees` table, including the reviewer assignment
/// columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub unit: String,
    pub profession: String,
    pub profession_category: Option<String>,
    pub hospital_id: DbId,
    pub account_role: String,
    pub mentor_id: Option<DbId>,
    pub supervisor_id: Option<DbId>,
    pub manager_id: Option<DbId>,
    pub ka_unit_id: Option<DbId>,
    pub dirut_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Employee {
    /// The live reviewer assignment graph carried on this record.
    pub fn role_assignments(&self) -> RoleAssignments {
        RoleAssignments {
            mentor_id: self.mentor_id,
            supervisor_id: self.supervisor_id,
            manager_id: self.manager_id,
            ka_unit_id: self.ka_unit_id,
            dirut_id: self.dirut_id,
        }
    }
}

/// DTO for creating a directory entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub unit: String,
    pub profession: String,
    pub profession_category: Option<String>,
    pub hospital_id: DbId,
    pub account_role: Option<String>,
}

/// Full-replace DTO for the administrative assignment update. Omitted
/// fields clear the corresponding link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoleAssignments {
    pub mentor_id: Option<DbId>,
    pub supervisor_id: Option<DbId>,
    pub manager_id: Option<DbId>,
    pub ka_unit_id: Option<DbId>,
    pub dirut_id: Option<DbId>,
}

/// Roster filter used by the report query service. `None` fields match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct RosterFilter {
    pub hospital_id: Option<DbId>,
    pub unit: Option<String>,
    pub profession: Option<String>,
    /// Case-insensitive substring match on name or id.
    pub search: Option<String>,
}
