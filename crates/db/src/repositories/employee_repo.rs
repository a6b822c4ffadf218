//! Repository for the `employees` table, including the report roster
//! filter used by the report query service.

use mutabaah_core::roles::ROLE_STAFF;
use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{
    CreateEmployee, Employee, RosterFilter, UpdateRoleAssignments,
};

/// Column list for employee queries.
const COLUMNS: &str = "\
    id, name, unit, profession, profession_category, hospital_id, \
    account_role, mentor_id, supervisor_id, manager_id, ka_unit_id, \
    dirut_id, created_at, updated_at";

/// Shared filter clause for roster queries. NULL parameters match
/// everything; the search term matches name or id substrings.
const ROSTER_WHERE: &str = "\
    WHERE ($1::BIGINT IS NULL OR hospital_id = $1) \
      AND ($2::TEXT IS NULL OR unit = $2) \
      AND ($3::TEXT IS NULL OR profession = $3) \
      AND ($4::TEXT IS NULL \
           OR name ILIKE '%' || $4 || '%' \
           OR id::TEXT ILIKE '%' || $4 || '%')";

/// Provides directory and roster operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new directory entry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees \
                (name, unit, profession, profession_category, hospital_id, account_role) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.name)
            .bind(&input.unit)
            .bind(&input.profession)
            .bind(&input.profession_category)
            .bind(input.hospital_id)
            .bind(input.account_role.as_deref().unwrap_or(ROLE_STAFF))
            .fetch_one(pool)
            .await
    }

    /// Find an employee by their ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batch lookup by id set, unordered.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = ANY($1)");
        sqlx::query_as::<_, Employee>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Replace all five reviewer links on an employee record.
    pub async fn update_assignments(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoleAssignments,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET \
                 mentor_id = $2, \
                 supervisor_id = $3, \
                 manager_id = $4, \
                 ka_unit_id = $5, \
                 dirut_id = $6, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(input.mentor_id)
            .bind(input.supervisor_id)
            .bind(input.manager_id)
            .bind(input.ka_unit_id)
            .bind(input.dirut_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of the filtered roster, ordered by name. The report query
    /// service paginates this roster and aggregates only the returned page.
    pub async fn filter_roster(
        pool: &PgPool,
        filter: &RosterFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees {ROSTER_WHERE} \
             ORDER BY name ASC, id ASC \
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(filter.hospital_id)
            .bind(&filter.unit)
            .bind(&filter.profession)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the filtered roster (for pagination metadata, independent of
    /// aggregation results).
    pub async fn count_roster(
        pool: &PgPool,
        filter: &RosterFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM employees {ROSTER_WHERE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.hospital_id)
            .bind(&filter.unit)
            .bind(&filter.profession)
            .bind(&filter.search)
            .fetch_one(pool)
            .await
    }
}
