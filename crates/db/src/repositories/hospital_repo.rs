//! Repository for the `hospitals` table.

use mutabaah_core::types::DbId;
use sqlx::PgPool;

use crate::models::hospital::{CreateHospital, Hospital};

/// Column list for hospital queries.
const COLUMNS: &str = "id, name, brand, created_at, updated_at";

/// Provides lookup and create operations for the hospital directory.
pub struct HospitalRepo;

impl HospitalRepo {
    /// Insert a new hospital, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateHospital) -> Result<Hospital, sqlx::Error> {
        let query = format!(
            "INSERT INTO hospitals (name, brand) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hospital>(&query)
            .bind(&input.name)
            .bind(&input.brand)
            .fetch_one(pool)
            .await
    }

    /// Find a hospital by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hospital>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hospitals WHERE id = $1");
        sqlx::query_as::<_, Hospital>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batch lookup by id set, unordered.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<Hospital>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hospitals WHERE id = ANY($1)");
        sqlx::query_as::<_, Hospital>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Resolve a filter identifier to a canonical hospital row.
    ///
    /// Accepts either the numeric id or the brand/name string
    /// (case-insensitive), matching whichever representation the caller
    /// has.
    pub async fn resolve(pool: &PgPool, ident: &str) -> Result<Option<Hospital>, sqlx::Error> {
        if let Ok(id) = ident.parse::<DbId>() {
            return Self::find_by_id(pool, id).await;
        }
        let query = format!(
            "SELECT {COLUMNS} FROM hospitals \
             WHERE LOWER(brand) = LOWER($1) OR LOWER(name) = LOWER($1)"
        );
        sqlx::query_as::<_, Hospital>(&query)
            .bind(ident)
            .fetch_optional(pool)
            .await
    }
}
