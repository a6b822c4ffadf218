use mutabaah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `hospitals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hospital {
    pub id: DbId,
    pub name: String,
    pub brand: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a hospital directory entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHospital {
    pub name: String,
    pub brand: String,
}
