//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope; use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!` for consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
