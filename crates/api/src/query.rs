//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?year=` parameter for year-scoped listings.
///
/// The year is deliberately optional at the type level so handlers can
/// reject its absence with a clear validation message instead of axum's
/// generic deserialization error.
#[derive(Debug, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}
