//! Route definitions for the report query service.
//!
//! ```text
//! GET    /mutabaah           get_mutabaah_report
//! GET    /mutabaah/export    export_mutabaah_report
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mutabaah", get(reports::get_mutabaah_report))
        .route("/mutabaah/export", get(reports::export_mutabaah_report))
}
