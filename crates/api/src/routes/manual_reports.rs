//! Route definitions for manual activity logs.
//!
//! ```text
//! POST   /                   create_manual_report
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::manual_reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(manual_reports::create_manual_report))
}
