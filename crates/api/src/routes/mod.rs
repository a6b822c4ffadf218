pub mod activation;
pub mod adhoc;
pub mod employees;
pub mod health;
pub mod manual_reports;
pub mod reports;
pub mod submissions;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports/mutabaah                         aggregated yearly report (GET)
/// /reports/mutabaah/export                  export variant (GET)
///
/// /activations                              activate a month (POST)
/// /employees/{id}/activations               activation records for a year (GET)
///
/// /manual-reports                           record a manual activity log (POST)
///
/// /submissions                              submit a month for review (POST)
/// /submissions/{id}                         submission with decisions (GET)
/// /submissions/{id}/review                  review decision (POST)
/// /review-queue                             pending items for the caller (GET)
///
/// /adhoc-requests                           file an ad-hoc request (POST)
/// /adhoc-requests/{id}/review               mentor decision (POST)
///
/// /employees                                create directory entry (POST, admin)
/// /employees/{id}                           directory lookup (GET)
/// /employees/{id}/assignments               replace reviewer links (PUT, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/activations", activation::router())
        .nest("/manual-reports", manual_reports::router())
        .nest("/submissions", submissions::router())
        .nest("/adhoc-requests", adhoc::router())
        .nest("/employees", employees::router())
        .route("/review-queue", get(handlers::submissions::get_review_queue))
}
