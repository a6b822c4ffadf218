//! Route definitions for the monthly submission chain.
//!
//! ```text
//! POST   /                   create_submission
//! GET    /{submission_id}            get_submission
//! POST   /{submission_id}/review     review_submission
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submissions::create_submission))
        .route("/{submission_id}", get(submissions::get_submission))
        .route(
            "/{submission_id}/review",
            post(submissions::review_submission),
        )
}
