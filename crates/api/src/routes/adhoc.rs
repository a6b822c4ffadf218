//! Route definitions for ad-hoc requests.
//!
//! ```text
//! POST   /                   create_adhoc_request
//! POST   /{request_id}/review        review_adhoc_request
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::adhoc;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(adhoc::create_adhoc_request))
        .route("/{request_id}/review", post(adhoc::review_adhoc_request))
}
