//! Route definitions for the activation gate.
//!
//! ```text
//! POST   /                   activate_month
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::activation;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(activation::activate_month))
}
