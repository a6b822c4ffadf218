//! Route definitions for the employee directory.
//!
//! ```text
//! POST   /                           create_employee (admin)
//! GET    /{employee_id}              get_employee
//! PUT    /{employee_id}/assignments  update_assignments (admin)
//! GET    /{employee_id}/activations  list_activations
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{activation, employees};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(employees::create_employee))
        .route("/{employee_id}", get(employees::get_employee))
        .route(
            "/{employee_id}/assignments",
            put(employees::update_assignments),
        )
        .route(
            "/{employee_id}/activations",
            get(activation::list_activations),
        )
}
