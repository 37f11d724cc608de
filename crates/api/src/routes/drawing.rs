//! Route definitions for drawing-scoped operations.

use axum::routing::get;
use axum::Router;

use crate::handlers::drawing;
use crate::state::AppState;

/// Routes mounted at `/drawings`.
///
/// ```text
/// GET    /{id}  -> get_by_id
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(drawing::get_by_id).delete(drawing::delete))
}
