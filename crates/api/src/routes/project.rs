//! Route definitions for the `/projects` resource.
//!
//! Also nests items, milestones, tasks, invoices, and drawings under
//! `/projects/{project_id}/...`, plus the report and the admin progress
//! override.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{drawing, invoice, item, milestone, project, report, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete
/// PUT    /{id}/progress                      -> override_progress (admin)
/// GET    /{id}/report                        -> project_report
///
/// GET    /{project_id}/items                 -> list_by_project
/// POST   /{project_id}/items                 -> create
/// GET    /{project_id}/items/{id}            -> get_by_id
/// PUT    /{project_id}/items/{id}            -> update
/// DELETE /{project_id}/items/{id}            -> delete
///
/// GET    /{project_id}/milestones            -> list_by_project
/// POST   /{project_id}/milestones            -> create
/// GET    /{project_id}/milestones/{id}       -> get_by_id
/// PUT    /{project_id}/milestones/{id}       -> update
/// DELETE /{project_id}/milestones/{id}       -> delete
///
/// GET    /{project_id}/tasks                 -> list_by_project
/// POST   /{project_id}/tasks                 -> create
///
/// GET    /{project_id}/invoices              -> list_by_project
/// POST   /{project_id}/invoices              -> create
///
/// GET    /{project_id}/drawings              -> list_by_project
/// POST   /{project_id}/drawings              -> create (multipart)
/// ```
pub fn router() -> Router<AppState> {
    let item_routes = Router::new()
        .route("/", get(item::list_by_project).post(item::create))
        .route(
            "/{id}",
            get(item::get_by_id).put(item::update).delete(item::delete),
        );

    let milestone_routes = Router::new()
        .route("/", get(milestone::list_by_project).post(milestone::create))
        .route(
            "/{id}",
            get(milestone::get_by_id)
                .put(milestone::update)
                .delete(milestone::delete),
        );

    let task_routes = Router::new().route("/", get(task::list_by_project).post(task::create));

    let invoice_routes =
        Router::new().route("/", get(invoice::list_by_project).post(invoice::create));

    let drawing_routes =
        Router::new().route("/", get(drawing::list_by_project).post(drawing::create));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/progress", put(project::override_progress))
        .route("/{id}/report", get(report::project_report))
        .nest("/{project_id}/items", item_routes)
        .nest("/{project_id}/milestones", milestone_routes)
        .nest("/{project_id}/tasks", task_routes)
        .nest("/{project_id}/invoices", invoice_routes)
        .nest("/{project_id}/drawings", drawing_routes)
}
