pub mod admin;
pub mod auth;
pub mod company;
pub mod dashboard;
pub mod drawing;
pub mod health;
pub mod invoice;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                login (public)
/// /auth/refresh                              refresh (public)
/// /auth/logout                               logout (requires auth)
///
/// /projects                                  list, create
/// /projects/{id}                             get, update, delete
/// /projects/{id}/progress                    admin override (PUT)
/// /projects/{id}/report                      assembled report (GET)
/// /projects/{project_id}/items               list, create
/// /projects/{project_id}/items/{id}          get, update, delete
/// /projects/{project_id}/milestones          list, create
/// /projects/{project_id}/milestones/{id}     get, update, delete
/// /projects/{project_id}/tasks               list, create
/// /projects/{project_id}/invoices            list, create
/// /projects/{project_id}/drawings            list, upload (multipart)
///
/// /tasks/{id}                                get, update, delete
/// /tasks/{id}/move                           move within/across columns (POST)
///
/// /invoices/{id}                             get, update, delete
/// /invoices/{id}/file                        attach document (multipart POST)
///
/// /drawings/{id}                             get, delete
///
/// /companies                                 list, create
/// /companies/{id}                            get, update, delete
///
/// /dashboard                                 summary (GET)
///
/// /admin/users                               list, create (admin only)
/// /admin/users/{id}                          get, update, delete
/// /admin/audit-logs                          query with filters (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Project routes (also nests items, milestones, project-scoped
        // tasks/invoices/drawings, and the report).
        .nest("/projects", project::router())
        // Task-scoped operations (get, update, move, delete).
        .nest("/tasks", task::router())
        // Invoice-scoped operations (get, update, file upload, delete).
        .nest("/invoices", invoice::router())
        // Drawing-scoped operations (get, delete).
        .nest("/drawings", drawing::router())
        // Companies.
        .nest("/companies", company::router())
        // Dashboard summary.
        .nest("/dashboard", dashboard::router())
        // Admin routes (user management + audit logs).
        .nest("/admin", admin::router())
}
