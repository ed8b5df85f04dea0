pub mod admin;
pub mod auth;
pub mod chat;
pub mod construction_object;
pub mod construction_site;
pub mod document;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login | /auth/register | /auth/refresh      token issue (public)
/// /auth/me                                          current user (bearer token)
///
/// /projects                                         list
/// /projects/{id}                                    get
/// /projects/{id}/request                            request construction
/// /projects/{id}/completion-status                  completion summary
/// /projects/{id}/final-documents                    list
/// /projects/{id}/final-documents/{doc_id}           get
/// /projects/{id}/final-documents/{doc_id}/sign      sign
/// /projects/{id}/final-documents/{doc_id}/reject    reject
///
/// /documents                                        list (?projectId, ?status)
/// /documents/{id}                                   get
/// /documents/{id}/approve | /reject                 review
///
/// /construction-sites/project/{project_id}          site view
/// /construction-sites/{site_id}/cameras             list
/// /construction-sites/{site_id}/cameras/{camera_id} get
///
/// /construction-objects                             list
/// /construction-objects/{id}                        get
/// /construction-objects/{id}/complete               completion gate
/// /construction-objects/by-project/{project_id}/documents-status
///
/// /chats                                            list
/// /chats/{id}                                       get
/// /chats/{id}/messages                              list, send
/// /chats/{id}/messages/read                         mark specialist messages read
///
/// /admin/...                                        see routes::admin
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/documents", document::router())
        .nest("/construction-sites", construction_site::router())
        .nest("/construction-objects", construction_object::router())
        .nest("/chats", chat::router())
        .nest("/admin", admin::router())
}
