//! Axum route handlers for the Barky API.
//!
//! Every resource gets the same five routes: list and create on the
//! collection path, retrieve, full update and delete on the item path.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use barky_core::{
    Bookmark, BookmarkFields, BookmarkId, NewUser, ResourceStore, Snippet, SnippetFields,
    SnippetId, UserId,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::GatewayError,
    extract::{ApiJson, ApiPath},
};

// ── Shared state ─────────────────────────────────────────────────────────────

type Store = Arc<ResourceStore>;

// ── Response types ────────────────────────────────────────────────────────────

/// Body of every list response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Total number of records of the kind.
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given store.
pub fn create_router(store: Store) -> Router {
    Router::new()
        .route("/bookmarks/", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/{id}/",
            get(retrieve_bookmark).put(update_bookmark).delete(delete_bookmark),
        )
        .route("/snippets/", get(list_snippets).post(create_snippet))
        .route(
            "/snippets/{id}/",
            get(retrieve_snippet).put(update_snippet).delete(delete_snippet),
        )
        .route("/users/", get(list_users).post(create_user))
        .route("/users/{id}/", get(retrieve_user).put(update_user).delete(delete_user))
        .route("/health", get(health))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /bookmarks/`: every bookmark, ascending by id.
pub async fn list_bookmarks(State(store): State<Store>) -> impl IntoResponse {
    Json(ListResponse::from(store.list_bookmarks()))
}

/// `POST /bookmarks/`: insert a full bookmark record, id included.
///
/// # Errors
/// Returns a 409 if the id is taken and a 400 if a field is missing or invalid.
pub async fn create_bookmark(
    State(store): State<Store>,
    ApiJson(body): ApiJson<Bookmark>,
) -> Result<impl IntoResponse, GatewayError> {
    let created = store.create_bookmark(body)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /bookmarks/{id}/`
///
/// # Errors
/// Returns a 404 if the bookmark does not exist.
pub async fn retrieve_bookmark(
    State(store): State<Store>,
    ApiPath(id): ApiPath<BookmarkId>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(store.retrieve_bookmark(id)?))
}

/// `PUT /bookmarks/{id}/`: replace every field; a body `id` is ignored.
///
/// # Errors
/// Returns a 404 if the bookmark does not exist and a 400 for invalid fields.
pub async fn update_bookmark(
    State(store): State<Store>,
    ApiPath(id): ApiPath<BookmarkId>,
    ApiJson(body): ApiJson<BookmarkFields>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(store.update_bookmark(id, body)?))
}

/// `DELETE /bookmarks/{id}/`
///
/// # Errors
/// Returns a 404 if the bookmark does not exist.
pub async fn delete_bookmark(
    State(store): State<Store>,
    ApiPath(id): ApiPath<BookmarkId>,
) -> Result<impl IntoResponse, GatewayError> {
    store.delete_bookmark(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /snippets/`
pub async fn list_snippets(State(store): State<Store>) -> impl IntoResponse {
    Json(ListResponse::from(store.list_snippets()))
}

/// `POST /snippets/`
///
/// # Errors
/// Returns a 409 if the id is taken and a 400 if a field is invalid or the
/// owner does not exist.
pub async fn create_snippet(
    State(store): State<Store>,
    ApiJson(body): ApiJson<Snippet>,
) -> Result<impl IntoResponse, GatewayError> {
    let created = store.create_snippet(body)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /snippets/{id}/`
///
/// # Errors
/// Returns a 404 if the snippet does not exist.
pub async fn retrieve_snippet(
    State(store): State<Store>,
    ApiPath(id): ApiPath<SnippetId>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(store.retrieve_snippet(id)?))
}

/// `PUT /snippets/{id}/`
///
/// # Errors
/// Returns a 404 if the snippet does not exist and a 400 if a field is
/// invalid or the owner does not exist.
pub async fn update_snippet(
    State(store): State<Store>,
    ApiPath(id): ApiPath<SnippetId>,
    ApiJson(body): ApiJson<SnippetFields>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(store.update_snippet(id, body)?))
}

/// `DELETE /snippets/{id}/`
///
/// # Errors
/// Returns a 404 if the snippet does not exist.
pub async fn delete_snippet(
    State(store): State<Store>,
    ApiPath(id): ApiPath<SnippetId>,
) -> Result<impl IntoResponse, GatewayError> {
    store.delete_snippet(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/`
pub async fn list_users(State(store): State<Store>) -> impl IntoResponse {
    Json(ListResponse::from(store.list_users()))
}

/// `POST /users/`: register a username; the id is assigned by the store.
///
/// # Errors
/// Returns a 409 if the username is taken and a 400 if it is invalid.
pub async fn create_user(
    State(store): State<Store>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<impl IntoResponse, GatewayError> {
    let created = store.create_user(body)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /users/{id}/`
///
/// # Errors
/// Returns a 404 if the user does not exist.
pub async fn retrieve_user(
    State(store): State<Store>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(store.retrieve_user(id)?))
}

/// `PUT /users/{id}/`
///
/// # Errors
/// Returns a 404 if the user does not exist, a 409 if another user has the
/// username and a 400 if it is invalid.
pub async fn update_user(
    State(store): State<Store>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(store.update_user(id, body)?))
}

/// `DELETE /users/{id}/`: also deletes the snippets the user owns.
///
/// # Errors
/// Returns a 404 if the user does not exist.
pub async fn delete_user(
    State(store): State<Store>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<impl IntoResponse, GatewayError> {
    store.delete_user(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use barky_core::fixtures::example_bookmark;
    use tower::ServiceExt;

    fn test_store() -> Store {
        Arc::new(ResourceStore::new())
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let app = create_router(test_store());
        let req = match Request::builder().uri("/health").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn list_wraps_results_with_count() {
        let store = test_store();
        if let Err(e) = store.create_bookmark(example_bookmark()) {
            panic!("seed failed: {e}");
        }
        let app = create_router(store);
        let req = match Request::builder().uri("/bookmarks/").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["title"], "Awesome Django");
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected_as_json_error() {
        let app = create_router(test_store());
        let req = match Request::builder().uri("/bookmarks/abc/").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string(), "error body must be JSON");
    }

    #[test]
    fn list_response_count_matches_results() {
        let list = ListResponse::from(vec!["a", "b", "c"]);
        assert_eq!(list.count, 3);
        let json = match serde_json::to_string(&list) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert!(json.contains("\"count\":3"), "missing count field");
        assert!(json.contains("\"results\""), "missing results field");
    }
}
