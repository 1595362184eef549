//! HTTP handlers for the user resource
//!
//! Status-code contract:
//!
//! - `GET /users/` answers 200 with a JSON array, or 204 when empty
//! - `GET /users/{id}` answers 200, or 404 when the id has no row
//! - `POST /users/` answers 201 with the created object and a Location header
//! - `PUT /users/{id}` answers 200 with the updated object, or 404
//! - `DELETE /users/{id}` answers 204, or 404
//!
//! The trailing slash on the collection path is significant. Non-integer id
//! segments and malformed JSON bodies are rejected by the axum extractors
//! before these handlers run.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::UserResource;
use crate::responses::{Created, NoContent};
use crate::state::AppState;

/// Full application router: user routes plus health probes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/health", get(crate::health::health))
        .route("/ready", get(crate::health::readiness))
        .with_state(state)
}

/// List all users
///
/// An empty store answers 204 with no body rather than an empty array.
pub async fn list_users(State(state): State<AppState>) -> Result<Response> {
    let users = state.users().list_users().await?;
    info!("Listing {} users", users.len());

    if users.is_empty() {
        return Ok(NoContent.into_response());
    }
    Ok(Json(users).into_response())
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResource>> {
    state
        .users()
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserResource>,
) -> Result<Created<UserResource>> {
    let created = state.users().create_user(payload).await?;
    info!("Created user {:?} ({})", created.id, created.username);

    let location = created.id.map(|id| format!("/users/{}", id));
    let mut response = Created::new(created);
    if let Some(location) = location {
        response = response.with_location(location);
    }
    Ok(response)
}

/// Update a user by id
///
/// The path id wins over any id in the payload.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserResource>,
) -> Result<Json<UserResource>> {
    let updated = state
        .users()
        .update_user(id, payload)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?;
    info!("Updated user {}", id);
    Ok(Json(updated))
}

/// Delete a user by id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<NoContent> {
    if state.users().delete_user(id).await? {
        info!("Deleted user {}", id);
        Ok(NoContent)
    } else {
        Err(Error::NotFound(format!("User {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::repository::memory::InMemoryUserRepository;
    use crate::service::UserService;

    fn app() -> Router {
        let users = UserService::new(Arc::new(InMemoryUserRepository::new()));
        router(AppState::new(Config::default(), users))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn delete_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn admin_payload() -> Value {
        json!({"username": "admin", "email": "admin@example.com", "password": "password"})
    }

    #[tokio::test]
    async fn test_list_users_empty_store_answers_204() {
        let app = app();
        let response = app.oneshot(get_request("/users/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_answers_201_with_assigned_id() {
        let app = app();
        let response = app
            .oneshot(json_request("POST", "/users/", admin_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/users/1"
        );
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({
                "id": 1,
                "username": "admin",
                "email": "admin@example.com",
                "password": "password"
            })
        );
    }

    #[tokio::test]
    async fn test_create_user_ignores_supplied_id() {
        let app = app();
        let mut payload = admin_payload();
        payload["id"] = json!(42);

        let response = app
            .oneshot(json_request("POST", "/users/", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["id"], 1);
    }

    #[tokio::test]
    async fn test_get_user_after_create() {
        let app = app();
        app.clone()
            .oneshot(json_request("POST", "/users/", admin_payload()))
            .await
            .unwrap();

        let response = app.clone().oneshot(get_request("/users/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["username"], "admin");

        let missing = app.oneshot(get_request("/users/99")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_users_after_creates() {
        let app = app();
        for name in ["admin", "user01"] {
            let payload = json!({
                "username": name,
                "email": format!("{}@example.com", name),
                "password": "password"
            });
            app.clone()
                .oneshot(json_request("POST", "/users/", payload))
                .await
                .unwrap();
        }

        let response = app.oneshot(get_request("/users/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["username"], "admin");
        assert_eq!(body[1]["username"], "user01");
    }

    #[tokio::test]
    async fn test_update_user_answers_200_and_persists() {
        let app = app();
        app.clone()
            .oneshot(json_request("POST", "/users/", admin_payload()))
            .await
            .unwrap();

        let update = json!({
            "username": "admin1",
            "email": "admin1@example.com",
            "password": "password1"
        });
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/users/1", update))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["username"], "admin1");
        assert_eq!(body["email"], "admin1@example.com");
        assert_eq!(body["password"], "password1");

        let fetched = app.oneshot(get_request("/users/1")).await.unwrap();
        let body = body_json(fetched).await;
        assert_eq!(body["username"], "admin1");
    }

    #[tokio::test]
    async fn test_update_missing_user_answers_404() {
        let app = app();
        let response = app
            .oneshot(json_request("PUT", "/users/99", admin_payload()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_user_answers_204_then_404() {
        let app = app();
        app.clone()
            .oneshot(json_request("POST", "/users/", admin_payload()))
            .await
            .unwrap();

        let first = app.clone().oneshot(delete_request("/users/1")).await.unwrap();
        assert_eq!(first.status(), StatusCode::NO_CONTENT);

        let second = app.clone().oneshot(delete_request("/users/1")).await.unwrap();
        assert_eq!(second.status(), StatusCode::NOT_FOUND);

        let fetched = app.oneshot(get_request("/users/1")).await.unwrap();
        assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_404_body_carries_error_shape() {
        let app = app();
        let response = app.oneshot(get_request("/users/99")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_integer_id_is_rejected_before_handlers() {
        let app = app();
        let response = app.oneshot(get_request("/users/abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_collection_path_without_trailing_slash_is_unknown() {
        let app = app();
        let response = app.oneshot(get_request("/users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_and_readiness() {
        let app = app();

        let health = app.clone().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
        let body = body_json(health).await;
        assert_eq!(body["status"], "healthy");

        let ready = app.oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(ready.status(), StatusCode::OK);
        let body = body_json(ready).await;
        assert_eq!(body["ready"], true);
    }
}
