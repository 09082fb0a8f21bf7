//! User API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::auth::CurrentUser;
use crate::api::types::ApiError;
use crate::data::TransactionalService;

use types::UserProfileResponse;

/// Shared state for Users API endpoints
#[derive(Clone)]
pub struct UsersApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Users API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = UsersApiState { database };

    Router::new()
        .route("/me", get(get_current_user))
        .with_state(state)
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User profile", body = UserProfileResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::types::ErrorBody),
        (status = 404, description = "User no longer exists", body = crate::api::types::ErrorBody)
    )
)]
pub async fn get_current_user(
    State(state): State<UsersApiState>,
    user: CurrentUser,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let row = state
        .database
        .repository()
        .get_user(user.user_id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| ApiError::not_found("USER_NOT_FOUND", "User not found"))?;

    Ok(Json(UserProfileResponse::from(row)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::api::testing::TestApp;

    #[tokio::test]
    async fn test_me() {
        let app = TestApp::new().await;
        let (user_id, token) = app.login_as("gina").await;

        let (status, body) = app
            .request(Method::GET, "/api/v1/users/me", None, Some(&token))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], user_id);
        assert_eq!(body["username"], "gina");
        assert_eq!(body["email"], "gina@example.com");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_me_for_missing_user() {
        let app = TestApp::new().await;
        let token = app.auth.issue_token(999).unwrap();
        let (status, body) = app
            .request(Method::GET, "/api/v1/users/me", None, Some(&token))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "USER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api/v1/users/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "AUTH_REQUIRED");
    }
}
