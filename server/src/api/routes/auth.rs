//! Authentication API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::auth::{
    AuthManager, AuthState, CurrentUser, hash_password, require_auth, verify_password,
};
use crate::api::extractors::ValidatedJson;
use crate::api::types::{ApiError, MessageResponse};
use crate::data::{DataError, TransactionalService};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80, message = "Username must be 1-80 characters"))]
    pub username: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub message: String,
}

#[derive(Clone)]
pub struct AuthRoutesState {
    pub auth_manager: Arc<AuthManager>,
    pub database: Arc<TransactionalService>,
}

/// Create auth routes
pub fn routes(auth_manager: Arc<AuthManager>, database: Arc<TransactionalService>) -> Router {
    let logout_routes = Router::new()
        .route("/logout", post(logout))
        .route_layer(from_fn_with_state(
            AuthState {
                auth_manager: auth_manager.clone(),
            },
            require_auth,
        ));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(AuthRoutesState {
            auth_manager,
            database,
        })
        .merge(logout_routes)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::api::types::ErrorBody),
        (status = 409, description = "Username or email already taken", body = crate::api::types::ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AuthRoutesState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let repo = state.database.repository();

    if repo
        .user_exists(&request.username, &request.email)
        .await
        .map_err(ApiError::from_data)?
    {
        return Err(ApiError::conflict("USER_EXISTS", "User already exists"));
    }

    let password = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing task failed");
            ApiError::internal("Failed to hash password")
        })?;
    // A concurrent registration can still win the race; the unique index decides.
    let user = repo
        .create_user(&request.username, &request.email, &password_hash)
        .await
        .map_err(|e| match e {
            DataError::Conflict(_) => ApiError::conflict("USER_EXISTS", "User already exists"),
            other => ApiError::from_data(other),
        })?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid username or password", body = crate::api::types::ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AuthRoutesState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let invalid = || ApiError::unauthorized("INVALID_CREDENTIALS", "Invalid username or password");

    let user = state
        .database
        .repository()
        .get_user_by_username(&request.username)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(invalid)?;

    let password = request.password.clone();
    let stored = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            ApiError::internal("Failed to verify password")
        })?
        .unwrap_or_else(|e| {
            tracing::warn!(user_id = user.id, error = %e, "Stored password hash is unusable");
            false
        });
    if !verified {
        tracing::debug!(username = %request.username, "Rejected login");
        return Err(invalid());
    }

    let access_token = state.auth_manager.issue_token(user.id).map_err(|e| {
        tracing::error!(error = %e, "Failed to issue access token");
        ApiError::internal("Failed to issue access token")
    })?;

    Ok(Json(LoginResponse {
        access_token,
        message: "Login successful".to_string(),
    }))
}

/// Log out; tokens are stateless, so the client just discards its token
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::types::ErrorBody)
    )
)]
pub async fn logout(user: CurrentUser) -> Json<MessageResponse> {
    tracing::debug!(user_id = user.user_id, "User logged out");
    Json(MessageResponse::new("Logout successful"))
}
