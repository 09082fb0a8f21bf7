//! Favorites API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};

use types::{AddFavoriteRequest, FavoriteResponse, ListFavoritesResponse};

use crate::api::auth::CurrentUser;
use crate::api::extractors::{RecipeIdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::TransactionalService;
use crate::domain::recipe::RecipeDto;

/// Shared state for Favorites API endpoints
#[derive(Clone)]
pub struct FavoritesApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Favorites API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = FavoritesApiState { database };

    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/{recipe_id}", delete(remove_favorite))
        .with_state(state)
}

/// List the caller's favorite recipes
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "favorites",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Favorite recipes", body = ListFavoritesResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::types::ErrorBody)
    )
)]
pub async fn list_favorites(
    State(state): State<FavoritesApiState>,
    user: CurrentUser,
) -> Json<ListFavoritesResponse> {
    let favorites = match state
        .database
        .repository()
        .list_favorite_recipes(user.user_id)
        .await
    {
        Ok(recipes) => recipes.into_iter().map(RecipeDto::from).collect(),
        Err(e) => {
            tracing::warn!(user_id = user.user_id, error = %e, "Listing favorites failed");
            Vec::new()
        }
    };
    Json(ListFavoritesResponse { favorites })
}

/// Add a recipe to the caller's favorites
#[utoipa::path(
    post,
    path = "/api/v1/favorites",
    tag = "favorites",
    security(("bearer" = [])),
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Favorite added", body = FavoriteResponse),
        (status = 200, description = "Favorite already existed", body = FavoriteResponse),
        (status = 404, description = "Recipe not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn add_favorite(
    State(state): State<FavoritesApiState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>), ApiError> {
    let repo = state.database.repository();
    let recipe_id = request.recipe_id;

    if !repo
        .recipe_exists(recipe_id)
        .await
        .map_err(ApiError::from_data)?
    {
        return Err(ApiError::not_found("RECIPE_NOT_FOUND", "Recipe not found"));
    }

    let created = repo
        .add_favorite(user.user_id, recipe_id)
        .await
        .map_err(ApiError::from_data)?;

    let (status, message) = if created {
        tracing::debug!(user_id = user.user_id, recipe_id, "Favorite added");
        (StatusCode::CREATED, "Recipe added to favorites")
    } else {
        (StatusCode::OK, "Already in favorites")
    };

    Ok((
        status,
        Json(FavoriteResponse {
            message: message.to_string(),
            recipe_id,
        }),
    ))
}

/// Remove a recipe from the caller's favorites
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{recipe_id}",
    tag = "favorites",
    security(("bearer" = [])),
    params(("recipe_id" = i64, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Favorite removed", body = FavoriteResponse),
        (status = 404, description = "Recipe is not a favorite", body = crate::api::types::ErrorBody)
    )
)]
pub async fn remove_favorite(
    State(state): State<FavoritesApiState>,
    user: CurrentUser,
    RecipeIdPath(recipe_id): RecipeIdPath,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let removed = state
        .database
        .repository()
        .remove_favorite(user.user_id, recipe_id)
        .await
        .map_err(ApiError::from_data)?;

    if !removed {
        return Err(ApiError::not_found(
            "FAVORITE_NOT_FOUND",
            "Recipe not found in favorites",
        ));
    }

    Ok(Json(FavoriteResponse {
        message: "Recipe removed from favorites".to_string(),
        recipe_id,
    }))
}
