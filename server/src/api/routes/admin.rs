//! Administrative endpoints: seeding and clearing the catalog

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::types::ApiError;
use crate::data::{SeedError, SeedOutcome, TransactionalService, seed_if_empty};

#[derive(Clone)]
pub struct AdminApiState {
    pub database: Arc<TransactionalService>,
    /// Seed document; the bundled sample set when `None`
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InitDbCreatedResponse {
    pub message: String,
    pub recipes_created: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InitDbExistingResponse {
    pub message: String,
    pub recipes_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteAllResponse {
    pub message: String,
    pub recipes_deleted: u64,
}

pub fn routes(database: Arc<TransactionalService>, seed_file: Option<PathBuf>) -> Router<()> {
    Router::new()
        .route("/init-db", post(init_db))
        .route("/recipes", delete(delete_all_recipes))
        .with_state(AdminApiState {
            database,
            seed_file,
        })
}

/// Seed sample recipes when the catalog is empty
#[utoipa::path(
    post,
    path = "/api/v1/admin/init-db",
    tag = "admin",
    responses(
        (status = 201, description = "Sample recipes inserted", body = InitDbCreatedResponse),
        (status = 200, description = "Catalog already populated", body = InitDbExistingResponse),
        (status = 500, description = "Seeding failed", body = crate::api::types::ErrorBody)
    )
)]
pub async fn init_db(State(state): State<AdminApiState>) -> Result<Response, ApiError> {
    let repo = state.database.repository();
    let outcome = seed_if_empty(repo.as_ref(), state.seed_file.as_deref())
        .await
        .map_err(|e| match e {
            SeedError::Data(e) => ApiError::from_data(e),
            other => {
                tracing::error!(error = %other, "Seeding failed");
                ApiError::internal(format!("Database initialization failed: {}", other))
            }
        })?;

    Ok(match outcome {
        SeedOutcome::Seeded(n) => (
            StatusCode::CREATED,
            Json(InitDbCreatedResponse {
                message: format!("Database initialized successfully with {} sample recipes", n),
                recipes_created: n,
            }),
        )
            .into_response(),
        SeedOutcome::AlreadyPopulated(n) => Json(InitDbExistingResponse {
            message: format!("Database already contains {} recipes", n),
            recipes_count: n,
        })
        .into_response(),
    })
}

/// Delete every recipe; favorites go with them
#[utoipa::path(
    delete,
    path = "/api/v1/admin/recipes",
    tag = "admin",
    responses(
        (status = 200, description = "All recipes deleted", body = DeleteAllResponse)
    )
)]
pub async fn delete_all_recipes(
    State(state): State<AdminApiState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let repo = state.database.repository();
    if repo.count_recipes().await.map_err(ApiError::from_data)? == 0 {
        return Ok(Json(DeleteAllResponse {
            message: "No recipes to delete".to_string(),
            recipes_deleted: 0,
        }));
    }

    let deleted = repo
        .delete_all_recipes()
        .await
        .map_err(ApiError::from_data)?;
    tracing::warn!(deleted, "Deleted all recipes");

    Ok(Json(DeleteAllResponse {
        message: format!("Successfully deleted all {} recipes", deleted),
        recipes_deleted: deleted,
    }))
}
