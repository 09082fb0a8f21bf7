//! Favorites API types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::recipe::RecipeDto;

#[derive(Debug, Serialize, ToSchema)]
pub struct ListFavoritesResponse {
    pub favorites: Vec<RecipeDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddFavoriteRequest {
    pub recipe_id: i64,
}

/// Response for add and remove
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteResponse {
    pub message: String,
    pub recipe_id: i64,
}
