//! TransactionalRepository implementation for PostgreSQL

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::TransactionalRepository;
use crate::data::types::{RecipeInsert, UserRow};
use crate::domain::filters::Prefilter;
use crate::domain::recipe::Recipe;

use super::PostgresService;
use super::repositories::{favorite, recipe, user};

#[async_trait]
impl TransactionalRepository for Arc<PostgresService> {
    // ==================== User Operations ====================

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, DataError> {
        user::create_user(self.pool(), username, email, password_hash)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, id: i64) -> Result<Option<UserRow>, DataError> {
        user::get_user(self.pool(), id).await.map_err(Into::into)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, DataError> {
        user::get_by_username(self.pool(), username)
            .await
            .map_err(Into::into)
    }

    async fn user_exists(&self, username: &str, email: &str) -> Result<bool, DataError> {
        user::user_exists(self.pool(), username, email)
            .await
            .map_err(Into::into)
    }

    // ==================== Recipe Operations ====================

    async fn list_recipes(&self, limit: u32) -> Result<Vec<Recipe>, DataError> {
        recipe::list_recipes(self.pool(), limit)
            .await
            .map_err(Into::into)
    }

    async fn get_recipe(&self, id: i64) -> Result<Option<Recipe>, DataError> {
        recipe::get_recipe(self.pool(), id).await.map_err(Into::into)
    }

    async fn recipe_exists(&self, id: i64) -> Result<bool, DataError> {
        recipe::recipe_exists(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn create_recipe(&self, new: &RecipeInsert) -> Result<Recipe, DataError> {
        recipe::create_recipe(self.pool(), new)
            .await
            .map_err(Into::into)
    }

    async fn insert_recipes(&self, recipes: &[RecipeInsert]) -> Result<u64, DataError> {
        recipe::insert_recipes(self.pool(), recipes)
            .await
            .map_err(Into::into)
    }

    async fn find_recipes_by_name(&self, name: &str) -> Result<Vec<Recipe>, DataError> {
        recipe::find_recipes_by_name(self.pool(), name)
            .await
            .map_err(Into::into)
    }

    async fn search_recipes_by_name(&self, query: &str) -> Result<Vec<Recipe>, DataError> {
        recipe::search_recipes_by_name(self.pool(), query)
            .await
            .map_err(Into::into)
    }

    async fn update_recipe(&self, updated: &Recipe) -> Result<Option<Recipe>, DataError> {
        recipe::update_recipe(self.pool(), updated)
            .await
            .map_err(Into::into)
    }

    async fn delete_recipe(&self, id: i64) -> Result<bool, DataError> {
        recipe::delete_recipe(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn count_recipes(&self) -> Result<u64, DataError> {
        recipe::count_recipes(self.pool()).await.map_err(Into::into)
    }

    async fn delete_all_recipes(&self) -> Result<u64, DataError> {
        recipe::delete_all_recipes(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn prefilter_recipes(&self, prefilter: &Prefilter) -> Result<Vec<Recipe>, DataError> {
        recipe::prefilter_recipes(self.pool(), prefilter)
            .await
            .map_err(Into::into)
    }

    // ==================== Favorite Operations ====================

    async fn list_favorite_recipes(&self, user_id: i64) -> Result<Vec<Recipe>, DataError> {
        favorite::list_favorite_recipes(self.pool(), user_id)
            .await
            .map_err(Into::into)
    }

    async fn add_favorite(&self, user_id: i64, recipe_id: i64) -> Result<bool, DataError> {
        favorite::add_favorite(self.pool(), user_id, recipe_id)
            .await
            .map_err(Into::into)
    }

    async fn remove_favorite(&self, user_id: i64, recipe_id: i64) -> Result<bool, DataError> {
        favorite::remove_favorite(self.pool(), user_id, recipe_id)
            .await
            .map_err(Into::into)
    }
}
