//! Repository trait for the transactional backends
//!
//! SQLite and PostgreSQL each implement [`TransactionalRepository`] with their
//! own SQL; handlers only ever see the trait object.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{RecipeInsert, UserRow};
use crate::domain::filters::Prefilter;
use crate::domain::recipe::Recipe;

#[async_trait]
pub trait TransactionalRepository: Send + Sync {
    // ==================== User Operations ====================

    /// Create a user; a taken username or email is [`DataError::Conflict`]
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, DataError>;

    async fn get_user(&self, id: i64) -> Result<Option<UserRow>, DataError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, DataError>;

    /// Whether the username or the email is already registered
    async fn user_exists(&self, username: &str, email: &str) -> Result<bool, DataError>;

    // ==================== Recipe Operations ====================

    async fn list_recipes(&self, limit: u32) -> Result<Vec<Recipe>, DataError>;

    async fn get_recipe(&self, id: i64) -> Result<Option<Recipe>, DataError>;

    async fn recipe_exists(&self, id: i64) -> Result<bool, DataError>;

    async fn create_recipe(&self, recipe: &RecipeInsert) -> Result<Recipe, DataError>;

    /// Insert a batch of recipes atomically; returns the number inserted
    async fn insert_recipes(&self, recipes: &[RecipeInsert]) -> Result<u64, DataError>;

    /// Recipes whose name equals `name`, ignoring case
    async fn find_recipes_by_name(&self, name: &str) -> Result<Vec<Recipe>, DataError>;

    /// Recipes whose name contains `query`, ignoring case
    async fn search_recipes_by_name(&self, query: &str) -> Result<Vec<Recipe>, DataError>;

    /// Overwrite a recipe row; `None` if it no longer exists
    async fn update_recipe(&self, recipe: &Recipe) -> Result<Option<Recipe>, DataError>;

    async fn delete_recipe(&self, id: i64) -> Result<bool, DataError>;

    async fn count_recipes(&self) -> Result<u64, DataError>;

    async fn delete_all_recipes(&self) -> Result<u64, DataError>;

    /// Storage-level candidate set for the filter engine
    async fn prefilter_recipes(&self, prefilter: &Prefilter) -> Result<Vec<Recipe>, DataError>;

    // ==================== Favorite Operations ====================

    async fn list_favorite_recipes(&self, user_id: i64) -> Result<Vec<Recipe>, DataError>;

    /// Returns true if created, false if it already existed
    async fn add_favorite(&self, user_id: i64, recipe_id: i64) -> Result<bool, DataError>;

    /// Returns true if removed, false if it did not exist
    async fn remove_favorite(&self, user_id: i64, recipe_id: i64) -> Result<bool, DataError>;
}
