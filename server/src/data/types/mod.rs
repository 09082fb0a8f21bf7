//! Row types shared by the transactional backends (SQLite, PostgreSQL)

use serde::{Deserialize, Serialize};

use crate::domain::recipe::{NewRecipe, Recipe, encode_tokens};

/// User row from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
}

pub(crate) type UserTuple = (i64, String, String, String, i64);

impl From<UserTuple> for UserRow {
    fn from((id, username, email, password_hash, created_at): UserTuple) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }
}

/// Columns for [`UserTuple`]
pub(crate) const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";

/// Recipe row in [`crate::data::sql::RECIPE_COLUMNS`] order
pub(crate) type RecipeTuple = (
    i64,
    String,
    Option<String>,
    Option<String>,
    Option<i64>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

impl From<RecipeTuple> for Recipe {
    fn from(
        (id, name, description, image_url, time, cuisine, difficulty, tools, ingredients, taste): RecipeTuple,
    ) -> Self {
        Self {
            id,
            name,
            description,
            image_url,
            time,
            cuisine,
            difficulty,
            tools,
            ingredients,
            taste,
        }
    }
}

/// Encoded column values for an INSERT
#[derive(Debug, Clone)]
pub struct RecipeInsert {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub time: Option<i64>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    pub tools: String,
    pub ingredients: String,
    pub taste: String,
}

impl From<&NewRecipe> for RecipeInsert {
    fn from(recipe: &NewRecipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            image_url: recipe.image_url.clone(),
            time: recipe.time,
            cuisine: recipe.cuisine.clone(),
            difficulty: recipe.difficulty.clone(),
            tools: encode_tokens(&recipe.tools),
            ingredients: encode_tokens(&recipe.ingredients),
            taste: encode_tokens(&recipe.taste),
        }
    }
}
