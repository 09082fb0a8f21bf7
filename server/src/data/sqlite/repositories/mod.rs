//! SQLite repositories
//!
//! Row types are imported from `crate::data::types`.

pub mod favorite;
pub mod recipe;
pub mod user;

pub use favorite::{add_favorite, list_favorite_recipes, remove_favorite};
pub use recipe::{
    count_recipes, create_recipe, delete_all_recipes, delete_recipe, find_recipes_by_name,
    get_recipe, insert_recipes, list_recipes, prefilter_recipes, recipe_exists,
    search_recipes_by_name, update_recipe,
};
pub use user::{create_user, get_by_username, get_user, user_exists};
