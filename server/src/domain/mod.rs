//! Domain logic for the recipe catalog
//!
//! - `recipe` - Recipe entity, API shapes and stored token lists
//! - `filters` - Prefilter and in-memory strategy engine

pub mod filters;
pub mod recipe;

pub use filters::{Criteria, FilterEngine, Prefilter};
pub use recipe::{NewRecipe, Recipe, RecipeDto, RecipePatch};
