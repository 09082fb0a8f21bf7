//! Sample recipe seeding
//!
//! Recipes come from a JSON array of [`NewRecipe`] objects, either a file named
//! in the config or the copy bundled into the binary.

use std::path::{Path, PathBuf};

use thiserror::Error;
use validator::Validate;

use super::error::DataError;
use super::traits::TransactionalRepository;
use super::types::RecipeInsert;
use crate::domain::recipe::NewRecipe;

const BUNDLED_RECIPES: &str = include_str!("../../data/sample_recipes.json");

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Seed recipe #{index} is invalid: {message}")]
    Invalid { index: usize, message: String },

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Result of [`seed_if_empty`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table was empty and this many recipes were inserted
    Seeded(u64),
    /// The table already held this many recipes; nothing was inserted
    AlreadyPopulated(u64),
}

/// Parse and validate a seed document
pub fn parse_recipes(json: &str) -> Result<Vec<NewRecipe>, SeedError> {
    let recipes: Vec<NewRecipe> = serde_json::from_str(json)?;
    for (index, recipe) in recipes.iter().enumerate() {
        recipe.validate().map_err(|e| SeedError::Invalid {
            index,
            message: e.to_string(),
        })?;
    }
    Ok(recipes)
}

/// Load seed recipes from `path`, or the bundled sample set when `None`
pub async fn load_recipes(path: Option<&Path>) -> Result<Vec<NewRecipe>, SeedError> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SeedError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            parse_recipes(&json)
        }
        None => parse_recipes(BUNDLED_RECIPES),
    }
}

/// Insert the seed recipes only when the recipe table is empty.
///
/// The seed source is not read at all when recipes already exist.
pub async fn seed_if_empty(
    repo: &dyn TransactionalRepository,
    path: Option<&Path>,
) -> Result<SeedOutcome, SeedError> {
    let existing = repo.count_recipes().await?;
    if existing > 0 {
        tracing::debug!(existing, "Recipe table already populated");
        return Ok(SeedOutcome::AlreadyPopulated(existing));
    }

    let recipes = load_recipes(path).await?;
    let rows: Vec<RecipeInsert> = recipes.iter().map(RecipeInsert::from).collect();
    let inserted = repo.insert_recipes(&rows).await?;

    tracing::info!(inserted, "Seeded sample recipes");
    Ok(SeedOutcome::Seeded(inserted))
}
