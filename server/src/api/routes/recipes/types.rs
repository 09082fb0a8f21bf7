//! Recipe API types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::filters::{Criteria, FilterKind};
use crate::domain::recipe::{Recipe, RecipeDto};

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeDto>,
}

impl RecipeListResponse {
    pub fn empty() -> Self {
        Self {
            recipes: Vec::new(),
        }
    }
}

impl From<Vec<Recipe>> for RecipeListResponse {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: recipes.into_iter().map(RecipeDto::from).collect(),
        }
    }
}

/// Response for create and update
#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub message: String,
    pub recipe: RecipeDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteRecipeResponse {
    pub message: String,
    pub recipe_id: i64,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the recipe name
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub query: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("Query parameter is required".into()));
    }
    Ok(())
}

/// Criteria from raw query pairs.
///
/// Only the six filter names are read, in a fixed order, and only the first
/// value of each counts. Empty values are skipped.
pub fn criteria_from_query(pairs: &[(String, String)]) -> Criteria {
    FilterKind::ALL
        .iter()
        .filter_map(|kind| {
            pairs
                .iter()
                .find(|(name, _)| name == kind.as_str())
                .filter(|(_, value)| !value.is_empty())
                .map(|(name, value)| (name.clone(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_criteria_fixed_order_first_value() {
        let criteria = criteria_from_query(&pairs(&[
            ("cuisine", "thai"),
            ("time", "30"),
            ("time", "10"),
            ("sort", "name"),
        ]));
        let entries: Vec<(&str, &str)> = criteria.iter().collect();
        assert_eq!(entries, vec![("time", "30"), ("cuisine", "thai")]);
    }

    #[test]
    fn test_criteria_skip_empty_first_value() {
        let criteria = criteria_from_query(&pairs(&[("taste", ""), ("taste", "sweet")]));
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_search_query_requires_text() {
        let blank = SearchQuery {
            query: "   ".to_string(),
        };
        assert!(blank.validate().is_err());
        let ok = SearchQuery {
            query: "curry".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
