//! Recipe entity and its wire representations

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// Persisted recipe as read from the transactional store.
///
/// `tools`, `ingredients` and `taste` keep the JSON-encoded text exactly as
/// stored; use the accessor methods to get the decoded token lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub time: Option<i64>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    pub tools: Option<String>,
    pub ingredients: Option<String>,
    pub taste: Option<String>,
}

impl Recipe {
    pub fn tools(&self) -> Vec<String> {
        decode_tokens(self.tools.as_deref())
    }

    pub fn ingredients(&self) -> Vec<String> {
        decode_tokens(self.ingredients.as_deref())
    }

    pub fn taste(&self) -> Vec<String> {
        decode_tokens(self.taste.as_deref())
    }
}

/// Decode a stored JSON string array. Missing, `null` or malformed text is an
/// empty list.
fn decode_tokens(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Option<Vec<String>>>(raw) {
        Ok(tokens) => tokens.unwrap_or_default(),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring undecodable recipe token list");
            Vec::new()
        }
    }
}

/// Encode a token list for storage
pub fn encode_tokens(tokens: &[String]) -> String {
    serde_json::to_string(tokens).unwrap_or_else(|_| "[]".to_string())
}

/// Recipe as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub time: Option<i64>,
    pub tools: Vec<String>,
    pub ingredients: Vec<String>,
    pub taste: Vec<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        let tools = recipe.tools();
        let ingredients = recipe.ingredients();
        let taste = recipe.taste();
        Self {
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            image_url: recipe.image_url,
            time: recipe.time,
            tools,
            ingredients,
            taste,
            cuisine: recipe.cuisine,
            difficulty: recipe.difficulty,
        }
    }
}

/// Fields for a new recipe. Only `name` is required.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewRecipe {
    #[validate(length(min = 1, max = 255, message = "Recipe name must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 512, message = "Image URL must be at most 512 characters"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0, message = "Time must be a non-negative number of minutes"))]
    pub time: Option<i64>,
    #[validate(length(max = 120, message = "Cuisine must be at most 120 characters"))]
    pub cuisine: Option<String>,
    #[validate(length(max = 50, message = "Difficulty must be at most 50 characters"))]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub taste: Vec<String>,
}

impl From<&Recipe> for NewRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            image_url: recipe.image_url.clone(),
            time: recipe.time,
            cuisine: recipe.cuisine.clone(),
            difficulty: recipe.difficulty.clone(),
            tools: recipe.tools(),
            ingredients: recipe.ingredients(),
            taste: recipe.taste(),
        }
    }
}

/// Partial update of a recipe.
///
/// Outer `None` leaves a column untouched; `Some(None)` (JSON `null`) clears it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipePatch {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub time: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub cuisine: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub difficulty: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<String>>)]
    pub tools: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<String>>)]
    pub ingredients: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<String>>)]
    pub taste: Option<Option<Vec<String>>>,
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl RecipePatch {
    /// Rejects a patch that would leave the recipe without a name
    pub fn validate_name(&self) -> Result<(), &'static str> {
        match &self.name {
            Some(None) => Err("Recipe name cannot be null"),
            Some(Some(name)) if name.trim().is_empty() => Err("Recipe name cannot be empty"),
            _ => Ok(()),
        }
    }

    /// Apply the patch on top of an existing recipe
    pub fn apply_to(&self, mut recipe: Recipe) -> Recipe {
        if let Some(Some(name)) = &self.name {
            recipe.name = name.clone();
        }
        if let Some(description) = &self.description {
            recipe.description = description.clone();
        }
        if let Some(image_url) = &self.image_url {
            recipe.image_url = image_url.clone();
        }
        if let Some(time) = self.time {
            recipe.time = time;
        }
        if let Some(cuisine) = &self.cuisine {
            recipe.cuisine = cuisine.clone();
        }
        if let Some(difficulty) = &self.difficulty {
            recipe.difficulty = difficulty.clone();
        }
        if let Some(tools) = &self.tools {
            recipe.tools = tools.as_deref().map(encode_tokens);
        }
        if let Some(ingredients) = &self.ingredients {
            recipe.ingredients = ingredients.as_deref().map(encode_tokens);
        }
        if let Some(taste) = &self.taste {
            recipe.taste = taste.as_deref().map(encode_tokens);
        }
        recipe
    }

    /// Apply the patch, then hold the result to the [`NewRecipe`] rules
    pub fn apply_checked(&self, recipe: Recipe) -> Result<Recipe, ValidationErrors> {
        let patched = self.apply_to(recipe);
        NewRecipe::from(&patched).validate()?;
        Ok(patched)
    }
}
