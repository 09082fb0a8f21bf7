//! Recipe catalog endpoints
//!
//! Listing, filtering and searching degrade to an empty list when the store
//! fails. Mutations report errors normally.

pub mod types;

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use types::{
    DeleteRecipeResponse, RecipeListResponse, RecipeResponse, SearchQuery, criteria_from_query,
};

use crate::api::auth::CurrentUser;
use crate::api::extractors::{
    RecipeIdPath, ValidatedJson, ValidatedQuery, format_validation_errors,
};
use crate::api::types::ApiError;
use crate::core::constants::RECIPE_LIST_LIMIT;
use crate::data::types::RecipeInsert;
use crate::data::{DataError, TransactionalRepository, TransactionalService};
use crate::domain::filters::{Criteria, FilterEngine, FilterKind, Prefilter, Strategy};
use crate::domain::recipe::{NewRecipe, Recipe, RecipeDto, RecipePatch};

/// Shared state for recipe endpoints
#[derive(Clone)]
pub struct RecipesApiState {
    pub database: Arc<TransactionalService>,
}

/// Build recipe routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = RecipesApiState { database };

    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/filter", get(filter_recipes))
        .route("/search", get(search_recipes))
        // GET takes a numeric id, PUT and DELETE a recipe name
        .route(
            "/{key}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .with_state(state)
}

/// Prefilter in storage, then let the engine decide
pub async fn run_filter(
    repo: &dyn TransactionalRepository,
    criteria: &Criteria,
) -> Result<Vec<Recipe>, DataError> {
    let prefilter = Prefilter::from_criteria(criteria);
    let candidates = repo.prefilter_recipes(&prefilter).await?;
    let engine = FilterEngine::new(criteria);
    let fields: Vec<FilterKind> = engine.strategies().iter().map(Strategy::kind).collect();
    tracing::debug!(
        pushed_down = !prefilter.is_empty(),
        candidates = candidates.len(),
        ?fields,
        "Filtering recipes"
    );
    Ok(engine.apply(candidates))
}

/// The single recipe carrying `name`, ignoring case
async fn resolve_by_name(
    repo: &dyn TransactionalRepository,
    name: &str,
) -> Result<Recipe, ApiError> {
    let mut matches = repo
        .find_recipes_by_name(name)
        .await
        .map_err(ApiError::from_data)?;

    match matches.len() {
        0 => Err(ApiError::not_found(
            "RECIPE_NOT_FOUND",
            format!("Recipe '{}' not found", name),
        )),
        1 => Ok(matches.remove(0)),
        _ => Err(ApiError::ambiguous_name(
            name,
            matches.iter().map(|r| r.id).collect(),
        )),
    }
}

/// First page of recipes
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "Up to 20 recipes", body = RecipeListResponse)
    )
)]
pub async fn list_recipes(State(state): State<RecipesApiState>) -> Json<RecipeListResponse> {
    match state
        .database
        .repository()
        .list_recipes(RECIPE_LIST_LIMIT)
        .await
    {
        Ok(recipes) => Json(recipes.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Listing recipes failed, returning empty list");
            Json(RecipeListResponse::empty())
        }
    }
}

/// Create a recipe
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    tag = "recipes",
    request_body = NewRecipe,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::api::types::ErrorBody)
    )
)]
pub async fn create_recipe(
    State(state): State<RecipesApiState>,
    user: Option<CurrentUser>,
    ValidatedJson(new_recipe): ValidatedJson<NewRecipe>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let recipe = state
        .database
        .repository()
        .create_recipe(&RecipeInsert::from(&new_recipe))
        .await
        .map_err(ApiError::from_data)?;

    tracing::info!(
        recipe_id = recipe.id,
        created_by = ?user.map(|u| u.user_id),
        "Recipe created"
    );

    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse {
            message: "Recipe created successfully".to_string(),
            recipe: RecipeDto::from(recipe),
        }),
    ))
}

/// Get a recipe by id
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    tag = "recipes",
    params(("id" = i64, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe", body = RecipeDto),
        (status = 400, description = "Id is not an integer", body = crate::api::types::ErrorBody),
        (status = 404, description = "Recipe not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn get_recipe(
    State(state): State<RecipesApiState>,
    RecipeIdPath(id): RecipeIdPath,
) -> Result<Json<RecipeDto>, ApiError> {
    state
        .database
        .repository()
        .get_recipe(id)
        .await
        .map_err(ApiError::from_data)?
        .map(|recipe| Json(RecipeDto::from(recipe)))
        .ok_or_else(|| ApiError::not_found("RECIPE_NOT_FOUND", "Recipe not found"))
}

/// Partially update the recipe with the given name
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{name}",
    tag = "recipes",
    params(("name" = String, Path, description = "Recipe name, matched ignoring case")),
    request_body = RecipePatch,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 404, description = "No recipe with this name", body = crate::api::types::ErrorBody),
        (status = 409, description = "Several recipes share this name", body = crate::api::types::ErrorBody)
    )
)]
pub async fn update_recipe(
    State(state): State<RecipesApiState>,
    Path(name): Path<String>,
    payload: Result<Json<RecipePatch>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    // A body-less PUT is an empty patch
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(JsonRejection::MissingJsonContentType(_)) => RecipePatch::default(),
        Err(rejection) => {
            return Err(ApiError::bad_request(
                "JSON_PARSE_ERROR",
                rejection.body_text(),
            ));
        }
    };
    patch
        .validate_name()
        .map_err(|message| ApiError::bad_request("VALIDATION_ERROR", message))?;

    let repo = state.database.repository();
    let existing = resolve_by_name(repo.as_ref(), &name).await?;
    let recipe_id = existing.id;

    let patched = patch.apply_checked(existing).map_err(|errors| {
        ApiError::bad_request("VALIDATION_ERROR", format_validation_errors(&errors))
    })?;

    let updated = repo
        .update_recipe(&patched)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| {
            ApiError::not_found("RECIPE_NOT_FOUND", format!("Recipe '{}' not found", name))
        })?;

    tracing::info!(recipe_id, "Recipe updated");

    Ok(Json(RecipeResponse {
        message: format!("Recipe '{}' updated successfully", name),
        recipe: RecipeDto::from(updated),
    }))
}

/// Delete the recipe with the given name
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{name}",
    tag = "recipes",
    params(("name" = String, Path, description = "Recipe name, matched ignoring case")),
    responses(
        (status = 200, description = "Recipe deleted", body = DeleteRecipeResponse),
        (status = 404, description = "No recipe with this name", body = crate::api::types::ErrorBody),
        (status = 409, description = "Several recipes share this name", body = crate::api::types::ErrorBody)
    )
)]
pub async fn delete_recipe(
    State(state): State<RecipesApiState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteRecipeResponse>, ApiError> {
    let repo = state.database.repository();
    let recipe = resolve_by_name(repo.as_ref(), &name).await?;

    if !repo
        .delete_recipe(recipe.id)
        .await
        .map_err(ApiError::from_data)?
    {
        return Err(ApiError::not_found(
            "RECIPE_NOT_FOUND",
            format!("Recipe '{}' not found", name),
        ));
    }

    tracing::info!(recipe_id = recipe.id, "Recipe deleted");

    Ok(Json(DeleteRecipeResponse {
        message: format!("Recipe '{}' deleted successfully", name),
        recipe_id: recipe.id,
    }))
}

/// Two-layer recipe filter
#[utoipa::path(
    get,
    path = "/api/v1/recipes/filter",
    tag = "recipes",
    params(
        ("time" = Option<String>, Query, description = "Maximum cooking time in minutes"),
        ("tools" = Option<String>, Query, description = "Comma-separated tools, any one must match exactly"),
        ("ingredients" = Option<String>, Query, description = "Comma-separated ingredients, partial match"),
        ("taste" = Option<String>, Query, description = "Comma-separated taste profiles, exact match"),
        ("cuisine" = Option<String>, Query, description = "Cuisine, partial match"),
        ("difficulty" = Option<String>, Query, description = "Difficulty, partial match")
    ),
    responses(
        (status = 200, description = "Matching recipes; empty on any failure", body = RecipeListResponse)
    )
)]
pub async fn filter_recipes(
    State(state): State<RecipesApiState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<RecipeListResponse> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable filter query, returning empty list");
            return Json(RecipeListResponse::empty());
        }
    };
    let criteria = criteria_from_query(&pairs);

    match run_filter(state.database.repository().as_ref(), &criteria).await {
        Ok(recipes) => Json(recipes.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Filtering recipes failed, returning empty list");
            Json(RecipeListResponse::empty())
        }
    }
}

/// Search recipes by name
#[utoipa::path(
    get,
    path = "/api/v1/recipes/search",
    tag = "recipes",
    params(SearchQuery),
    responses(
        (status = 200, description = "Recipes whose name contains the query", body = RecipeListResponse),
        (status = 400, description = "Query missing or blank", body = crate::api::types::ErrorBody)
    )
)]
pub async fn search_recipes(
    State(state): State<RecipesApiState>,
    ValidatedQuery(params): ValidatedQuery<SearchQuery>,
) -> Json<RecipeListResponse> {
    match state
        .database
        .repository()
        .search_recipes_by_name(params.query.trim())
        .await
    {
        Ok(recipes) => Json(recipes.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Recipe search failed, returning empty list");
            Json(RecipeListResponse::empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{Value, json};

    use super::*;
    use crate::api::testing::TestApp;

    fn names(body: &Value) -> Vec<String> {
        body["recipes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_list_is_empty_then_seeded() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api/v1/recipes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"recipes": []}));

        let seeded = app.seed().await;
        let (_, body) = app.get("/api/v1/recipes").await;
        assert_eq!(body["recipes"].as_array().unwrap().len() as u64, seeded);
        assert!(body["recipes"][0]["tools"].is_array());
    }

    #[tokio::test]
    async fn test_filter_two_layers() {
        let app = TestApp::new().await;
        app.seed().await;

        let cases: &[(&str, &[&str])] = &[
            ("time=30&cuisine=italian", &["Spaghetti Carbonara"]),
            (
                "ingredients=chicken",
                &["Chicken Tikka Masala", "Chicken Caesar Salad"],
            ),
            ("tools=oven&taste=sweet", &["Chocolate Chip Cookies"]),
            ("ingredients=tofu,shrimp", &["Pad Thai", "Miso Soup"]),
            ("tools=ove", &[]),
            (
                "time=20",
                &["Greek Salad", "Miso Soup", "Chicken Caesar Salad"],
            ),
        ];
        for (query, expected) in cases {
            let (status, body) = app.get(&format!("/api/v1/recipes/filter?{}", query)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(names(&body), *expected, "{query}");
        }
    }

    #[tokio::test]
    async fn test_filter_drops_invalid_and_unknown_criteria() {
        let app = TestApp::new().await;
        let total = app.seed().await as usize;

        let (_, thai) = app.get("/api/v1/recipes/filter?cuisine=thai").await;
        let (_, with_bad_time) = app
            .get("/api/v1/recipes/filter?time=abc&cuisine=thai")
            .await;
        assert_eq!(names(&thai), vec!["Pad Thai", "Mango Sticky Rice"]);
        assert_eq!(names(&with_bad_time), names(&thai));

        let (_, unknown) = app.get("/api/v1/recipes/filter?rating=5").await;
        assert_eq!(names(&unknown).len(), total);

        let (_, none) = app.get("/api/v1/recipes/filter").await;
        assert_eq!(names(&none).len(), total);
    }

    #[tokio::test]
    async fn test_filter_time_zero_matches_nothing_seeded() {
        let app = TestApp::new().await;
        app.seed().await;
        // Prefilter keeps time <= 0, the engine ignores the criterion
        let (status, body) = app.get("/api/v1/recipes/filter?time=0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(names(&body).is_empty());
    }

    #[tokio::test]
    async fn test_run_filter_matches_engine_over_full_catalog() {
        let app = TestApp::new().await;
        app.seed().await;
        let repo = app.database.repository();
        let all = repo.prefilter_recipes(&Prefilter::default()).await.unwrap();

        let queries: &[&[(&str, &str)]] = &[
            &[("time", "45"), ("difficulty", "easy")],
            &[("cuisine", "AMERICAN")],
            &[("difficulty", "med"), ("time", "40")],
            &[("cuisine", "  ")],
        ];
        for pairs in queries {
            let criteria: Criteria = pairs.iter().copied().collect();
            let two_layer = run_filter(repo.as_ref(), &criteria).await.unwrap();
            let engine_only = FilterEngine::new(&criteria).apply(all.clone());
            assert_eq!(two_layer, engine_only, "{pairs:?}");
        }
    }

    #[tokio::test]
    async fn test_search() {
        let app = TestApp::new().await;
        app.seed().await;

        let (status, body) = app.get("/api/v1/recipes/search?query=%20CHICKEN%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            names(&body),
            vec!["Chicken Tikka Masala", "Chicken Caesar Salad"]
        );

        let (_, body) = app.get("/api/v1/recipes/search?query=100%25").await;
        assert!(names(&body).is_empty());

        for uri in ["/api/v1/recipes/search?query=%20", "/api/v1/recipes/search"] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let app = TestApp::new().await;
        let (status, body) = app
            .post(
                "/api/v1/recipes",
                json!({"name": "Toast", "time": 3, "tools": ["toaster"]}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Recipe created successfully");
        assert_eq!(body["recipe"]["tools"], json!(["toaster"]));
        assert_eq!(body["recipe"]["ingredients"], json!([]));
        let id = body["recipe"]["id"].as_i64().unwrap();

        let (status, body) = app.get(&format!("/api/v1/recipes/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Toast");
        assert_eq!(body["time"], 3);

        let (status, _) = app.get("/api/v1/recipes/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app.get("/api/v1/recipes/toast").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_RECIPE_ID");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let app = TestApp::new().await;
        let (status, body) = app.post("/api/v1/recipes", json!({"time": 5})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        let (status, _) = app.post("/api/v1/recipes", json!({"name": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_optional_token() {
        let app = TestApp::new().await;
        let (_, token) = app.login_as("cook").await;

        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/recipes",
                Some(json!({"name": "Omelette"})),
                Some(&token),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        // An invalid token does not block an optional-auth route
        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/recipes",
                Some(json!({"name": "Frittata"})),
                Some("garbage"),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_update_by_name() {
        let app = TestApp::new().await;
        app.seed().await;

        let (status, body) = app
            .request(
                Method::PUT,
                "/api/v1/recipes/greek%20salad",
                Some(json!({"time": 12, "cuisine": null, "taste": ["fresh"]})),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["message"], "Recipe 'greek salad' updated successfully");
        assert_eq!(body["recipe"]["name"], "Greek Salad");
        assert_eq!(body["recipe"]["time"], 12);
        assert_eq!(body["recipe"]["cuisine"], Value::Null);
        assert_eq!(body["recipe"]["difficulty"], "Easy");
        assert_eq!(body["recipe"]["taste"], json!(["fresh"]));

        let (status, _) = app
            .request(
                Method::PUT,
                "/api/v1/recipes/Greek%20Salad",
                Some(json!({"name": null})),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .request(Method::PUT, "/api/v1/recipes/Nope", Some(json!({})), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_without_body_is_noop() {
        let app = TestApp::new().await;
        app.seed().await;
        let (status, body) = app
            .request(Method::PUT, "/api/v1/recipes/Pad%20Thai", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recipe"]["time"], 35);
    }

    #[tokio::test]
    async fn test_update_enforces_create_limits() {
        let app = TestApp::new().await;
        app.seed().await;

        for patch in [json!({"time": -5}), json!({"name": "x".repeat(300)})] {
            let (status, body) = app
                .request(Method::PUT, "/api/v1/recipes/Pad%20Thai", Some(patch.clone()), None)
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{patch}");
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }

        let (status, body) = app
            .request(Method::PUT, "/api/v1/recipes/Pad%20Thai", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recipe"]["name"], "Pad Thai");
        assert_eq!(body["recipe"]["time"], 35);
    }

    #[tokio::test]
    async fn test_ambiguous_name_conflicts() {
        let app = TestApp::new().await;
        let mut ids = Vec::new();
        for name in ["Stew", "STEW"] {
            let (_, body) = app.post("/api/v1/recipes", json!({"name": name})).await;
            ids.push(body["recipe"]["id"].as_i64().unwrap());
        }

        let (status, body) = app
            .request(Method::DELETE, "/api/v1/recipes/stew", None, None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["recipe_ids"], json!(ids));

        let (status, _) = app
            .request(Method::PUT, "/api/v1/recipes/stew", Some(json!({})), None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let app = TestApp::new().await;
        let total = app.seed().await;

        let (status, body) = app
            .request(Method::DELETE, "/api/v1/recipes/MISO%20SOUP", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["recipe_id"].is_i64());

        let (status, _) = app
            .request(Method::DELETE, "/api/v1/recipes/MISO%20SOUP", None, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let count = app.database.repository().count_recipes().await.unwrap();
        assert_eq!(count, total - 1);
    }
}
