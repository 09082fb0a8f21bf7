//! Recipe repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sql::{Backend, RECIPE_COLUMNS, SqlValue, build_prefilter_query};
use crate::data::sqlite::SqliteError;
use crate::data::types::{RecipeInsert, RecipeTuple};
use crate::domain::filters::Prefilter;
use crate::domain::recipe::Recipe;
use crate::utils::sql::contains_pattern;

/// List recipes in id order, at most `limit`
pub async fn list_recipes(pool: &SqlitePool, limit: u32) -> Result<Vec<Recipe>, SqliteError> {
    let sql = format!("SELECT {} FROM recipes ORDER BY id LIMIT ?", RECIPE_COLUMNS);
    let rows: Vec<RecipeTuple> = sqlx::query_as(&sql).bind(limit).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

pub async fn get_recipe(pool: &SqlitePool, id: i64) -> Result<Option<Recipe>, SqliteError> {
    let sql = format!("SELECT {} FROM recipes WHERE id = ?", RECIPE_COLUMNS);
    let row: Option<RecipeTuple> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(Recipe::from))
}

pub async fn recipe_exists(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Insert a recipe and return it as stored
pub async fn create_recipe(pool: &SqlitePool, recipe: &RecipeInsert) -> Result<Recipe, SqliteError> {
    let id = insert(pool, recipe).await?;
    get_recipe(pool, id)
        .await?
        .ok_or(SqliteError::Database(sqlx::Error::RowNotFound))
}

/// Insert many recipes in one transaction; returns the number inserted
pub async fn insert_recipes(
    pool: &SqlitePool,
    recipes: &[RecipeInsert],
) -> Result<u64, SqliteError> {
    let mut tx = pool.begin().await?;
    for recipe in recipes {
        insert(&mut *tx, recipe).await?;
    }
    tx.commit().await?;
    Ok(recipes.len() as u64)
}

async fn insert<'e, E>(executor: E, recipe: &RecipeInsert) -> Result<i64, SqliteError>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO recipes (name, description, image_url, time, cuisine, difficulty, tools, ingredients, taste)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&recipe.name)
    .bind(&recipe.description)
    .bind(&recipe.image_url)
    .bind(recipe.time)
    .bind(&recipe.cuisine)
    .bind(&recipe.difficulty)
    .bind(&recipe.tools)
    .bind(&recipe.ingredients)
    .bind(&recipe.taste)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Recipes whose name equals `name`, ignoring ASCII case
pub async fn find_recipes_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Vec<Recipe>, SqliteError> {
    let sql = format!(
        "SELECT {} FROM recipes WHERE name = ? COLLATE NOCASE ORDER BY id",
        RECIPE_COLUMNS
    );
    let rows: Vec<RecipeTuple> = sqlx::query_as(&sql).bind(name).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

/// Recipes whose name contains `query`, ignoring ASCII case
pub async fn search_recipes_by_name(
    pool: &SqlitePool,
    query: &str,
) -> Result<Vec<Recipe>, SqliteError> {
    let sql = format!(
        "SELECT {} FROM recipes WHERE name LIKE ? ESCAPE '\\' ORDER BY id",
        RECIPE_COLUMNS
    );
    let rows: Vec<RecipeTuple> = sqlx::query_as(&sql)
        .bind(contains_pattern(query))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

/// Write every column of `recipe` back to its row
pub async fn update_recipe(
    pool: &SqlitePool,
    recipe: &Recipe,
) -> Result<Option<Recipe>, SqliteError> {
    let result = sqlx::query(
        r#"
        UPDATE recipes
        SET name = ?, description = ?, image_url = ?, time = ?, cuisine = ?,
            difficulty = ?, tools = ?, ingredients = ?, taste = ?
        WHERE id = ?
        "#,
    )
    .bind(&recipe.name)
    .bind(&recipe.description)
    .bind(&recipe.image_url)
    .bind(recipe.time)
    .bind(&recipe.cuisine)
    .bind(&recipe.difficulty)
    .bind(&recipe.tools)
    .bind(&recipe.ingredients)
    .bind(&recipe.taste)
    .bind(recipe.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_recipe(pool, recipe.id).await
}

/// Delete a recipe (favorites cascade). Returns true if a row was removed.
pub async fn delete_recipe(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_recipes(pool: &SqlitePool) -> Result<u64, SqliteError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count as u64)
}

/// Delete every recipe; returns the number removed
pub async fn delete_all_recipes(pool: &SqlitePool) -> Result<u64, SqliteError> {
    let result = sqlx::query("DELETE FROM recipes").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Candidate recipes for the in-memory filter engine
pub async fn prefilter_recipes(
    pool: &SqlitePool,
    prefilter: &Prefilter,
) -> Result<Vec<Recipe>, SqliteError> {
    let (sql, params) = build_prefilter_query(prefilter, Backend::Sqlite.dialect());

    let mut query = sqlx::query_as::<_, RecipeTuple>(&sql);
    for value in params.values {
        query = match value {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        };
    }

    let rows = query.fetch_all(pool).await?;
    tracing::trace!(candidates = rows.len(), "Prefilter query complete");
    Ok(rows.into_iter().map(Recipe::from).collect())
}
