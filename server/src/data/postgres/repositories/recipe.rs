//! Recipe repository for PostgreSQL operations

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::sql::{Backend, RECIPE_COLUMNS, SqlValue, build_prefilter_query};
use crate::data::types::{RecipeInsert, RecipeTuple};
use crate::domain::filters::Prefilter;
use crate::domain::recipe::Recipe;
use crate::utils::sql::contains_pattern;

const INSERT_SQL: &str = r#"
    INSERT INTO recipes (name, description, image_url, time, cuisine, difficulty, tools, ingredients, taste)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
"#;

pub async fn list_recipes(pool: &PgPool, limit: u32) -> Result<Vec<Recipe>, PostgresError> {
    let sql = format!("SELECT {} FROM recipes ORDER BY id LIMIT $1", RECIPE_COLUMNS);
    let rows: Vec<RecipeTuple> = sqlx::query_as(&sql)
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

pub async fn get_recipe(pool: &PgPool, id: i64) -> Result<Option<Recipe>, PostgresError> {
    let sql = format!("SELECT {} FROM recipes WHERE id = $1", RECIPE_COLUMNS);
    let row: Option<RecipeTuple> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(Recipe::from))
}

pub async fn recipe_exists(pool: &PgPool, id: i64) -> Result<bool, PostgresError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recipes WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn create_recipe(pool: &PgPool, recipe: &RecipeInsert) -> Result<Recipe, PostgresError> {
    let sql = format!("{} RETURNING {}", INSERT_SQL, RECIPE_COLUMNS);
    let row: RecipeTuple = bind_insert(sqlx::query_as(&sql), recipe)
        .fetch_one(pool)
        .await?;
    Ok(row.into())
}

/// Insert many recipes in one transaction; returns the number inserted
pub async fn insert_recipes(pool: &PgPool, recipes: &[RecipeInsert]) -> Result<u64, PostgresError> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for recipe in recipes {
        let result = sqlx::query(INSERT_SQL)
            .bind(&recipe.name)
            .bind(&recipe.description)
            .bind(&recipe.image_url)
            .bind(recipe.time)
            .bind(&recipe.cuisine)
            .bind(&recipe.difficulty)
            .bind(&recipe.tools)
            .bind(&recipe.ingredients)
            .bind(&recipe.taste)
            .execute(&mut *tx)
            .await?;
        inserted += result.rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

fn bind_insert<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, RecipeTuple, sqlx::postgres::PgArguments>,
    recipe: &'q RecipeInsert,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, RecipeTuple, sqlx::postgres::PgArguments> {
    query
        .bind(&recipe.name)
        .bind(&recipe.description)
        .bind(&recipe.image_url)
        .bind(recipe.time)
        .bind(&recipe.cuisine)
        .bind(&recipe.difficulty)
        .bind(&recipe.tools)
        .bind(&recipe.ingredients)
        .bind(&recipe.taste)
}

/// Recipes whose name equals `name`, ignoring ASCII case like SQLite's NOCASE
pub async fn find_recipes_by_name(pool: &PgPool, name: &str) -> Result<Vec<Recipe>, PostgresError> {
    let sql = format!(
        "SELECT {} FROM recipes WHERE LOWER(name COLLATE \"C\") = LOWER($1 COLLATE \"C\") ORDER BY id",
        RECIPE_COLUMNS
    );
    let rows: Vec<RecipeTuple> = sqlx::query_as(&sql).bind(name).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

/// Recipes whose name contains `query`, ignoring ASCII case
pub async fn search_recipes_by_name(
    pool: &PgPool,
    query: &str,
) -> Result<Vec<Recipe>, PostgresError> {
    let sql = format!(
        "SELECT {} FROM recipes WHERE name COLLATE \"C\" ILIKE $1 ESCAPE '\\' ORDER BY id",
        RECIPE_COLUMNS
    );
    let rows: Vec<RecipeTuple> = sqlx::query_as(&sql)
        .bind(contains_pattern(query))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

pub async fn update_recipe(pool: &PgPool, recipe: &Recipe) -> Result<Option<Recipe>, PostgresError> {
    let sql = format!(
        r#"
        UPDATE recipes
        SET name = $1, description = $2, image_url = $3, time = $4, cuisine = $5,
            difficulty = $6, tools = $7, ingredients = $8, taste = $9
        WHERE id = $10
        RETURNING {}
        "#,
        RECIPE_COLUMNS
    );
    let row: Option<RecipeTuple> = sqlx::query_as(&sql)
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
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Recipe::from))
}

pub async fn delete_recipe(pool: &PgPool, id: i64) -> Result<bool, PostgresError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_recipes(pool: &PgPool) -> Result<u64, PostgresError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count as u64)
}

pub async fn delete_all_recipes(pool: &PgPool) -> Result<u64, PostgresError> {
    let result = sqlx::query("DELETE FROM recipes").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Candidate recipes for the in-memory filter engine
pub async fn prefilter_recipes(
    pool: &PgPool,
    prefilter: &Prefilter,
) -> Result<Vec<Recipe>, PostgresError> {
    let (sql, params) = build_prefilter_query(prefilter, Backend::Postgres.dialect());

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
