//! Favorite repository for PostgreSQL operations

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::sql::RECIPE_COLUMNS;
use crate::data::types::RecipeTuple;
use crate::domain::recipe::Recipe;

/// Returns true if created, false if already existed
pub async fn add_favorite(pool: &PgPool, user_id: i64, recipe_id: i64) -> Result<bool, PostgresError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        r#"
        INSERT INTO favorites (user_id, recipe_id, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, recipe_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(recipe_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn remove_favorite(
    pool: &PgPool,
    user_id: i64,
    recipe_id: i64,
) -> Result<bool, PostgresError> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_favorite_recipes(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<Recipe>, PostgresError> {
    let columns = RECIPE_COLUMNS
        .split(", ")
        .map(|c| format!("r.{}", c))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        r#"
        SELECT {}
        FROM favorites f
        JOIN recipes r ON r.id = f.recipe_id
        WHERE f.user_id = $1
        ORDER BY f.created_at, f.id
        "#,
        columns
    );

    let rows: Vec<RecipeTuple> = sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}
