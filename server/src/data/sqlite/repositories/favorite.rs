//! Favorite repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sql::RECIPE_COLUMNS;
use crate::data::sqlite::SqliteError;
use crate::data::types::RecipeTuple;
use crate::domain::recipe::Recipe;

/// Add a favorite for a user (idempotent)
/// Returns true if created, false if already existed
pub async fn add_favorite(
    pool: &SqlitePool,
    user_id: i64,
    recipe_id: i64,
) -> Result<bool, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        r#"
        INSERT INTO favorites (user_id, recipe_id, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(recipe_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a favorite
/// Returns true if removed, false if it didn't exist
pub async fn remove_favorite(
    pool: &SqlitePool,
    user_id: i64,
    recipe_id: i64,
) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND recipe_id = ?")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Recipes a user has favorited, oldest favorite first
pub async fn list_favorite_recipes(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Recipe>, SqliteError> {
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
        WHERE f.user_id = ?
        ORDER BY f.created_at, f.id
        "#,
        columns
    );

    let rows: Vec<RecipeTuple> = sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use crate::data::sqlite::repositories::{recipe, user};
    use crate::data::types::RecipeInsert;

    async fn setup_test_pool() -> SqlitePool {
        // One connection: every in-memory connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    fn named(name: &str) -> RecipeInsert {
        RecipeInsert {
            name: name.to_string(),
            description: None,
            image_url: None,
            time: None,
            cuisine: None,
            difficulty: None,
            tools: "[]".to_string(),
            ingredients: "[]".to_string(),
            taste: "[]".to_string(),
        }
    }

    async fn fixture(pool: &SqlitePool) -> (i64, i64, i64) {
        let user = user::create_user(pool, "alice", "alice@example.com", "hash")
            .await
            .unwrap();
        let soup = recipe::create_recipe(pool, &named("Soup")).await.unwrap();
        let cake = recipe::create_recipe(pool, &named("Cake")).await.unwrap();
        (user.id, soup.id, cake.id)
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent() {
        let pool = setup_test_pool().await;
        let (user_id, soup, _) = fixture(&pool).await;

        assert!(add_favorite(&pool, user_id, soup).await.unwrap());
        assert!(!add_favorite(&pool, user_id, soup).await.unwrap());

        let favorites = list_favorite_recipes(&pool, user_id).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].name, "Soup");
    }

    #[tokio::test]
    async fn test_remove_favorite() {
        let pool = setup_test_pool().await;
        let (user_id, soup, cake) = fixture(&pool).await;

        add_favorite(&pool, user_id, soup).await.unwrap();
        add_favorite(&pool, user_id, cake).await.unwrap();

        assert!(remove_favorite(&pool, user_id, soup).await.unwrap());
        assert!(!remove_favorite(&pool, user_id, soup).await.unwrap());

        let names: Vec<String> = list_favorite_recipes(&pool, user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Cake"]);
    }

    #[tokio::test]
    async fn test_deleting_recipe_cascades_to_favorites() {
        let pool = setup_test_pool().await;
        let (user_id, soup, cake) = fixture(&pool).await;

        add_favorite(&pool, user_id, soup).await.unwrap();
        add_favorite(&pool, user_id, cake).await.unwrap();
        recipe::delete_recipe(&pool, soup).await.unwrap();

        let favorites = list_favorite_recipes(&pool, user_id).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, cake);
    }

    #[tokio::test]
    async fn test_favorites_are_per_user() {
        let pool = setup_test_pool().await;
        let (alice, soup, _) = fixture(&pool).await;
        let bob = user::create_user(&pool, "bob", "bob@example.com", "hash")
            .await
            .unwrap();

        add_favorite(&pool, alice, soup).await.unwrap();
        assert!(list_favorite_recipes(&pool, bob.id).await.unwrap().is_empty());
        assert!(!remove_favorite(&pool, bob.id, soup).await.unwrap());
    }
}
