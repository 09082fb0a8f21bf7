//! User repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::sqlite::error::conflict_on_unique;
use crate::data::types::{USER_COLUMNS, UserRow, UserTuple};

/// Create a user. A taken username or email yields [`SqliteError::Conflict`].
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "User"))?;

    Ok(UserRow {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now,
    })
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<Option<UserRow>, SqliteError> {
    let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
    let row: Option<UserTuple> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(UserRow::from))
}

pub async fn get_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserRow>, SqliteError> {
    let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
    let row: Option<UserTuple> = sqlx::query_as(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(UserRow::from))
}

/// Whether the username or the email is already registered
pub async fn user_exists(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> Result<bool, SqliteError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? OR email = ?)",
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

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

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = setup_test_pool().await;
        let user = create_user(&pool, "alice", "alice@example.com", "hash")
            .await
            .unwrap();
        assert!(user.id > 0);

        let fetched = get_user(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "alice");
        assert_eq!(fetched.email, "alice@example.com");
        assert_eq!(fetched.password_hash, "hash");

        let by_name = get_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        assert!(get_by_username(&pool, "bob").await.unwrap().is_none());
        assert!(get_user(&pool, user.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_conflicts() {
        let pool = setup_test_pool().await;
        create_user(&pool, "alice", "alice@example.com", "hash")
            .await
            .unwrap();

        assert!(user_exists(&pool, "alice", "other@example.com").await.unwrap());
        assert!(user_exists(&pool, "other", "alice@example.com").await.unwrap());
        assert!(!user_exists(&pool, "bob", "bob@example.com").await.unwrap());

        let err = create_user(&pool, "alice", "new@example.com", "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));

        let err = create_user(&pool, "carol", "alice@example.com", "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));
    }
}
