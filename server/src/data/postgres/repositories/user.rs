//! User repository for PostgreSQL operations

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::postgres::error::conflict_on_unique;
use crate::data::types::{USER_COLUMNS, UserRow, UserTuple};

/// Create a user. A taken username or email yields [`PostgresError::Conflict`].
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserRow, PostgresError> {
    let now = chrono::Utc::now().timestamp();

    let sql = format!(
        "INSERT INTO users (username, email, password_hash, created_at) VALUES ($1, $2, $3, $4) RETURNING {}",
        USER_COLUMNS
    );
    let row: UserTuple = sqlx::query_as(&sql)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| conflict_on_unique(e, "User"))?;

    Ok(row.into())
}

pub async fn get_user(pool: &PgPool, id: i64) -> Result<Option<UserRow>, PostgresError> {
    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    let row: Option<UserTuple> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(UserRow::from))
}

pub async fn get_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRow>, PostgresError> {
    let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
    let row: Option<UserTuple> = sqlx::query_as(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(UserRow::from))
}

pub async fn user_exists(pool: &PgPool, username: &str, email: &str) -> Result<bool, PostgresError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}
