//! User API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::UserRow;

/// Current user as returned by `/users/me`
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfileResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserProfileResponse {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.id,
            username: row.username,
            email: row.email,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
        }
    }
}
