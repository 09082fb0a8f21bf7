//! Caller extractors for Axum handlers
//!
//! ```no_run
//! # use recipebox_server::api::auth::CurrentUser;
//! # use recipebox_server::api::types::ApiError;
//! pub async fn me(user: CurrentUser) -> Result<(), ApiError> {
//!     let _id = user.user_id;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use super::context::AuthContext;
use super::middleware::AuthError;

/// Authenticated caller; requires [`require_auth`](super::require_auth) on the route
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .map(|ctx| Self {
                user_id: ctx.user_id,
            })
            .ok_or_else(AuthError::required)
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthContext>().map(|ctx| Self {
            user_id: ctx.user_id,
        }))
    }
}
