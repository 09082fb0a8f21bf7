//! Shared API types
//!
//! Error responses and the small message envelopes shared by several routes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::DataError;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Error category, e.g. `not_found`
    pub error: String,
    /// Machine-readable error code
    pub code: String,
    pub message: String,
    /// Recipes sharing an ambiguous name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_ids: Option<Vec<i64>>,
}

/// Plain `{message}` response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Unauthorized { code: String, message: String },
    Conflict { code: String, message: String },
    /// Several recipes matched a name that must identify exactly one
    AmbiguousName { message: String, recipe_ids: Vec<i64> },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn ambiguous_name(name: &str, recipe_ids: Vec<i64>) -> Self {
        Self::AmbiguousName {
            message: format!(
                "Multiple recipes named '{}' found; use a recipe ID instead",
                name
            ),
            recipe_ids,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn from_data(e: DataError) -> Self {
        tracing::error!(error = %e, "Data error");
        Self::Internal {
            message: "Database operation failed".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } | Self::AmbiguousName { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        Self::from_data(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, code, message, recipe_ids) = match self {
            Self::BadRequest { code, message } => ("bad_request", code, message, None),
            Self::NotFound { code, message } => ("not_found", code, message, None),
            Self::Unauthorized { code, message } => ("unauthorized", code, message, None),
            Self::Conflict { code, message } => ("conflict", code, message, None),
            Self::AmbiguousName {
                message,
                recipe_ids,
            } => (
                "conflict",
                "AMBIGUOUS_NAME".to_string(),
                message,
                Some(recipe_ids),
            ),
            Self::Internal { message } => ("internal_error", "INTERNAL".to_string(), message, None),
        };
        let body = ErrorBody {
            error: error.to_string(),
            code,
            message,
            recipe_ids,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let (status, json) = body_json(ApiError::not_found("RECIPE_NOT_FOUND", "nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["code"], "RECIPE_NOT_FOUND");
        assert_eq!(json["message"], "nope");
        assert!(json.get("recipe_ids").is_none());
    }

    #[tokio::test]
    async fn test_ambiguous_name_lists_ids() {
        let (status, json) = body_json(ApiError::ambiguous_name("Soup", vec![3, 9])).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["code"], "AMBIGUOUS_NAME");
        assert_eq!(json["recipe_ids"], serde_json::json!([3, 9]));
    }

    #[tokio::test]
    async fn test_data_error_is_opaque() {
        let err = ApiError::from(DataError::Config("secret detail".to_string()));
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Database operation failed");
    }
}
