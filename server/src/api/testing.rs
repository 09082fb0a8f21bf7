//! In-process router fixture for handler tests

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use super::auth::AuthManager;
use super::server::build_router;
use crate::core::AuthConfig;
use crate::data::TransactionalService;

pub(crate) struct TestApp {
    pub router: Router,
    pub database: Arc<TransactionalService>,
    pub auth: Arc<AuthManager>,
}

impl TestApp {
    pub async fn new() -> Self {
        let database = Arc::new(TransactionalService::sqlite_in_memory().await);
        let auth = Arc::new(AuthManager::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 6,
        }));
        let router = build_router(database.clone(), auth.clone(), None);
        Self {
            router,
            database,
            auth,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    /// Register `username` and return `(user_id, access_token)`
    pub async fn login_as(&self, username: &str) -> (i64, String) {
        let (status, body) = self
            .post(
                "/api/v1/auth/register",
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "pa55word",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let user_id = body["user_id"].as_i64().unwrap();

        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                serde_json::json!({"username": username, "password": "pa55word"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        (user_id, body["access_token"].as_str().unwrap().to_string())
    }

    pub async fn seed(&self) -> u64 {
        let (status, body) = self
            .request(Method::POST, "/api/v1/admin/init-db", None, None)
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["recipes_created"].as_u64().unwrap()
    }
}
