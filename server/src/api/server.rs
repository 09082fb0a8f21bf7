//! API server initialization

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::auth::{AuthManager, AuthState, optional_auth, require_auth};
use super::middleware;
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{admin, auth, favorites, health, recipes, users};
use crate::core::CoreApp;
use crate::core::constants::{API_PREFIX, DEFAULT_BODY_LIMIT};
use crate::data::TransactionalService;

/// Full application router
pub fn build_router(
    database: Arc<TransactionalService>,
    auth_manager: Arc<AuthManager>,
    seed_file: Option<PathBuf>,
) -> Router {
    let auth_state = AuthState {
        auth_manager: auth_manager.clone(),
    };

    let recipes_routes = recipes::routes(database.clone())
        .layer(from_fn_with_state(auth_state.clone(), optional_auth));
    let users_routes =
        users::routes(database.clone()).layer(from_fn_with_state(auth_state.clone(), require_auth));
    let favorites_routes = favorites::routes(database.clone())
        .layer(from_fn_with_state(auth_state, require_auth));

    let api = Router::new()
        .route("/health", get(health::health))
        .nest("/auth", auth::routes(auth_manager, database.clone()))
        .nest("/users", users_routes)
        .nest("/recipes", recipes_routes)
        .nest("/favorites", favorites_routes)
        .nest("/admin", admin::routes(database, seed_file));

    Router::new()
        .route("/", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .nest(API_PREFIX, api)
        .fallback(middleware::handle_404)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(middleware::cors())
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Serve until shutdown is triggered; returns CoreApp for cleanup
    pub async fn start(self) -> Result<CoreApp> {
        let app = self.app;
        let shutdown = app.shutdown.clone();

        let host = &app.config.server.host;
        let port = app.config.server.port;
        let addr = SocketAddr::new(
            host.parse()
                .with_context(|| format!("Invalid listen address: {}", host))?,
            port,
        );

        let router = build_router(
            app.database.clone(),
            app.auth.clone(),
            app.config.seed_file.clone(),
        );

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(%addr, "Listening on http://{}", addr);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::api::testing::TestApp;

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = TestApp::new().await;
        for uri in ["/", "/api/v1/health"] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "healthy");
            assert_eq!(body["message"], "RecipeBox API is running");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api/v1/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["code"], "ROUTE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/recipes/filter"].is_object());
    }
}
