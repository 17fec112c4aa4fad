//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! `auth::AuthError` rendered through `kernel::error::AppError`.

mod config;

use auth::{InMemoryUserRepository, PgUserRepository, auth_router, auth_router_generic};
use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let auth = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            let repo = PgUserRepository::new(pool);
            repo.migrate().await?;

            tracing::info!("Migrations completed");

            auth_router(repo, config.auth.clone())
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory only");
            auth_router_generic(InMemoryUserRepository::new(), config.auth.clone())
        }
    };

    let app = app(auth, &config.frontend_origins);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Full application: health check, auth routes, tracing and CORS
fn app(auth: Router, frontend_origins: &[String]) -> Router {
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    Router::new()
        .route("/", get(health))
        .nest("/api/auth", auth)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> &'static str {
    "Auth server is running"
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::AuthConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = AuthConfig::development().with_test_bcrypt_cost();
        let auth = auth_router_generic(InMemoryUserRepository::new(), config);
        app(auth, &["http://localhost:3000".to_string()])
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Auth server is running");
    }

    #[tokio::test]
    async fn test_auth_routes_are_nested() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_authorization() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/auth/profile")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("authorization"));
    }
}
