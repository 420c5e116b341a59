//! HTTP Server
//!
//! JSON API over [`ReadmeService`]:
//!
//! - `POST /api/generate` → `{document}`
//! - `POST /api/generate/repository` → `{document}`
//! - `POST /api/refine` → `{document, changed, warning?}`
//! - `GET /health` → `OK`

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::readme::ReadmeService;
use crate::types::Result;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReadmeService>,
}

/// Build CORS layer from configured origins
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Map a middleware failure onto the JSON error body
fn handle_middleware_error(err: BoxError, limit: Duration) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::timeout(limit)
    } else {
        ApiError::internal(format!("Unhandled middleware error: {}", err))
    }
}

/// Create the router with all middleware layers
pub fn create_app(service: Arc<ReadmeService>, config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .route("/generate", post(handlers::generate))
        .route("/generate/repository", post(handlers::generate_repository))
        .route("/refine", post(handlers::refine))
        .with_state(AppState { service });

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_router);

    let limit = Duration::from_secs(config.request_timeout_secs);

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                handle_middleware_error(err, limit)
            }))
            .layer(TimeoutLayer::new(limit))
            .layer(DefaultBodyLimit::max(config.max_body_bytes))
            .layer(build_cors_layer(config)),
    )
}

/// Bind and serve until Ctrl-C
pub async fn serve(service: Arc<ReadmeService>, config: &ServerConfig) -> Result<()> {
    if config.allowed_origins.is_empty() {
        warn!("CORS allows any origin; set server.allowed_origins to restrict it");
    }

    let app = create_app(service, config);
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readme::testing::{RecordingProvider, StaticSource};
    use crate::ai::{LlmProvider, LlmResponse};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(provider: &Arc<RecordingProvider>) -> Router {
        let service = ReadmeService::new(provider.clone(), Arc::new(StaticSource::widget()));
        create_app(Arc::new(service), &ServerConfig::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let response = app(&provider)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_generate() {
        let provider = Arc::new(RecordingProvider::replying("```markdown\n# widget\n```"));
        let response = app(&provider)
            .oneshot(post_json(
                "/api/generate",
                json!({"name": "widget", "description": "d", "features": "f", "techStack": "Rust"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"document": "# widget"}));
    }

    #[tokio::test]
    async fn test_generate_missing_field_is_400_without_generation() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let response = app(&provider)
            .oneshot(post_json(
                "/api/generate",
                json!({"name": "widget", "description": "", "features": "f", "techStack": "Rust"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["kind"], "validation");
        assert!(body["error"].as_str().unwrap().contains("description"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let request = Request::builder()
            .method("POST")
            .uri("/api/refine")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(&provider).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["kind"], "validation");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_repository_not_found() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let response = app(&provider)
            .oneshot(post_json(
                "/api/generate/repository",
                json!({"repositoryUrl": "https://github.com/acme/missing"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["kind"], "not_found");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_repository_invalid_url() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let response = app(&provider)
            .oneshot(post_json(
                "/api/generate/repository",
                json!({"repositoryUrl": "not-a-url"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["kind"], "invalid_url");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_repository_success() {
        let provider = Arc::new(RecordingProvider::replying("# widget"));
        let response = app(&provider)
            .oneshot(post_json(
                "/api/generate/repository",
                json!({"repositoryUrl": "https://github.com/acme/widget"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["document"], "# widget");
    }

    #[tokio::test]
    async fn test_refine() {
        let provider = Arc::new(RecordingProvider::replying("# X\n\n## Features\n- foo"));
        let response = app(&provider)
            .oneshot(post_json(
                "/api/refine",
                json!({"document": "# X\n\n## Features\nfoo", "instruction": "add bullets to features"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["document"], "# X\n\n## Features\n- foo");
        assert_eq!(body["changed"], true);
        assert!(body.get("warning").is_none());

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("# X\n\n## Features\nfoo"));
        assert!(prompt.contains("add bullets to features"));
    }

    #[tokio::test]
    async fn test_refine_unchanged_carries_warning() {
        let provider = Arc::new(RecordingProvider::replying("# X"));
        let response = app(&provider)
            .oneshot(post_json(
                "/api/refine",
                json!({"readme": "# X", "instruction": "tweak"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["changed"], false);
        assert!(body["warning"].is_string());
    }

    #[tokio::test]
    async fn test_refine_missing_instruction() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let response = app(&provider)
            .oneshot(post_json("/api/refine", json!({"document": "# X"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_is_502() {
        let provider = Arc::new(RecordingProvider::failing("model overloaded"));
        let response = app(&provider)
            .oneshot(post_json(
                "/api/refine",
                json!({"document": "# X", "instruction": "shorter"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["kind"], "generation");
        assert!(body["error"].as_str().unwrap().contains("model overloaded"));
    }

    /// Replies only after the server timeout has fired
    struct StalledProvider;

    #[async_trait]
    impl LlmProvider for StalledProvider {
        async fn generate(&self, _prompt: &str) -> crate::types::Result<LlmResponse> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(LlmResponse::content_only("# late"))
        }

        fn name(&self) -> &str {
            "stalled"
        }

        fn model(&self) -> &str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_request_timeout_is_json_gateway_timeout() {
        let service = ReadmeService::new(Arc::new(StalledProvider), Arc::new(StaticSource::widget()));
        let config = ServerConfig {
            request_timeout_secs: 1,
            ..Default::default()
        };
        let response = create_app(Arc::new(service), &config)
            .oneshot(post_json(
                "/api/refine",
                json!({"document": "# X", "instruction": "shorter"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body = json_body(response).await;
        assert_eq!(body["kind"], "timeout");
        assert!(body["error"].as_str().unwrap().contains("timed out"));
    }
}
