//! Codecamp - coding-education platform backend
//!
//! This library provides the HTTP API behind the Codecamp editor: workshops,
//! email/password authentication and an assignment grader that runs student
//! code in a sandboxed script engine.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs
//! - **Grader**: Sandboxed code runner, test runner, catalog and timer

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod grader;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use axum::{http::HeaderValue, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Room left in a request body for JSON framing around the source code
const BODY_OVERHEAD_BYTES: usize = 16 * 1024;

/// Build the application router with all middleware layers
pub fn create_router(state: AppState) -> Router {
    let config = state.config();

    // JSON string escaping can double the size of the source
    let body_limit = config
        .grader
        .max_source_bytes
        .saturating_mul(2)
        .saturating_add(BODY_OVERHEAD_BYTES);

    let cors = cors_layer(&config.server.cors_origins);

    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(state.clone()))
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured origins; any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::grader::submission::MockSubmissionSink;
    use crate::test_utils::{bearer_token, test_config, test_state, test_state_with};

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn app() -> Router {
        create_router(test_state(Arc::new(MockSubmissionSink::new())))
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get("/api/v1/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_languages() {
        let (status, body) = send(app(), get("/api/v1/languages")).await;

        assert_eq!(status, StatusCode::OK);
        let languages = body["languages"].as_array().unwrap();
        assert_eq!(languages.len(), 5);
        assert_eq!(languages[0]["language"], "rhai");
        assert_eq!(languages[0]["executable"], true);
        assert_eq!(languages[2]["executable"], false);
    }

    #[tokio::test]
    async fn test_list_assignments_with_filters() {
        let (status, body) = send(app(), get("/api/v1/assignments")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["assignments"][0]["test_case_count"], 5);

        let (_, body) = send(app(), get("/api/v1/assignments?difficulty=hard&language=all")).await;
        assert_eq!(body["total"], 0);

        let (_, body) = send(app(), get("/api/v1/assignments?search=FIBONACCI")).await;
        assert_eq!(body["total"], 1);

        let (status, _) = send(app(), get("/api/v1/assignments?difficulty=extreme")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_assignment_detail_hides_solution() {
        let (status, body) = send(app(), get("/api/v1/assignments/1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entry_point"], "fibonacci");
        assert!(body.get("reference_solution").is_none());
        assert_eq!(body["starter_code"].as_object().unwrap().len(), 5);

        let (status, body) = send(app(), get("/api/v1/assignments/42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Assignment not found");
    }

    #[tokio::test]
    async fn test_run_code() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/assignments/1/run",
                json!({"source_code": "print(1); print(\"a\");"}),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");
        assert_eq!(body["output"], "1\na\n");

        let (_, body) = send(
            app(),
            post_json(
                "/api/v1/assignments/1/run",
                json!({"source_code": "console.log(1)", "language": "javascript"}),
                None,
            ),
        )
        .await;
        assert_eq!(body["status"], "simulated");
        assert!(body["output"].as_str().unwrap().contains("console.log(1)"));
    }

    #[tokio::test]
    async fn test_run_tests() {
        let source = r#"
fn fibonacci(n) {
    if n < 0 { return; }
    let a = 0;
    let b = 1;
    for i in 0..n {
        let next = a + b;
        a = b;
        b = next;
    }
    a
}
"#;
        let (status, body) = send(
            app(),
            post_json("/api/v1/assignments/1/test", json!({"source_code": source}), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");
        assert_eq!(body["passed"], 5);
        assert_eq!(body["total"], 5);
        assert!(body["results"][4]["actual_output"].is_null());
        assert_eq!(body["results"][4]["actual_display"], "null");

        let (_, body) = send(
            app(),
            post_json("/api/v1/assignments/1/test", json!({"source_code": ""}), None),
        )
        .await;
        assert_eq!(body["status"], "aborted");
        assert_eq!(body["message"], "fibonacci function not found or not properly defined");
    }

    #[tokio::test]
    async fn test_oversized_source_is_rejected() {
        let source = "x".repeat(2048);
        let (status, body) = send(
            app(),
            post_json("/api/v1/assignments/1/run", json!({"source_code": source}), None),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_timer() {
        let (status, body) = send(app(), get("/api/v1/assignments/1/timer?elapsed_seconds=1795")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["time_limit_seconds"], 1800);
        assert_eq!(body["remaining_seconds"], 5);
        assert_eq!(body["display"], "0:05");
        assert_eq!(body["expired"], false);

        let (_, body) = send(app(), get("/api/v1/assignments/1/timer")).await;
        assert_eq!(body["display"], "30:00");
    }

    #[tokio::test]
    async fn test_submit_requires_token() {
        let (status, body) = send(
            app(),
            post_json("/api/v1/assignments/1/submit", json!({"source_code": "1"}), None),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, _) = send(
            app(),
            post_json(
                "/api/v1/assignments/1/submit",
                json!({"source_code": "1"}),
                Some("not-a-jwt"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_submit_reaches_sink() {
        let mut sink = MockSubmissionSink::new();
        sink.expect_deliver()
            .withf(|s| s.assignment_id == 1 && s.source_code == "fn fibonacci(n) { n }")
            .times(1)
            .returning(|_| Ok(()));
        let app = create_router(test_state(Arc::new(sink)));

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/assignments/1/submit",
                json!({"source_code": "fn fibonacci(n) { n }"}),
                Some(&bearer_token()),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body["submission_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_submit_hides_sink_failure() {
        let mut sink = MockSubmissionSink::new();
        sink.expect_deliver()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("queue unavailable")));
        let app = create_router(test_state(Arc::new(sink)));

        let (status, _) = send(
            app,
            post_json(
                "/api/v1/assignments/1/submit",
                json!({"source_code": "1"}),
                Some(&bearer_token()),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let (status, _) = send(app(), get("/api/v1/auth/me")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            app(),
            post_json("/api/v1/workshops", json!({"title": "Rust 101"}), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/assignments")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let response = app().oneshot(preflight("http://example.com")).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_honors_configured_origins() {
        let mut config = test_config();
        config.server.cors_origins = vec![
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ];
        let app = create_router(test_state_with(config, Arc::new(MockSubmissionSink::new())));

        let allowed = app.clone().oneshot(preflight("http://localhost:3000")).await.unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );

        let denied = app.oneshot(preflight("http://evil.example")).await.unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_signup_validation_lists_fields() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/auth/signup",
                json!({"email": "not-an-email", "name": "Ada", "password": "secret1"}),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"]["email"][0]["message"], "Invalid email address");
        assert!(body["error"]["details"].get("password").is_none());
    }
}
