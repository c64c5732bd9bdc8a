//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`, plus `/health` at the root.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route(
            "/status",
            post(handlers::status::create_status_check).get(handlers::status::list_status_checks),
        )
        // Chat
        .route("/chat/session", post(handlers::session::create_session))
        .route("/chat/message", post(handlers::message::send_message))
        .route(
            "/chat/messages/{session_id}",
            get(handlers::session::get_messages),
        )
        // Webhook configuration
        .route(
            "/chat/config",
            get(handlers::config::get_config)
                .put(handlers::config::update_config)
                .delete(handlers::config::clear_config),
        );

    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `*` allows any origin without credentials; an explicit list allows
/// credentials and mirrors the requested methods and headers.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o.trim() == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// GET /api/ - Greeting.
async fn root() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "message": "Hello World" }))
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use chatrelay_core::repository::memory::InMemoryStore;
    use chatrelay_infra::store::StoreBackend;
    use chatrelay_infra::webhook::HttpWebhookTransport;
    use chatrelay_types::relay::{NOT_CONFIGURED_REPLY, RELAY_FAILURE_REPLY};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        test_app_with_origins(&["*".to_string()])
    }

    fn test_app_with_origins(origins: &[String]) -> Router {
        let store = StoreBackend::Memory(InMemoryStore::new());
        let transport = HttpWebhookTransport::new(5).unwrap();
        build_router(AppState::from_parts(store, transport), origins)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn open_session(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/chat/session",
            Some(json!({"user_name": "Ada", "user_email": "ada@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().to_string()
    }

    /// Serve a fake workflow endpoint and return its URL.
    async fn spawn_webhook(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/webhook")
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let app = test_app();

        let (status, body) = send(&app, Method::GET, "/api/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Hello World"}));

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_checks_round_trip() {
        let app = test_app();

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/status",
            Some(json!({"client_name": "dashboard"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["client_name"], "dashboard");
        assert!(created["id"].is_string());
        assert!(created["timestamp"].is_string());

        let (status, list) = send(&app, Method::GET, "/api/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([created]));
    }

    #[tokio::test]
    async fn test_status_check_missing_field_is_422() {
        let app = test_app();
        let (status, body) = send(&app, Method::POST, "/api/status", Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_session_returns_record() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chat/session",
            Some(json!({"user_name": "Ada", "user_email": "ada@example.com"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_name"], "Ada");
        assert_eq!(body["user_email"], "ada@example.com");
        assert!(body["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
        assert!(body["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chat/session",
            Some(json!({"user_name": "Ada", "user_email": "invalid-email"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_is_422() {
        let app = test_app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/chat/session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_send_to_unknown_session_is_404() {
        let app = test_app();
        let missing = uuid::Uuid::now_v7().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chat/message",
            Some(json!({"session_id": missing, "message": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Chat session not found");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/chat/message",
            Some(json!({"session_id": "not-a-uuid", "message": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, messages) = send(&app, Method::GET, &format!("/api/chat/messages/{missing}"), None).await;
        assert_eq!(messages, json!([]));
    }

    #[tokio::test]
    async fn test_unconfigured_webhook_replies_with_notice() {
        let app = test_app();
        let session_id = open_session(&app).await;

        let (status, bot) = send(
            &app,
            Method::POST,
            "/api/chat/message",
            Some(json!({"session_id": session_id, "message": "What's on the menu?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bot["sender"], "bot");
        assert_eq!(bot["message"], NOT_CONFIGURED_REPLY);
        assert_eq!(bot["session_id"], session_id.as_str());

        let (_, messages) = send(
            &app,
            Method::GET,
            &format!("/api/chat/messages/{session_id}"),
            None,
        )
        .await;
        let messages = messages.as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["sender"], "user");
        assert_eq!(messages[0]["message"], "What's on the menu?");
        assert_eq!(messages[1], bot);
    }

    #[tokio::test]
    async fn test_configured_webhook_reply_is_stored() {
        let webhook = spawn_webhook(Router::new().route(
            "/webhook",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"message": format!("Thanks {}!", body["user_name"].as_str().unwrap_or(""))}))
            }),
        ))
        .await;

        let app = test_app();
        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/chat/config",
            Some(json!({"webhook_url": webhook})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let session_id = open_session(&app).await;
        let (status, bot) = send(
            &app,
            Method::POST,
            "/api/chat/message",
            Some(json!({"session_id": session_id, "message": "Book a tasting"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bot["message"], "Thanks Ada!");
    }

    #[tokio::test]
    async fn test_failing_webhook_replies_with_apology() {
        let webhook = spawn_webhook(Router::new().route(
            "/webhook",
            post(|| async { StatusCode::BAD_GATEWAY }),
        ))
        .await;

        let app = test_app();
        send(
            &app,
            Method::PUT,
            "/api/chat/config",
            Some(json!({"webhook_url": webhook})),
        )
        .await;

        let session_id = open_session(&app).await;
        let (status, bot) = send(
            &app,
            Method::POST,
            "/api/chat/message",
            Some(json!({"session_id": session_id, "message": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bot["message"], RELAY_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn test_array_webhook_reply_becomes_apology() {
        let webhook = spawn_webhook(Router::new().route(
            "/webhook",
            post(|| async { Json(json!([])) }),
        ))
        .await;

        let app = test_app();
        send(
            &app,
            Method::PUT,
            "/api/chat/config",
            Some(json!({"webhook_url": webhook})),
        )
        .await;

        let session_id = open_session(&app).await;
        let (status, bot) = send(
            &app,
            Method::POST,
            "/api/chat/message",
            Some(json!({"session_id": session_id, "message": "Any vegan sides?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bot["sender"], "bot");
        assert_eq!(bot["message"], RELAY_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn test_config_put_get_delete() {
        let app = test_app();

        let (_, body) = send(&app, Method::GET, "/api/chat/config", None).await;
        assert_eq!(body, json!({"webhook_url": null}));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/chat/config",
            Some(json!({"webhook_url": "https://n8n.example/webhook/a"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Configuration updated successfully", "webhook_url": "https://n8n.example/webhook/a"})
        );

        send(
            &app,
            Method::PUT,
            "/api/chat/config",
            Some(json!({"webhook_url": "https://n8n.example/webhook/b"})),
        )
        .await;
        let (_, body) = send(&app, Method::GET, "/api/chat/config", None).await;
        assert_eq!(body["webhook_url"], "https://n8n.example/webhook/b");

        let (status, body) = send(&app, Method::DELETE, "/api/chat/config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["webhook_url"], Value::Null);

        let (_, body) = send(&app, Method::GET, "/api/chat/config", None).await;
        assert_eq!(body, json!({"webhook_url": null}));
    }

    #[tokio::test]
    async fn test_config_update_requires_url() {
        let app = test_app();
        let (status, _) = send(&app, Method::PUT, "/api/chat/config", Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_cors_allows_listed_origin() {
        let app = test_app_with_origins(&["https://catering.example".to_string()]);
        let request = Request::builder()
            .uri("/api/")
            .header(header::ORIGIN, "https://catering.example")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://catering.example"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }
}
