//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{item_routes, login_routes, token_routes, user_routes};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Versioned API surface; everything past login requires a bearer token
    let api = Router::new()
        .merge(login_routes())
        .merge(token_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        )))
        .nest(
            "/users",
            user_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/items",
            item_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        );

    Router::new()
        // Health check endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to Stash API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = db_status.status == "healthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        database: db_status,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
