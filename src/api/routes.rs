//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{get_handler, health_handler, set_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cache?key=...` - Retrieve a value by key
/// - `POST /cache` - Store a key-value pair with an expiration
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: any origin; answers OPTIONS with the allowed methods and headers.
///   `Access-Control-Allow-Origin: *` is on every response, but
///   `Access-Control-Allow-Methods`/`-Headers` are only sent on OPTIONS
///   responses, not on plain GET/POST ones.
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cache", get(get_handler).post(set_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
