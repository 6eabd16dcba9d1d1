use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use persistence::Store;

use crate::config::Config;
use crate::middleware::trace_id;
use crate::routes::{analytics, health, shifts, tracking, zones};
use crate::tracking::SessionManager;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionManager>,
}

pub fn create_app(config: Config, store: Arc<dyn Store>) -> Router {
    let config = Arc::new(config);
    let sessions = Arc::new(SessionManager::new(
        Arc::clone(&store),
        config.tracking.clone(),
    ));

    let state = AppState {
        config: config.clone(),
        store,
        sessions,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Versioned API routes; identity arrives as trusted gateway headers and
    // is enforced per handler by the Identity extractor.
    let api_routes = Router::new()
        // Shift routes (v1)
        .route("/api/v1/shifts/clock-in", post(shifts::clock_in))
        .route("/api/v1/shifts/:shift_id/clock-out", post(shifts::clock_out))
        .route("/api/v1/shifts", get(shifts::list_shifts))
        .route("/api/v1/shifts/active", get(shifts::active_shifts))
        // Zone routes (v1)
        .route("/api/v1/zones", post(zones::set_zone).get(zones::list_zones))
        // Analytics routes (v1)
        .route("/api/v1/analytics/shifts", get(analytics::shift_analytics))
        // Live-tracking routes (v1)
        .route("/api/v1/tracking/sessions", post(tracking::start_session))
        .route(
            "/api/v1/tracking/sessions/:session_id/locations",
            post(tracking::stream_location),
        )
        .route(
            "/api/v1/tracking/sessions/:session_id",
            delete(tracking::stop_session),
        );

    // Public routes (no identity required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
