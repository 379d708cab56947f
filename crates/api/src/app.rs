use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::cache::RosterCache;
use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, security_headers_middleware,
    trace_id, RateLimiterState,
};
use crate::routes::{attendance, health, meta, staff, students};
use shared::jwt::IdentityVerifier;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub verifier: IdentityVerifier,
    pub roster_cache: RosterCache,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    let verifier = IdentityVerifier::new(&config.jwt.public_key, config.jwt.leeway_secs)?;
    let config = Arc::new(config);

    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        verifier,
        roster_cache: RosterCache::new(Duration::from_secs(
            config.attendance.roster_cache_ttl_secs,
        )),
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
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

    // Check-in is the write-heavy, abuse-prone path; it alone carries the
    // shared rate limit.
    let check_in_routes = Router::new()
        .route("/api/v1/attendance/check-in", post(attendance::check_in))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Identity for these travels in the request body as jwtToken.
    let student_routes = Router::new()
        .route("/api/v1/students/register", post(students::register))
        .route("/api/v1/attendance/mine", post(attendance::mine))
        .route("/api/v1/attendance/current", post(attendance::current))
        .route(
            "/api/v1/attendance/current/roster",
            get(attendance::current_roster),
        );

    // Staff routes authenticate via Authorization: Bearer; the extractors
    // enforce the staff claim.
    let staff_routes = Router::new()
        .route("/api/v1/staff/can-mark", get(staff::can_mark))
        .route("/api/v1/staff/attendance", post(staff::mark_current))
        .route(
            "/api/v1/staff/classes/:class_id/attendance",
            post(staff::mark_for_subject),
        )
        .route(
            "/api/v1/staff/classes/:class_id/roster",
            get(staff::class_roster),
        )
        .route(
            "/api/v1/staff/students/:mail/attendance",
            get(staff::student_overview),
        );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/api/ping", get(meta::ping))
        .route("/api/version", get(meta::version))
        .route("/metrics", get(metrics_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(check_in_routes)
        .merge(student_routes)
        .merge(staff_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}
