//! Middleware stack for the API server
//!
//! Request ids, tracing, timeout, compression and CORS for every route, plus
//! a per-IP rate limit reserved for the credential endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use rpg_common::{AppError, CorsConfig, RateLimitConfig};
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::response::ApiError;
use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request deadline; expiry answers 503
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply the shared middleware stack
pub fn apply_middleware(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let request_id = header::HeaderName::from_static(REQUEST_ID_HEADER);

    // Outermost first: request id, trace, timeout, compression, CORS
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("unknown");

                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    })
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            ))
            .layer(CompressionLayer::new())
            .layer(cors_layer(cors_config, is_production)),
    )
}

/// Rate limit the given routes per peer IP. Needs the server to be started
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn rate_limited(router: Router<AppState>, config: &RateLimitConfig) -> Router<AppState> {
    // One token is replenished every `period`; `burst` caps the bucket
    let period_ms = (1000 / u64::from(config.requests_per_second.max(1))).max(1);

    let Some(governor_conf) = GovernorConfigBuilder::default()
        .per_millisecond(period_ms)
        .burst_size(config.burst.max(1))
        .error_handler(rate_limit_response)
        .finish()
    else {
        tracing::warn!("Invalid rate limit configuration, auth routes are not rate limited");
        return router;
    };

    router.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    })
}

/// Render governor rejections in the shared error body, keeping its
/// `retry-after` and `x-ratelimit-*` headers
fn rate_limit_response(error: GovernorError) -> Response {
    let (api_error, headers) = match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::debug!(wait_time, "Rate limit exceeded");
            (ApiError::App(AppError::RateLimitExceeded), headers)
        }
        other => (
            ApiError::internal(anyhow::anyhow!("Rate limiter failed: {other:?}")),
            None,
        ),
    };

    let mut response = api_error.into_response();
    if let Some(headers) = headers {
        response.headers_mut().extend(headers);
    }
    response
}

/// Production accepts any origin; development only the configured ones
fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([header::HeaderName::from_static(REQUEST_ID_HEADER)]);

    if is_production {
        tracing::info!("CORS: allowing any origin");
        return base_layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    tracing::info!(origins = origins.len(), "CORS: allowing configured origins");
    base_layer.allow_origin(AllowOrigin::list(origins))
}
