// src/http.rs

//! Axum integration: derive a client identifier from the request and turn
//! rate limit decisions into response headers or a 429.
//!
//! ```ignore
//! let limiter = Arc::new(WindowLimiter::new(WindowLimiterConfig::from_millis(3_600_000))?);
//! let app = Router::new()
//!     .route("/api/generate", post(generate))
//!     .route_layer(middleware::from_fn_with_state(
//!         RouteLimit::new(limiter.clone(), 10),
//!         enforce_rate_limit::<SystemClock>,
//!     ));
//! ```

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::window_limiter::{RateLimitDecision, WindowLimiter};
use axum::Json;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;

/// Identifier used when a request carries no usable address.
pub const UNKNOWN_IDENTIFIER: &str = "unknown";

pub const X_RATELIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const X_RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";

fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Pick the identifier to account a request against.
/// Priority: X-Forwarded-For (first hop) > X-Real-IP > peer address > "unknown"
pub fn client_identifier(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    first_header_value(headers, "x-forwarded-for")
        .or_else(|| first_header_value(headers, "x-real-ip"))
        .map(str::to_owned)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_IDENTIFIER.to_owned())
}

/// A shared limiter paired with the per-endpoint request budget.
pub struct RouteLimit<C: Clock = SystemClock> {
    pub limiter: Arc<WindowLimiter<C>>,
    pub limit: u32,
}

impl<C: Clock> RouteLimit<C> {
    pub fn new(limiter: Arc<WindowLimiter<C>>, limit: u32) -> Self {
        Self { limiter, limit }
    }
}

impl<C: Clock> Clone for RouteLimit<C> {
    fn clone(&self) -> Self {
        Self {
            limiter: Arc::clone(&self.limiter),
            limit: self.limit,
        }
    }
}

fn apply_rate_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
}

#[derive(Serialize)]
struct RejectionBody {
    code: &'static str,
    message: &'static str,
}

/// 429 response for a rejected request.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitRejection(pub RateLimitDecision);

impl IntoResponse for RateLimitRejection {
    fn into_response(self) -> Response {
        let body = RejectionBody {
            code: "TooManyRequests",
            message: "too many requests, please try again later",
        };
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        let headers = response.headers_mut();
        apply_rate_limit_headers(headers, &self.0);
        if let Some(millis) = self.0.retry_after_millis {
            headers.insert(RETRY_AFTER, HeaderValue::from(millis.div_ceil(1000)));
        }
        response
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`.
/// Admitted requests reach the inner handler and get rate limit headers;
/// rejected ones are answered with 429 before the handler runs.
pub async fn enforce_rate_limit<C>(
    State(route): State<RouteLimit<C>>,
    request: Request,
    next: Next,
) -> Response
where
    C: Clock + 'static,
{
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let identifier = client_identifier(request.headers(), peer);
    let decision = route.limiter.check_detailed(&identifier, route.limit);

    if !decision.allowed() {
        warn!(
            identifier = %identifier,
            path = %request.uri().path(),
            "rate limit exceeded"
        );
        return RateLimitRejection(decision).into_response();
    }

    let mut response = next.run(request).await;
    apply_rate_limit_headers(response.headers_mut(), &decision);
    response
}
