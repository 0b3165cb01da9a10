use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::handlers::session::session;
use super::middleware::optional_access;
use super::middleware::require_access;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no signing secret is configured
    pub authenticator: Option<Arc<Authenticator>>,
}

pub fn create_router(authenticator: Option<Arc<Authenticator>>) -> Router {
    let state = AppState { authenticator };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/user/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access,
        ));

    let optional_routes = Router::new()
        .route("/session", get(session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_access,
        ));

    // Request headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(optional_routes)
        .layer(trace_layer)
        .layer(cors_layer)
        .with_state(state)
}
