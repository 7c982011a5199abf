use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{pages, rest, AppState};

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Health check
        .route("/health", get(|| async { "ok" }))
        // Pages (Dioxus SSR)
        .route("/", get(pages::home_page))
        .route("/forms/report", get(pages::report_form_page))
        .route("/forms/falsepositive", get(pages::falsepositive_form_page))
        .route("/pages/progress", get(pages::progress_page))
        // REST API
        .route("/api/v1/report", post(rest::report::api_report))
        .route("/api/v1/formreport", post(rest::report::form_report))
        .route("/api/v1/waitlist", get(rest::api_waitlist))
        .route("/api/v1/blacklist", get(rest::api_blacklist))
        .route("/api/v1/progress", get(rest::api_progress))
        .with_state(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Method + path only: no query strings, no client IP
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
