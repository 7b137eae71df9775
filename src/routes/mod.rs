use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderName, Request, Response, StatusCode, Uri},
    middleware::from_fn_with_state,
    routing::get,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    middleware::pages::{PROTECTED_PAGES, require_login},
    response::{ApiResponse, Meta},
    services::food_service::UPLOADS_URL_PREFIX,
    state::AppState,
};

pub mod account;
pub mod auth;
pub mod doc;
pub mod extract;
pub mod food;
pub mod health;
pub mod orders;
pub mod params;
pub mod reports;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(account::router())
        .merge(food::router(max_upload_bytes))
        .merge(orders::router())
        .merge(reports::router())
}

/// Dashboard pages of the prebuilt frontend, served only to logged-in browsers.
fn pages_router(state: &AppState) -> Router<AppState> {
    let mut router = Router::new();
    for prefix in PROTECTED_PAGES {
        let dir = state.config.static_dir.join(prefix.trim_start_matches('/'));
        router = router.nest_service(prefix, ServeDir::new(dir));
    }
    router.route_layer(from_fn_with_state(state.clone(), require_login))
}

pub fn create_app(state: AppState) -> Router {
    let concurrency_limit_layer = ConcurrencyLimitLayer::new(100);

    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "request started"
            );
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router(max_upload_bytes))
        .nest_service(
            UPLOADS_URL_PREFIX,
            ServeDir::new(state.config.upload_dir.clone()),
        )
        .merge(pages_router(&state))
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(concurrency_limit_layer)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
