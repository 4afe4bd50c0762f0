//! Guest occupancy tracking: check-in, stay durations, overdue review and
//! check-out against a configured capacity.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod jalali;
pub mod occupancy;
pub mod registry;
pub mod settings;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyHeader, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use error::ErrorResponse;
pub use state::AppState;

/// All routes, static assets and middleware, bound to `state`.
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(api::home::landing))
        .route("/healthz", get(api::home::healthz))
        .route("/set_admin_settings/", post(api::admin::set_admin_settings))
        .route("/set_guest/", post(api::guests::set_guest))
        .route("/admin_page/", get(api::admin::admin_page))
        .route("/exit_page/", get(api::exit::exit_page))
        .route("/set_exit_page/", get(api::exit::set_exit_page))
        .route("/set_exit/", post(api::exit::set_exit))
        .nest_service("/static", static_files)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

/// CORS policy for the configured origins. No origins means any origin may
/// call the API.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        tracing::warn!("CORS_ORIGINS not set, allowing requests from any origin");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    tracing::info!("CORS allowed origins: {:?}", origins);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AnyHeader)
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Server error".to_string(),
        }),
    )
        .into_response()
}
