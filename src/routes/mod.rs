pub mod dates;
pub mod health;
pub mod input;
pub mod metrics;
pub mod offers;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::{middleware::cors, AppState};

/// Full application router: JSON API under the configured prefix, plus
/// `/health` and `/metrics` at the root.
pub fn router(state: AppState) -> Router {
    let prefix = state.config.api_prefix.clone();
    let cors_layer = cors::cors_layer(&state.config.cors_origins);

    Router::new()
        .route(&format!("{prefix}/dates"), get(dates::list_dates))
        .route(
            &format!("{prefix}/offers"),
            get(offers::list_offers).post(offers::create_offer),
        )
        .route(&format!("{prefix}/offers/{{id}}/take"), post(offers::take_offer))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(cors_layer)
        .layer(middleware::from_fn(cors::options_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}
