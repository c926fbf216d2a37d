use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::presets::ColorPresetStore;

use crate::web_assets::WebAssets;

pub mod color_presets;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: presets API, frontend assets, health.
pub fn build_router(store: Arc<ColorPresetStore>, assets: WebAssets, cors: CorsLayer) -> Router {
    let align = Router::new()
        .route(
            "/api/color_presets",
            get(color_presets::get_presets)
                .post(color_presets::upsert_presets)
                .delete(color_presets::delete_preset),
        )
        .route("/api/color_presets/all", delete(color_presets::delete_all_presets));
    let align = assets.mount_align(align);

    Router::new()
        .route("/health", get(health))
        .nest("/align", align)
        .merge(assets.locales_router())
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
