use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use service::presets::document::PresetConfig;
use service::presets::store::merge_payload_nodes;
use service::presets::ColorPresetStore;

use crate::errors::ApiError;

/// GET `/align/api/color_presets`: current presets, normalized.
pub async fn get_presets(State(store): State<Arc<ColorPresetStore>>) -> Json<PresetConfig> {
    Json(store.get().await)
}

/// POST `/align/api/color_presets`: merge entries into the stored config.
///
/// Accepts either a bare `NodeEntry[]` or `{ "nodes": NodeEntry[] }`.
pub async fn upsert_presets(
    State(store): State<Arc<ColorPresetStore>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let nodes = merge_payload_nodes(payload)?;
    let outcome = store.merge(&nodes).await?;
    Ok(Json(json!({ "updated": outcome.updated, "config": outcome.config })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    color: Option<String>,
    #[serde(rename = "type", default)]
    type_name: Option<String>,
}

/// DELETE `/align/api/color_presets`: remove entries matching a color.
///
/// `{ "color": ... }` removes every entry where `color` or `bgcolor`
/// matches; adding `"type"` removes only the first entry of that type.
pub async fn delete_preset(
    State(store): State<Arc<ColorPresetStore>>,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<Value>, ApiError> {
    let color = match req.color.as_deref() {
        Some(color) if !color.is_empty() => color,
        _ => return Err(ApiError::bad_request("'color' is required")),
    };
    let type_filter = req.type_name.as_deref().filter(|t| !t.is_empty());

    let outcome = store.delete_by_color(color, type_filter).await?;
    Ok(Json(json!({ "deleted": outcome.deleted, "config": outcome.config })))
}

/// DELETE `/align/api/color_presets/all`: clear every preset entry.
pub async fn delete_all_presets(
    State(store): State<Arc<ColorPresetStore>>,
) -> Result<Json<Value>, ApiError> {
    let config = store.delete_all().await?;
    Ok(Json(json!({ "deleted": "all", "config": config })))
}
