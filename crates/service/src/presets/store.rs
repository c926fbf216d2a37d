use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::json_doc_store::JsonDocStore;

use super::color::{normalize_delete_target, normalize_hex8};
use super::document::{
    coerce_version, collapse_by_type, default_document, normalize_entry, PresetConfig, RawDocument,
    UNKNOWN_TYPE,
};

/// Outcome of a merge: the number of incoming entries kept plus the document
/// as written.
#[derive(Debug)]
pub struct MergeOutcome {
    pub updated: usize,
    pub config: PresetConfig,
}

/// Outcome of a delete: removed count plus the document as written, in raw
/// form since unparseable entries survive deletion untouched.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub deleted: usize,
    pub config: RawDocument,
}

/// File-backed store for per-node-type color presets.
///
/// Owns the path to the presets document; every operation re-reads the file
/// so edits made outside the process are picked up. Two concurrent mutations
/// race read-modify-write and the later write wins; callers are expected to
/// be a single frontend instance per file.
pub struct ColorPresetStore {
    store: JsonDocStore,
}

/// Unwrap a merge payload: either a bare entry array or `{ "nodes": [...] }`.
pub fn merge_payload_nodes(payload: Value) -> Result<Vec<Value>, ServiceError> {
    let nodes = match payload {
        Value::Array(entries) => Some(entries),
        Value::Object(mut map) => match map.remove("nodes") {
            Some(Value::Array(entries)) => Some(entries),
            _ => None,
        },
        _ => None,
    };
    nodes.ok_or_else(|| ServiceError::Validation("`nodes` must be an array".into()))
}

impl ColorPresetStore {
    /// Initialize the store, creating the presets file with the default
    /// document when it is missing or structurally broken.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = Self { store: JsonDocStore::new(path) };
        store.ensure().await?;
        Ok(Arc::new(store))
    }

    /// A document is structurally valid when the top level is an object with
    /// a `nodes` key; everything finer-grained is handled per entry.
    async fn ensure(&self) -> Result<(), ServiceError> {
        self.store
            .ensure(&default_document(), |doc| doc.is_object() && doc.get("nodes").is_some())
            .await
    }

    async fn read_raw(&self) -> RawDocument {
        RawDocument::from_value(self.store.read_or(&default_document()).await)
    }

    async fn write_config(&self, config: &PresetConfig) -> Result<(), ServiceError> {
        let value = serde_json::to_value(config).map_err(ServiceError::storage)?;
        self.store.write(&value).await
    }

    /// Current presets with reserved types filtered, duplicate types
    /// collapsed and colors canonicalized. Never writes.
    pub async fn get(&self) -> PresetConfig {
        if let Err(e) = self.ensure().await {
            debug!(error = %e, "presets file could not be ensured; continuing with default");
        }
        let doc = self.read_raw().await;
        let collapsed = collapse_by_type(doc.nodes.iter().filter_map(normalize_entry));
        PresetConfig {
            version: coerce_version(&doc.version),
            nodes: collapsed.into_values().collect(),
        }
    }

    /// Merge incoming raw entries into the stored document.
    ///
    /// Incoming entries are normalized (type defaulting, reserved filtering,
    /// color canonicalization) and dropped when they end up with neither
    /// color nor bgcolor. Existing types keep their position and have their
    /// values replaced; new types append in incoming order. The whole
    /// document is rewritten; a failed write leaves storage unchanged.
    pub async fn merge(&self, incoming: &[Value]) -> Result<MergeOutcome, ServiceError> {
        let kept: Vec<_> = incoming
            .iter()
            .filter_map(normalize_entry)
            .filter(|entry| entry.color.is_some() || entry.bgcolor.is_some())
            .collect();
        let updated = kept.len();

        self.ensure().await?;
        let doc = self.read_raw().await;

        let mut merged = collapse_by_type(doc.nodes.iter().filter_map(normalize_entry));
        for entry in kept {
            merged.insert(entry.type_name.clone(), entry);
        }

        let config = PresetConfig {
            version: coerce_version(&doc.version),
            nodes: merged.into_values().collect(),
        };
        self.write_config(&config).await?;
        Ok(MergeOutcome { updated, config })
    }

    /// Remove stored entries matching a color value in either color field.
    ///
    /// With `type_filter` at most the first entry whose raw `type` equals it
    /// exactly (no normalization) and whose color matches is removed;
    /// without, every matching entry is. Entries that cannot be parsed are
    /// left in place.
    pub async fn delete_by_color(
        &self,
        color: &str,
        type_filter: Option<&str>,
    ) -> Result<DeleteOutcome, ServiceError> {
        let target = normalize_delete_target(color);

        self.ensure().await?;
        let mut doc = self.read_raw().await;
        let before = doc.nodes.len();

        match type_filter {
            Some(wanted) => {
                let mut removed = false;
                doc.nodes.retain(|node| {
                    if removed || !entry_matches(node, &target, Some(wanted)) {
                        true
                    } else {
                        removed = true;
                        false
                    }
                });
            }
            None => doc.nodes.retain(|node| !entry_matches(node, &target, None)),
        }

        let deleted = before - doc.nodes.len();
        let value = serde_json::to_value(&doc).map_err(ServiceError::storage)?;
        self.store.write(&value).await?;
        Ok(DeleteOutcome { deleted, config: doc })
    }

    /// Clear every preset entry, preserving the version stamp.
    pub async fn delete_all(&self) -> Result<RawDocument, ServiceError> {
        self.ensure().await?;
        let mut doc = self.read_raw().await;
        doc.nodes.clear();
        let value = serde_json::to_value(&doc).map_err(ServiceError::storage)?;
        self.store.write(&value).await?;
        Ok(doc)
    }
}

fn entry_matches(node: &Value, target: &str, wanted_type: Option<&str>) -> bool {
    let obj = match node.as_object() {
        Some(obj) => obj,
        None => return false,
    };
    if let Some(wanted) = wanted_type {
        let raw_type = obj
            .get("type")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TYPE);
        if raw_type != wanted {
            return false;
        }
    }
    let field_matches = |field: &str| {
        obj.get(field)
            .and_then(Value::as_str)
            .and_then(normalize_hex8)
            .map_or(false, |c| c == target)
    };
    field_matches("color") || field_matches("bgcolor")
}
