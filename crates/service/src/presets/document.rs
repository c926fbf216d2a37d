//! Preset document model and per-entry canonicalization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::color::normalize_hex8;
use super::name::is_reserved_type;

pub const DEFAULT_VERSION: i64 = 1;

/// Fallback type name for entries that carry none.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// A single node-type-to-color association in canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub color: Option<String>,
    pub bgcolor: Option<String>,
}

/// The document returned by read and merge operations: a version stamp plus
/// an ordered, type-unique entry list. Absent colors serialize as `null` so
/// the frontend always sees the same shape.
#[derive(Clone, Debug, Serialize)]
pub struct PresetConfig {
    pub version: i64,
    pub nodes: Vec<PresetEntry>,
}

/// Persisted shape before per-entry validation. `version` tolerates any JSON
/// value and is coerced on output; entries stay raw so malformed ones can be
/// skipped (or, for deletes, preserved) individually.
#[derive(Clone, Debug, Serialize)]
pub struct RawDocument {
    pub version: Value,
    pub nodes: Vec<Value>,
}

impl RawDocument {
    /// Lenient decode: a non-object document or a non-array `nodes` value
    /// degrades to the default rather than failing.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let version = map.remove("version").unwrap_or_else(|| json!(DEFAULT_VERSION));
                let nodes = match map.remove("nodes") {
                    Some(Value::Array(entries)) => entries,
                    _ => Vec::new(),
                };
                Self { version, nodes }
            }
            _ => Self { version: json!(DEFAULT_VERSION), nodes: Vec::new() },
        }
    }
}

/// The document written when the presets file is missing or malformed.
pub fn default_document() -> Value {
    json!({ "version": DEFAULT_VERSION, "nodes": [] })
}

/// Coerce a stored `version` value to an integer, defaulting when it cannot
/// be interpreted. Floats truncate; numeric strings parse.
pub fn coerce_version(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(DEFAULT_VERSION),
        Value::String(s) => s.trim().parse().unwrap_or(DEFAULT_VERSION),
        _ => DEFAULT_VERSION,
    }
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "type", default)]
    type_name: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    bgcolor: Option<String>,
}

/// Parse and canonicalize one raw entry. Returns `None` for entries that are
/// malformed (not an object, wrongly typed fields) or carry a reserved type.
pub fn normalize_entry(raw: &Value) -> Option<PresetEntry> {
    let entry: RawEntry = serde_json::from_value(raw.clone()).ok()?;
    let type_name = match entry.type_name {
        Some(t) if !t.is_empty() => t,
        _ => UNKNOWN_TYPE.to_string(),
    };
    if is_reserved_type(&type_name) {
        return None;
    }
    Some(PresetEntry {
        type_name,
        color: entry.color.as_deref().and_then(normalize_hex8),
        bgcolor: entry.bgcolor.as_deref().and_then(normalize_hex8),
    })
}

/// Collapse entries by type: the first occurrence keeps its position, later
/// occurrences overwrite the value.
pub fn collapse_by_type(
    entries: impl IntoIterator<Item = PresetEntry>,
) -> IndexMap<String, PresetEntry> {
    let mut collapsed = IndexMap::new();
    for entry in entries {
        collapsed.insert(entry.type_name.clone(), entry);
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_defaults_missing_or_empty_type_to_unknown() {
        let entry = normalize_entry(&json!({"color": "#abc"})).unwrap();
        assert_eq!(entry.type_name, "Unknown");
        assert_eq!(entry.color.as_deref(), Some("#AABBCCFF"));

        let entry = normalize_entry(&json!({"type": "", "bgcolor": "112233"})).unwrap();
        assert_eq!(entry.type_name, "Unknown");
        assert_eq!(entry.bgcolor.as_deref(), Some("#112233FF"));
    }

    #[test]
    fn entry_skips_reserved_types_with_decoration() {
        assert!(normalize_entry(&json!({"type": "Note", "color": "#fff"})).is_none());
        assert!(normalize_entry(&json!({"type": "MarkdownNote (old)", "color": "#fff"})).is_none());
    }

    #[test]
    fn entry_skips_malformed_values() {
        assert!(normalize_entry(&json!("just a string")).is_none());
        assert!(normalize_entry(&json!(42)).is_none());
        assert!(normalize_entry(&json!({"type": "X", "color": 123})).is_none());
    }

    #[test]
    fn invalid_colors_become_null() {
        let entry = normalize_entry(&json!({"type": "X", "color": "GGHHII", "bgcolor": "#12345"})).unwrap();
        assert_eq!(entry.color, None);
        assert_eq!(entry.bgcolor, None);
    }

    #[test]
    fn collapse_keeps_first_position_and_last_value() {
        let entries = vec![
            PresetEntry { type_name: "X".into(), color: Some("#111111FF".into()), bgcolor: None },
            PresetEntry { type_name: "Y".into(), color: Some("#333333FF".into()), bgcolor: None },
            PresetEntry { type_name: "X".into(), color: Some("#222222FF".into()), bgcolor: None },
        ];
        let collapsed = collapse_by_type(entries);
        let keys: Vec<_> = collapsed.keys().map(String::as_str).collect();
        assert_eq!(keys, ["X", "Y"]);
        assert_eq!(collapsed["X"].color.as_deref(), Some("#222222FF"));
    }

    #[test]
    fn version_coercion_is_lenient() {
        assert_eq!(coerce_version(&json!(3)), 3);
        assert_eq!(coerce_version(&json!(2.7)), 2);
        assert_eq!(coerce_version(&json!("5")), 5);
        assert_eq!(coerce_version(&json!("abc")), 1);
        assert_eq!(coerce_version(&json!(null)), 1);
    }

    #[test]
    fn raw_document_degrades_instead_of_failing() {
        let doc = RawDocument::from_value(json!({"version": 2, "nodes": 5}));
        assert!(doc.nodes.is_empty());
        assert_eq!(doc.version, json!(2));

        let doc = RawDocument::from_value(json!([1, 2, 3]));
        assert!(doc.nodes.is_empty());
        assert_eq!(coerce_version(&doc.version), DEFAULT_VERSION);
    }
}
