use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use crate::errors::ServiceError;

/// JSON file-backed single-document store.
///
/// Persists one JSON document and provides ensure/read/write helpers.
/// Reads always go to disk so edits made outside the process between
/// requests are picked up; there is no in-memory copy.
pub struct JsonDocStore {
    file_path: PathBuf,
}

impl JsonDocStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Create the file with `default` when missing, or overwrite it when the
    /// current content fails to parse or does not satisfy `is_valid`.
    pub async fn ensure<F>(&self, default: &Value, is_valid: F) -> Result<(), ServiceError>
    where
        F: Fn(&Value) -> bool,
    {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        match fs::read(&self.file_path).await {
            Ok(bytes) => {
                let valid = serde_json::from_slice::<Value>(&bytes)
                    .map(|doc| is_valid(&doc))
                    .unwrap_or(false);
                if !valid {
                    self.write(default).await?;
                    warn!(path = %self.file_path.display(), "reset malformed document to default");
                }
            }
            Err(_) => {
                self.write(default).await?;
                info!(path = %self.file_path.display(), "created default document");
            }
        }
        Ok(())
    }

    /// Read the document; IO or parse failures degrade to a clone of
    /// `default` with a diagnostic.
    pub async fn read_or(&self, default: &Value) -> Value {
        match fs::read(&self.file_path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(path = %self.file_path.display(), error = %e, "failed to parse document; using default");
                    default.clone()
                }
            },
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "failed to read document; using default");
                default.clone()
            }
        }
    }

    /// Full overwrite of the backing file, pretty-printed.
    pub async fn write(&self, doc: &Value) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(doc).map_err(ServiceError::storage)?;
        fs::write(&self.file_path, data).await.map_err(ServiceError::storage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_doc_store_{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn ensure_creates_default_and_read_write_roundtrip() -> Result<(), anyhow::Error> {
        let path = temp_path();
        let store = JsonDocStore::new(&path);
        let default = json!({"version": 1, "nodes": []});

        store.ensure(&default, |doc| doc.is_object()).await?;
        assert_eq!(store.read_or(&default).await, default);

        let doc = json!({"version": 2, "nodes": [{"type": "X"}]});
        store.write(&doc).await?;
        assert_eq!(store.read_or(&default).await, doc);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn ensure_resets_invalid_content() -> Result<(), anyhow::Error> {
        let path = temp_path();
        let default = json!({"version": 1, "nodes": []});

        tokio::fs::write(&path, b"not json at all {{{").await?;
        let store = JsonDocStore::new(&path);
        store.ensure(&default, |doc| doc.get("nodes").is_some()).await?;
        assert_eq!(store.read_or(&default).await, default);

        // structurally wrong content is reset as well
        tokio::fs::write(&path, b"[1, 2, 3]").await?;
        store.ensure(&default, |doc| doc.get("nodes").is_some()).await?;
        assert_eq!(store.read_or(&default).await, default);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn read_degrades_to_default_when_file_missing() {
        let default = json!({"version": 1, "nodes": []});
        let store = JsonDocStore::new(temp_path());
        assert_eq!(store.read_or(&default).await, default);
    }
}
