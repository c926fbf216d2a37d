//! Static asset routes for the bundled frontend.
//!
//! The frontend build produces compiled assets under `<web_root>/align`, a
//! Vite manifest at `<web_root>/.vite/manifest.json` for hashed asset
//! resolution and locale bundles under `<web_root>/locales`. Each is served
//! when present and logged as a warning when not; the API works either way.

use std::path::PathBuf;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

/// Resolved static-asset locations for the bundled frontend.
pub struct WebAssets {
    web_root: PathBuf,
    project_name: String,
}

impl WebAssets {
    pub fn new(web_root: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self { web_root: web_root.into(), project_name: project_name.into() }
    }

    fn align_dir(&self) -> PathBuf {
        self.web_root.join("align")
    }

    fn manifest_path(&self) -> PathBuf {
        self.web_root.join(".vite").join("manifest.json")
    }

    fn locales_dir(&self) -> PathBuf {
        self.web_root.join("locales")
    }

    /// Attach frontend asset routes to the `/align` router: the compiled
    /// bundle as the fallback service plus the Vite manifest route.
    pub fn mount_align<S>(&self, mut router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let align_dir = self.align_dir();
        if !align_dir.is_dir() {
            warn!(path = %align_dir.display(), "web directory not found; frontend assets will not be served");
            return router;
        }

        let manifest = self.manifest_path();
        if manifest.is_file() {
            router = router.route_service("/manifest.json", ServeFile::new(&manifest));
        } else {
            warn!(path = %manifest.display(), "manifest.json not found; hashed assets may not be discoverable");
        }

        info!(
            project = %self.project_name,
            path = %align_dir.display(),
            "serving frontend assets"
        );
        router.fallback_service(ServeDir::new(align_dir))
    }

    /// Locale bundles under `/locales/`, when present.
    pub fn locales_router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let locales_dir = self.locales_dir();
        if locales_dir.is_dir() {
            Router::new().nest_service("/locales", ServeDir::new(locales_dir))
        } else {
            warn!(path = %locales_dir.display(), "locale directory not found");
            Router::new()
        }
    }
}
