use std::{env, net::SocketAddr, path::Path};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::AppConfig;
use service::presets::ColorPresetStore;
use service::runtime;

use crate::routes;
use crate::web_assets::WebAssets;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from config or env vars, with sensible fallbacks
fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| cfg.server.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cfg.server.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

fn resolve_project_name(cfg: &AppConfig) -> String {
    if let Some(name) = &cfg.assets.project_name {
        return name.clone();
    }
    env::current_dir()
        .ok()
        .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "align".to_string())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate().unwrap_or_else(|e| {
        warn!(error = %e, "config not loaded; using defaults");
        AppConfig::default()
    });

    let data_dir = Path::new(&cfg.presets.file)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    runtime::ensure_env(&cfg.assets.web_root, &data_dir).await?;

    // Preset store state, created up front so a broken presets file is
    // repaired before the first request
    let store = ColorPresetStore::new(&cfg.presets.file).await?;

    let assets = WebAssets::new(&cfg.assets.web_root, resolve_project_name(&cfg));

    let app: Router = routes::build_router(store, assets, build_cors());

    let addr = load_bind_addr(&cfg)?;
    info!(%addr, presets_file = %cfg.presets.file, "starting align server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
