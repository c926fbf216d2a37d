use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub presets: PresetsConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080 }
    }
}

/// Location of the persisted color presets document.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetsConfig {
    #[serde(default = "default_presets_file")]
    pub file: String,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self { file: default_presets_file() }
    }
}

fn default_presets_file() -> String {
    "data/color_presets.json".to_string()
}

/// Static asset locations for the bundled frontend.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_web_root")]
    pub web_root: String,
    #[serde(default)]
    pub project_name: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self { web_root: default_web_root(), project_name: None }
    }
}

fn default_web_root() -> String {
    "web".to_string()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.presets.validate()?;
        self.assets.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }
}

impl PresetsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.file.trim().is_empty() {
            return Err(anyhow!("presets.file must not be empty"));
        }
        Ok(())
    }
}

impl AssetsConfig {
    fn normalize(&mut self) {
        if self.web_root.trim().is_empty() {
            self.web_root = default_web_root();
        }
    }
}
