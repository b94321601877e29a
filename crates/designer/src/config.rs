use config::{Config as ConfigLoader, ConfigError, Environment, File};
use designer_core::AwaitPolicy;
use designer_persist::{StorageKeys, DEFAULT_THEME_KEY, DEFAULT_THREADS_KEY};
use designer_types::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    pub storage: StorageConfig,
    pub pipeline: PipelineConfig,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageKind,
    /// Directory for the file backend (platform data dir when unset)
    pub dir: Option<PathBuf>,
    pub threads_key: String,
    pub theme_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageKind::default(),
            dir: None,
            threads_key: DEFAULT_THREADS_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn keys(&self) -> StorageKeys {
        StorageKeys {
            threads: self.threads_key.clone(),
            theme: self.theme_key.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub await_policy: AwaitPolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Stand-in for the system colour scheme when no theme is stored
    pub prefers_dark: bool,
}

impl ThemeConfig {
    pub fn system_default(&self) -> Theme {
        Theme::from_system(self.prefers_dark)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl DesignerConfig {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{DESIGNER_ENV}.toml (if DESIGNER_ENV is set)
    /// 3. Environment variables, e.g. `DESIGNER_STORAGE__DIR`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("DESIGNER_ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("DESIGNER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        builder.build()?.try_deserialize()
    }
}
