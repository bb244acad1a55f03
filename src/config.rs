use std::path::{Path, PathBuf};
use std::time::Duration;
use clap::Args;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use crate::locale::DisplayLocale;

pub const DEFAULT_API_URL: &str = "http://localhost:1698";
const SETTINGS_FILENAME: &str = ".modern-blog.json";

#[derive(Args, Debug, Clone)]
pub struct FlatConfig {
    #[arg(long, global = true, env = "ARTICLES_API_URL", help = "Base URL of the article store API")]
    api_url: Option<String>,

    #[arg(long, global = true, env = "BLOG_LOCALE", help = "Locale of article dates [en, ru]")]
    locale: Option<DisplayLocale>,

    #[arg(long, global = true, env = "BLOG_REQUEST_TIMEOUT", default_value = "10s", help = "Timeout of a single store request, e.g. 5s or 1m")]
    request_timeout: humantime::Duration,

    #[arg(long, global = true, env = "BLOG_LOG_LEVEL", default_value = "info", help = "Log level [error, warn, info, debug, trace]")]
    log_level: log::LevelFilter,

    #[arg(long, global = true, env = "BLOG_SETTINGS", help = "Path of the settings file (default: ~/.modern-blog.json)")]
    settings: Option<PathBuf>,
}

/// Settings persisted by `config set`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub locale: Option<DisplayLocale>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfiguration,
    pub display: DisplayConfiguration,
    pub log_level: log::LevelFilter,
    pub settings_path: PathBuf,
    pub file_config: FileConfig,
}

#[derive(Debug, Clone)]
pub struct StoreConfiguration {
    pub api_url: String,             // ARTICLES_API_URL
    pub request_timeout: Duration,   // BLOG_REQUEST_TIMEOUT
}

#[derive(Debug, Clone)]
pub struct DisplayConfiguration {
    pub locale: DisplayLocale,       // BLOG_LOCALE
}

impl AppConfig {
    /// Flags and env vars win over the settings file, which wins over defaults.
    pub fn load(flat: FlatConfig) -> Self {
        let settings_path = flat.settings.clone().unwrap_or_else(default_settings_path);
        let file_config = read_file_config(&settings_path);
        Self::merge(flat, settings_path, file_config)
    }

    fn merge(flat: FlatConfig, settings_path: PathBuf, file_config: FileConfig) -> Self {
        let api_url = flat.api_url
            .or_else(|| file_config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let locale = flat.locale.or(file_config.locale).unwrap_or_default();
        Self {
            store: StoreConfiguration {
                api_url,
                request_timeout: flat.request_timeout.into(),
            },
            display: DisplayConfiguration { locale },
            log_level: flat.log_level,
            settings_path,
            file_config,
        }
    }
}

fn default_settings_path() -> PathBuf {
    home::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(SETTINGS_FILENAME)
}

pub fn read_file_config(path: &Path) -> FileConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return FileConfig::default(),
    };
    match serde_json::from_str(&content) {
        Ok(file_config) => file_config,
        Err(e) => {
            warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}

pub fn write_file_config(path: &Path, file_config: &FileConfig) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(file_config)?;
    std::fs::write(path, content)?;
    info!("Settings written to {}", path.display());
    Ok(())
}
