// ⚙️ Configuration - dashboard.toml with an embedded default

use crate::selection::Selection;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";
pub const DATA_ENV: &str = "DASHBOARD_DATA";
pub const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatasetConfig {
    /// JSON file or generated data.js
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is not set
    pub filter: String,
}

/// Initial values for dashboard controls.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct DefaultsConfig {
    pub poverty_indicator: Option<String>,
    pub latam_percentile: Option<String>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[dataset]
path = "docs/data.js"

[server]
bind = "0.0.0.0:3000"

[logging]
filter = "info"
"#;

impl Config {
    /// Selection the dashboard starts from.
    pub fn initial_selection(&self) -> Selection {
        let mut selection = Selection::default();
        if let Some(indicator) = &self.defaults.poverty_indicator {
            selection.poverty_indicator = indicator.clone();
        }
        if let Some(percentile) = &self.defaults.latam_percentile {
            selection.latam_percentile = percentile.clone();
        }
        selection
    }
}

/// Pick the config file to read.
///
/// Search order:
/// 1. Explicit `--config` path
/// 2. `DASHBOARD_CONFIG`
/// 3. `dashboard.toml` in `cwd`
///
/// `None` means the embedded default is used.
pub fn resolve_config_path(explicit: Option<&Path>, env_path: Option<String>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    let local = cwd.join(CONFIG_FILE);
    local.exists().then_some(local)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).context("Failed to parse configuration")
}

/// Load configuration following the search order of `resolve_config_path`.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    match resolve_config_path(explicit, std::env::var(CONFIG_ENV).ok(), &cwd) {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            parse_config(&contents).with_context(|| format!("Invalid config file {}", path.display()))
        }
        None => {
            tracing::info!("Using default embedded configuration");
            parse_config(DEFAULT_CONFIG)
        }
    }
}

/// Dataset file to load: `DASHBOARD_DATA` wins over `dataset.path`.
pub fn dataset_path(config: &Config, env_override: Option<String>) -> PathBuf {
    match env_override.filter(|p| !p.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(&config.dataset.path),
    }
}

/// Install the fmt subscriber. `RUST_LOG` takes precedence over the
/// configured filter.
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.filter.clone());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
