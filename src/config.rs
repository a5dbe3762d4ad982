use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "aweshore.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Contents of `aweshore.toml`. Every field is optional; command-line flags
/// take precedence, then these values, then the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AweshoreConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<Vec<String>>,
    pub log_format: Option<LogFormat>,
}

impl AweshoreConfig {
    /// The config `aweshore init` writes: every default spelled out
    pub fn with_defaults() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            allowed_origins: Some(vec![DEFAULT_ALLOWED_ORIGIN.to_string()]),
            log_format: Some(LogFormat::Pretty),
        }
    }

    pub fn database_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    pub fn host(&self, cli: Option<String>) -> String {
        cli.or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self, cli: Option<u16>) -> u16 {
        cli.or(self.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()])
    }

    pub fn log_format(&self, cli: Option<LogFormat>) -> LogFormat {
        cli.or(self.log_format).unwrap_or_default()
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("aweshore.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<AweshoreConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: AweshoreConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &AweshoreConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
