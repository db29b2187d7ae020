//! Server configuration.
//!
//! Loaded once at startup from a YAML file. The path comes from the `CONFIG`
//! environment variable and defaults to `config.yaml`.
//!
//! ```yaml
//! server:
//!   port: 8080
//!   max_threads: 10
//! static_files:
//!   root: ./wwwroot
//!   default_page: index.html
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

/// Listener and worker pool settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// TCP port to listen on
    pub port: u16,
    /// Number of connection workers
    pub max_threads: usize,
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Accepted sockets that may wait for a free worker
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

/// Document root settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// Directory all request paths are resolved against
    pub root: PathBuf,
    /// File served for a bare `/`
    pub default_page: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_queue_capacity() -> usize {
    256
}

impl Config {
    /// Loads the configuration from `$CONFIG`, or `config.yaml` when unset.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw).context("malformed configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be greater than 0");
        }
        if self.server.max_threads == 0 {
            bail!("server.max_threads must be greater than 0");
        }
        if self.server.queue_capacity == 0 {
            bail!("server.queue_capacity must be greater than 0");
        }
        if self.static_files.default_page.trim_matches('/').is_empty() {
            bail!("static_files.default_page must not be empty");
        }
        if !self.static_files.root.is_dir() {
            bail!(
                "static_files.root {} is not a directory",
                self.static_files.root.display()
            );
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
