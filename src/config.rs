use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Server configuration.
///
/// Loaded once at startup and passed into the server at construction; there
/// is no runtime reloading.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds, e.g. "127.0.0.1:8080"
    pub listen_addr: String,
    /// Root directory for the file-serving handler
    pub root_dir: PathBuf,
    /// Seconds an idle connection may wait for its next request
    pub idle_timeout_secs: u64,
    /// Cap on concurrently served connections; unbounded when absent
    pub max_connections: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            root_dir: PathBuf::from("."),
            idle_timeout_secs: 5,
            max_connections: None,
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// If the `CONFIG` environment variable names a YAML file, that file is
    /// the whole configuration. Otherwise the defaults apply, with `LISTEN`
    /// and `ROOT_DIR` environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("CONFIG") {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path))?;
            return Self::from_yaml(&text);
        }

        let mut cfg = Self::default();
        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("ROOT_DIR") {
            cfg.root_dir = PathBuf::from(dir);
        }
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("failed to parse config")
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
