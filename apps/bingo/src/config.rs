//! Configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/bingo/bingo.toml`
//! - Windows: `%APPDATA%/bingo/bingo.toml`
//!
//! A missing default file means defaults; a missing file passed with
//! `--config` is an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use bingo_client::JoinConfig;
use bingo_host::HostConfig;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Port used for hosting and joining unless overridden.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds to wait for the next message from a peer.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Seconds allowed for reaching a host.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Named item lists that can be hosted with `--template`.
    #[serde(default)]
    pub templates: BTreeMap<String, Vec<String>>,
}

fn default_port() -> u16 {
    bingo_protocol::DEFAULT_PORT
}

fn default_read_timeout() -> u64 {
    bingo_protocol::READ_TIMEOUT.as_secs()
}

fn default_connect_timeout() -> u64 {
    bingo_protocol::CONNECT_TIMEOUT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            read_timeout_secs: default_read_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            templates: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads `path` if given, otherwise the platform default file.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let path = config_path();
                if path.exists() {
                    Self::load_file(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no configuration file, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn host_config(&self, port: Option<u16>) -> HostConfig {
        HostConfig {
            port: port.unwrap_or(self.port),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
        }
    }

    pub fn join_config(&self) -> JoinConfig {
        JoinConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
        }
    }

    pub fn template(&self, name: &str) -> Option<&[String]> {
        self.templates.get(name).map(Vec::as_slice)
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("bingo").join("bingo.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("bingo")
            .join("bingo.toml")
    }
}
