//! Configuration for the tyg CLI.
//!
//! Layered loading, lowest to highest priority: built-in defaults, a
//! `tyg.toml` in the working directory, `TYG_*` environment variables, and
//! finally explicit CLI arguments.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::providers::{Env, Format as _, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Name of the optional config file in the project root.
pub const CONFIG_FILE: &str = "tyg.toml";

/// Resolved CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TygConfig {
    /// Directory scanned for `*_schema.json` files
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Dev server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Dev server bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Watcher debounce window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Path prefixes the watcher ignores
    #[serde(default = "default_watch_ignore")]
    pub watch_ignore: Vec<String>,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("src/page_data")
}

fn default_port() -> u16 {
    5179
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_debounce_ms() -> u64 {
    50
}

fn default_watch_ignore() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        "dist".to_string(),
        "target".to_string(),
    ]
}

impl Default for TygConfig {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            port: default_port(),
            host: default_host(),
            debounce_ms: default_debounce_ms(),
            watch_ignore: default_watch_ignore(),
        }
    }
}

impl TygConfig {
    /// Load configuration from all layers, then apply CLI overrides.
    pub fn load(schema_dir: Option<PathBuf>, port: Option<u16>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(TygConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("TYG_"));

        let mut config: TygConfig = figment
            .extract()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if let Some(dir) = schema_dir {
            config.schema_dir = dir;
        }
        if let Some(port) = port {
            config.port = port;
        }
        Ok(config)
    }

    /// The socket address the dev server binds.
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| CliError::Config(format!("invalid host/port: {e}")))
    }

    /// The URL the dev server is reachable at.
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
