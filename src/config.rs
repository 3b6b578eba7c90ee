use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_DIRECTORY: &str = "/tmp/";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

/// Env var naming an optional YAML config file.
pub const CONFIG_ENV: &str = "TINYSERVE_CONFIG";

/// Server settings shared read-only by every connection.
///
/// `directory` is joined to requested file names by plain string
/// concatenation, so it normally ends with a `/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub directory: String,
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

impl ServerConfig {
    /// Builds the config from the environment and the process arguments.
    ///
    /// Defaults first, then the YAML file named by `TINYSERVE_CONFIG`, then
    /// `LISTEN`, then `--directory <path>`.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }

        let args: Vec<String> = std::env::args().skip(1).collect();
        cfg.apply_args(&args);

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies `--directory <path>`. Any other argument shape is ignored.
    pub fn apply_args(&mut self, args: &[String]) {
        if let [flag, dir] = args {
            if flag == "--directory" {
                self.directory = dir.clone();
            }
        }
    }
}
