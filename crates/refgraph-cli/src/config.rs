//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use refgraph_core::limits::{validate_traversal_depth, DEFAULT_TRAVERSAL_DEPTH};
use refgraph_core::ScanOptions;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "REFGRAPH_CONFIG";

/// Get the config file path
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("refgraph")
        .join("config.toml")
}

fn default_depth() -> u32 {
    DEFAULT_TRAVERSAL_DEPTH
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanOptions,

    #[serde(default = "default_depth")]
    pub default_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            default_depth: default_depth(),
        }
    }
}

impl Config {
    /// Load from the config file, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|s| toml::from_str::<Config>(&s).map_err(anyhow::Error::from));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Settable keys
    pub fn keys() -> &'static [&'static str] {
        &["meta_suffix", "marker", "reference_extensions", "default_depth"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "meta_suffix" => Some(self.scan.meta_suffix.clone()),
            "marker" => Some(self.scan.marker.clone()),
            "reference_extensions" => Some(self.scan.reference_extensions.join(",")),
            "default_depth" => Some(self.default_depth.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "meta_suffix" => self.scan.meta_suffix = value.to_string(),
            "marker" => self.scan.marker = value.to_string(),
            "reference_extensions" => {
                self.scan.reference_extensions = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "default_depth" => {
                let depth: u32 = value
                    .parse()
                    .with_context(|| format!("invalid depth: {}", value))?;
                validate_traversal_depth(depth)?;
                self.default_depth = depth;
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        self.scan.validate()?;
        Ok(())
    }
}
