//! Configuration types for odstat.
//!
//! [`Config::load`] reads `~/.config/odstat/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[filter]
target_os = ["Linux-64bit"]
target_devices = [
    "GeForce GTX 950",
    "GeForce GTX 1650 SUPER",
    "AMD Ryzen 5 1600 Six-Core Processor",
    "AMD Ryzen 5 3600 6-Core Processor",
]
version_patterns = []

[source]
latest_url = "https://opendata.blender.org/snapshots/opendata-latest.zip"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/odstat/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// `[filter]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_target_os")]
    pub target_os: Vec<String>,
    #[serde(default = "default_target_devices")]
    pub target_devices: Vec<String>,
    /// Whole-string regexes; empty matches every version.
    #[serde(default)]
    pub version_patterns: Vec<String>,
}

fn default_target_os() -> Vec<String> {
    vec!["Linux-64bit".to_string()]
}

fn default_target_devices() -> Vec<String> {
    [
        "GeForce GTX 950",
        "GeForce GTX 1650 SUPER",
        "AMD Ryzen 5 1600 Six-Core Processor",
        "AMD Ryzen 5 3600 6-Core Processor",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            target_os: default_target_os(),
            target_devices: default_target_devices(),
            version_patterns: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Compile into a [`Filter`](crate::aggregate::Filter).
    pub fn build(&self) -> Result<crate::aggregate::Filter, crate::aggregate::FilterError> {
        crate::aggregate::Filter::new(
            self.target_os.iter().cloned(),
            self.target_devices.iter().cloned(),
            &self.version_patterns,
        )
    }
}

/// `[source]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_latest_url")]
    pub latest_url: String,
}

fn default_latest_url() -> String {
    "https://opendata.blender.org/snapshots/opendata-latest.zip".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            latest_url: default_latest_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/odstat/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())
                .with_context(|| format!("writing default config to {}", path.display()))?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit file on top of the built-in defaults. The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()
            .with_context(|| format!("reading {}", path.display()))?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("odstat")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
