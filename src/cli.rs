//! Command-line definition.

use clap::Parser;
use odstat_core::config::FilterConfig;
use odstat_core::{Dimension, Mode};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "odstat",
    about = "Extract statistics from Blender Benchmark Open Data: scene render times per OS or device",
    after_help = "Examples:\n  \
        odstat -o Linux-64bit -d \"AMD Ryzen 5 3600 6-Core Processor\" file.jsonl\n  \
        odstat -v -d \"GeForce GTX 950\" -d \"GeForce GTX 1650 SUPER\" --latest\n  \
        odstat -o Linux-64bit --list-devices file.jsonl\n  \
        odstat --download"
)]
pub struct Cli {
    /// Render device to keep. Repeatable; replaces the configured devices.
    #[arg(short = 'd', long = "device", value_name = "DEVICE")]
    pub devices: Vec<String>,

    /// Operating system to keep, e.g. Linux-64bit. Repeatable; replaces the configured list.
    #[arg(short = 'o', long = "os", value_name = "OS")]
    pub os: Vec<String>,

    /// Blender version regex, matched against the whole version. Repeatable.
    #[arg(short = 'V', long = "version-pattern", value_name = "REGEX")]
    pub version_patterns: Vec<String>,

    /// Print every retained result before its scene statistics.
    #[arg(short, long)]
    pub verbose: bool,

    /// Count submissions per operating system instead of aggregating.
    #[arg(long, conflicts_with_all = ["list_devices", "list_versions"])]
    pub list_os: bool,

    /// Count submissions per render device instead of aggregating.
    #[arg(long, conflicts_with = "list_versions")]
    pub list_devices: bool,

    /// Count submissions per Blender version instead of aggregating.
    #[arg(long)]
    pub list_versions: bool,

    /// Download the latest snapshot and extract its .jsonl file here, then exit.
    #[arg(long, conflicts_with_all = ["latest", "input"])]
    pub download: bool,

    /// Read the latest snapshot straight from the open-data server.
    #[arg(long, conflicts_with = "input")]
    pub latest: bool,

    /// Write debug logs to /tmp/odstat-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,

    /// Use this config file instead of ~/.config/odstat/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON-lines submission file.
    #[arg(required_unless_present_any = ["latest", "download"])]
    pub input: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.list_os {
            Mode::Count(Dimension::Os)
        } else if self.list_devices {
            Mode::Count(Dimension::Device)
        } else if self.list_versions {
            Mode::Count(Dimension::Version)
        } else {
            Mode::Aggregate
        }
    }

    /// Layer command-line filters over the configured ones.
    pub fn apply(&self, filter: &mut FilterConfig) {
        if !self.os.is_empty() {
            filter.target_os = self.os.clone();
        }
        if !self.devices.is_empty() {
            filter.target_devices = self.devices.clone();
        }
        filter
            .version_patterns
            .extend(self.version_patterns.iter().cloned());
    }
}
