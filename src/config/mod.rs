//! Configuration for rendering and logging
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/agentdoc/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod render;
mod serialization;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use render::{FileRender, RenderConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Theme used when neither env nor file name one
pub const DEFAULT_THEME: &str = "auto";

const ENV_THEME: &str = "AGENTDOC_THEME";
const ENV_WIDTH: &str = "AGENTDOC_WIDTH";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Theme name: "auto", "dracula", "nord", "gruvbox"
    pub theme: String,

    /// Document layout settings
    pub render: RenderConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,

    /// Optional [render] section
    pub render: Option<FileRender>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/agentdoc/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("agentdoc").join("config.toml"))
    }

    /// Load configuration: env vars > file > defaults
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error, so a broken config never silently falls back.
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Theme: env > file > default
        let theme = env(ENV_THEME)
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        let mut render = RenderConfig::from_file(file.render);
        // Width: env > file > default (unparseable env values are ignored)
        if let Some(width) = env(ENV_WIDTH).and_then(|v| v.trim().parse().ok()) {
            render.width = width;
        }

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            theme,
            render,
            logging,
        }
    }

    /// Write the default template unless a config file already exists
    ///
    /// Returns the path and whether a new file was written.
    pub fn init_file() -> Result<(PathBuf, bool)> {
        let path = Self::config_path().context("Could not determine config path")?;
        if path.exists() {
            return Ok((path, false));
        }
        Self::default().save_to(&path)?;
        Ok((path, true))
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_file_config(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(e) => {
            Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
        }
    }
}

pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig> {
    Ok(toml::from_str(contents)?)
}
