//! Config serialization to TOML
//!
//! Single source of truth for the config file format: `config --init`
//! writes this template and `config --show` prints it for the effective
//! configuration.

use super::Config;
use crate::theme::Theme;
use anyhow::{Context, Result};
use std::path::Path;

impl Config {
    /// Serialize config to a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# agentdoc configuration

# Theme: {themes} (AGENTDOC_THEME overrides)
theme = "{theme}"

[render]
# Wrap width for paragraphs (AGENTDOC_WIDTH overrides)
width = {width}
# Start every tagged section collapsed
collapse_sections = {collapse}
# Show "Name:" prefixes for section fields
show_field_names = {field_names}

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = "{log_level}"
# JSON log files in addition to stderr
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            themes = Theme::names().join(", "),
            theme = escape(&self.theme),
            width = self.render.width,
            collapse = self.render.collapse_sections,
            field_names = self.render.show_field_names,
            log_level = escape(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = escape(&self.logging.file_prefix),
        )
    }

    /// Write the TOML form to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Escape a value for a TOML basic string
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
