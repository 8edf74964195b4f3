//! Render configuration: wrap width and section display defaults

use serde::Deserialize;

use crate::render::{RenderOptions, DEFAULT_WIDTH};

/// Document layout settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Wrap width for paragraphs, lists and quotes
    pub width: usize,
    /// Start every tagged section collapsed
    pub collapse_sections: bool,
    /// Render "Name:" prefixes for section fields
    pub show_field_names: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            collapse_sections: false,
            show_field_names: true,
        }
    }
}

/// Render settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileRender {
    pub width: Option<usize>,
    pub collapse_sections: Option<bool>,
    pub show_field_names: Option<bool>,
}

impl RenderConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileRender>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            width: file.width.unwrap_or(defaults.width),
            collapse_sections: file.collapse_sections.unwrap_or(defaults.collapse_sections),
            show_field_names: file.show_field_names.unwrap_or(defaults.show_field_names),
        }
    }

    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            show_field_names: self.show_field_names,
        }
    }
}
