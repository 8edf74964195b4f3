//! Field extraction for tagged sections
//!
//! Agents often write section bodies as `Name: value` lines. Each non-blank
//! line becomes a [`Field`]; lines without a usable colon keep `name: None`.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// One line of a tagged section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: Option<String>,
    pub value: String,
}

impl Field {
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    pub fn free(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }
}

fn field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^:]+):(.*)$").expect("field pattern is valid"))
}

/// Classify every non-blank line of a section body
pub fn extract_fields(content: &str) -> Vec<Field> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(classify_line)
        .collect()
}

fn classify_line(line: &str) -> Field {
    match field_regex().captures(line) {
        Some(caps) => Field::named(caps[1].trim(), caps[2].trim()),
        None => Field::free(line),
    }
}
