//! Configuration tests
//!
//! The template produced by `to_toml` must always parse back into the same
//! configuration; these tests fail when a new field is added to one side only.

use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let file = parse_file_config(&config.to_toml()).expect("default template parses");
    assert_eq!(Config::resolve(file, no_env), config);
}

#[test]
fn test_config_roundtrip_custom() {
    let mut config = Config::default();
    config.theme = "nord".to_string();
    config.render.width = 72;
    config.render.collapse_sections = true;
    config.render.show_field_names = false;
    config.logging.level = "agentdoc=debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_dir = PathBuf::from("/var/log/agentdoc");
    config.logging.file_rotation = LogRotation::Hourly;

    let file = parse_file_config(&config.to_toml()).expect("custom template parses");
    assert_eq!(Config::resolve(file, no_env), config);
}

#[test]
fn test_template_escapes_quotes() {
    let mut config = Config::default();
    config.logging.file_prefix = "we\"ird".to_string();
    let file = parse_file_config(&config.to_toml()).expect("escaped template parses");
    assert_eq!(Config::resolve(file, no_env).logging.file_prefix, "we\"ird");
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_means_defaults() {
    let file = parse_file_config("").unwrap();
    assert_eq!(Config::resolve(file, no_env), Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = parse_file_config("[render]\nwidth = 60\n").unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.render.width, 60);
    assert!(config.render.show_field_names);
    assert_eq!(config.theme, DEFAULT_THEME);
}

#[test]
fn test_env_overrides_file() {
    let file = parse_file_config("theme = \"nord\"\n[render]\nwidth = 60\n").unwrap();
    let env = env_from(&[("AGENTDOC_THEME", "dracula"), ("AGENTDOC_WIDTH", "120")]);
    let config = Config::resolve(file, env);
    assert_eq!(config.theme, "dracula");
    assert_eq!(config.render.width, 120);
}

#[test]
fn test_unparseable_env_width_is_ignored() {
    let file = parse_file_config("[render]\nwidth = 60\n").unwrap();
    let config = Config::resolve(file, env_from(&[("AGENTDOC_WIDTH", "wide")]));
    assert_eq!(config.render.width, 60);
}

#[test]
fn test_unknown_rotation_means_daily() {
    let file = parse_file_config("[logging]\nfile_rotation = \"weekly\"\n").unwrap();
    assert_eq!(
        Config::resolve(file, no_env).logging.file_rotation,
        LogRotation::Daily
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_file_is_an_error() {
    assert!(parse_file_config("theme = nord").is_err());
    assert!(parse_file_config("[render]\nwidth = \"wide\"\n").is_err());
}

#[test]
fn test_unknown_keys_are_rejected() {
    assert!(parse_file_config("[render]\nwrap = 80\n").is_err());
}
