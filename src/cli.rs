// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - render: agent text -> styled document (or render instructions as JSON)
// - tree:   tool payload -> collapsible JSON tree (or visible rows as JSON)
// - config: show / locate / initialise the config file

use crate::clipboard::copy_to_clipboard;
use crate::config::{Config, VERSION};
use crate::document::{CollapsedSections, Document};
use crate::json_tree::{ExpandState, PayloadView, ToolPayload};
use crate::render::{self, render_document_with, render_payload};
use crate::theme::Theme;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

/// agentdoc - render structured agent output in the terminal
#[derive(Debug, Parser)]
#[command(name = "agentdoc")]
#[command(version = VERSION)]
#[command(
    about = "Render agent output: tagged sections, markdown and JSON payloads",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Never emit colors or text attributes
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render agent text: tagged sections plus markdown
    Render(RenderArgs),

    /// Render a tool payload as a collapsible JSON tree
    Tree(TreeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Input file (stdin when omitted)
    pub file: Option<PathBuf>,

    /// Print render instructions as JSON instead of styled text
    #[arg(long)]
    pub json: bool,

    /// Collapse a section by id (repeatable)
    #[arg(long = "collapse", value_name = "ID")]
    pub collapse: Vec<String>,

    /// Expand a section by id, after any collapse-all (repeatable)
    #[arg(long = "expand", value_name = "ID")]
    pub expand: Vec<String>,

    /// Collapse every tagged section
    #[arg(long)]
    pub collapse_all: bool,

    /// Wrap width (overrides config and AGENTDOC_WIDTH)
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,

    /// Copy a section's raw text to the clipboard
    #[arg(long, value_name = "ID")]
    pub copy: Option<String>,
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Input file with the JSON payload (stdin when omitted)
    pub file: Option<PathBuf>,

    /// Toggle a node by dotted path, e.g. root.args.0 (repeatable, applied in order)
    #[arg(long = "toggle", value_name = "PATH")]
    pub toggle: Vec<String>,

    /// Expand every container
    #[arg(long)]
    pub expand_all: bool,

    /// Collapse everything, root included
    #[arg(long, conflicts_with = "expand_all")]
    pub collapse_all: bool,

    /// Print the visible rows as JSON instead of styled text
    #[arg(long)]
    pub json: bool,

    /// Print a one-line classification of the payload
    #[arg(long)]
    pub summary: bool,

    /// Copy the pretty-printed payload to the clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Show effective configuration
    #[arg(long)]
    pub show: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Write the default config file if none exists
    #[arg(long)]
    pub init: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Run a render or tree command with a loaded config
pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let styled = !cli.plain && use_color();
    let theme = Theme::by_name(&config.theme);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Render(args) => {
            let input = read_input(args.file.as_deref())?;
            let document = Document::parse(&input);
            if let Some(id) = &args.copy {
                let text = document
                    .copy_text(id)
                    .with_context(|| format!("No tagged section with id {id}"))?;
                copy_to_clipboard(&text)?;
                eprintln!("Copied {id} to clipboard");
            }
            write_render(&mut stdout, &document, &args, config, &theme, styled)
        }
        Commands::Tree(args) => {
            let input = read_input(args.file.as_deref())?;
            let view = PayloadView::decode_str(&input);
            if args.copy {
                copy_to_clipboard(&view.copy_text())?;
                eprintln!("Copied payload to clipboard");
            }
            write_tree(&mut stdout, &view, &args, &theme, styled)
        }
        Commands::Config(args) => handle_config(&args),
    }
}

/// Config commands never need a valid config file, except --show
pub fn handle_config(args: &ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path().context("Could not determine config path")?;
        println!("{}", path.display());
    } else if args.init {
        let (path, created) = Config::init_file()?;
        if created {
            println!("Wrote default config to {}", path.display());
        } else {
            println!("Config already exists at {}", path.display());
        }
    } else if args.show {
        let config = Config::load()?;
        println!("# Effective configuration (env > file > defaults)");
        println!();
        print!("{}", config.to_toml());
    } else {
        println!("Usage: agentdoc config [--show|--path|--init]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --init    Write the default config file if none exists");
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

fn write_render<W: Write>(
    out: &mut W,
    document: &Document,
    args: &RenderArgs,
    config: &Config,
    theme: &Theme,
    styled: bool,
) -> Result<()> {
    let collapsed = collapsed_sections(document, args, config);

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &document.instructions(&collapsed))?;
        writeln!(out)?;
        return Ok(());
    }

    let mut options = config.render.options();
    if let Some(width) = args.width {
        options.width = width;
    }
    let lines = render_document_with(document, &collapsed, &options, theme);
    render::write_lines(out, &lines, styled)?;
    Ok(())
}

/// Collapse state from config default, then --collapse-all, then ids
fn collapsed_sections(
    document: &Document,
    args: &RenderArgs,
    config: &Config,
) -> CollapsedSections {
    let mut collapsed = CollapsedSections::new();
    if config.render.collapse_sections || args.collapse_all {
        collapsed.collapse_all(document);
    }
    for id in &args.collapse {
        collapsed.collapse(id.as_str());
    }
    for id in &args.expand {
        collapsed.expand(id);
    }
    collapsed
}

fn write_tree<W: Write>(
    out: &mut W,
    view: &PayloadView,
    args: &TreeArgs,
    theme: &Theme,
    styled: bool,
) -> Result<()> {
    if args.summary {
        let summary = match view.tree() {
            Some(tree) => ToolPayload::classify(&tree.root().to_value()).summary(),
            None => "invalid JSON".to_string(),
        };
        writeln!(out, "{summary}")?;
        return Ok(());
    }

    let state = expand_state(view, args);

    if args.json {
        let tree = match view {
            PayloadView::Tree(tree) => tree,
            PayloadView::Invalid { error, .. } => bail!("{error}"),
        };
        serde_json::to_writer_pretty(&mut *out, &tree.rows(&state))?;
        writeln!(out)?;
        return Ok(());
    }

    let lines = render_payload(view, &state, theme);
    render::write_lines(out, &lines, styled)?;
    Ok(())
}

fn expand_state(view: &PayloadView, args: &TreeArgs) -> ExpandState {
    let mut state = ExpandState::new();
    if let Some(tree) = view.tree() {
        if args.expand_all {
            state.expand_all(tree.root());
        }
    }
    if args.collapse_all {
        state.collapse_all();
    }
    for path in &args.toggle {
        state.toggle(path);
    }
    state
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
    }
}

/// Styled output only for a terminal, and never when NO_COLOR is set
fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("agentdoc").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    fn render_args(args: &[&str]) -> RenderArgs {
        match parse(args).command {
            Commands::Render(args) => args,
            other => panic!("expected render, got {other:?}"),
        }
    }

    fn tree_args(args: &[&str]) -> TreeArgs {
        match parse(args).command {
            Commands::Tree(args) => args,
            other => panic!("expected tree, got {other:?}"),
        }
    }

    fn render_to_string(input: &str, args: &RenderArgs, config: &Config) -> String {
        let mut out = Vec::new();
        let document = Document::parse(input);
        write_render(&mut out, &document, args, config, &Theme::default(), false).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn tree_to_string(input: &str, args: &TreeArgs) -> String {
        let mut out = Vec::new();
        let view = PayloadView::decode_str(input);
        write_tree(&mut out, &view, args, &Theme::default(), false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_render_flags() {
        let args = render_args(&[
            "render",
            "notes.md",
            "--collapse",
            "section-0",
            "--collapse",
            "section-2",
            "--width",
            "60",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("notes.md")));
        assert_eq!(args.collapse, vec!["section-0", "section-2"]);
        assert_eq!(args.width, Some(60));
        assert!(!args.json);
    }

    #[test]
    fn test_tree_expand_and_collapse_all_conflict() {
        let result = Cli::try_parse_from(["agentdoc", "tree", "--expand-all", "--collapse-all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_plain_text() {
        let out = render_to_string(
            "<thinking>Goal: demo</thinking>\nHello **there**",
            &render_args(&["render"]),
            &Config::default(),
        );
        assert_eq!(out, "▼ Thinking  [section-0]\n│ Goal: demo\n\nHello there\n");
    }

    #[test]
    fn test_render_collapse_from_config_and_expand_flag() {
        let mut config = Config::default();
        config.render.collapse_sections = true;
        let input = "<thinking>a</thinking><analysis>b</analysis>";

        let args = render_args(&["render", "--expand", "section-1"]);
        let out = render_to_string(input, &args, &config);
        assert_eq!(
            out,
            "▶ Thinking · 1 line  [section-0]\n\n▼ Analysis  [section-1]\n│ b\n"
        );
    }

    #[test]
    fn test_render_json_instructions() {
        let out = render_to_string(
            "<reflection>ok</reflection>",
            &render_args(&["render", "--json", "--collapse-all"]),
            &Config::default(),
        );
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["type"], "section");
        assert_eq!(value[0]["collapsed"], true);
    }

    #[test]
    fn test_tree_toggles_apply_in_order() {
        let args = tree_args(&["tree", "--toggle", "root", "--toggle", "root.a"]);
        let out = tree_to_string(r#"{"a": {"b": 1}}"#, &args);
        assert_eq!(out, "▼ {\n  ▼ \"a\": {\n      \"b\": 1\n    }\n  }\n");
    }

    #[test]
    fn test_tree_invalid_payload() {
        let out = tree_to_string("{invalid", &tree_args(&["tree"]));
        assert!(out.starts_with("┌─ Invalid JSON\n│ {invalid\n└─ "));
    }

    #[test]
    fn test_tree_summary() {
        let out = tree_to_string(
            r#"{"data": "iVBOR", "mime_type": "image/png"}"#,
            &tree_args(&["tree", "--summary"]),
        );
        assert_eq!(out, "[image image/png · 5 bytes · iVBOR…]\n");
    }

    #[test]
    fn test_tree_json_rows() {
        let out = tree_to_string("[1]", &tree_args(&["tree", "--json"]));
        let rows: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(rows.as_array().map(Vec::len), Some(3));
        assert_eq!(rows[1]["literal"], "1");
    }
}
