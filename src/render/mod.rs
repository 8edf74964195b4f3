//! Terminal rendering for documents and JSON trees
//!
//! Turns [`RenderNode`] instructions and tree rows into styled
//! `ratatui` lines. The lines are plain data: they can be drawn by a
//! ratatui widget or written to stdout with [`write_lines`].

mod json;
mod output;
mod wrap;

pub use json::{render_invalid_json, render_payload, render_tree};
pub use output::write_lines;

use crate::document::{CollapsedSections, Document, Field, InlineSpan, RenderNode, TagKind};
use crate::theme::Theme;
use crate::util::sanitize_for_terminal;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;
use wrap::Wrapper;

/// Wrap width used when nothing else is configured
pub const DEFAULT_WIDTH: usize = 100;

/// Layout knobs for document rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: usize,
    pub show_field_names: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            show_field_names: true,
        }
    }
}

/// Render a document at `width` columns with default options
pub fn render_document(
    document: &Document,
    collapsed: &CollapsedSections,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let options = RenderOptions {
        width,
        ..RenderOptions::default()
    };
    render_document_with(document, collapsed, &options, theme)
}

/// Render a document; blocks are separated by one blank line
pub fn render_document_with(
    document: &Document,
    collapsed: &CollapsedSections,
    options: &RenderOptions,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let nodes = document.instructions(collapsed);
    let mut lines = Vec::new();
    for (index, node) in nodes.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        render_node(&mut lines, node, options, theme);
    }
    tracing::trace!(nodes = nodes.len(), lines = lines.len(), "rendered document");
    lines
}

/// Concatenated text of a line, without styling
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

fn render_node(
    lines: &mut Vec<Line<'static>>,
    node: &RenderNode,
    options: &RenderOptions,
    theme: &Theme,
) {
    let width = options.width;
    match node {
        RenderNode::Section {
            id,
            tag,
            title,
            collapsed,
            fields,
        } => render_section(lines, id, *tag, title, *collapsed, fields, options, theme),

        RenderNode::Heading { level, spans } => {
            let color = match level {
                1 => theme.heading,
                2 => theme.subheading,
                _ => theme.foreground,
            };
            let base = Style::default().fg(color).add_modifier(Modifier::BOLD);
            let mut wrapper = Wrapper::new(width);
            push_spans(&mut wrapper, spans, base, theme);
            lines.extend(wrapper.finish());
        }

        RenderNode::Paragraph { spans } => {
            let mut wrapper = Wrapper::new(width);
            push_spans(&mut wrapper, spans, Style::default(), theme);
            lines.extend(wrapper.finish());
        }

        RenderNode::List { ordered, items } => {
            let marker_style = Style::default().fg(theme.border);
            for (index, item) in items.iter().enumerate() {
                let marker = if *ordered {
                    format!("{}. ", index + 1)
                } else {
                    "• ".to_string()
                };
                let indent = " ".repeat(marker.width());
                let mut wrapper = Wrapper::with_prefix(
                    width,
                    vec![Span::styled(marker, marker_style)],
                    vec![Span::raw(indent)],
                );
                push_spans(&mut wrapper, item, Style::default(), theme);
                lines.extend(wrapper.finish());
            }
        }

        RenderNode::Quote { spans } => {
            let bar = || vec![Span::styled("│ ", Style::default().fg(theme.border))];
            let mut wrapper = Wrapper::with_prefix(width, bar(), bar());
            push_spans(
                &mut wrapper,
                spans,
                Style::default().add_modifier(Modifier::ITALIC),
                theme,
            );
            let quoted = wrapper.finish();
            if quoted.is_empty() {
                lines.push(Line::from(bar()));
            } else {
                lines.extend(quoted);
            }
        }

        RenderNode::Rule => {
            let rule = "─".repeat(width.saturating_sub(4).max(10));
            lines.push(Line::from(Span::styled(
                rule,
                Style::default().fg(theme.border),
            )));
        }

        RenderNode::Code { language, code } => render_code(lines, language, code, theme),
    }
}

#[allow(clippy::too_many_arguments)]
fn render_section(
    lines: &mut Vec<Line<'static>>,
    id: &str,
    tag: TagKind,
    title: &str,
    collapsed: bool,
    fields: &[Field],
    options: &RenderOptions,
    theme: &Theme,
) {
    let accent = Style::default().fg(theme.tag_color(tag));
    let dim = Style::default()
        .fg(theme.border)
        .add_modifier(Modifier::DIM);

    let mut header = vec![
        Span::styled(if collapsed { "▶ " } else { "▼ " }, accent),
        Span::styled(title.to_string(), accent.add_modifier(Modifier::BOLD)),
    ];
    if collapsed && !fields.is_empty() {
        let noun = if fields.len() == 1 { "line" } else { "lines" };
        header.push(Span::styled(format!(" · {} {noun}", fields.len()), dim));
    }
    header.push(Span::styled(format!("  [{id}]"), dim));
    lines.push(Line::from(header));

    if collapsed {
        return;
    }

    let bar = || vec![Span::styled("│ ", accent)];
    for field in fields {
        let mut wrapper = Wrapper::with_prefix(options.width, bar(), bar());
        if let (true, Some(name)) = (options.show_field_names, field.name.as_deref()) {
            wrapper.push(
                &format!("{}:", sanitize_for_terminal(name)),
                Style::default()
                    .fg(theme.field_name)
                    .add_modifier(Modifier::BOLD),
            );
            wrapper.push(" ", Style::default());
        }
        wrapper.push(&sanitize_for_terminal(&field.value), Style::default());
        lines.extend(wrapper.finish());
    }
}

fn render_code(lines: &mut Vec<Line<'static>>, language: &str, code: &str, theme: &Theme) {
    let is_json = language.eq_ignore_ascii_case("json");
    lines.push(Line::from(Span::styled(
        format!("  {language}"),
        Style::default()
            .fg(theme.border)
            .add_modifier(Modifier::DIM),
    )));

    for code_line in sanitize_for_terminal(code).lines() {
        if is_json {
            let mut spans = vec![Span::raw("  ")];
            spans.extend(json::highlight_json_line(code_line, theme));
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(Span::styled(
                format!("  {code_line}"),
                Style::default().fg(theme.code_block),
            )));
        }
    }
}

fn push_spans(wrapper: &mut Wrapper, spans: &[InlineSpan], base: Style, theme: &Theme) {
    for span in spans {
        if let InlineSpan::Code { text } = span {
            let style = base.fg(theme.code_inline);
            wrapper.push_unbroken(&sanitize_for_terminal(text), style);
            continue;
        }
        let (text, style) = match span {
            InlineSpan::Literal { text } => (text.clone(), base),
            InlineSpan::Bold { text, .. } => (text.clone(), base.add_modifier(Modifier::BOLD)),
            InlineSpan::Italic { text, .. } => {
                (text.clone(), base.add_modifier(Modifier::ITALIC))
            }
            InlineSpan::Code { .. } => continue,
            InlineSpan::Link { text, url } => {
                let display = if text == url {
                    url.clone()
                } else {
                    format!("{text} ({url})")
                };
                (
                    display,
                    base.fg(theme.link).add_modifier(Modifier::UNDERLINED),
                )
            }
        };
        wrapper.push(&sanitize_for_terminal(&text), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(input: &str, collapsed: &CollapsedSections, width: usize) -> Vec<String> {
        let doc = Document::parse(input);
        render_document(&doc, collapsed, width, &Theme::default())
            .iter()
            .map(line_text)
            .collect()
    }

    #[test]
    fn test_render_produces_lines() {
        let lines = render("Hello `world`\n\nNew paragraph", &CollapsedSections::new(), 80);
        assert_eq!(lines, vec!["Hello world", "", "New paragraph"]);
    }

    #[test]
    fn test_expanded_section_shows_fields() {
        let lines = render(
            "<analysis>\nRisk: low\nship it\n</analysis>",
            &CollapsedSections::new(),
            80,
        );
        assert_eq!(
            lines,
            vec!["▼ Analysis  [section-0]", "│ Risk: low", "│ ship it"]
        );
    }

    #[test]
    fn test_collapsed_section_is_header_only() {
        let collapsed: CollapsedSections = ["section-0"].into_iter().collect();
        let lines = render("<thinking>a\nb</thinking>", &collapsed, 80);
        assert_eq!(lines, vec!["▶ Thinking · 2 lines  [section-0]"]);
    }

    #[test]
    fn test_hidden_field_names() {
        let doc = Document::parse("<reasoning>Why: because</reasoning>");
        let options = RenderOptions {
            width: 80,
            show_field_names: false,
        };
        let lines: Vec<String> =
            render_document_with(&doc, &CollapsedSections::new(), &options, &Theme::default())
                .iter()
                .map(line_text)
                .collect();
        assert_eq!(lines[1], "│ because");
    }

    #[test]
    fn test_blocks_are_separated_by_blank_lines() {
        let lines = render(
            "# Plan\n- first step\n- second\n---\n> careful",
            &CollapsedSections::new(),
            40,
        );
        assert_eq!(
            lines,
            vec![
                "Plan",
                "",
                "• first step",
                "• second",
                "",
                "────────────────────────────────────",
                "",
                "│ careful",
            ]
        );
    }

    #[test]
    fn test_list_items_wrap_under_marker() {
        let lines = render("1. alpha beta gamma", &CollapsedSections::new(), 12);
        assert_eq!(lines, vec!["1. alpha", "   beta", "   gamma"]);
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let lines = render(
            "```json\n{\n  \"a\": 1\n}\n```",
            &CollapsedSections::new(),
            80,
        );
        assert_eq!(lines, vec!["  json", "  {", "    \"a\": 1", "  }"]);
    }

    #[test]
    fn test_link_shows_url() {
        let lines = render("see [docs](https://x.dev)", &CollapsedSections::new(), 80);
        assert_eq!(lines, vec!["see docs (https://x.dev)"]);
    }

    #[test]
    fn test_inline_styles() {
        let doc = Document::parse("a **b** *c*");
        let lines = render_document(&doc, &CollapsedSections::new(), 80, &Theme::default());
        let bold = lines[0]
            .spans
            .iter()
            .find(|span| span.content == "b")
            .expect("bold span");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_inline_code_keeps_interior_spacing() {
        let lines = render("run `a  b` now", &CollapsedSections::new(), 80);
        assert_eq!(lines, vec!["run a  b now"]);
    }

    #[test]
    fn test_empty_quote_keeps_its_bar() {
        let lines = render("> ", &CollapsedSections::new(), 80);
        assert_eq!(lines, vec!["│ "]);
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        assert!(render("   ", &CollapsedSections::new(), 80).is_empty());
    }
}
