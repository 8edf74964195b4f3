// JSON display: tree rows, highlighted code lines, and the invalid-payload block

use crate::json_tree::{
    ContainerKind, EntryKey, ExpandState, JsonTree, JsonTreeError, PayloadView, PrimitiveKind,
    RowKind, TreeRow,
};
use crate::theme::Theme;
use crate::util::sanitize_for_terminal;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

// ─────────────────────────────────────────────────────────────────────────────
// Tree
// ─────────────────────────────────────────────────────────────────────────────

/// Render the visible rows of a tree, one line per row
pub fn render_tree(tree: &JsonTree, state: &ExpandState, theme: &Theme) -> Vec<Line<'static>> {
    tree.rows(state)
        .iter()
        .map(|row| render_row(row, theme))
        .collect()
}

/// Render a decoded payload, or the raw text plus error marker
pub fn render_payload(
    view: &PayloadView,
    state: &ExpandState,
    theme: &Theme,
) -> Vec<Line<'static>> {
    match view {
        PayloadView::Tree(tree) => render_tree(tree, state, theme),
        PayloadView::Invalid { raw, error } => render_invalid_json(raw, error, theme),
    }
}

fn render_row(row: &TreeRow, theme: &Theme) -> Line<'static> {
    let punct = punctuation_style(theme);
    let mut spans = vec![Span::raw("  ".repeat(row.depth))];

    match &row.kind {
        RowKind::Open {
            container,
            len,
            expanded,
        } => {
            let arrow = if *expanded { "▼ " } else { "▶ " };
            spans.push(Span::styled(arrow, Style::default().fg(theme.border)));
            push_key(&mut spans, row.key.as_ref(), theme);
            let (open, close) = container.brackets();
            if *expanded {
                spans.push(Span::styled(open, punct));
            } else {
                spans.push(Span::styled(format!("{open}…{close}"), punct));
                spans.push(Span::styled(
                    format!(" {}", count_label(*container, *len)),
                    Style::default()
                        .fg(theme.border)
                        .add_modifier(Modifier::DIM),
                ));
            }
        }
        RowKind::Close { container } => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(container.brackets().1, punct));
        }
        RowKind::Primitive { kind, literal } => {
            spans.push(Span::raw("  "));
            push_key(&mut spans, row.key.as_ref(), theme);
            let color = match kind {
                PrimitiveKind::String => theme.json_string,
                PrimitiveKind::Number => theme.json_number,
                PrimitiveKind::Bool | PrimitiveKind::Null => theme.json_literal,
            };
            spans.push(Span::styled(
                sanitize_for_terminal(literal),
                Style::default().fg(color),
            ));
        }
    }

    Line::from(spans)
}

fn push_key(spans: &mut Vec<Span<'static>>, key: Option<&EntryKey>, theme: &Theme) {
    match key {
        Some(EntryKey::Name(name)) => {
            spans.push(Span::styled(
                format!("\"{}\"", sanitize_for_terminal(name)),
                Style::default().fg(theme.json_key),
            ));
            spans.push(Span::styled(": ", punctuation_style(theme)));
        }
        Some(EntryKey::Index(index)) => {
            spans.push(Span::styled(
                format!("{index}: "),
                Style::default()
                    .fg(theme.border)
                    .add_modifier(Modifier::DIM),
            ));
        }
        None => {}
    }
}

fn count_label(container: ContainerKind, len: usize) -> String {
    let noun = match (container, len) {
        (ContainerKind::Object, 1) => "key",
        (ContainerKind::Object, _) => "keys",
        (ContainerKind::Array, 1) => "item",
        (ContainerKind::Array, _) => "items",
    };
    format!("{len} {noun}")
}

fn punctuation_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.border)
        .add_modifier(Modifier::DIM)
}

// ─────────────────────────────────────────────────────────────────────────────
// Invalid payload
// ─────────────────────────────────────────────────────────────────────────────

/// Raw text in a bordered block, headed and footed by the decode error
pub fn render_invalid_json(raw: &str, error: &JsonTreeError, theme: &Theme) -> Vec<Line<'static>> {
    let bar = Style::default()
        .fg(theme.border)
        .add_modifier(Modifier::DIM);
    let marker = Style::default()
        .fg(theme.error)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::styled("┌─ ", bar),
        Span::styled("Invalid JSON", marker),
    ])];
    for raw_line in sanitize_for_terminal(raw).lines() {
        lines.push(Line::from(vec![
            Span::styled("│ ", bar),
            Span::styled(raw_line.to_string(), Style::default().fg(theme.foreground)),
        ]));
    }
    let JsonTreeError::InvalidJson {
        message,
        line,
        column,
    } = error;
    lines.push(Line::from(vec![
        Span::styled("└─ ", bar),
        Span::styled(
            format!("{message} (line {line}, column {column})"),
            Style::default().fg(theme.error),
        ),
    ]));
    lines
}

// ─────────────────────────────────────────────────────────────────────────────
// Syntax highlighting for JSON code blocks
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum JsonToken {
    Key,
    String,
    Number,
    Literal,
    Punctuation,
    Whitespace,
    Other,
}

/// Split one line of JSON text into classified tokens
///
/// Works line by line, so strings are tracked only within the line. A
/// string counts as a key when the next non-blank character is `:`.
fn tokenize_json_line(line: &str) -> Vec<(JsonToken, &str)> {
    let mut tokens = Vec::new();
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < line.len() {
        let start = pos;
        let token = match bytes[pos] {
            b'"' => {
                pos += 1;
                while pos < line.len() {
                    match bytes[pos] {
                        b'\\' => pos += 2,
                        b'"' => {
                            pos += 1;
                            break;
                        }
                        _ => pos += 1,
                    }
                }
                pos = pos.min(line.len());
                if line[pos..].trim_start().starts_with(':') {
                    JsonToken::Key
                } else {
                    JsonToken::String
                }
            }
            b'{' | b'}' | b'[' | b']' | b':' | b',' => {
                pos += 1;
                JsonToken::Punctuation
            }
            b' ' | b'\t' => {
                while pos < line.len() && matches!(bytes[pos], b' ' | b'\t') {
                    pos += 1;
                }
                JsonToken::Whitespace
            }
            _ => {
                while pos < line.len()
                    && !matches!(
                        bytes[pos],
                        b'"' | b'{' | b'}' | b'[' | b']' | b':' | b',' | b' ' | b'\t'
                    )
                {
                    pos += 1;
                }
                classify_bare(&line[start..pos])
            }
        };
        tokens.push((token, &line[start..pos]));
    }

    tokens
}

fn classify_bare(word: &str) -> JsonToken {
    match word {
        "true" | "false" | "null" => JsonToken::Literal,
        _ if word.parse::<f64>().is_ok() && looks_like_number(word) => JsonToken::Number,
        _ => JsonToken::Other,
    }
}

/// JSON number grammar: no leading `+`, no bare `.5`, no `inf`/`nan`
fn looks_like_number(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    digits.starts_with(|c: char| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

/// Highlight one line of JSON text
pub(crate) fn highlight_json_line(line: &str, theme: &Theme) -> Vec<Span<'static>> {
    tokenize_json_line(line)
        .into_iter()
        .map(|(token, text)| {
            let style = match token {
                JsonToken::Key => Style::default().fg(theme.json_key),
                JsonToken::String => Style::default().fg(theme.json_string),
                JsonToken::Number => Style::default().fg(theme.json_number),
                JsonToken::Literal => Style::default().fg(theme.json_literal),
                JsonToken::Punctuation => punctuation_style(theme),
                JsonToken::Whitespace | JsonToken::Other => Style::default(),
            };
            Span::styled(text.to_string(), style)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::line_text;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(line_text).collect()
    }

    #[test]
    fn test_tree_default_expansion() {
        let tree = JsonTree::from_value(&json!({"a": {"b": {"c": 1}}, "n": [true]}));
        let lines = render_tree(&tree, &ExpandState::new(), &Theme::default());
        assert_eq!(
            texts(&lines),
            vec![
                "▼ {",
                "  ▼ \"a\": {",
                "    ▶ \"b\": {…} 1 key",
                "    }",
                "  ▼ \"n\": [",
                "      0: true",
                "    ]",
                "  }",
            ]
        );
    }

    #[test]
    fn test_collapsed_root() {
        let tree = JsonTree::from_value(&json!([1, 2, 3]));
        let mut state = ExpandState::new();
        state.collapse_all();
        let lines = render_tree(&tree, &state, &Theme::default());
        assert_eq!(texts(&lines), vec!["▶ […] 3 items"]);
    }

    #[test]
    fn test_primitive_root() {
        let tree = JsonTree::from_value(&json!("hi"));
        let lines = render_tree(&tree, &ExpandState::new(), &Theme::default());
        assert_eq!(texts(&lines), vec!["  \"hi\""]);
    }

    #[test]
    fn test_invalid_payload_block() {
        let view = PayloadView::decode_str("{invalid");
        let lines = render_payload(&view, &ExpandState::new(), &Theme::default());
        let text = texts(&lines);
        assert_eq!(text[0], "┌─ Invalid JSON");
        assert_eq!(text[1], "│ {invalid");
        assert!(text[2].starts_with("└─ "));
        assert!(text[2].contains("line 1"));
    }

    #[test]
    fn test_tokenize_key_value_line() {
        let tokens = tokenize_json_line(r#"  "name": "x", "n": -1.5e3, "ok": null"#);
        let kinds: Vec<JsonToken> = tokens
            .iter()
            .map(|(kind, _)| *kind)
            .filter(|kind| *kind != JsonToken::Whitespace)
            .collect();
        assert_eq!(
            kinds,
            vec![
                JsonToken::Key,
                JsonToken::Punctuation,
                JsonToken::String,
                JsonToken::Punctuation,
                JsonToken::Key,
                JsonToken::Punctuation,
                JsonToken::Number,
                JsonToken::Punctuation,
                JsonToken::Key,
                JsonToken::Punctuation,
                JsonToken::Literal,
            ]
        );
    }

    #[test]
    fn test_tokenize_escaped_quote_and_unclosed_string() {
        let tokens = tokenize_json_line(r#""a\"b": "open"#);
        assert_eq!(tokens[0], (JsonToken::Key, r#""a\"b""#));
        assert_eq!(tokens.last(), Some(&(JsonToken::String, "\"open")));
    }

    #[test]
    fn test_highlight_preserves_text() {
        let line = r#"{"k": [1, "two", false]}"#;
        let spans = highlight_json_line(line, &Theme::default());
        let rebuilt: String = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(rebuilt, line);
    }

    #[test]
    fn test_number_grammar() {
        assert_eq!(classify_bare("42"), JsonToken::Number);
        assert_eq!(classify_bare("-0.5"), JsonToken::Number);
        assert_eq!(classify_bare("inf"), JsonToken::Other);
        assert_eq!(classify_bare("+1"), JsonToken::Other);
        assert_eq!(classify_bare(".5"), JsonToken::Other);
    }
}
