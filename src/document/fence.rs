//! Fenced code extraction
//!
//! Runs before block parsing so that markdown syntax inside code fences is
//! never interpreted. An unterminated fence does not match and stays in the
//! surrounding plain text.

use regex::Regex;
use std::sync::OnceLock;

/// Language reported for fences without an info string
///
/// With one, the language is its first word; the rest (`title=x`) is ignored.
pub const DEFAULT_LANGUAGE: &str = "text";

/// Alternating plain text and fenced code, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Plain(String),
    Code { language: String, code: String },
}

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```([^\n`]*)\r?\n(.*?)```")
            .expect("fence pattern is valid")
    })
}

/// Split text into plain and code chunks
///
/// Without any fence the input is returned as one plain chunk, verbatim.
/// Otherwise the plain runs around fences are trimmed and blank runs dropped.
pub fn extract_fences(text: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut cursor = 0;
    let mut found = false;

    for caps in fence_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        found = true;

        push_plain(&mut chunks, &text[cursor..whole.start()]);

        let language = caps
            .get(1)
            .and_then(|m| m.as_str().split_whitespace().next())
            .unwrap_or(DEFAULT_LANGUAGE);
        let body = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        chunks.push(Chunk::Code {
            language: language.to_string(),
            code: trim_blank_lines(body).to_string(),
        });
        cursor = whole.end();
    }

    if !found {
        return vec![Chunk::Plain(text.to_string())];
    }

    push_plain(&mut chunks, &text[cursor..]);
    chunks
}

fn push_plain(chunks: &mut Vec<Chunk>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        chunks.push(Chunk::Plain(trimmed.to_string()));
    }
}

/// Drop leading and trailing lines that hold only whitespace, keeping the
/// indentation of the first and last real lines intact.
fn trim_blank_lines(body: &str) -> &str {
    let mut start = 0;
    for line in body.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }

    let rest = &body[start..];
    let mut end = rest.len();
    for line in rest.split_inclusive('\n').rev() {
        if !line.trim().is_empty() {
            break;
        }
        end -= line.len();
    }

    rest[..end].trim_end_matches(['\n', '\r'])
}
