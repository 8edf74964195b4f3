//! Markdown block parsing
//!
//! A deliberately small subset: ATX headings, flat bullet and numbered
//! lists, single-line quotes, thematic breaks and paragraphs. Code fences
//! are lifted out beforehand by [`super::fence`].
//!
//! Parsing is one pass over the lines. Each line is classified into a
//! [`LineKind`] and fed to a [`BlockBuilder`] that owns the two pending
//! buffers (paragraph lines and list items) and decides when to flush them.

use super::inline::{resolve_inline, InlineSpan};
use regex::Regex;
use std::sync::OnceLock;

/// Block-level elements of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List { ordered: bool, items: Vec<String> },
    Quote { text: String },
    Rule,
    Code { language: String, code: String },
}

impl Block {
    /// Inline spans for blocks that carry inline text
    ///
    /// Lists resolve per item, so they are handled by [`Block::item_spans`].
    pub fn spans(&self) -> Option<Vec<InlineSpan>> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::Quote { text } => {
                Some(resolve_inline(text))
            }
            _ => None,
        }
    }

    /// Inline spans for each list item (empty for non-list blocks)
    pub fn item_spans(&self) -> Vec<Vec<InlineSpan>> {
        match self {
            Block::List { items, .. } => items.iter().map(|item| resolve_inline(item)).collect(),
            _ => Vec::new(),
        }
    }

    /// Text placed on the clipboard when this block is copied
    pub fn copy_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::Quote { text } => {
                text.clone()
            }
            Block::List { items, .. } => items.join("\n"),
            Block::Rule => String::new(),
            Block::Code { code, .. } => code.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line classification
// ─────────────────────────────────────────────────────────────────────────────

/// What a single (trimmed) source line is, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Heading { level: u8, text: &'a str },
    ListItem { ordered: bool, text: &'a str },
    Rule,
    Quote(&'a str),
    Blank,
    Text(&'a str),
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("heading pattern is valid"))
}

fn unordered_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*+]\s").expect("bullet pattern is valid"))
}

fn ordered_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s+").expect("ordered item pattern is valid"))
}

fn rule_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").expect("rule pattern is valid"))
}

fn classify(line: &str) -> LineKind<'_> {
    // Quotes match on the left-trimmed line so a bare `> ` keeps its space
    let unindented = line.trim_start();
    let line = unindented.trim_end();

    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(caps) = heading_regex().captures(line) {
        if let (Some(hashes), Some(rest)) = (caps.get(1), caps.get(2)) {
            return LineKind::Heading {
                level: hashes.as_str().len() as u8,
                text: rest.as_str().trim(),
            };
        }
    }
    // Item text is everything after the marker, trimmed
    if let Some(marker) = unordered_regex().find(line) {
        return LineKind::ListItem {
            ordered: false,
            text: line[marker.end()..].trim(),
        };
    }
    if let Some(prefix) = ordered_regex().find(line) {
        return LineKind::ListItem {
            ordered: true,
            text: line[prefix.end()..].trim(),
        };
    }
    if rule_regex().is_match(line) {
        return LineKind::Rule;
    }
    if let Some(rest) = unindented.strip_prefix("> ") {
        return LineKind::Quote(rest.trim());
    }
    LineKind::Text(line)
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder state machine
// ─────────────────────────────────────────────────────────────────────────────

struct PendingList {
    ordered: bool,
    items: Vec<String>,
}

/// Accumulates blocks while owning the pending paragraph and list buffers
#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    list: Option<PendingList>,
}

impl BlockBuilder {
    fn feed(&mut self, kind: LineKind<'_>) {
        match kind {
            LineKind::Heading { level, text } => {
                self.flush_paragraph();
                self.flush_list();
                self.blocks.push(Block::Heading {
                    level,
                    text: text.to_string(),
                });
            }
            LineKind::ListItem { ordered, text } => {
                self.flush_paragraph();
                self.push_item(ordered, text);
            }
            LineKind::Rule => {
                self.flush_paragraph();
                self.flush_list();
                self.blocks.push(Block::Rule);
            }
            LineKind::Quote(text) => {
                self.flush_paragraph();
                self.flush_list();
                self.blocks.push(Block::Quote {
                    text: text.to_string(),
                });
            }
            // Blank lines end paragraphs but lists continue across them
            LineKind::Blank => self.flush_paragraph(),
            LineKind::Text(text) => {
                self.flush_list();
                self.paragraph.push(text.to_string());
            }
        }
    }

    fn push_item(&mut self, ordered: bool, text: &str) {
        if self.list.as_ref().is_some_and(|list| list.ordered != ordered) {
            self.flush_list();
        }
        self.list
            .get_or_insert_with(|| PendingList {
                ordered,
                items: Vec::new(),
            })
            .items
            .push(text.to_string());
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joined = self.paragraph.join(" ");
        self.paragraph.clear();

        let text = joined.trim();
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph {
                text: text.to_string(),
            });
        }
    }

    fn flush_list(&mut self) {
        if let Some(list) = self.list.take() {
            if !list.items.is_empty() {
                self.blocks.push(Block::List {
                    ordered: list.ordered,
                    items: list.items,
                });
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_paragraph();
        self.flush_list();
        self.blocks
    }
}

/// Parse a plain (fence-free) chunk into blocks
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    for line in text.lines() {
        builder.feed(classify(line));
    }
    builder.finish()
}
