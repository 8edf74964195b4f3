//! Inline span resolution
//!
//! Every pattern (bold, italic, inline code, link) is scanned independently
//! over the whole string. The candidates are pooled, ordered, and walked
//! with a cursor; a candidate starting before the cursor overlaps something
//! already emitted and is dropped. Gaps become literal spans, so the spans
//! always cover the input exactly once.
//!
//! Ordering: start offset ascending, then the longer match, then
//! bold > code > link > italic. The length rule is what lets `**x**` beat
//! the italic scan's `**x*` match at the same offset.

use regex::Regex;
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::OnceLock;

/// Which character delimited an emphasis span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Asterisk,
    Underscore,
}

impl Delimiter {
    fn as_char(&self) -> char {
        match self {
            Delimiter::Asterisk => '*',
            Delimiter::Underscore => '_',
        }
    }
}

/// A styled or literal run of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineSpan {
    Literal {
        text: String,
    },
    Bold {
        text: String,
        #[serde(skip)]
        delimiter: Delimiter,
    },
    Italic {
        text: String,
        #[serde(skip)]
        delimiter: Delimiter,
    },
    Code {
        text: String,
    },
    Link {
        text: String,
        url: String,
    },
}

impl InlineSpan {
    pub fn literal(text: impl Into<String>) -> Self {
        InlineSpan::Literal { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan::Bold {
            text: text.into(),
            delimiter: Delimiter::Asterisk,
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        InlineSpan::Italic {
            text: text.into(),
            delimiter: Delimiter::Asterisk,
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        InlineSpan::Code { text: text.into() }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineSpan::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    /// Display text with all markup removed
    pub fn plain_text(&self) -> &str {
        match self {
            InlineSpan::Literal { text }
            | InlineSpan::Bold { text, .. }
            | InlineSpan::Italic { text, .. }
            | InlineSpan::Code { text }
            | InlineSpan::Link { text, .. } => text,
        }
    }

    /// The exact source text this span was resolved from
    pub fn source(&self) -> String {
        match self {
            InlineSpan::Literal { text } => text.clone(),
            InlineSpan::Bold { text, delimiter } => {
                let d = delimiter.as_char();
                format!("{d}{d}{text}{d}{d}")
            }
            InlineSpan::Italic { text, delimiter } => {
                let d = delimiter.as_char();
                format!("{d}{text}{d}")
            }
            InlineSpan::Code { text } => format!("`{text}`"),
            InlineSpan::Link { text, url } => format!("[{text}]({url})"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern scans
// ─────────────────────────────────────────────────────────────────────────────

/// The independent scans, each with its own regex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    BoldAsterisk,
    BoldUnderscore,
    ItalicAsterisk,
    ItalicUnderscore,
    Code,
    Link,
}

impl Pattern {
    const ALL: [Pattern; 6] = [
        Pattern::BoldAsterisk,
        Pattern::BoldUnderscore,
        Pattern::ItalicAsterisk,
        Pattern::ItalicUnderscore,
        Pattern::Code,
        Pattern::Link,
    ];

    fn regex(&self) -> &'static Regex {
        static BOLD_ASTERISK: OnceLock<Regex> = OnceLock::new();
        static BOLD_UNDERSCORE: OnceLock<Regex> = OnceLock::new();
        static ITALIC_ASTERISK: OnceLock<Regex> = OnceLock::new();
        static ITALIC_UNDERSCORE: OnceLock<Regex> = OnceLock::new();
        static CODE: OnceLock<Regex> = OnceLock::new();
        static LINK: OnceLock<Regex> = OnceLock::new();

        let (cell, pattern) = match self {
            Pattern::BoldAsterisk => (&BOLD_ASTERISK, r"\*\*(.+?)\*\*"),
            Pattern::BoldUnderscore => (&BOLD_UNDERSCORE, r"__(.+?)__"),
            Pattern::ItalicAsterisk => (&ITALIC_ASTERISK, r"\*(.+?)\*"),
            Pattern::ItalicUnderscore => (&ITALIC_UNDERSCORE, r"_(.+?)_"),
            Pattern::Code => (&CODE, r"`([^`]+)`"),
            Pattern::Link => (&LINK, r"\[([^\]]+)\]\(([^)]+)\)"),
        };
        cell.get_or_init(|| Regex::new(pattern).expect("inline pattern is valid"))
    }

    /// Lower wins when start and length tie
    fn priority(&self) -> u8 {
        match self {
            Pattern::BoldAsterisk | Pattern::BoldUnderscore => 0,
            Pattern::Code => 1,
            Pattern::Link => 2,
            Pattern::ItalicAsterisk | Pattern::ItalicUnderscore => 3,
        }
    }

    fn build(&self, caps: &regex::Captures<'_>) -> InlineSpan {
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default().to_string();
        match self {
            Pattern::BoldAsterisk => InlineSpan::Bold {
                text: group(1),
                delimiter: Delimiter::Asterisk,
            },
            Pattern::BoldUnderscore => InlineSpan::Bold {
                text: group(1),
                delimiter: Delimiter::Underscore,
            },
            Pattern::ItalicAsterisk => InlineSpan::Italic {
                text: group(1),
                delimiter: Delimiter::Asterisk,
            },
            Pattern::ItalicUnderscore => InlineSpan::Italic {
                text: group(1),
                delimiter: Delimiter::Underscore,
            },
            Pattern::Code => InlineSpan::Code { text: group(1) },
            Pattern::Link => InlineSpan::Link {
                text: group(1),
                url: group(2),
            },
        }
    }
}

/// A match from one scan, with byte offsets into the input
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    start: usize,
    end: usize,
    pattern: Pattern,
    span: InlineSpan,
}

fn collect_candidates(text: &str) -> Vec<Candidate> {
    let mut pool = Vec::new();
    for pattern in Pattern::ALL {
        for caps in pattern.regex().captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            pool.push(Candidate {
                start: whole.start(),
                end: whole.end(),
                pattern,
                span: pattern.build(&caps),
            });
        }
    }
    order_candidates(&mut pool);
    pool
}

fn order_candidates(pool: &mut [Candidate]) {
    pool.sort_by_key(|c| (c.start, Reverse(c.end - c.start), c.pattern.priority()));
}

/// Resolve a single line of text into non-overlapping spans
pub fn resolve_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for candidate in collect_candidates(text) {
        if candidate.start < cursor {
            continue;
        }
        if candidate.start > cursor {
            spans.push(InlineSpan::literal(&text[cursor..candidate.start]));
        }
        spans.push(candidate.span);
        cursor = candidate.end;
    }

    if cursor < text.len() || spans.is_empty() {
        spans.push(InlineSpan::literal(&text[cursor..]));
    }
    spans
}
