// Word wrapping across styled spans
//
// Inline spans are fed in order; text breaks only at whitespace, so
// adjacent spans without a space between them (`**bold**,`) stay glued.
// Widths are unicode display widths, so emojis and CJK wrap correctly.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

pub(crate) struct Wrapper {
    width: usize,
    /// Continuation prefix (indent, quote bar) for every line after the first
    rest_prefix: Vec<Span<'static>>,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    current_width: usize,
    has_content: bool,
    pending_space: bool,
}

impl Wrapper {
    pub(crate) fn new(width: usize) -> Self {
        Self::with_prefix(width, Vec::new(), Vec::new())
    }

    pub(crate) fn with_prefix(
        width: usize,
        first_prefix: Vec<Span<'static>>,
        rest_prefix: Vec<Span<'static>>,
    ) -> Self {
        let current_width = spans_width(&first_prefix);
        Self {
            width,
            rest_prefix,
            lines: Vec::new(),
            current: first_prefix,
            current_width,
            has_content: false,
            pending_space: false,
        }
    }

    /// Append text in one style, wrapping at whitespace
    pub(crate) fn push(&mut self, text: &str, style: Style) {
        let mut rest = text;
        while !rest.is_empty() {
            let ws_len = rest.len() - rest.trim_start().len();
            if ws_len > 0 {
                self.pending_space = self.has_content;
                rest = &rest[ws_len..];
                continue;
            }
            let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            self.push_word(&rest[..word_len], style);
            rest = &rest[word_len..];
        }
    }

    /// Append text as a single word, keeping its interior spacing
    pub(crate) fn push_unbroken(&mut self, text: &str, style: Style) {
        if !text.is_empty() {
            self.push_word(text, style);
        }
    }

    fn push_word(&mut self, word: &str, style: Style) {
        let word_width = word.width();
        if self.pending_space {
            if self.width > 0 && self.current_width + 1 + word_width > self.width {
                self.break_line();
            } else {
                self.current.push(Span::raw(" "));
                self.current_width += 1;
            }
            self.pending_space = false;
        }
        self.current.push(Span::styled(word.to_string(), style));
        self.current_width += word_width;
        self.has_content = true;
    }

    fn break_line(&mut self) {
        let prefix = self.rest_prefix.clone();
        self.current_width = spans_width(&prefix);
        self.lines
            .push(Line::from(std::mem::replace(&mut self.current, prefix)));
        self.has_content = false;
    }

    pub(crate) fn finish(mut self) -> Vec<Line<'static>> {
        if self.has_content {
            self.lines.push(Line::from(self.current));
        }
        self.lines
    }
}

pub(crate) fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|span| span.content.width()).sum()
}
