// Writing rendered lines to a byte stream
//
// Styled mode emits crossterm escape sequences per span; plain mode writes
// the bare text so output can be piped or diffed.

use crossterm::queue;
use crossterm::style::{Attribute, Color as TermColor, Print, SetAttribute, SetForegroundColor};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use std::io::{self, Write};

/// Write each line followed by a newline
pub fn write_lines<W: Write>(out: &mut W, lines: &[Line<'_>], styled: bool) -> io::Result<()> {
    for line in lines {
        for span in &line.spans {
            if styled && span.style != Style::default() {
                apply_style(out, span.style)?;
                queue!(out, Print(&span.content), SetAttribute(Attribute::Reset))?;
            } else {
                queue!(out, Print(&span.content))?;
            }
        }
        queue!(out, Print('\n'))?;
    }
    out.flush()
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> io::Result<()> {
    if let Some(color) = style.fg.and_then(to_term_color) {
        queue!(out, SetForegroundColor(color))?;
    }
    let attributes = [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
        (Modifier::CROSSED_OUT, Attribute::CrossedOut),
    ];
    for (modifier, attribute) in attributes {
        if style.add_modifier.contains(modifier) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

/// ratatui's light/dark naming maps onto crossterm's plain/dark naming
fn to_term_color(color: Color) -> Option<TermColor> {
    let mapped = match color {
        Color::Reset => return None,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(index) => TermColor::AnsiValue(index),
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;

    fn sample() -> Vec<Line<'static>> {
        vec![
            Line::from(vec![
                Span::raw("plain "),
                Span::styled("bold", Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled("red", Style::default().fg(Color::Red))),
        ]
    }

    #[test]
    fn test_plain_output_is_bare_text() {
        let mut out = Vec::new();
        write_lines(&mut out, &sample(), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "plain bold\nred\n");
    }

    #[test]
    fn test_styled_output_has_escapes() {
        let mut out = Vec::new();
        write_lines(&mut out, &sample(), true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("bold"));
        assert!(text.starts_with("plain "));
    }

    #[test]
    fn test_reset_color_is_not_emitted() {
        assert_eq!(to_term_color(Color::Reset), None);
        assert_eq!(
            to_term_color(Color::Rgb(1, 2, 3)),
            Some(TermColor::Rgb { r: 1, g: 2, b: 3 })
        );
    }
}
