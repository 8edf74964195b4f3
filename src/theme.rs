// Theme support for rendered output
//
// Provides color palettes selected by name via config or AGENTDOC_THEME.
// "auto" uses the terminal's ANSI palette, named themes use true color (RGB).

use crate::document::TagKind;
use ratatui::style::Color;

/// Color palette for rendered documents and trees
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Text colors
    pub foreground: Color,
    pub heading: Color,
    pub subheading: Color,
    pub code_inline: Color,
    pub code_block: Color,
    pub link: Color,
    pub error: Color,

    // Structure colors
    pub border: Color,
    pub field_name: Color,

    // JSON colors
    pub json_key: Color,
    pub json_string: Color,
    pub json_number: Color,
    pub json_literal: Color,

    // Section tag colors
    pub thinking: Color,
    pub analysis: Color,
    pub reasoning: Color,
    pub next_steps: Color,
    pub reflection: Color,
    pub interaction_plan: Color,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Names accepted by [`Theme::by_name`]
    pub fn names() -> &'static [&'static str] {
        &["auto", "dracula", "nord", "gruvbox"]
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            foreground: Color::Reset,
            heading: Color::Magenta,
            subheading: Color::Blue,
            code_inline: Color::Yellow,
            code_block: Color::Gray,
            link: Color::Cyan,
            error: Color::Red,
            border: Color::DarkGray,
            field_name: Color::Cyan,
            json_key: Color::Cyan,
            json_string: Color::Green,
            json_number: Color::Yellow,
            json_literal: Color::Magenta,
            thinking: Color::Magenta,
            analysis: Color::Blue,
            reasoning: Color::Cyan,
            next_steps: Color::Green,
            reflection: Color::Yellow,
            interaction_plan: Color::LightBlue,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
            heading: Color::Rgb(0xbd, 0x93, 0xf9),     // purple
            subheading: Color::Rgb(0xff, 0x79, 0xc6),  // pink
            code_inline: Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
            code_block: Color::Rgb(0x62, 0x72, 0xa4),  // comment
            link: Color::Rgb(0x8b, 0xe9, 0xfd),        // cyan
            error: Color::Rgb(0xff, 0x55, 0x55),       // red
            border: Color::Rgb(0x62, 0x72, 0xa4),      // comment
            field_name: Color::Rgb(0x8b, 0xe9, 0xfd),  // cyan
            json_key: Color::Rgb(0x8b, 0xe9, 0xfd),    // cyan
            json_string: Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
            json_number: Color::Rgb(0xbd, 0x93, 0xf9), // purple
            json_literal: Color::Rgb(0xff, 0x79, 0xc6), // pink
            thinking: Color::Rgb(0xbd, 0x93, 0xf9),    // purple
            analysis: Color::Rgb(0x8b, 0xe9, 0xfd),    // cyan
            reasoning: Color::Rgb(0xff, 0x79, 0xc6),   // pink
            next_steps: Color::Rgb(0x50, 0xfa, 0x7b),  // green
            reflection: Color::Rgb(0xff, 0xb8, 0x6c),  // orange
            interaction_plan: Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            foreground: Color::Rgb(0xd8, 0xde, 0xe9),
            heading: Color::Rgb(0x88, 0xc0, 0xd0),     // frost cyan
            subheading: Color::Rgb(0x81, 0xa1, 0xc1),  // frost blue
            code_inline: Color::Rgb(0xeb, 0xcb, 0x8b), // aurora yellow
            code_block: Color::Rgb(0x4c, 0x56, 0x6a),  // polar night
            link: Color::Rgb(0x8f, 0xbc, 0xbb),        // frost teal
            error: Color::Rgb(0xbf, 0x61, 0x6a),       // aurora red
            border: Color::Rgb(0x4c, 0x56, 0x6a),      // polar night
            field_name: Color::Rgb(0x88, 0xc0, 0xd0),  // frost cyan
            json_key: Color::Rgb(0x81, 0xa1, 0xc1),    // frost blue
            json_string: Color::Rgb(0xa3, 0xbe, 0x8c), // aurora green
            json_number: Color::Rgb(0xb4, 0x8e, 0xad), // aurora purple
            json_literal: Color::Rgb(0xd0, 0x87, 0x70), // aurora orange
            thinking: Color::Rgb(0xb4, 0x8e, 0xad),    // aurora purple
            analysis: Color::Rgb(0x81, 0xa1, 0xc1),    // frost blue
            reasoning: Color::Rgb(0x8f, 0xbc, 0xbb),   // frost teal
            next_steps: Color::Rgb(0xa3, 0xbe, 0x8c),  // aurora green
            reflection: Color::Rgb(0xeb, 0xcb, 0x8b),  // aurora yellow
            interaction_plan: Color::Rgb(0xd0, 0x87, 0x70), // aurora orange
        }
    }

    /// Gruvbox theme - https://github.com/morhetz/gruvbox
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            foreground: Color::Rgb(0xeb, 0xdb, 0xb2),
            heading: Color::Rgb(0xd3, 0x86, 0x9b),     // purple
            subheading: Color::Rgb(0x83, 0xa5, 0x98),  // aqua
            code_inline: Color::Rgb(0xfa, 0xbd, 0x2f), // yellow
            code_block: Color::Rgb(0x92, 0x83, 0x74),  // gray
            link: Color::Rgb(0x83, 0xa5, 0x98),        // aqua
            error: Color::Rgb(0xfb, 0x49, 0x34),       // red
            border: Color::Rgb(0x92, 0x83, 0x74),      // gray
            field_name: Color::Rgb(0x83, 0xa5, 0x98),  // aqua
            json_key: Color::Rgb(0x83, 0xa5, 0x98),    // aqua
            json_string: Color::Rgb(0xb8, 0xbb, 0x26), // green
            json_number: Color::Rgb(0xd3, 0x86, 0x9b), // purple
            json_literal: Color::Rgb(0xfe, 0x80, 0x19), // orange
            thinking: Color::Rgb(0xd3, 0x86, 0x9b),    // purple
            analysis: Color::Rgb(0x83, 0xa5, 0x98),    // aqua
            reasoning: Color::Rgb(0xb1, 0x62, 0x86),   // magenta
            next_steps: Color::Rgb(0xb8, 0xbb, 0x26),  // green
            reflection: Color::Rgb(0xfa, 0xbd, 0x2f),  // yellow
            interaction_plan: Color::Rgb(0xfe, 0x80, 0x19), // orange
        }
    }
}

impl Theme {
    /// Accent color for a section header
    pub fn tag_color(&self, tag: TagKind) -> Color {
        match tag {
            TagKind::Thinking => self.thinking,
            TagKind::Analysis => self.analysis,
            TagKind::Reasoning => self.reasoning,
            TagKind::NextSteps => self.next_steps,
            TagKind::Reflection => self.reflection,
            TagKind::InteractionPlan => self.interaction_plan,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(Theme::by_name("Dracula").name, "dracula");
        assert_eq!(Theme::by_name("NORD").name, "nord");
    }

    #[test]
    fn test_unknown_theme_falls_back_to_auto() {
        assert_eq!(Theme::by_name("solarized").name, "auto");
    }

    #[test]
    fn test_every_listed_name_resolves() {
        for name in Theme::names() {
            assert_eq!(Theme::by_name(name).name, *name);
        }
    }

    #[test]
    fn test_tag_colors_follow_palette() {
        let theme = Theme::dracula();
        assert_eq!(theme.tag_color(TagKind::Thinking), theme.thinking);
        assert_eq!(theme.tag_color(TagKind::NextSteps), theme.next_steps);
    }
}
