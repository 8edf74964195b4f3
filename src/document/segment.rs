//! Section tag segmentation
//!
//! Splits raw agent output on the six known section tags
//! (`<thinking>`, `<analysis>`, `<reasoning>`, `<next_steps>`,
//! `<reflection>`, `<interaction_plan>`). Everything outside a matched tag
//! pair stays untagged text for the markdown pipeline.
//!
//! Tags are matched case-insensitively and non-greedily: a body runs to the
//! nearest closing tag with the *same* name. Unknown tags and unterminated
//! tags never match, so they remain literal text.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// The closed set of section tags the segmenter recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Thinking,
    Analysis,
    Reasoning,
    NextSteps,
    Reflection,
    InteractionPlan,
}

impl TagKind {
    pub const ALL: [TagKind; 6] = [
        TagKind::Thinking,
        TagKind::Analysis,
        TagKind::Reasoning,
        TagKind::NextSteps,
        TagKind::Reflection,
        TagKind::InteractionPlan,
    ];

    /// Lowercase tag name as it appears inside `<...>`
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Thinking => "thinking",
            TagKind::Analysis => "analysis",
            TagKind::Reasoning => "reasoning",
            TagKind::NextSteps => "next_steps",
            TagKind::Reflection => "reflection",
            TagKind::InteractionPlan => "interaction_plan",
        }
    }

    /// Parse a tag name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// Human-readable title for section headers
    pub fn title(&self) -> &'static str {
        match self {
            TagKind::Thinking => "Thinking",
            TagKind::Analysis => "Analysis",
            TagKind::Reasoning => "Reasoning",
            TagKind::NextSteps => "Next Steps",
            TagKind::Reflection => "Reflection",
            TagKind::InteractionPlan => "Interaction Plan",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level chunk of agent output, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Untagged text, kept verbatim (not trimmed)
    Text(String),
    /// Body of a recognised section tag, trimmed
    Section { tag: TagKind, content: String },
}

impl Segment {
    pub fn content(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Section { content, .. } => content,
        }
    }

    pub fn tag(&self) -> Option<TagKind> {
        match self {
            Segment::Text(_) => None,
            Segment::Section { tag, .. } => Some(*tag),
        }
    }
}

/// One alternative per tag so each body closes on its own name.
/// The `regex` crate has no backreferences, hence the expanded alternation.
fn section_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternatives: Vec<String> = TagKind::ALL
            .iter()
            .map(|kind| {
                let name = kind.as_str();
                format!(r"<(?P<{name}>{name})>(?P<{name}_body>.*?)</{name}>")
            })
            .collect();
        Regex::new(&format!("(?is){}", alternatives.join("|")))
            .expect("section tag pattern is valid")
    })
}

/// Split raw agent output into text and section segments
///
/// Whitespace-only gaps between tags are dropped. When no tag matches at
/// all, the whole input is a single text segment, unless it is blank, in
/// which case nothing is emitted.
pub fn segment(input: &str) -> Vec<Segment> {
    let re = section_tag_regex();
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in re.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some((tag, body)) = TagKind::ALL.iter().find_map(|kind| {
            caps.name(&format!("{}_body", kind.as_str()))
                .map(|body| (*kind, body.as_str()))
        }) else {
            continue;
        };

        push_text(&mut segments, &input[cursor..whole.start()]);
        segments.push(Segment::Section {
            tag,
            content: body.trim().to_string(),
        });
        cursor = whole.end();
    }

    if cursor == 0 && segments.is_empty() {
        // No tags anywhere: the input passes through untouched
        if !input.trim().is_empty() {
            segments.push(Segment::Text(input.to_string()));
        }
    } else {
        push_text(&mut segments, &input[cursor..]);
    }

    tracing::trace!(count = segments.len(), "segmented agent output");
    segments
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if !text.trim().is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(tag: TagKind, content: &str) -> Segment {
        Segment::Section {
            tag,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_untagged_input_is_single_untrimmed_segment() {
        let input = "  just some text\n\nwith lines  ";
        assert_eq!(segment(input), vec![Segment::Text(input.to_string())]);
    }

    #[test]
    fn test_blank_input_yields_no_segments() {
        // Documented quirk: all-whitespace input renders as nothing rather
        // than one empty text segment.
        assert!(segment("").is_empty());
        assert!(segment("   \n\t  ").is_empty());
    }

    #[test]
    fn test_analysis_tag_is_trimmed_section() {
        let segments = segment("<analysis>\n  look at this  \n</analysis>");
        assert_eq!(segments, vec![section(TagKind::Analysis, "look at this")]);
    }

    #[test]
    fn test_text_between_tags_kept_in_order() {
        let input =
            "intro\n<thinking>hmm</thinking>\nmiddle\n<next_steps>do it</next_steps>\noutro";
        let segments = segment(input);
        assert_eq!(
            segments,
            vec![
                Segment::Text("intro\n".to_string()),
                section(TagKind::Thinking, "hmm"),
                Segment::Text("\nmiddle\n".to_string()),
                section(TagKind::NextSteps, "do it"),
                Segment::Text("\noutro".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_gaps_between_tags_dropped() {
        let segments = segment("<thinking>a</thinking>\n\n   <reflection>b</reflection>\n");
        assert_eq!(
            segments,
            vec![
                section(TagKind::Thinking, "a"),
                section(TagKind::Reflection, "b"),
            ]
        );
    }

    #[test]
    fn test_tags_case_insensitive_and_normalized() {
        let segments = segment("<Interaction_Plan>step</INTERACTION_PLAN>");
        assert_eq!(segments, vec![section(TagKind::InteractionPlan, "step")]);
        assert_eq!(segments[0].tag().map(|t| t.as_str()), Some("interaction_plan"));
    }

    #[test]
    fn test_unknown_tag_is_literal_text() {
        let input = "<system-reminder>hello</system-reminder>";
        assert_eq!(segment(input), vec![Segment::Text(input.to_string())]);
    }

    #[test]
    fn test_unterminated_tag_is_literal_text() {
        let input = "<thinking>never closed";
        assert_eq!(segment(input), vec![Segment::Text(input.to_string())]);
    }

    #[test]
    fn test_body_closes_on_same_name_only() {
        let segments = segment("<thinking>a </analysis> b</thinking>");
        assert_eq!(segments, vec![section(TagKind::Thinking, "a </analysis> b")]);
    }

    #[test]
    fn test_non_greedy_body() {
        let segments = segment("<reasoning>one</reasoning>mid<reasoning>two</reasoning>");
        assert_eq!(
            segments,
            vec![
                section(TagKind::Reasoning, "one"),
                Segment::Text("mid".to_string()),
                section(TagKind::Reasoning, "two"),
            ]
        );
    }

    #[test]
    fn test_segments_rebuild_input() {
        let input = "a <thinking>b</thinking> c <analysis>d</analysis>";
        let rebuilt: String = segment(input)
            .iter()
            .map(|seg| match seg {
                Segment::Text(text) => text.clone(),
                Segment::Section { tag, content } => format!("<{tag}>{content}</{tag}>"),
            })
            .collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_tag_name_round_trip() {
        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(TagKind::from_name("summary"), None);
    }
}
