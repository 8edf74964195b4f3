//! Agent output document model
//!
//! The full pipeline for one piece of agent text:
//!
//! ```text
//! raw text ─► segment ─┬─ tagged   ─► fields
//!                      └─ untagged ─► fences ─► blocks ─► inline spans
//! ```
//!
//! Every stage is a pure function of its input. The only mutable state, the
//! set of collapsed sections, belongs to the caller and is passed in when
//! render instructions are produced.

pub mod blocks;
pub mod collapse;
pub mod fence;
pub mod fields;
pub mod inline;
pub mod segment;

pub use blocks::{parse_blocks, Block};
pub use collapse::CollapsedSections;
pub use fence::{extract_fences, Chunk};
pub use fields::{extract_fields, Field};
pub use inline::{resolve_inline, Delimiter, InlineSpan};
pub use segment::{segment, Segment, TagKind};

use serde::Serialize;

/// Stable caller-visible id for the section at `index` in the segment list
pub fn section_id(index: usize) -> String {
    format!("section-{index}")
}

/// Parse untagged text: fenced code first, then markdown blocks around it
pub fn parse_markdown(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for chunk in extract_fences(text) {
        match chunk {
            Chunk::Plain(plain) => blocks.extend(parse_blocks(&plain)),
            Chunk::Code { language, code } => blocks.push(Block::Code { language, code }),
        }
    }
    blocks
}

/// One parsed segment of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Untagged text rendered as markdown
    Text { blocks: Vec<Block> },
    /// A recognised section tag, rendered as a collapsible field list
    Tagged {
        tag: TagKind,
        content: String,
        fields: Vec<Field>,
    },
}

/// A fully parsed piece of agent output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    /// Run the whole pipeline over raw agent text
    pub fn parse(input: &str) -> Self {
        let sections: Vec<Section> = segment(input)
            .into_iter()
            .map(|seg| match seg {
                Segment::Text(text) => Section::Text {
                    blocks: parse_markdown(&text),
                },
                Segment::Section { tag, content } => Section::Tagged {
                    tag,
                    fields: extract_fields(&content),
                    content,
                },
            })
            .collect();

        tracing::debug!(
            sections = sections.len(),
            input_len = input.len(),
            "parsed agent document"
        );
        Self { sections }
    }

    /// Absent input renders as an empty document
    pub fn from_optional(input: Option<&str>) -> Self {
        input.map(Self::parse).unwrap_or_default()
    }

    /// Only JSON strings carry agent text; anything else is nothing to parse
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self::from_optional(value.as_str())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Ids of the collapsible (tagged) sections, in order
    pub fn section_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, section)| matches!(section, Section::Tagged { .. }))
            .map(|(index, _)| section_id(index))
    }

    /// Raw body of a tagged section, for copy-to-clipboard
    pub fn copy_text(&self, id: &str) -> Option<String> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(index, section)| match section {
                Section::Tagged { content, .. } if section_id(index) == id => {
                    Some(content.clone())
                }
                _ => None,
            })
    }

    /// Flatten the document into renderer instructions
    pub fn instructions(&self, collapsed: &CollapsedSections) -> Vec<RenderNode> {
        let mut nodes = Vec::new();
        for (index, section) in self.sections.iter().enumerate() {
            match section {
                Section::Text { blocks } => {
                    nodes.extend(blocks.iter().map(RenderNode::from_block));
                }
                Section::Tagged { tag, fields, .. } => {
                    let id = section_id(index);
                    nodes.push(RenderNode::Section {
                        collapsed: collapsed.is_collapsed(&id),
                        id,
                        tag: *tag,
                        title: tag.title().to_string(),
                        fields: fields.clone(),
                    });
                }
            }
        }
        nodes
    }
}

/// A renderer-facing instruction with a stable `type` discriminator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    Section {
        id: String,
        tag: TagKind,
        title: String,
        collapsed: bool,
        fields: Vec<Field>,
    },
    Heading {
        level: u8,
        spans: Vec<InlineSpan>,
    },
    Paragraph {
        spans: Vec<InlineSpan>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<InlineSpan>>,
    },
    Quote {
        spans: Vec<InlineSpan>,
    },
    Rule,
    Code {
        language: String,
        code: String,
    },
}

impl RenderNode {
    fn from_block(block: &Block) -> Self {
        match block {
            Block::Heading { level, text } => RenderNode::Heading {
                level: *level,
                spans: resolve_inline(text),
            },
            Block::Paragraph { text } => RenderNode::Paragraph {
                spans: resolve_inline(text),
            },
            Block::List { ordered, .. } => RenderNode::List {
                ordered: *ordered,
                items: block.item_spans(),
            },
            Block::Quote { text } => RenderNode::Quote {
                spans: resolve_inline(text),
            },
            Block::Rule => RenderNode::Rule,
            Block::Code { language, code } => RenderNode::Code {
                language: language.clone(),
                code: code.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_pipeline_mixes_sections_and_markdown() {
        let doc = Document::parse(
            "<thinking>\nGoal: parse\nthen render\n</thinking>\n\
             # Result\n\n```rust\nfn main() {}\n```\nDone.",
        );

        assert_eq!(
            doc.sections(),
            &[
                Section::Tagged {
                    tag: TagKind::Thinking,
                    content: "Goal: parse\nthen render".to_string(),
                    fields: vec![Field::named("Goal", "parse"), Field::free("then render")],
                },
                Section::Text {
                    blocks: vec![
                        Block::Heading {
                            level: 1,
                            text: "Result".to_string()
                        },
                        Block::Code {
                            language: "rust".to_string(),
                            code: "fn main() {}".to_string()
                        },
                        Block::Paragraph {
                            text: "Done.".to_string()
                        },
                    ]
                },
            ]
        );
    }

    #[test]
    fn test_absent_and_non_string_input_is_empty() {
        assert!(Document::from_optional(None).is_empty());
        assert!(Document::from_value(&json!(42)).is_empty());
        assert!(Document::from_value(&json!({"text": "hi"})).is_empty());
        assert!(!Document::from_value(&json!("hi")).is_empty());
    }

    #[test]
    fn test_whitespace_only_input_renders_nothing() {
        let doc = Document::parse("  \n\n ");
        assert!(doc.is_empty());
        assert!(doc.instructions(&CollapsedSections::new()).is_empty());
    }

    #[test]
    fn test_section_ids_count_every_segment() {
        let doc = Document::parse("a<reflection>r</reflection>b<analysis>x</analysis>");
        let ids: Vec<String> = doc.section_ids().collect();
        assert_eq!(ids, vec!["section-1", "section-3"]);
        assert_eq!(doc.copy_text("section-3").as_deref(), Some("x"));
        assert_eq!(doc.copy_text("section-0"), None);
    }

    #[test]
    fn test_instructions_carry_collapse_state() {
        let doc = Document::parse("<analysis>Risk: low</analysis>\n- one\n- two");
        let collapsed: CollapsedSections = ["section-0"].into_iter().collect();
        let nodes = doc.instructions(&collapsed);

        assert_eq!(
            nodes,
            vec![
                RenderNode::Section {
                    id: "section-0".to_string(),
                    tag: TagKind::Analysis,
                    title: "Analysis".to_string(),
                    collapsed: true,
                    fields: vec![Field::named("Risk", "low")],
                },
                RenderNode::List {
                    ordered: false,
                    items: vec![
                        vec![InlineSpan::literal("one")],
                        vec![InlineSpan::literal("two")]
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_instructions_serialize_with_type_discriminator() {
        let doc = Document::parse("<next_steps>ship</next_steps>\n---\n> **note**");
        let value = serde_json::to_value(doc.instructions(&CollapsedSections::new())).unwrap();

        assert_eq!(
            value,
            json!([
                {
                    "type": "section",
                    "id": "section-0",
                    "tag": "next_steps",
                    "title": "Next Steps",
                    "collapsed": false,
                    "fields": [{"name": null, "value": "ship"}]
                },
                {"type": "rule"},
                {"type": "quote", "spans": [{"type": "bold", "text": "note"}]}
            ])
        );
    }

    #[test]
    fn test_parse_markdown_without_fences() {
        let blocks = parse_markdown("# Title\n\nSome *italic* and **bold**.\n- a\n- b\n");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[2], Block::List { ordered: false, .. }));
    }
}
