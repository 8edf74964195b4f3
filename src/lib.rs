//! agentdoc - structured rendering for AI agent output
//!
//! Agent text is split into tagged reasoning sections (`<thinking>`,
//! `<analysis>`, ...) and free markdown; tool payloads become collapsible
//! JSON trees. The core is pure: parsing never fails, and all view state
//! (collapsed sections, expanded nodes) is owned by the caller.
//!
//! ```
//! use agentdoc::document::{CollapsedSections, Document, RenderNode};
//!
//! let doc = Document::parse("<analysis>Risk: low</analysis>\n# Done");
//! let nodes = doc.instructions(&CollapsedSections::new());
//! assert!(matches!(nodes[0], RenderNode::Section { .. }));
//! assert!(matches!(nodes[1], RenderNode::Heading { level: 1, .. }));
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod json_tree;
pub mod logging;
pub mod render;
pub mod theme;
pub mod util;

pub use document::{CollapsedSections, Document, RenderNode};
pub use json_tree::{ExpandState, JsonTree, JsonTreeError, PayloadView, ToolPayload};
