//! JSON tree model for tool-call payloads
//!
//! Wraps an arbitrary decoded JSON value in a recursive node tree and
//! addresses every node by a dotted structural path (`root`, `root.args`,
//! `root.items.0`). Expand/collapse state is a caller-owned map from path to
//! flag, so it survives rebuilding the tree from the same payload.
//!
//! Default expansion: while the map is empty, containers less than
//! [`AUTO_EXPAND_DEPTH`] levels deep are shown expanded. As soon as any path
//! has been toggled, only explicitly expanded paths stay open.

pub mod payload;

pub use payload::{PayloadView, ToolPayload};

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Containers shallower than this are expanded while no flag has been set
pub const AUTO_EXPAND_DEPTH: usize = 2;

/// Path string of the root node
pub const ROOT_PATH: &str = "root";

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failure to decode a payload string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonTreeError {
    #[error("Invalid JSON: {message}")]
    InvalidJson {
        message: String,
        line: usize,
        column: usize,
    },
}

impl From<serde_json::Error> for JsonTreeError {
    fn from(err: serde_json::Error) -> Self {
        JsonTreeError::InvalidJson {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Nodes
// ─────────────────────────────────────────────────────────────────────────────

/// Key of a container entry: object field name or array index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryKey {
    Name(String),
    Index(usize),
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Name(name) => f.write_str(name),
            EntryKey::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Null,
    Bool,
    Number,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Object,
    Array,
}

impl ContainerKind {
    /// Opening and closing brackets
    pub fn brackets(&self) -> (&'static str, &'static str) {
        match self {
            ContainerKind::Object => ("{", "}"),
            ContainerKind::Array => ("[", "]"),
        }
    }
}

/// A node of the JSON tree
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    Primitive {
        value: Value,
        kind: PrimitiveKind,
    },
    Container {
        kind: ContainerKind,
        entries: Vec<(EntryKey, JsonNode)>,
    },
}

impl JsonNode {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => JsonNode::Container {
                kind: ContainerKind::Object,
                entries: map
                    .iter()
                    .map(|(key, child)| (EntryKey::Name(key.clone()), Self::from_value(child)))
                    .collect(),
            },
            Value::Array(items) => JsonNode::Container {
                kind: ContainerKind::Array,
                entries: items
                    .iter()
                    .enumerate()
                    .map(|(index, child)| (EntryKey::Index(index), Self::from_value(child)))
                    .collect(),
            },
            Value::Null => Self::primitive(value, PrimitiveKind::Null),
            Value::Bool(_) => Self::primitive(value, PrimitiveKind::Bool),
            Value::Number(_) => Self::primitive(value, PrimitiveKind::Number),
            Value::String(_) => Self::primitive(value, PrimitiveKind::String),
        }
    }

    fn primitive(value: &Value, kind: PrimitiveKind) -> Self {
        JsonNode::Primitive {
            value: value.clone(),
            kind,
        }
    }

    /// Rebuild the JSON value this node was made from
    pub fn to_value(&self) -> Value {
        match self {
            JsonNode::Primitive { value, .. } => value.clone(),
            JsonNode::Container {
                kind: ContainerKind::Object,
                entries,
            } => Value::Object(
                entries
                    .iter()
                    .map(|(key, child)| (key.to_string(), child.to_value()))
                    .collect(),
            ),
            JsonNode::Container {
                kind: ContainerKind::Array,
                entries,
            } => Value::Array(entries.iter().map(|(_, child)| child.to_value()).collect()),
        }
    }

    /// Canonical copy text: pretty-printed with 2-space indent, key order kept
    pub fn to_pretty_string(&self) -> String {
        // A Value always has string keys, so this cannot fail
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }

    /// Literal text of a primitive (`"quoted"`, `null`, `true`, `42`)
    pub fn literal(&self) -> Option<String> {
        match self {
            JsonNode::Primitive { value, .. } => Some(value.to_string()),
            JsonNode::Container { .. } => None,
        }
    }

    /// Number of direct children (0 for primitives)
    pub fn len(&self) -> usize {
        match self {
            JsonNode::Primitive { .. } => 0,
            JsonNode::Container { entries, .. } => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_container(&self) -> bool {
        matches!(self, JsonNode::Container { .. })
    }

    pub fn child(&self, key: &str) -> Option<&JsonNode> {
        match self {
            JsonNode::Primitive { .. } => None,
            JsonNode::Container { entries, .. } => entries
                .iter()
                .find(|(entry_key, _)| entry_key.to_string() == key)
                .map(|(_, node)| node),
        }
    }

    /// Look up a node by dotted path (`root.a.0`)
    pub fn get(&self, path: &str) -> Option<&JsonNode> {
        let mut parts = path.split('.');
        if parts.next() != Some(ROOT_PATH) {
            return None;
        }
        parts.try_fold(self, |node, key| node.child(key))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paths and expand state
// ─────────────────────────────────────────────────────────────────────────────

/// Dotted structural path plus its depth below the root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    dotted: String,
    depth: usize,
}

impl NodePath {
    pub fn root() -> Self {
        Self {
            dotted: ROOT_PATH.to_string(),
            depth: 0,
        }
    }

    pub fn child(&self, key: &EntryKey) -> Self {
        Self {
            dotted: format!("{}.{}", self.dotted, key),
            depth: self.depth + 1,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.dotted
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

/// Caller-owned expand/collapse flags keyed by dotted path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    flags: BTreeMap<String, bool>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit flag, or the depth default while nothing has been toggled
    pub fn is_expanded(&self, path: &NodePath) -> bool {
        let explicit = self.flags.get(path.as_str()).copied().unwrap_or(false);
        explicit || (path.depth() < AUTO_EXPAND_DEPTH && self.flags.is_empty())
    }

    /// Flip the explicit flag for `path` (absent counts as `false`)
    ///
    /// Returns the new flag. The first toggle switches every other path off
    /// its depth default, including a default-expanded one.
    pub fn toggle(&mut self, path: &str) -> bool {
        let flag = !self.flags.get(path).copied().unwrap_or(false);
        self.flags.insert(path.to_string(), flag);
        flag
    }

    pub fn set(&mut self, path: impl Into<String>, expanded: bool) {
        self.flags.insert(path.into(), expanded);
    }

    /// Mark every container under `node` as expanded
    pub fn expand_all(&mut self, node: &JsonNode) {
        fn walk(state: &mut ExpandState, node: &JsonNode, path: &NodePath) {
            if let JsonNode::Container { entries, .. } = node {
                state.flags.insert(path.as_str().to_string(), true);
                for (key, child) in entries {
                    walk(state, child, &path.child(key));
                }
            }
        }
        walk(self, node, &NodePath::root());
    }

    /// Collapse everything, root included
    pub fn collapse_all(&mut self) {
        self.flags.clear();
        self.flags.insert(ROOT_PATH.to_string(), false);
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree + visible rows
// ─────────────────────────────────────────────────────────────────────────────

/// What a visible row shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowKind {
    /// Container header; collapsed containers show only this row
    Open {
        container: ContainerKind,
        len: usize,
        expanded: bool,
    },
    Close {
        container: ContainerKind,
    },
    Primitive {
        kind: PrimitiveKind,
        literal: String,
    },
}

/// One visible line of a rendered tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRow {
    pub path: String,
    pub depth: usize,
    pub key: Option<EntryKey>,
    #[serde(flatten)]
    pub kind: RowKind,
}

/// A decoded payload ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct JsonTree {
    root: JsonNode,
}

impl JsonTree {
    pub fn from_value(value: &Value) -> Self {
        Self {
            root: JsonNode::from_value(value),
        }
    }

    /// Decode a JSON string; no partial tree is ever built on failure
    pub fn parse(text: &str) -> Result<Self, JsonTreeError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    pub fn root(&self) -> &JsonNode {
        &self.root
    }

    pub fn to_pretty_string(&self) -> String {
        self.root.to_pretty_string()
    }

    /// Flatten the visible part of the tree into rows, in display order
    pub fn rows(&self, state: &ExpandState) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        push_rows(&mut rows, &self.root, None, &NodePath::root(), state);
        rows
    }
}

fn push_rows(
    rows: &mut Vec<TreeRow>,
    node: &JsonNode,
    key: Option<&EntryKey>,
    path: &NodePath,
    state: &ExpandState,
) {
    let row = |kind| TreeRow {
        path: path.to_string(),
        depth: path.depth(),
        key: key.cloned(),
        kind,
    };

    match node {
        JsonNode::Primitive { kind, value } => rows.push(row(RowKind::Primitive {
            kind: *kind,
            literal: value.to_string(),
        })),
        JsonNode::Container { kind, entries } => {
            let expanded = state.is_expanded(path);
            rows.push(row(RowKind::Open {
                container: *kind,
                len: entries.len(),
                expanded,
            }));
            if expanded {
                for (child_key, child) in entries {
                    push_rows(rows, child, Some(child_key), &path.child(child_key), state);
                }
                rows.push(TreeRow {
                    path: path.to_string(),
                    depth: path.depth(),
                    key: None,
                    kind: RowKind::Close { container: *kind },
                });
            }
        }
    }
}
