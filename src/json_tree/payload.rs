//! Tool-call payload decoding and classification
//!
//! Payloads arrive either as JSON-encoded strings or already decoded. A
//! string is always decoded first; a decode failure is kept local and shown
//! as the raw text plus an "Invalid JSON" marker.
//!
//! Decoded results are then classified into a closed set of variants. The
//! checks run in this order and the first hit wins:
//!
//! 1. object with a string `screenshot` field → [`ToolPayload::Image`]
//! 2. object with a string `image` field → [`ToolPayload::Image`]
//! 3. object with string `data` and an `image/*` `mime_type` / `mimeType`
//!    → [`ToolPayload::Image`]
//! 4. object whose `content` array holds an element with `"type": "image"`
//!    and string `data` → [`ToolPayload::Image`]
//! 5. a bare JSON string → [`ToolPayload::Text`]
//! 6. anything else → [`ToolPayload::Structured`]

use super::{JsonTree, JsonTreeError};
use crate::util::truncate_utf8_safe;
use serde_json::Value;

/// Bytes of image data shown in a one-line preview
const IMAGE_PREVIEW_BYTES: usize = 32;

/// Result of decoding a payload for display
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadView {
    Tree(JsonTree),
    /// Undecodable string, displayed literally next to the error
    Invalid { raw: String, error: JsonTreeError },
}

impl PayloadView {
    /// Decode a payload that may be an encoded string or a decoded value
    pub fn decode(input: &Value) -> Self {
        match input {
            Value::String(text) => Self::decode_str(text),
            other => PayloadView::Tree(JsonTree::from_value(other)),
        }
    }

    pub fn decode_str(text: &str) -> Self {
        match JsonTree::parse(text) {
            Ok(tree) => PayloadView::Tree(tree),
            Err(error) => {
                tracing::warn!(%error, "tool payload is not valid JSON");
                PayloadView::Invalid {
                    raw: text.to_string(),
                    error,
                }
            }
        }
    }

    pub fn tree(&self) -> Option<&JsonTree> {
        match self {
            PayloadView::Tree(tree) => Some(tree),
            PayloadView::Invalid { .. } => None,
        }
    }

    /// Copy text: pretty JSON for trees, the raw input otherwise
    pub fn copy_text(&self) -> String {
        match self {
            PayloadView::Tree(tree) => tree.to_pretty_string(),
            PayloadView::Invalid { raw, .. } => raw.clone(),
        }
    }
}

/// The named shapes a tool result can take
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPayload {
    Image {
        data: String,
        mime_type: Option<String>,
    },
    Text(String),
    Structured(JsonTree),
}

impl ToolPayload {
    /// Resolve a decoded tool result into its variant (see module docs)
    pub fn classify(value: &Value) -> Self {
        if let Some(image) = image_from(value) {
            return image;
        }
        match value {
            Value::String(text) => ToolPayload::Text(text.clone()),
            other => ToolPayload::Structured(JsonTree::from_value(other)),
        }
    }

    /// One-line description used in collapsed headers
    pub fn summary(&self) -> String {
        match self {
            ToolPayload::Image { data, mime_type } => format!(
                "[image {} · {} bytes · {}…]",
                mime_type.as_deref().unwrap_or("unknown"),
                data.len(),
                truncate_utf8_safe(data, IMAGE_PREVIEW_BYTES)
            ),
            ToolPayload::Text(text) => text.lines().next().unwrap_or_default().to_string(),
            ToolPayload::Structured(tree) => {
                format!("{} entries", tree.root().len())
            }
        }
    }
}

fn string_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

fn mime_of(value: &Value) -> Option<&str> {
    string_field(value, "mime_type").or_else(|| string_field(value, "mimeType"))
}

fn image_from(value: &Value) -> Option<ToolPayload> {
    if !value.is_object() {
        return None;
    }

    let image = |data: &str, mime_type: Option<&str>| ToolPayload::Image {
        data: data.to_string(),
        mime_type: mime_type.map(str::to_string),
    };

    if let Some(data) = string_field(value, "screenshot") {
        return Some(image(data, mime_of(value)));
    }
    if let Some(data) = string_field(value, "image") {
        return Some(image(data, mime_of(value)));
    }
    if let (Some(data), Some(mime)) = (string_field(value, "data"), mime_of(value)) {
        if mime.starts_with("image/") {
            return Some(image(data, Some(mime)));
        }
    }
    value
        .get("content")
        .and_then(Value::as_array)?
        .iter()
        .find(|item| string_field(item, "type") == Some("image"))
        .and_then(|item| string_field(item, "data").map(|data| image(data, mime_of(item))))
}
