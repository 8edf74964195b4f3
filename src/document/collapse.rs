//! Caller-owned collapse state for tagged sections
//!
//! Sections are addressed by their stable id (`section-{index}`), never by
//! identity, so the set survives re-parsing the same text.

use super::Document;
use std::collections::BTreeSet;

/// Set of section ids the user has collapsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedSections {
    ids: BTreeSet<String>,
}

impl CollapsedSections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip one section, returning whether it is now collapsed
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn collapse(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn expand(&mut self, id: &str) {
        self.ids.remove(id);
    }

    /// Collapse every tagged section of a document
    pub fn collapse_all(&mut self, document: &Document) {
        self.ids.extend(document.section_ids());
    }

    pub fn expand_all(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CollapsedSections {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
