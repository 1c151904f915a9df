// src/domain/selection.rs
use crate::domain::tag::Tag;

/// User-chosen subset of tags; iteration follows selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<Tag>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag; returns false if it was already selected
    pub fn select(&mut self, tag: Tag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Discard a tag; returns false if it was not selected
    pub fn remove(&mut self, tag: &Tag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Select the tag if absent, otherwise remove it. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, tag: Tag) -> bool {
        if self.remove(&tag) {
            false
        } else {
            self.select(tag)
        }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }
}

impl<'a> IntoIterator for &'a TagSelection {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl FromIterator<Tag> for TagSelection {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut selection = TagSelection::new();
        for tag in iter {
            selection.select(tag);
        }
        selection
    }
}

/// Ephemeral view state: search string plus selected tags. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub search: String,
    pub tags: TagSelection,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.tags.is_empty()
    }

    pub fn reset(&mut self) {
        self.search.clear();
        self.tags.clear();
    }
}
