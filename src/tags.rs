//! Committed tags, kept in buffer order.
//!
//! The n-th tag in the registry corresponds to the n-th attachment slot in the
//! buffer. Keeping the two in step is the edit engine's job; the registry only
//! guarantees that no two tags share a text.

use std::fmt;

use crate::geometry::Size;

/// A committed tag
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub text: String,
    pub is_selected: bool,
    /// Size of the pill last rendered for this tag, in points
    pub size: Size,
}

impl Tag {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_selected: false,
            size: Size::zero(),
        }
    }
}

/// Ordered tag list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagRegistry {
    tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.tags.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Tag texts in order
    pub fn texts(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.text.clone()).collect()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.tags.iter().any(|t| t.text == text)
    }

    /// A new unselected tag for `text`, None if it is empty or already taken.
    /// The tag is not registered until it is inserted.
    pub fn create_candidate(&self, text: &str) -> Option<Tag> {
        if text.is_empty() || self.contains_text(text) {
            return None;
        }
        Some(Tag::new(text))
    }

    /// Register `tag` at `index`, clamped to the end
    pub fn insert(&mut self, index: usize, tag: Tag) {
        let index = index.min(self.tags.len());
        self.tags.insert(index, tag);
    }

    pub fn remove(&mut self, index: usize) -> Option<Tag> {
        (index < self.tags.len()).then(|| self.tags.remove(index))
    }

    /// Drop the tags at `indices`: their texts are cleared first, then every
    /// tag left with an empty text is filtered out. Returns how many went.
    pub fn purge(&mut self, indices: impl IntoIterator<Item = usize>) -> usize {
        for index in indices {
            if let Some(tag) = self.tags.get_mut(index) {
                tag.text.clear();
            }
        }
        let before = self.tags.len();
        self.tags.retain(|t| !t.text.is_empty());
        before - self.tags.len()
    }

    /// Index of the selected tag; at most one is selected at a time
    pub fn selected_index(&self) -> Option<usize> {
        self.tags.iter().position(|t| t.is_selected)
    }
}

impl fmt::Display for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}({})", tag.text, if tag.is_selected { "o" } else { "_" })?;
        }
        Ok(())
    }
}
