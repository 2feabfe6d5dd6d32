//! Half-open character ranges used for selections and edit targets.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A half-open range of character offsets: `location..location + length`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// Create a collapsed range (cursor with no selection)
    pub const fn collapsed(location: usize) -> Self {
        Self::new(location, 0)
    }

    /// Exclusive upper bound
    pub const fn end(&self) -> usize {
        self.location + self.length
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check if `other` lies within this range, both bounds inclusive
    pub fn contains(&self, other: TextRange) -> bool {
        self.location <= other.location && self.end() >= other.end()
    }

    /// Check if a character offset is inside this range (end is exclusive)
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.location && offset < self.end()
    }

    /// Overlapping part of two ranges, None if they share no characters
    pub fn intersection(&self, other: TextRange) -> Option<TextRange> {
        let start = self.location.max(other.location);
        let end = self.end().min(other.end());
        (start < end).then(|| TextRange::new(start, end - start))
    }

    /// Restrict to `0..len`
    pub fn clamped(&self, len: usize) -> TextRange {
        let start = self.location.min(len);
        let end = self.end().min(len);
        TextRange::new(start, end - start)
    }

    pub fn as_range(&self) -> Range<usize> {
        self.location..self.end()
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end.saturating_sub(range.start))
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.location, self.length)
    }
}
