//! The in-progress span: text the user is typing that is not yet a tag.

use std::fmt;

use super::range::TextRange;

/// Direction and distance for shifting the active range's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left(usize),
    Right(usize),
}

/// The contiguous range of raw text currently being edited.
///
/// All arithmetic saturates at zero, so location and length never underflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveRange {
    range: TextRange,
}

impl ActiveRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(location: usize) -> Self {
        Self {
            range: TextRange::collapsed(location),
        }
    }

    /// True while there is typed text waiting to be committed
    pub fn is_active(&self) -> bool {
        self.range.length > 0
    }

    pub fn text_range(&self) -> TextRange {
        self.range
    }

    pub fn location(&self) -> usize {
        self.range.location
    }

    pub fn len(&self) -> usize {
        self.range.length
    }

    pub fn is_empty(&self) -> bool {
        self.range.length == 0
    }

    /// Re-anchor without touching the length
    pub fn set_location(&mut self, location: usize) {
        self.range.location = location;
    }

    pub fn contains(&self, range: TextRange) -> bool {
        self.range.contains(range)
    }

    pub fn extend(&mut self, size: usize) {
        self.range.length += size;
    }

    pub fn shrink(&mut self, size: usize) {
        self.range.length = self.range.length.saturating_sub(size);
    }

    pub fn move_by(&mut self, direction: MoveDirection) {
        self.range.location = match direction {
            MoveDirection::Left(distance) => self.range.location.saturating_sub(distance),
            MoveDirection::Right(distance) => self.range.location + distance,
        };
    }

    /// Split around `by`, which must lie inside this range.
    ///
    /// Returns the part before `by` (to be committed now) and `by` itself (to
    /// be replaced). This range keeps its location and shrinks to the
    /// remainder after `by`.
    pub fn split(&mut self, by: TextRange) -> (TextRange, TextRange) {
        let before = TextRange::new(
            self.range.location,
            by.location.saturating_sub(self.range.location),
        );
        self.range.length = self.range.end().saturating_sub(by.end());
        (before, by)
    }

    /// Hand out the current range and reset to zero length at the same anchor
    pub fn take(&mut self) -> TextRange {
        let range = self.range;
        self.range.length = 0;
        range
    }
}

impl fmt::Display for ActiveRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, [{}]}}",
            self.range.location,
            self.range.end(),
            self.range.length
        )
    }
}
