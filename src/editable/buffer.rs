//! Attributed text buffer traits and the rope-backed implementation.
//!
//! Provides `TagBuffer` (read-only) and `TagBufferMut` (read-write) traits
//! over a character buffer in which a tag occupies a single attachment slot.

use ropey::Rope;

use super::range::TextRange;
use crate::render::Attachment;
use crate::style::TextStyle;

/// Placeholder character stored in the text for every attachment slot
pub const ATTACHMENT_CHAR: char = '\u{FFFC}';

/// Replacement content for `TagBufferMut::replace_characters`
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Plain text. `style: None` inherits the typing attributes at the
    /// insertion point.
    Text {
        text: String,
        style: Option<TextStyle>,
    },
    /// A single attachment slot
    Attachment {
        attachment: Attachment,
        style: Option<TextStyle>,
    },
}

impl Content {
    /// Nothing: a pure deletion
    pub fn empty() -> Self {
        Content::Text {
            text: String::new(),
            style: None,
        }
    }

    /// Text as typed by the user, picking up the surrounding attributes
    pub fn typed(text: impl Into<String>) -> Self {
        Content::Text {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Content::Text {
            text: text.into(),
            style: Some(style),
        }
    }

    pub fn attachment(attachment: Attachment, style: TextStyle) -> Self {
        Content::Attachment {
            attachment,
            style: Some(style),
        }
    }

    /// Number of characters this content occupies once inserted
    pub fn len_chars(&self) -> usize {
        match self {
            Content::Text { text, .. } => text.chars().count(),
            Content::Attachment { .. } => 1,
        }
    }
}

/// Read-only view into an attributed buffer.
pub trait TagBuffer {
    /// Total length in characters (an attachment counts as one)
    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Text in range; attachment slots appear as `ATTACHMENT_CHAR`
    fn slice(&self, range: TextRange) -> String;

    fn content(&self) -> String {
        self.slice(TextRange::new(0, self.len_chars()))
    }

    fn attachment_at(&self, offset: usize) -> Option<&Attachment>;

    fn style_at(&self, offset: usize) -> Option<&TextStyle>;

    /// Offsets of every attachment slot inside `range`, ascending
    fn enumerate_attachments(&self, range: TextRange) -> Vec<usize>;

    fn contains_attachments(&self, range: TextRange) -> bool {
        !self.enumerate_attachments(range).is_empty()
    }

    /// Number of attachment slots strictly before `offset`
    fn attachments_before(&self, offset: usize) -> usize {
        self.enumerate_attachments(TextRange::new(0, offset)).len()
    }

    /// Offset of the `index`-th attachment slot
    fn attachment_offset(&self, index: usize) -> Option<usize> {
        self.enumerate_attachments(TextRange::new(0, self.len_chars()))
            .get(index)
            .copied()
    }
}

/// Mutable buffer operations. Extends TagBuffer.
pub trait TagBufferMut: TagBuffer {
    /// Replace the characters in `range` (clamped to the buffer) with `content`
    fn replace_characters(&mut self, range: TextRange, content: Content);

    /// Overlay `style` on every character in `range`
    fn apply_attributes(&mut self, range: TextRange, style: &TextStyle);
}

/// Per-character attributes stored alongside the rope
#[derive(Debug, Clone, Default, PartialEq)]
struct Slot {
    style: Option<TextStyle>,
    attachment: Option<Attachment>,
}

/// TagBuffer implementation wrapping ropey::Rope with a parallel attribute run.
#[derive(Debug, Clone, Default)]
pub struct RopeTagBuffer {
    rope: Rope,
    slots: Vec<Slot>,
}

impl RopeTagBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding unstyled plain text
    pub fn from_text(s: &str) -> Self {
        let rope = Rope::from_str(s);
        let slots = vec![Slot::default(); rope.len_chars()];
        Self { rope, slots }
    }

    /// Access the underlying Rope
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Number of attachment slots in the whole buffer
    pub fn attachment_count(&self) -> usize {
        self.slots.iter().filter(|s| s.attachment.is_some()).count()
    }

    /// Attachments in buffer order
    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.slots.iter().filter_map(|s| s.attachment.as_ref())
    }

    fn clamp(&self, range: TextRange) -> TextRange {
        range.clamped(self.rope.len_chars())
    }

    /// Attributes typed text picks up at `offset`: those of the previous
    /// character, attachment or not
    fn typing_style(&self, offset: usize) -> Option<TextStyle> {
        offset
            .checked_sub(1)
            .and_then(|prev| self.slots.get(prev))
            .and_then(|slot| slot.style.clone())
    }
}

impl TagBuffer for RopeTagBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, range: TextRange) -> String {
        let range = self.clamp(range);
        if range.is_empty() {
            return String::new();
        }
        self.rope.slice(range.as_range()).to_string()
    }

    fn attachment_at(&self, offset: usize) -> Option<&Attachment> {
        self.slots.get(offset).and_then(|s| s.attachment.as_ref())
    }

    fn style_at(&self, offset: usize) -> Option<&TextStyle> {
        self.slots.get(offset).and_then(|s| s.style.as_ref())
    }

    fn enumerate_attachments(&self, range: TextRange) -> Vec<usize> {
        let range = self.clamp(range);
        self.slots[range.as_range()]
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.attachment.is_some())
            .map(|(i, _)| range.location + i)
            .collect()
    }
}

impl TagBufferMut for RopeTagBuffer {
    fn replace_characters(&mut self, range: TextRange, content: Content) {
        let range = self.clamp(range);
        let inherited = self.typing_style(range.location);

        self.rope.remove(range.as_range());
        match content {
            Content::Text { text, style } => {
                let style = style.or(inherited);
                self.rope.insert(range.location, &text);
                let inserted = text.chars().map(|_| Slot {
                    style: style.clone(),
                    attachment: None,
                });
                self.slots.splice(range.as_range(), inserted);
            }
            Content::Attachment { attachment, style } => {
                self.rope.insert_char(range.location, ATTACHMENT_CHAR);
                let slot = Slot {
                    style: style.or(inherited),
                    attachment: Some(attachment),
                };
                self.slots.splice(range.as_range(), std::iter::once(slot));
            }
        }
        debug_assert_eq!(self.rope.len_chars(), self.slots.len());
    }

    fn apply_attributes(&mut self, range: TextRange, style: &TextStyle) {
        let range = self.clamp(range);
        for slot in &mut self.slots[range.as_range()] {
            slot.style = Some(style.merged_over(slot.style.as_ref()));
        }
    }
}
