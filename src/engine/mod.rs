//! Tag-text synchronization engine
//!
//! The engine owns the active range and the tag registry and is the only
//! thing that mutates the buffer on the host's behalf. The host reports raw
//! edits and selection changes through [`TextViewDelegate`]; the engine decides
//! when typed text becomes a tag, when a tag goes back to text, and keeps the
//! registry in step with the buffer's attachment slots.
//!
//! Submodules:
//! - `commit`: replacing buffer ranges with tags or text
//! - `delegate`: the host-facing callbacks
//! - `tag_ops`: select, delete, edit, restore and paste
//! - `gestures`: tap, long press and the tag menu

mod commit;
mod delegate;
mod gestures;
mod tag_ops;

use std::fmt;

pub use commit::map_offset;
pub use delegate::{EditDecision, TextViewDelegate};
pub use gestures::{ContextMenu, MenuAction, StandardAction};

use crate::config::TagFieldConfig;
use crate::editable::{ActiveRange, TagBuffer, TextRange};
use crate::geometry::Point;
use crate::layout::TextLayout;
use crate::render::TagRenderer;
use crate::style::{Color, FontSpec, TextStyle};
use crate::tags::TagRegistry;

/// Everything the engine owns, one per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditEngineState {
    pub active: ActiveRange,
    pub registry: TagRegistry,
}

/// What a commit put in place of the replaced range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// One attachment slot
    Tagged,
    /// Nothing; the candidate was empty or a duplicate
    Dropped,
    /// The text itself, restyled; the pill could not be rendered
    KeptAsText(usize),
}

impl CommitOutcome {
    /// Characters now occupying the replaced range
    pub fn replacement_len(&self) -> usize {
        match self {
            CommitOutcome::Tagged => 1,
            CommitOutcome::Dropped => 0,
            CommitOutcome::KeptAsText(len) => *len,
        }
    }
}

/// Borrowed host state for one callback
pub struct EditContext<'a, B> {
    pub buffer: &'a mut B,
    pub selection: &'a mut TextRange,
    pub layout: &'a dyn TextLayout,
}

impl<'a, B> EditContext<'a, B> {
    pub fn new(buffer: &'a mut B, selection: &'a mut TextRange, layout: &'a dyn TextLayout) -> Self {
        Self {
            buffer,
            selection,
            layout,
        }
    }

    fn collapse_selection(&mut self, offset: usize) {
        *self.selection = TextRange::collapsed(offset);
    }
}

/// The orchestrator. Construct one per field.
#[derive(Debug, Clone)]
pub struct EditEngine {
    state: EditEngineState,
    renderer: TagRenderer,
    default_font: Option<FontSpec>,
    default_attributes: TextStyle,
    /// Text container inset from the view origin (x = left, y = top)
    inset: Point,
    /// Slot typed since the last text change notification
    pending_attributes: Option<TextRange>,
    menu: Option<ContextMenu>,
}

impl Default for EditEngine {
    fn default() -> Self {
        Self::new(&TagFieldConfig::default())
    }
}

impl EditEngine {
    pub fn new(config: &TagFieldConfig) -> Self {
        Self {
            state: EditEngineState::default(),
            renderer: TagRenderer::new(config.tint, Color::BLACK, config.scale_factor),
            default_font: config.default_font.clone(),
            default_attributes: config.default_attributes.clone(),
            inset: Point::new(config.container.inset_left, config.container.inset_top),
            pending_attributes: None,
            menu: None,
        }
    }

    pub fn state(&self) -> &EditEngineState {
        &self.state
    }

    pub fn active(&self) -> ActiveRange {
        self.state.active
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.state.registry
    }

    pub fn renderer(&self) -> &TagRenderer {
        &self.renderer
    }

    pub fn default_font(&self) -> Option<&FontSpec> {
        self.default_font.as_ref()
    }

    pub fn default_attributes(&self) -> &TextStyle {
        &self.default_attributes
    }

    /// The tag menu currently showing, if any
    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    /// Committed tag texts in order
    pub fn tag_texts(&self) -> Vec<String> {
        self.state.registry.texts()
    }

    /// Raw text of the active range, empty when nothing is being typed
    pub fn edited_text(&self, buffer: &dyn TagBuffer) -> String {
        if !self.state.active.is_active() {
            return String::new();
        }
        buffer.slice(self.state.active.text_range())
    }
}

impl fmt::Display for EditEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tags: {{{}}}, active: {}",
            self.state.registry, self.state.active
        )
    }
}
