//! Tap, long press and the tag menu.
//!
//! Gesture points are in view coordinates; the container inset is removed
//! before hit testing.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::commit::map_offset;
use super::{EditContext, EditEngine};
use crate::editable::TagBufferMut;
use crate::error::{Result, TagError};
use crate::geometry::{Point, Rect};
use crate::layout::{line_height, CharacterHit, TextLayout};

/// Actions offered on a long-pressed tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Edit,
    Delete,
}

impl MenuAction {
    pub const ALL: [MenuAction; 2] = [MenuAction::Edit, MenuAction::Delete];

    pub fn title(&self) -> &'static str {
        match self {
            MenuAction::Edit => "Edit",
            MenuAction::Delete => "Delete",
        }
    }
}

/// Entries of the platform's standard edit menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardAction {
    Select,
    SelectAll,
    Cut,
    Copy,
    Paste,
    Delete,
}

/// A tag menu to present, anchored to `rect` in view coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextMenu {
    /// Registry index of the selected tag
    pub index: usize,
    pub rect: Rect,
    pub actions: Vec<MenuAction>,
}

impl EditEngine {
    fn hit(&self, layout: &dyn TextLayout, point: Point) -> Option<CharacterHit> {
        layout.character_offset(point.offset_by(self.inset.x, self.inset.y))
    }

    /// Move the caret to the tapped character, past it once the tap is beyond
    /// its midpoint
    pub fn tap<B: TagBufferMut>(&mut self, ctx: &mut EditContext<'_, B>, point: Point) {
        let Some(hit) = self.hit(ctx.layout, point) else {
            return;
        };
        ctx.collapse_selection(hit.caret_offset().min(ctx.buffer.len_chars()));
        self.sync_selection(ctx);
    }

    /// Select the pressed tag and return the menu to show for it.
    ///
    /// A press on plain text selects the active range instead; a press on
    /// the edge of a character only moves the caret.
    pub fn long_press<B: TagBufferMut>(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        point: Point,
    ) -> Option<ContextMenu> {
        let hit = self.hit(ctx.layout, point)?;
        if self.menu.is_some() {
            if let Err(e) = self.dismiss_menu(ctx) {
                warn!("Failed to restore tag selection before long press: {}", e);
            }
        }

        let on_tag = hit.is_inside() && ctx.buffer.attachment_at(hit.offset).is_some();
        let mut tag_offset = hit.offset;
        ctx.collapse_selection(hit.caret_offset().min(ctx.buffer.len_chars()));
        if let Some((replaced, new_len)) = self.sync_selection(ctx) {
            tag_offset = map_offset(tag_offset, replaced, new_len);
        }

        if !hit.is_inside() {
            return None;
        }
        if !on_tag {
            *ctx.selection = self.state.active.text_range();
            return None;
        }

        let index = ctx.buffer.attachments_before(tag_offset);
        self.select_tag(ctx, index, true).ok()?;

        let lh = line_height(ctx.layout, self.default_font.as_ref(), &self.default_attributes);
        let line = if lh > 0.0 {
            ((point.y - self.inset.y) / lh).floor().max(0.0)
        } else {
            0.0
        };
        let width = self
            .state
            .registry
            .get(index)
            .map_or(0.0, |tag| tag.size.width);
        let menu = ContextMenu {
            index,
            rect: Rect::new(
                point.x - width * hit.fraction,
                line * lh + self.inset.y,
                width,
                lh,
            ),
            actions: MenuAction::ALL.to_vec(),
        };

        debug!(index, rect = ?menu.rect, "showing tag menu");
        self.menu = Some(menu.clone());
        Some(menu)
    }

    /// Run a menu action on the selected tag
    pub fn perform_menu_action<B: TagBufferMut>(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        action: MenuAction,
    ) -> Result<()> {
        let Some(index) = self.state.registry.selected_index() else {
            error!(?action, "menu action without a selected tag");
            return Err(TagError::NoSelection);
        };
        self.menu = None;
        match action {
            MenuAction::Edit => self.edit_tag(ctx, index),
            MenuAction::Delete => self.delete_tag(ctx, index),
        }
    }

    /// The menu went away without an action
    pub fn dismiss_menu<B: TagBufferMut>(&mut self, ctx: &mut EditContext<'_, B>) -> Result<()> {
        self.menu = None;
        self.restore_selection(ctx)
    }

    /// Whether a standard edit menu entry is available
    pub fn can_perform(&self, action: StandardAction) -> bool {
        match action {
            StandardAction::Select
            | StandardAction::SelectAll
            | StandardAction::Copy
            | StandardAction::Paste => false,
            StandardAction::Delete => self.menu.is_some(),
            StandardAction::Cut => true,
        }
    }
}
