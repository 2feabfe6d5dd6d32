//! Operations on committed tags, plus paste.

use tracing::{debug, error, warn};

use super::commit::{map_offset, map_selection};
use super::{EditContext, EditEngine};
use crate::editable::{ActiveRange, Content, MoveDirection, TagBuffer, TagBufferMut, TextRange};
use crate::error::{Result, TagError};

impl EditEngine {
    /// Buffer offset of tag `index`'s attachment slot
    fn tag_slot(&self, buffer: &dyn TagBuffer, index: usize) -> Result<usize> {
        let len = self.state.registry.len();
        if index >= len {
            error!(index, len, "tag index out of bounds");
            return Err(TagError::IndexOutOfBounds { index, len });
        }
        buffer.attachment_offset(index).ok_or_else(|| {
            error!(index, "tag has no attachment slot");
            TagError::MissingSlot { index }
        })
    }

    /// Set a tag's selected flag and redraw its pill in place
    pub fn select_tag<B: TagBufferMut>(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        index: usize,
        selected: bool,
    ) -> Result<()> {
        let offset = self.tag_slot(&*ctx.buffer, index)?;
        let Some(tag) = self.state.registry.get_mut(index) else {
            return Err(TagError::MissingSlot { index });
        };
        tag.is_selected = selected;
        let tag = tag.clone();

        match self.render(&tag, ctx.layout) {
            Some(attachment) => {
                if let Some(tag) = self.state.registry.get_mut(index) {
                    tag.size = attachment.size();
                }
                ctx.buffer.replace_characters(
                    TextRange::new(offset, 1),
                    Content::attachment(attachment, self.default_attributes.clone()),
                );
            }
            None => warn!(tag = %tag.text, "could not redraw tag, keeping its pill"),
        }

        debug!(index, selected, "tag selection changed");
        Ok(())
    }

    /// Remove a tag and its slot
    pub fn delete_tag<B: TagBufferMut>(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        index: usize,
    ) -> Result<()> {
        let offset = self.tag_slot(&*ctx.buffer, index)?;
        let tag = self.state.registry.remove(index);
        self.forget_menu_tags(index..index + 1);
        let slot = TextRange::new(offset, 1);
        ctx.buffer.replace_characters(slot, Content::empty());

        if offset < self.state.active.location() {
            self.state.active.move_by(MoveDirection::Left(1));
            ctx.collapse_selection(self.state.active.location());
        } else {
            *ctx.selection = map_selection(*ctx.selection, slot, 0);
        }

        debug!(index, tag = ?tag.map(|t| t.text), "deleted tag");
        Ok(())
    }

    /// Turn a tag back into editable text. Any text being typed is
    /// committed first.
    pub fn edit_tag<B: TagBufferMut>(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        index: usize,
    ) -> Result<()> {
        let mut offset = self.tag_slot(&*ctx.buffer, index)?;
        if let Some((replaced, new_len)) = self.commit_active(ctx) {
            offset = map_offset(offset, replaced, new_len);
        }

        let index = ctx.buffer.attachments_before(offset);
        let Some(tag) = self.state.registry.remove(index) else {
            error!(index, "tag vanished while committing");
            return Err(TagError::MissingSlot { index });
        };
        self.forget_menu_tags(index..index + 1);

        let len = tag.text.chars().count();
        ctx.buffer.replace_characters(
            TextRange::new(offset, 1),
            Content::styled(tag.text.as_str(), self.default_attributes.clone()),
        );
        self.state.active = ActiveRange::at(offset);
        self.state.active.extend(len);
        ctx.collapse_selection(offset + len);

        debug!(index, tag = %tag.text, active = %self.state.active, "editing tag");
        Ok(())
    }

    /// Clear the selected flag of whichever tag has it
    pub fn restore_selection<B: TagBufferMut>(&mut self, ctx: &mut EditContext<'_, B>) -> Result<()> {
        match self.state.registry.selected_index() {
            Some(index) => self.select_tag(ctx, index, false),
            None => Ok(()),
        }
    }

    /// Paste `text` at the selection as a tag candidate.
    ///
    /// When the selection lies in the active range, the typed text before it
    /// is committed on its own and the text after it stays active.
    pub fn paste<B: TagBufferMut>(&mut self, ctx: &mut EditContext<'_, B>, text: &str) {
        if text.is_empty() {
            return;
        }
        *ctx.selection = ctx.selection.clamped(ctx.buffer.len_chars());

        if self.state.active.is_active() {
            let selection = *ctx.selection;
            if self.state.active.contains(selection) {
                let (before, _) = self.state.active.split(selection);
                let candidate = self
                    .state
                    .registry
                    .create_candidate(&ctx.buffer.slice(before));
                let outcome = self.replace_contents(ctx, before, candidate);
                self.state
                    .active
                    .move_by(MoveDirection::Right(outcome.replacement_len()));
                *ctx.selection = TextRange::new(self.state.active.location(), selection.length);
                debug!(?outcome, active = %self.state.active, "split active range for paste");
            } else if let Some((replaced, new_len)) = self.commit_active(ctx) {
                *ctx.selection = map_selection(*ctx.selection, replaced, new_len);
            }
        }

        let target = *ctx.selection;
        let candidate = self.state.registry.create_candidate(text);
        let outcome = self.replace_contents(ctx, target, candidate);
        self.state.active.set_location(target.location);
        self.state
            .active
            .move_by(MoveDirection::Right(outcome.replacement_len()));
        ctx.collapse_selection(self.state.active.location());

        debug!(%text, ?outcome, "pasted at {}", target);
    }
}
