//! Replacing buffer ranges with tags, keeping the registry in step.

use std::ops::Range;

use tracing::{debug, warn};

use super::{CommitOutcome, EditContext, EditEngine};
use crate::editable::{ActiveRange, Content, MoveDirection, TagBuffer, TagBufferMut, TextRange};
use crate::layout::TextLayout;
use crate::render::Attachment;
use crate::tags::Tag;

/// Where `offset` lands after `replaced` is swapped for `new_len` characters.
///
/// Offsets inside the replaced range snap to the end of the replacement.
pub fn map_offset(offset: usize, replaced: TextRange, new_len: usize) -> usize {
    if offset <= replaced.location {
        offset
    } else if offset >= replaced.end() {
        offset - replaced.length + new_len
    } else {
        replaced.location + new_len
    }
}

pub(super) fn map_selection(selection: TextRange, replaced: TextRange, new_len: usize) -> TextRange {
    let start = map_offset(selection.location, replaced, new_len);
    let end = map_offset(selection.end(), replaced, new_len).max(start);
    TextRange::new(start, end - start)
}

/// Fold a deletion into the active range: deleted characters before the
/// anchor pull it left, deleted characters inside it shrink it.
pub(super) fn absorb_deletion(active: &mut ActiveRange, deleted: TextRange) {
    let before = deleted
        .end()
        .min(active.location())
        .saturating_sub(deleted.location);
    let overlap = deleted
        .intersection(active.text_range())
        .map_or(0, |r| r.length);
    active.move_by(MoveDirection::Left(before));
    active.shrink(overlap);
}

impl EditEngine {
    pub(super) fn render(&self, tag: &Tag, layout: &dyn TextLayout) -> Option<Attachment> {
        self.renderer.render(
            &tag.text,
            &self.default_attributes,
            self.default_font.as_ref(),
            tag.is_selected,
            layout,
        )
    }

    /// Drop the registry entries whose slots lie in `range`
    pub(super) fn purge_slots(&mut self, buffer: &dyn TagBuffer, range: TextRange) {
        let slots = buffer.enumerate_attachments(range).len();
        if slots == 0 {
            return;
        }
        let first = buffer.attachments_before(range.location);
        let purged = self.state.registry.purge(first..first + slots);
        debug!(first, purged, "purged tags in {}", range);
        self.forget_menu_tags(first..first + slots);
    }

    /// Keep the menu on its tag once the registry entries in `removed` are
    /// gone; the menu closes when its own tag is among them.
    pub(super) fn forget_menu_tags(&mut self, removed: Range<usize>) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        if removed.contains(&menu.index) {
            self.menu = None;
        } else if menu.index >= removed.end {
            menu.index -= removed.len();
        }
    }

    /// Replace `range` with the pill for `tag`, or with nothing when there is
    /// no tag. Tags already in `range` are purged first. A tag whose pill
    /// cannot be rendered stays as plain text and is not registered.
    pub(super) fn replace_contents<B: TagBufferMut>(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        range: TextRange,
        tag: Option<Tag>,
    ) -> CommitOutcome {
        let range = range.clamped(ctx.buffer.len_chars());

        let Some(mut tag) = tag else {
            self.purge_slots(&*ctx.buffer, range);
            ctx.buffer.replace_characters(range, Content::empty());
            return CommitOutcome::Dropped;
        };

        let Some(attachment) = self.render(&tag, ctx.layout) else {
            warn!(tag = %tag.text, "no font resolves for tag, keeping it as text");
            self.purge_slots(&*ctx.buffer, range);
            let len = tag.text.chars().count();
            ctx.buffer.replace_characters(
                range,
                Content::styled(tag.text, self.default_attributes.clone()),
            );
            return CommitOutcome::KeptAsText(len);
        };

        self.purge_slots(&*ctx.buffer, range);
        tag.size = attachment.size();
        ctx.buffer.replace_characters(
            range,
            Content::attachment(attachment, self.default_attributes.clone()),
        );
        let index = ctx.buffer.attachments_before(range.location);
        self.state.registry.insert(index, tag);
        if let Some(menu) = self.menu.as_mut().filter(|menu| menu.index >= index) {
            menu.index += 1;
        }
        CommitOutcome::Tagged
    }

    /// Turn the active range into a tag, or drop it when its text is not a
    /// valid candidate. The anchor moves past whatever replaced it.
    ///
    /// Returns the committed range and the length of its replacement.
    pub(super) fn commit_active<B: TagBufferMut>(
        &mut self,
        ctx: &mut EditContext<'_, B>,
    ) -> Option<(TextRange, usize)> {
        if !self.state.active.is_active() {
            return None;
        }

        let range = self.state.active.take();
        let text = ctx.buffer.slice(range);
        let candidate = self.state.registry.create_candidate(&text);
        let outcome = self.replace_contents(ctx, range, candidate);
        let new_len = outcome.replacement_len();
        self.state.active.move_by(MoveDirection::Right(new_len));
        self.pending_attributes = None;

        debug!(%text, ?outcome, "committed active range {}", range);
        Some((range, new_len))
    }
}
