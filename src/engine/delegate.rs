//! Host callbacks
//!
//! The host calls these synchronously, in event order, around every raw edit
//! and selection change. A raw edit is applied only if
//! [`TextViewDelegate::on_text_will_change`] accepts it.

use tracing::{debug, trace};

use super::commit::{absorb_deletion, map_selection};
use super::{EditContext, EditEngine};
use crate::editable::{TagBufferMut, TextRange};

/// Verdict on a raw edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision {
    /// Let the host apply the edit
    Accept,
    /// Drop the edit; the engine has done whatever it replaces
    Reject,
}

/// Interface the hosting text view drives.
pub trait TextViewDelegate<B: TagBufferMut> {
    /// Adjust a selection the host is about to apply
    fn on_will_change_selection(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        proposed: TextRange,
    ) -> TextRange;

    /// Called before `range` is replaced by `replacement`
    fn on_text_will_change(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        range: TextRange,
        replacement: &str,
    ) -> EditDecision;

    /// Called after an accepted edit was applied to the buffer
    fn on_did_change_text(&mut self, ctx: &mut EditContext<'_, B>);

    /// Called after the selection changed
    fn on_did_change_selection(&mut self, ctx: &mut EditContext<'_, B>);

    /// Called when the field is about to lose focus
    fn on_should_end_editing(&mut self, ctx: &mut EditContext<'_, B>) -> bool;
}

fn is_line_break(text: &str) -> bool {
    matches!(text, "\n" | "\r" | "\r\n")
}

impl EditEngine {
    /// Commit the active range once the selection leaves it, otherwise keep
    /// the anchor on the selection while idle.
    ///
    /// Returns the committed range and its replacement length.
    pub(super) fn sync_selection<B: TagBufferMut>(
        &mut self,
        ctx: &mut EditContext<'_, B>,
    ) -> Option<(TextRange, usize)> {
        if !self.state.active.is_active() {
            self.state.active.set_location(ctx.selection.location);
            return None;
        }
        if self.state.active.contains(*ctx.selection) {
            return None;
        }

        let (replaced, new_len) = self.commit_active(ctx)?;
        *ctx.selection = map_selection(*ctx.selection, replaced, new_len);
        self.state.active.set_location(ctx.selection.location);
        debug!(selection = %ctx.selection, "selection left the active range");
        Some((replaced, new_len))
    }
}

impl<B: TagBufferMut> TextViewDelegate<B> for EditEngine {
    fn on_will_change_selection(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        proposed: TextRange,
    ) -> TextRange {
        proposed.clamped(ctx.buffer.len_chars())
    }

    fn on_text_will_change(
        &mut self,
        ctx: &mut EditContext<'_, B>,
        range: TextRange,
        replacement: &str,
    ) -> EditDecision {
        if is_line_break(replacement) {
            self.commit_active(ctx);
            let anchor = self.state.active.location();
            ctx.collapse_selection(anchor);
            return EditDecision::Reject;
        }
        if replacement.contains(['\n', '\r']) {
            debug!("rejected multi-line raw insert");
            return EditDecision::Reject;
        }

        if !range.is_empty() {
            self.purge_slots(&*ctx.buffer, range);
            if self.state.active.is_active() {
                absorb_deletion(&mut self.state.active, range);
            }
        }

        let inserted = replacement.chars().count();
        if inserted > 0 {
            if !self.state.active.is_active() {
                self.state.active.set_location(range.location);
            }
            self.state.active.extend(inserted);
            self.pending_attributes = Some(TextRange::new(range.location, inserted));
            trace!(active = %self.state.active, "extended by {}", inserted);
        }

        EditDecision::Accept
    }

    fn on_did_change_text(&mut self, ctx: &mut EditContext<'_, B>) {
        let Some(range) = self.pending_attributes.take() else {
            return;
        };
        if !self.default_attributes.is_empty() {
            ctx.buffer.apply_attributes(range, &self.default_attributes);
        }
    }

    fn on_did_change_selection(&mut self, ctx: &mut EditContext<'_, B>) {
        self.sync_selection(ctx);
    }

    fn on_should_end_editing(&mut self, ctx: &mut EditContext<'_, B>) -> bool {
        if let Some((replaced, new_len)) = self.commit_active(ctx) {
            *ctx.selection = map_selection(*ctx.selection, replaced, new_len);
        }
        true
    }
}
