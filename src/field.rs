//! Headless tag field
//!
//! Plays the platform text view: owns the buffer, the selection marker and the
//! layout, forwards every raw edit and selection change to the engine, and
//! relayouts after each event.

use crate::config::TagFieldConfig;
use crate::editable::{Content, RopeTagBuffer, TagBufferMut, TextRange};
use crate::engine::{
    ContextMenu, EditContext, EditDecision, EditEngine, MenuAction, StandardAction,
    TextViewDelegate,
};
use crate::error::Result;
use crate::geometry::Point;
use crate::layout::{FontdueLayout, GridLayout, TextLayout};

pub struct TagField<B = RopeTagBuffer> {
    buffer: B,
    selection: TextRange,
    layout: Box<dyn TextLayout>,
    engine: EditEngine,
}

impl TagField<RopeTagBuffer> {
    /// An empty field
    pub fn new(config: &TagFieldConfig, layout: Box<dyn TextLayout>) -> Self {
        Self::with_buffer(config, RopeTagBuffer::new(), layout)
    }

    /// A field holding untagged `text`, caret at the end
    pub fn with_text(config: &TagFieldConfig, layout: Box<dyn TextLayout>, text: &str) -> Self {
        Self::with_buffer(config, RopeTagBuffer::from_text(text), layout)
    }

    /// An empty field laid out with the configured font, or the grid layout
    /// when no font file is configured
    pub fn from_config(config: &TagFieldConfig) -> Result<Self> {
        Ok(Self::new(config, layout_for(config)?))
    }
}

/// Layout described by `config`
pub fn layout_for(config: &TagFieldConfig) -> Result<Box<dyn TextLayout>> {
    let base = config.base_font();
    let spacing = config
        .default_attributes
        .paragraph
        .as_ref()
        .map_or(0.0, |p| p.effective_line_spacing());
    let width = config.container.width;

    Ok(match &config.font_path {
        Some(path) => {
            Box::new(FontdueLayout::from_path(path, base, width)?.with_line_spacing(spacing))
        }
        None => Box::new(GridLayout::new(base, width).with_line_spacing(spacing)),
    })
}

impl<B: TagBufferMut> TagField<B> {
    /// Wrap an existing buffer. The buffer must hold plain text only; the
    /// engine does not know about attachments it did not insert.
    pub fn with_buffer(config: &TagFieldConfig, buffer: B, layout: Box<dyn TextLayout>) -> Self {
        let selection = TextRange::collapsed(buffer.len_chars());
        let mut field = Self {
            buffer,
            selection,
            layout,
            engine: EditEngine::new(config),
        };
        field.with_engine(|engine, ctx| engine.on_did_change_selection(ctx));
        field
    }

    fn with_engine<R>(&mut self, f: impl FnOnce(&mut EditEngine, &mut EditContext<'_, B>) -> R) -> R {
        let Self {
            buffer,
            selection,
            layout,
            engine,
        } = self;
        let out = {
            let mut ctx = EditContext::new(&mut *buffer, &mut *selection, &**layout);
            f(engine, &mut ctx)
        };
        layout.sync(&*buffer);
        out
    }

    /// Replace `range` with `text` the way the platform's raw edit path does
    pub fn replace_raw(&mut self, range: TextRange, text: &str) -> EditDecision {
        self.with_engine(|engine, ctx| {
            let range = range.clamped(ctx.buffer.len_chars());
            let decision = engine.on_text_will_change(ctx, range, text);
            if decision == EditDecision::Accept {
                ctx.buffer.replace_characters(range, Content::typed(text));
                engine.on_did_change_text(ctx);
                let caret = TextRange::collapsed(range.location + text.chars().count());
                *ctx.selection = engine.on_will_change_selection(ctx, caret);
                engine.on_did_change_selection(ctx);
            }
            decision
        })
    }

    /// Type `text` over the selection
    pub fn insert_text(&mut self, text: &str) -> EditDecision {
        self.replace_raw(self.selection, text)
    }

    /// Backspace: delete the selection, or the character before the caret
    pub fn delete_backward(&mut self) -> EditDecision {
        let range = if self.selection.is_empty() {
            match self.selection.location.checked_sub(1) {
                Some(prev) => TextRange::new(prev, 1),
                None => return EditDecision::Reject,
            }
        } else {
            self.selection
        };
        self.replace_raw(range, "")
    }

    pub fn paste(&mut self, text: &str) {
        self.with_engine(|engine, ctx| engine.paste(ctx, text));
    }

    pub fn set_selection(&mut self, range: TextRange) {
        self.with_engine(|engine, ctx| {
            let range = engine.on_will_change_selection(ctx, range);
            if range != *ctx.selection {
                *ctx.selection = range;
                engine.on_did_change_selection(ctx);
            }
        });
    }

    pub fn tap(&mut self, point: Point) {
        self.with_engine(|engine, ctx| engine.tap(ctx, point));
    }

    pub fn long_press(&mut self, point: Point) -> Option<ContextMenu> {
        self.with_engine(|engine, ctx| engine.long_press(ctx, point))
    }

    pub fn perform_menu_action(&mut self, action: MenuAction) -> Result<()> {
        self.with_engine(|engine, ctx| engine.perform_menu_action(ctx, action))
    }

    pub fn dismiss_menu(&mut self) -> Result<()> {
        self.with_engine(|engine, ctx| engine.dismiss_menu(ctx))
    }

    /// Resign focus, committing whatever is being typed
    pub fn end_editing(&mut self) -> bool {
        self.with_engine(|engine, ctx| engine.on_should_end_editing(ctx))
    }

    pub fn select_tag(&mut self, index: usize, selected: bool) -> Result<()> {
        self.with_engine(|engine, ctx| engine.select_tag(ctx, index, selected))
    }

    pub fn delete_tag(&mut self, index: usize) -> Result<()> {
        self.with_engine(|engine, ctx| engine.delete_tag(ctx, index))
    }

    pub fn edit_tag(&mut self, index: usize) -> Result<()> {
        self.with_engine(|engine, ctx| engine.edit_tag(ctx, index))
    }

    pub fn restore_selection(&mut self) -> Result<()> {
        self.with_engine(|engine, ctx| engine.restore_selection(ctx))
    }

    pub fn can_perform(&self, action: StandardAction) -> bool {
        self.engine.can_perform(action)
    }

    /// Committed tag texts in order
    pub fn tags(&self) -> Vec<String> {
        self.engine.tag_texts()
    }

    /// Text currently being typed
    pub fn edited_text(&self) -> String {
        self.engine.edited_text(&self.buffer)
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn engine(&self) -> &EditEngine {
        &self.engine
    }

    pub fn layout(&self) -> &dyn TextLayout {
        self.layout.as_ref()
    }

    pub fn menu(&self) -> Option<&ContextMenu> {
        self.engine.menu()
    }

    /// One-line state summary for logs
    pub fn dump(&self) -> String {
        format!("{}, selection: {}", self.engine, self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::TagBuffer;
    use crate::style::FontSpec;

    fn field() -> TagField {
        TagField::new(
            &TagFieldConfig::default(),
            Box::new(GridLayout::new(FontSpec::system(), 0.0)),
        )
    }

    #[test]
    fn test_delete_backward_at_start_does_nothing() {
        let mut field = field();
        assert_eq!(field.delete_backward(), EditDecision::Reject);
        assert!(field.buffer().is_empty());
    }

    #[test]
    fn test_with_text_anchors_at_end() {
        let mut field = TagField::with_text(
            &TagFieldConfig::default(),
            Box::new(GridLayout::new(FontSpec::system(), 0.0)),
            "foo ",
        );
        assert_eq!(field.selection(), TextRange::collapsed(4));
        field.insert_text("b");
        assert_eq!(field.engine().active().text_range(), TextRange::new(4, 1));
        assert_eq!(field.edited_text(), "b");
    }

    #[test]
    fn test_dump() {
        let mut field = field();
        field.insert_text("a");
        field.insert_text("\n");
        field.insert_text("b");
        assert_eq!(
            field.dump(),
            "tags: {a(_)}, active: {1, 2, [1]}, selection: {2, 0}"
        );
    }

    #[test]
    fn test_from_config_without_font_uses_grid() {
        let field = TagField::from_config(&TagFieldConfig::default()).unwrap();
        assert!(field.layout().font_metrics(&FontSpec::system()).is_some());
    }

    #[test]
    fn test_from_config_with_missing_font_fails() {
        let config = TagFieldConfig {
            font_path: Some("/no/such/font.ttf".into()),
            ..Default::default()
        };
        assert!(TagField::from_config(&config).is_err());
    }
}
