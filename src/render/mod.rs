//! Tag pill rendering
//!
//! Turns a tag's text into a fixed-size [`Attachment`]: a rounded pill in the
//! tint color, a small round mark in its leading corner and the label set one
//! size step smaller than the surrounding text. Rendering is a pure function
//! of its inputs.

mod canvas;

pub use canvas::{blend_over, Bitmap};

use crate::geometry::{Rect, Size};
use crate::layout::TextLayout;
use crate::style::{Color, FontSpec, TextStyle};

/// Points the label font is shrunk by relative to the text around it
pub const LABEL_SIZE_DELTA: f32 = -2.0;
/// Background fill alpha
pub const FILL_ALPHA: f32 = 0.4;
/// Leading mark alpha
pub const MARK_ALPHA: f32 = 0.8;
/// Brightness removed from the tint for a selected tag
pub const SELECTED_DARKEN: f32 = 0.5;
/// Inset of the leading mark inside the pill's first circle
const MARK_INSET: f32 = 4.0;

/// A rendered tag occupying one attachment slot in the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// The tag text this pill was rendered from
    pub label: String,
    /// Pixels at device scale
    pub image: Bitmap,
    /// Placement in points; `y` puts the pill's bottom on the descender line
    pub bounds: Rect,
    pub selected: bool,
}

impl Attachment {
    pub fn size(&self) -> Size {
        self.bounds.size()
    }
}

/// Stateless pill renderer configured with a tint and device scale.
#[derive(Debug, Clone, PartialEq)]
pub struct TagRenderer {
    tint: Color,
    label_color: Color,
    scale: f32,
}

impl Default for TagRenderer {
    fn default() -> Self {
        Self::new(Color::SYSTEM_BLUE, Color::BLACK, 1.0)
    }
}

impl TagRenderer {
    pub fn new(tint: Color, label_color: Color, scale: f32) -> Self {
        Self {
            tint,
            label_color,
            scale: if scale > 0.0 { scale } else { 1.0 },
        }
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Fill and mark colors for a pill
    pub fn colors(&self, selected: bool) -> (Color, Color) {
        let base = if selected {
            self.tint.darkened(SELECTED_DARKEN)
        } else {
            self.tint
        };
        (base.with_alpha_f(FILL_ALPHA), base.with_alpha_f(MARK_ALPHA))
    }

    /// Size of the pill for `text` without drawing it
    pub fn measure(
        &self,
        text: &str,
        style: &TextStyle,
        default_font: Option<&FontSpec>,
        layout: &dyn TextLayout,
    ) -> Option<Size> {
        let font = style.resolved_font(default_font);
        let tag_height = layout.bounding_size(text, &font)?.height;
        let label = layout.bounding_size(text, &font.size_adjusted(LABEL_SIZE_DELTA))?;
        let radius = tag_height / 2.0;
        Some(Size::new(label.width + radius * 2.0 + radius, tag_height))
    }

    /// Render `text` as a pill, None if the font cannot be resolved
    pub fn render(
        &self,
        text: &str,
        style: &TextStyle,
        default_font: Option<&FontSpec>,
        selected: bool,
        layout: &dyn TextLayout,
    ) -> Option<Attachment> {
        let font = style.resolved_font(default_font);
        let metrics = layout.font_metrics(&font)?;
        let label_font = font.size_adjusted(LABEL_SIZE_DELTA);
        let size = self.measure(text, style, default_font, layout)?;
        let label = layout.rasterize_label(text, &label_font, self.scale)?;

        let radius = size.height / 2.0;
        let s = self.scale;
        let mut image = Bitmap::new(
            (size.width * s).ceil() as usize,
            (size.height * s).ceil() as usize,
        );
        let (fill, mark) = self.colors(selected);

        image.fill_rounded_rect(
            Rect::new(0.0, 0.0, size.width * s, size.height * s),
            (radius - 1.0).max(0.0) * s,
            fill,
        );

        let mark_diameter = radius * 2.0 - MARK_INSET * 2.0;
        if mark_diameter > 0.0 {
            image.fill_ellipse(
                Rect::new(
                    MARK_INSET * s,
                    MARK_INSET * s,
                    mark_diameter * s,
                    mark_diameter * s,
                ),
                mark,
            );
        }

        image.draw_coverage((radius * 2.0 * s) as usize, 0, &label, self.label_color);

        Some(Attachment {
            label: text.to_string(),
            image,
            bounds: Rect::new(0.0, metrics.descender.ceil(), size.width, size.height),
            selected,
        })
    }
}
