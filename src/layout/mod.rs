//! Text layout collaborator
//!
//! The engine never measures glyphs itself. Everything it needs from the
//! layout engine (hit testing, font metrics, label measurement and
//! rasterization) goes through [`TextLayout`].
//!
//! Two implementations ship with the crate:
//! - [`GridLayout`]: deterministic monospaced cells, used by tests and as the
//!   headless fallback
//! - [`FontdueLayout`]: a TrueType face rasterized with `fontdue`

mod flow;
mod fontdue_layout;
mod grid;

pub use fontdue_layout::FontdueLayout;
pub use grid::GridLayout;

use crate::editable::TagBuffer;
use crate::geometry::{Point, Size};
use crate::style::{FontSpec, TextStyle};

/// Result of hit testing a point against laid-out text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterHit {
    /// Character under (or nearest to) the point
    pub offset: usize,
    /// How far across that character the point lies, 0.0 - 1.0
    pub fraction: f32,
}

impl CharacterHit {
    pub const fn new(offset: usize, fraction: f32) -> Self {
        Self { offset, fraction }
    }

    /// Caret offset for this hit: past the character once beyond its midpoint
    pub fn caret_offset(&self) -> usize {
        self.offset + usize::from(self.fraction > 0.5)
    }

    /// True when the point lies strictly inside the character
    pub fn is_inside(&self) -> bool {
        self.fraction > 0.0 && self.fraction < 1.0
    }
}

/// Vertical metrics of a resolved font, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub line_height: f32,
    pub ascent: f32,
    /// Distance below the baseline, negative
    pub descender: f32,
}

/// An 8-bit alpha mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<u8>,
}

impl Coverage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[y * self.width + x]
    }

    /// Combine a value into the mask, keeping the stronger coverage
    pub fn accumulate(&mut self, x: usize, y: usize, alpha: u8) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            self.alpha[idx] = self.alpha[idx].max(alpha);
        }
    }

    pub fn is_blank(&self) -> bool {
        self.alpha.iter().all(|&a| a == 0)
    }
}

/// Contract the engine consumes from the platform's layout engine.
pub trait TextLayout {
    /// Map a point in text-container coordinates to a character
    fn character_offset(&self, point: Point) -> Option<CharacterHit>;

    /// Metrics for `font`, None if the font cannot be resolved
    fn font_metrics(&self, font: &FontSpec) -> Option<FontMetrics>;

    /// Single-line bounding size of `text` set in `font`
    fn bounding_size(&self, text: &str, font: &FontSpec) -> Option<Size>;

    /// Alpha mask of `text` set in `font`, at `scale` device pixels per point
    fn rasterize_label(&self, text: &str, font: &FontSpec, scale: f32) -> Option<Coverage>;

    /// Relayout after the buffer changed
    fn sync(&mut self, _buffer: &dyn TagBuffer) {}
}

/// Height of one text line: the resolved font's line height plus paragraph
/// spacing.
///
/// Font precedence: default attributes font, then the configured default
/// font, then the system font.
pub fn line_height(
    layout: &dyn TextLayout,
    default_font: Option<&FontSpec>,
    attributes: &TextStyle,
) -> f32 {
    let font = attributes.resolved_font(default_font);
    let base = layout
        .font_metrics(&font)
        .or_else(|| layout.font_metrics(&FontSpec::system()))
        .map(|m| m.line_height)
        .unwrap_or(font.size);
    let spacing = attributes
        .paragraph
        .as_ref()
        .map(|p| p.effective_line_spacing())
        .unwrap_or(0.0);
    base + spacing
}
