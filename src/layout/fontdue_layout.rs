//! TrueType layout backed by `fontdue`.
//!
//! A single face serves every family request; only the size varies.
//! Rasterized glyphs are cached per (char, size) the way the editor's text
//! painter caches them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};

use super::flow::Flow;
use super::{CharacterHit, Coverage, FontMetrics, TextLayout};
use crate::editable::TagBuffer;
use crate::error::{Result, TagError};
use crate::geometry::{Point, Size};
use crate::style::FontSpec;

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

pub struct FontdueLayout {
    font: Font,
    base: FontSpec,
    container_width: f32,
    line_spacing: f32,
    glyph_cache: RefCell<GlyphCache>,
    flow: Flow,
}

impl std::fmt::Debug for FontdueLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueLayout")
            .field("base", &self.base)
            .field("container_width", &self.container_width)
            .field("cached_glyphs", &self.glyph_cache.borrow().len())
            .finish()
    }
}

impl FontdueLayout {
    pub fn from_bytes(bytes: &[u8], base: FontSpec, container_width: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| TagError::Font(e.to_string()))?;
        Ok(Self {
            font,
            base,
            container_width,
            line_spacing: 0.0,
            glyph_cache: RefCell::new(HashMap::new()),
            flow: Flow::default(),
        })
    }

    pub fn from_path(path: &Path, base: FontSpec, container_width: f32) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| TagError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded font from {}", path.display());
        Self::from_bytes(&bytes, base, container_width)
    }

    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing.max(0.0);
        self
    }

    fn advance(&self, ch: char, size: f32) -> f32 {
        self.font.metrics(ch, size).advance_width
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }

    fn line_metrics(&self, size: f32) -> Option<fontdue::LineMetrics> {
        if size <= 0.0 {
            return None;
        }
        self.font.horizontal_line_metrics(size)
    }
}

impl TextLayout for FontdueLayout {
    fn character_offset(&self, point: Point) -> Option<CharacterHit> {
        Some(self.flow.hit_test(point))
    }

    fn font_metrics(&self, font: &FontSpec) -> Option<FontMetrics> {
        self.line_metrics(font.size).map(|m| FontMetrics {
            line_height: m.new_line_size,
            ascent: m.ascent,
            descender: m.descent,
        })
    }

    fn bounding_size(&self, text: &str, font: &FontSpec) -> Option<Size> {
        let metrics = self.line_metrics(font.size)?;
        Some(Size::new(
            self.text_width(text, font.size),
            metrics.new_line_size,
        ))
    }

    fn rasterize_label(&self, text: &str, font: &FontSpec, scale: f32) -> Option<Coverage> {
        let px = font.size * scale;
        let line_metrics = self.line_metrics(px)?;
        let mut coverage = Coverage::new(
            self.text_width(text, px).ceil() as usize,
            line_metrics.new_line_size.ceil() as usize,
        );

        let mut cache = self.glyph_cache.borrow_mut();
        let baseline = line_metrics.ascent;
        let mut current_x = 0.0_f32;

        for ch in text.chars() {
            let (metrics, bitmap) = cache
                .entry((ch, px.to_bits()))
                .or_insert_with(|| self.font.rasterize(ch, px));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                    if alpha == 0 {
                        continue;
                    }
                    let x = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let y = (glyph_top + bitmap_y as f32) as isize;
                    if x >= 0 && y >= 0 {
                        coverage.accumulate(x as usize, y as usize, alpha);
                    }
                }
            }

            current_x += metrics.advance_width;
        }

        Some(coverage)
    }

    fn sync(&mut self, buffer: &dyn TagBuffer) {
        let content = buffer.content();
        let widths: Vec<f32> = content
            .chars()
            .enumerate()
            .map(|(offset, ch)| match buffer.attachment_at(offset) {
                Some(attachment) => attachment.bounds.width,
                None => {
                    let size = buffer
                        .style_at(offset)
                        .and_then(|s| s.font.as_ref())
                        .map(|f| f.size)
                        .unwrap_or(self.base.size);
                    self.advance(ch, size)
                }
            })
            .collect();

        let line_height = self
            .line_metrics(self.base.size)
            .map(|m| m.new_line_size)
            .unwrap_or(self.base.size)
            + self.line_spacing;
        self.flow = Flow::build(widths, self.container_width, line_height);
    }
}
