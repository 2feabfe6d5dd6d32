//! Deterministic monospaced layout.
//!
//! Every character advances half its font size, lines are 1.2x the size, and
//! glyphs rasterize as solid blocks. Results depend only on the inputs, which
//! makes it the layout of choice for tests and headless replay.

use super::flow::Flow;
use super::{CharacterHit, Coverage, FontMetrics, TextLayout};
use crate::editable::TagBuffer;
use crate::geometry::{Point, Size};
use crate::style::FontSpec;

const ADVANCE: f32 = 0.5;
const LINE_HEIGHT: f32 = 1.2;
const ASCENT: f32 = 0.95;
const DESCENT: f32 = 0.25;
const CAP_HEIGHT: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct GridLayout {
    base: FontSpec,
    container_width: f32,
    line_spacing: f32,
    /// Families that resolve; None resolves everything
    families: Option<Vec<String>>,
    flow: Flow,
}

impl GridLayout {
    pub fn new(base: FontSpec, container_width: f32) -> Self {
        Self {
            base,
            container_width,
            line_spacing: 0.0,
            families: None,
            flow: Flow::default(),
        }
    }

    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing.max(0.0);
        self
    }

    /// Only resolve fonts of these families (the system face always resolves)
    pub fn with_families(mut self, families: &[&str]) -> Self {
        self.families = Some(families.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn advance(size: f32) -> f32 {
        size * ADVANCE
    }

    pub fn line_count(&self) -> usize {
        self.flow.line_count()
    }

    fn resolves(&self, font: &FontSpec) -> bool {
        if font.size <= 0.0 {
            return false;
        }
        match (&self.families, &font.family) {
            (Some(families), Some(family)) => families.contains(family),
            _ => true,
        }
    }
}

impl TextLayout for GridLayout {
    fn character_offset(&self, point: Point) -> Option<CharacterHit> {
        Some(self.flow.hit_test(point))
    }

    fn font_metrics(&self, font: &FontSpec) -> Option<FontMetrics> {
        self.resolves(font).then(|| FontMetrics {
            line_height: font.size * LINE_HEIGHT,
            ascent: font.size * ASCENT,
            descender: -font.size * DESCENT,
        })
    }

    fn bounding_size(&self, text: &str, font: &FontSpec) -> Option<Size> {
        self.resolves(font).then(|| {
            Size::new(
                text.chars().count() as f32 * Self::advance(font.size),
                font.size * LINE_HEIGHT,
            )
        })
    }

    fn rasterize_label(&self, text: &str, font: &FontSpec, scale: f32) -> Option<Coverage> {
        let size = self.bounding_size(text, font)?;
        let mut coverage = Coverage::new(
            (size.width * scale).ceil() as usize,
            (size.height * scale).ceil() as usize,
        );

        let advance = Self::advance(font.size);
        let inset = advance * 0.15;
        let baseline = font.size * ASCENT;
        let y0 = ((baseline - font.size * CAP_HEIGHT) * scale) as usize;
        let y1 = (baseline * scale) as usize;

        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = ((i as f32 * advance + inset) * scale) as usize;
            let x1 = (((i + 1) as f32 * advance - inset) * scale) as usize;
            for y in y0..y1 {
                for x in x0..x1 {
                    coverage.accumulate(x, y, 255);
                }
            }
        }
        Some(coverage)
    }

    fn sync(&mut self, buffer: &dyn TagBuffer) {
        let widths = (0..buffer.len_chars()).map(|offset| match buffer.attachment_at(offset) {
            Some(attachment) => attachment.bounds.width,
            None => {
                let size = buffer
                    .style_at(offset)
                    .and_then(|s| s.font.as_ref())
                    .map(|f| f.size)
                    .unwrap_or(self.base.size);
                Self::advance(size)
            }
        });
        let line_height = self.base.size * LINE_HEIGHT + self.line_spacing;
        self.flow = Flow::build(widths, self.container_width, line_height);
    }
}
