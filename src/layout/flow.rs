//! Greedy line wrapping and hit testing shared by the layouts.

use super::CharacterHit;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GlyphBox {
    pub offset: usize,
    pub x: f32,
    pub width: f32,
}

/// Characters placed left to right and wrapped at the container width.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Flow {
    lines: Vec<Vec<GlyphBox>>,
    line_height: f32,
}

impl Default for Flow {
    fn default() -> Self {
        Self {
            lines: vec![Vec::new()],
            line_height: 0.0,
        }
    }
}

impl Flow {
    /// Lay out one advance per character. `max_width <= 0` disables wrapping.
    pub fn build(widths: impl IntoIterator<Item = f32>, max_width: f32, line_height: f32) -> Self {
        let mut lines = vec![Vec::new()];
        let mut x = 0.0;

        for (offset, width) in widths.into_iter().enumerate() {
            if max_width > 0.0 && x > 0.0 && x + width > max_width {
                lines.push(Vec::new());
                x = 0.0;
            }
            if let Some(line) = lines.last_mut() {
                line.push(GlyphBox { offset, x, width });
            }
            x += width;
        }

        Self { lines, line_height }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn hit_test(&self, point: Point) -> CharacterHit {
        let line_idx = if self.line_height > 0.0 {
            (point.y / self.line_height).floor().max(0.0) as usize
        } else {
            0
        };
        let line_idx = line_idx.min(self.lines.len().saturating_sub(1));

        let Some(line) = self.lines.get(line_idx) else {
            return CharacterHit::new(0, 0.0);
        };
        let Some(last) = line.last() else {
            return CharacterHit::new(0, 0.0);
        };

        for glyph in line {
            if point.x < glyph.x + glyph.width {
                let fraction = if glyph.width > 0.0 {
                    ((point.x - glyph.x) / glyph.width).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                return CharacterHit::new(glyph.offset, fraction);
            }
        }

        // Past the end of the line
        CharacterHit::new(last.offset, 1.0)
    }
}
