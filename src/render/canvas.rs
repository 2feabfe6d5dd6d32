//! Pixel buffer with the few drawing primitives a tag pill needs.
//!
//! Pixels are ARGB (0xAARRGGBB) over a transparent background. All
//! coordinates are device pixels and out-of-bounds drawing is clipped.

use crate::geometry::Rect;
use crate::layout::Coverage;
use crate::style::Color;

/// Composite `src` over `dst` (both ARGB, straight alpha).
#[inline]
pub fn blend_over(dst: u32, src: u32) -> u32 {
    let sa = ((src >> 24) & 0xFF) as f32 / 255.0;
    if sa <= 0.0 {
        return dst;
    }
    let da = ((dst >> 24) & 0xFF) as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return 0;
    }

    let channel = |shift: u32| {
        let s = ((src >> shift) & 0xFF) as f32;
        let d = ((dst >> shift) & 0xFF) as f32;
        (((s * sa + d * da * (1.0 - sa)) / out_a).round() as u32).min(255)
    };

    let a = (out_a * 255.0).round() as u32;
    (a << 24) | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// An owned ARGB image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// A fully transparent bitmap
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Blend a color into one pixel, `coverage` scaling its alpha
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height || coverage <= 0.0 {
            return;
        }
        let alpha = color.a as f32 / 255.0 * coverage.min(1.0);
        let src = color.with_alpha_f(alpha).to_argb_u32();
        let idx = y * self.width + x;
        self.pixels[idx] = blend_over(self.pixels[idx], src);
    }

    /// Fill a rounded rectangle. Pixels are sampled at their centers.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let radius = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
        let (x0, y0, x1, y1) = self.pixel_span(rect);

        for y in y0..y1 {
            for x in x0..x1 {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                // Nearest point on the inner (radius-shrunk) rectangle
                let cx = px.clamp(rect.x + radius, rect.x + rect.width - radius);
                let cy = py.clamp(rect.y + radius, rect.y + rect.height - radius);
                let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                self.blend_pixel(x, y, color, edge_coverage(radius - dist));
            }
        }
    }

    /// Fill the ellipse inscribed in `rect`
    pub fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let rx = rect.width / 2.0;
        let ry = rect.height / 2.0;
        let cx = rect.x + rx;
        let cy = rect.y + ry;
        let (x0, y0, x1, y1) = self.pixel_span(rect);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                let norm = (dx * dx + dy * dy).sqrt();
                // Signed distance approximated in pixels along the smaller radius
                let dist = (1.0 - norm) * rx.min(ry);
                self.blend_pixel(x, y, color, edge_coverage(dist));
            }
        }
    }

    /// Draw an alpha mask in `color` with its top-left at (x, y)
    pub fn draw_coverage(&mut self, x: usize, y: usize, coverage: &Coverage, color: Color) {
        for cy in 0..coverage.height {
            for cx in 0..coverage.width {
                let alpha = coverage.get(cx, cy);
                if alpha > 0 {
                    self.blend_pixel(x + cx, y + cy, color, alpha as f32 / 255.0);
                }
            }
        }
    }

    /// Pixels as RGBA bytes, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&p| {
                [
                    ((p >> 16) & 0xFF) as u8,
                    ((p >> 8) & 0xFF) as u8,
                    (p & 0xFF) as u8,
                    ((p >> 24) & 0xFF) as u8,
                ]
            })
            .collect()
    }

    fn pixel_span(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = ((rect.x + rect.width).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((rect.y + rect.height).ceil().max(0.0) as usize).min(self.height);
        (x0, y0, x1, y1)
    }
}

/// One pixel of antialiasing around a shape edge
#[inline]
fn edge_coverage(signed_distance: f32) -> f32 {
    (signed_distance + 0.5).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_over_transparent_takes_source() {
        let src = Color::rgba(10, 20, 30, 128).to_argb_u32();
        assert_eq!(blend_over(0, src), src);
    }

    #[test]
    fn test_blend_over_opaque_source_replaces() {
        let dst = Color::rgb(255, 255, 255).to_argb_u32();
        let src = Color::rgb(0, 0, 0).to_argb_u32();
        assert_eq!(blend_over(dst, src), src);
    }

    #[test]
    fn test_blend_over_half_alpha_mixes() {
        let dst = Color::rgb(0, 0, 0).to_argb_u32();
        let src = Color::rgba(255, 255, 255, 128).to_argb_u32();
        let out = blend_over(dst, src);
        assert_eq!(out >> 24, 0xFF);
        let r = (out >> 16) & 0xFF;
        assert!((127..=129).contains(&r));
    }

    #[test]
    fn test_rounded_rect_leaves_corners_clear() {
        let mut bitmap = Bitmap::new(20, 10);
        bitmap.fill_rounded_rect(Rect::new(0.0, 0.0, 20.0, 10.0), 5.0, Color::BLACK);

        assert_eq!(bitmap.pixel(0, 0), Some(0));
        assert_eq!(bitmap.pixel(10, 5).map(|p| p >> 24), Some(0xFF));
    }

    #[test]
    fn test_ellipse_fills_center_only() {
        let mut bitmap = Bitmap::new(10, 10);
        bitmap.fill_ellipse(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        assert_eq!(bitmap.pixel(5, 5).map(|p| p >> 24), Some(0xFF));
        assert_eq!(bitmap.pixel(0, 0), Some(0));

        // Degenerate ellipses draw nothing
        let mut empty = Bitmap::new(4, 4);
        empty.fill_ellipse(Rect::new(0.0, 0.0, -2.0, 4.0), Color::BLACK);
        assert!(empty.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_draw_coverage_clips() {
        let mut coverage = Coverage::new(2, 1);
        coverage.accumulate(0, 0, 255);
        coverage.accumulate(1, 0, 255);

        let mut bitmap = Bitmap::new(2, 2);
        bitmap.draw_coverage(1, 1, &coverage, Color::BLACK);
        assert_eq!(bitmap.pixel(1, 1), Some(0xFF000000));
        assert_eq!(bitmap.pixel(0, 1), Some(0));
    }

    #[test]
    fn test_to_rgba8_byte_order() {
        let mut bitmap = Bitmap::new(1, 1);
        bitmap.blend_pixel(0, 0, Color::rgb(1, 2, 3), 1.0);
        assert_eq!(bitmap.to_rgba8(), vec![1, 2, 3, 255]);
    }
}
