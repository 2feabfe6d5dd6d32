//! Typed text attributes and colors
//!
//! Replaces loosely keyed attribute dictionaries with a record holding an
//! optional font and an optional paragraph style.

use serde::{Deserialize, Serialize};

/// A font request: family (None = system face) and point size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default)]
    pub family: Option<String>,
    pub size: f32,
}

impl FontSpec {
    /// Point size of the platform's system font
    pub const SYSTEM_SIZE: f32 = 14.0;

    /// Smallest size `size_adjusted` will produce
    const MIN_SIZE: f32 = 1.0;

    pub fn new(size: f32) -> Self {
        Self { family: None, size }
    }

    pub fn with_family(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            size,
        }
    }

    pub fn system() -> Self {
        Self::new(Self::SYSTEM_SIZE)
    }

    /// Same face, size shifted by `delta` points
    pub fn size_adjusted(&self, delta: f32) -> Self {
        Self {
            family: self.family.clone(),
            size: (self.size + delta).max(Self::MIN_SIZE),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::system()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Extra space between lines in points; negative values count as zero
    #[serde(default)]
    pub line_spacing: f32,
}

impl ParagraphStyle {
    pub fn effective_line_spacing(&self) -> f32 {
        self.line_spacing.max(0.0)
    }
}

/// Attributes applied to a run of characters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub font: Option<FontSpec>,
    #[serde(default)]
    pub paragraph: Option<ParagraphStyle>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_paragraph(mut self, paragraph: ParagraphStyle) -> Self {
        self.paragraph = Some(paragraph);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.font.is_none() && self.paragraph.is_none()
    }

    /// Font to set text in: this style's font, else `default_font`, else the
    /// system font
    pub fn resolved_font(&self, default_font: Option<&FontSpec>) -> FontSpec {
        self.font
            .as_ref()
            .or(default_font)
            .cloned()
            .unwrap_or_default()
    }

    /// Overlay these attributes on `base`: keys set here win, others are kept
    pub fn merged_over(&self, base: Option<&TextStyle>) -> TextStyle {
        let Some(base) = base else {
            return self.clone();
        };
        TextStyle {
            font: self.font.clone().or_else(|| base.font.clone()),
            paragraph: self.paragraph.clone().or_else(|| base.paragraph.clone()),
        }
    }
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// The default tint: system blue
    pub const SYSTEM_BLUE: Color = Color::rgb(0x00, 0x7A, 0xFF);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with alpha set to `alpha` (0.0 - 1.0)
    pub fn with_alpha_f(&self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..*self
        }
    }

    /// Hue (0-1), saturation (0-1), brightness (0-1)
    pub fn to_hsb(&self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta <= f32::EPSILON {
            0.0
        } else if max == r {
            ((g - b) / delta).rem_euclid(6.0) / 6.0
        } else if max == g {
            ((b - r) / delta + 2.0) / 6.0
        } else {
            ((r - g) / delta + 4.0) / 6.0
        };
        let saturation = if max <= f32::EPSILON { 0.0 } else { delta / max };
        (hue, saturation, max)
    }

    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32, alpha: u8) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = brightness.clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        let channel = |value: f32| ((value + m) * 255.0).round() as u8;
        Self::rgba(channel(r), channel(g), channel(b), alpha)
    }

    /// Same hue and saturation with brightness lowered by `amount`
    pub fn darkened(&self, amount: f32) -> Self {
        let (h, s, b) = self.to_hsb();
        Self::from_hsb(h, s, b - amount, self.a)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
