//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use tagfield::config::{ContainerConfig, TagFieldConfig};
use tagfield::editable::{RopeTagBuffer, TagBuffer, ATTACHMENT_CHAR};
use tagfield::geometry::Point;
use tagfield::layout::GridLayout;
use tagfield::style::{FontSpec, TextStyle};
use tagfield::{update, Msg, TagField};

/// Point size every test field is set in
pub const FONT_SIZE: f32 = 20.0;

/// Advance of one typed character in the grid layout
pub const CHAR_WIDTH: f32 = FONT_SIZE / 2.0;

/// Height of a line and of a pill in the grid layout
pub const LINE_HEIGHT: f32 = FONT_SIZE * 1.2;

/// Config with a 20pt font and no wrapping
pub fn test_config() -> TagFieldConfig {
    TagFieldConfig {
        default_font: Some(FontSpec::new(FONT_SIZE)),
        container: ContainerConfig {
            width: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Empty field over the grid layout
pub fn test_field() -> TagField {
    test_field_with(&test_config())
}

pub fn test_field_with(config: &TagFieldConfig) -> TagField {
    TagField::new(
        config,
        Box::new(GridLayout::new(config.base_font(), config.container.width)),
    )
}

/// Field holding untagged `text`, caret at the end
pub fn test_field_with_text(text: &str) -> TagField {
    let config = test_config();
    TagField::with_text(
        &config,
        Box::new(GridLayout::new(config.base_font(), 0.0)),
        text,
    )
}

/// Empty field whose text font the layout cannot resolve, so nothing it
/// commits can be drawn as a pill
pub fn unresolved_font_field() -> TagField {
    let config = TagFieldConfig {
        default_attributes: TextStyle::new().with_font(FontSpec::with_family("Missing", FONT_SIZE)),
        ..test_config()
    };
    TagField::new(
        &config,
        Box::new(GridLayout::new(config.base_font(), 0.0).with_families(&["Inter"])),
    )
}

/// Type `text` one key at a time, newlines included
pub fn type_text(field: &mut TagField, text: &str) {
    update(
        field,
        Msg::Type {
            text: text.to_string(),
        },
    );
}

/// Field holding one committed tag per entry of `tags`, caret at the end
pub fn field_with_tags(tags: &[&str]) -> TagField {
    let mut field = test_field();
    for tag in tags {
        type_text(&mut field, &format!("{}\n", tag));
    }
    field
}

/// Buffer content with each attachment slot written as `[label]`
pub fn render_content(field: &TagField) -> String {
    let buffer = field.buffer();
    let mut labels = buffer.attachments().map(|a| a.label.clone());
    buffer
        .content()
        .chars()
        .map(|c| {
            if c == ATTACHMENT_CHAR {
                format!("[{}]", labels.next().unwrap_or_default())
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Width of the pill drawn for `label` at the test font size
pub fn pill_width(label: &str) -> f32 {
    let radius = LINE_HEIGHT / 2.0;
    label.chars().count() as f32 * (FONT_SIZE - 2.0) / 2.0 + radius * 3.0
}

/// Horizontal position of the left edge of the character at `offset`
pub fn x_of(buffer: &RopeTagBuffer, offset: usize) -> f32 {
    (0..offset)
        .map(|i| match buffer.attachment_at(i) {
            Some(attachment) => attachment.bounds.width,
            None => CHAR_WIDTH,
        })
        .sum()
}

/// Point `fraction` of the way across the character at `offset` on line 0
pub fn point_in(field: &TagField, offset: usize, fraction: f32) -> Point {
    let buffer = field.buffer();
    let width = match buffer.attachment_at(offset) {
        Some(attachment) => attachment.bounds.width,
        None => CHAR_WIDTH,
    };
    Point::new(x_of(buffer, offset) + width * fraction, LINE_HEIGHT / 2.0)
}

/// Assert the registry and the buffer's attachment slots agree
pub fn assert_in_sync(field: &TagField) {
    let labels: Vec<String> = field
        .buffer()
        .attachments()
        .map(|a| a.label.clone())
        .collect();
    assert_eq!(
        labels,
        field.tags(),
        "attachment slots out of step with the registry ({})",
        field.dump()
    );
}
