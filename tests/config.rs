//! Configuration system tests
//!
//! Tests for config paths, YAML persistence and config-driven layout.

mod common;

use common::{pill_width, test_config, type_text, LINE_HEIGHT};
use tagfield::config::{ContainerConfig, TagFieldConfig};
use tagfield::config_paths;
use tagfield::geometry::Point;
use tagfield::style::{Color, FontSpec, ParagraphStyle, TextStyle};
use tagfield::{TagError, TagField};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    let Some(dir) = config_paths::config_dir() else {
        return;
    };
    assert!(dir.to_string_lossy().contains("tagfield"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let Some(path) = config_paths::config_file() else {
        return;
    };
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_logs_dir_is_inside_config_dir() {
    let (Some(dir), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) else {
        return;
    };
    assert!(logs.starts_with(dir));
}

// ========================================================================
// Persistence Tests
// ========================================================================

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = TagFieldConfig {
        default_font: Some(FontSpec::with_family("Inter", 16.0)),
        default_attributes: TextStyle::new().with_paragraph(ParagraphStyle { line_spacing: 4.0 }),
        tint: Color::rgba(0x34, 0xC7, 0x59, 0xCC),
        scale_factor: 3.0,
        font_path: None,
        container: ContainerConfig {
            width: 280.0,
            inset_top: 8.0,
            inset_left: 5.0,
        },
    };
    config.save_to(&path).unwrap();

    let loaded = TagFieldConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = TagFieldConfig::load_from(&dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(TagError::Read { .. })));
}

#[test]
fn test_load_malformed_yaml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "scale_factor: [not, a, number]\n").unwrap();

    let result = TagFieldConfig::load_from(&path);
    assert!(matches!(result, Err(TagError::Parse(_))));
}

#[test]
fn test_tint_accepts_hex_with_alpha() {
    let config: TagFieldConfig = serde_yaml::from_str("tint: '#FF950080'").unwrap();
    assert_eq!(config.tint, Color::rgba(0xFF, 0x95, 0x00, 0x80));
}

// ========================================================================
// Config-Driven Layout Tests
// ========================================================================

#[test]
fn test_from_config_uses_grid_without_font_file() {
    let mut field = TagField::from_config(&test_config()).unwrap();
    type_text(&mut field, "ab\n");

    let menu = field
        .long_press(Point::new(pill_width("ab") / 2.0, 5.0))
        .unwrap();
    assert!((menu.rect.height - LINE_HEIGHT).abs() < 1e-4);
}

#[test]
fn test_paragraph_spacing_adds_to_line_height() {
    let config = TagFieldConfig {
        default_attributes: TextStyle::new().with_paragraph(ParagraphStyle { line_spacing: 6.0 }),
        ..test_config()
    };
    let mut field = TagField::from_config(&config).unwrap();
    type_text(&mut field, "ab\n");

    let menu = field
        .long_press(Point::new(pill_width("ab") / 2.0, 5.0))
        .unwrap();
    assert!((menu.rect.height - (LINE_HEIGHT + 6.0)).abs() < 1e-4);
}

#[test]
fn test_missing_font_file_fails_setup() {
    let config = TagFieldConfig {
        font_path: Some("/definitely/not/here.ttf".into()),
        ..test_config()
    };
    assert!(TagField::from_config(&config).is_err());
}
