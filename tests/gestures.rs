//! Taps, long presses and the tag menu

mod common;

use common::{
    assert_in_sync, field_with_tags, pill_width, point_in, render_content, test_config,
    test_field, test_field_with, type_text, LINE_HEIGHT,
};
use tagfield::config::{ContainerConfig, TagFieldConfig};
use tagfield::editable::TextRange;
use tagfield::engine::{MenuAction, StandardAction};
use tagfield::geometry::{Point, Rect};
use tagfield::{update, Cmd, Msg, TagField};

fn assert_rect_eq(actual: Rect, expected: Rect) {
    let close = |a: f32, b: f32| (a - b).abs() < 1e-3;
    assert!(
        close(actual.x, expected.x)
            && close(actual.y, expected.y)
            && close(actual.width, expected.width)
            && close(actual.height, expected.height),
        "{:?} != {:?}",
        actual,
        expected
    );
}

fn tags_in(config: &TagFieldConfig, tags: &[&str]) -> TagField {
    let mut field = test_field_with(config);
    for tag in tags {
        type_text(&mut field, &format!("{}\n", tag));
    }
    field
}

// ========================================================================
// Tap
// ========================================================================

#[test]
fn test_tap_before_midpoint_places_caret_before() {
    let mut field = field_with_tags(&["ab", "c"]);
    field.tap(point_in(&field, 1, 0.25));
    assert_eq!(field.selection(), TextRange::collapsed(1));
}

#[test]
fn test_tap_past_midpoint_places_caret_after() {
    let mut field = field_with_tags(&["ab", "c"]);
    field.tap(point_in(&field, 0, 0.75));
    assert_eq!(field.selection(), TextRange::collapsed(1));
}

#[test]
fn test_tap_on_exact_midpoint_stays_before() {
    let mut field = field_with_tags(&["ab", "c"]);
    field.tap(point_in(&field, 1, 0.5));
    assert_eq!(field.selection(), TextRange::collapsed(1));
}

#[test]
fn test_tap_past_line_end_goes_to_end() {
    let mut field = field_with_tags(&["ab", "c"]);
    field.tap(Point::new(1000.0, 5.0));
    assert_eq!(field.selection(), TextRange::collapsed(2));
}

#[test]
fn test_tap_on_empty_field() {
    let mut field = test_field();
    update(&mut field, Msg::Tap { x: 40.0, y: 40.0 });
    assert_eq!(field.selection(), TextRange::collapsed(0));
}

#[test]
fn test_tap_inside_typed_text_keeps_it_active() {
    let mut field = field_with_tags(&["ab"]);
    type_text(&mut field, "cd");
    field.tap(point_in(&field, 2, 0.25));

    assert_eq!(field.selection(), TextRange::collapsed(2));
    assert_eq!(field.engine().active().text_range(), TextRange::new(1, 2));
    assert_eq!(field.tags(), vec!["ab"]);
}

#[test]
fn test_tap_outside_typed_text_commits_it() {
    let mut field = field_with_tags(&["ab"]);
    type_text(&mut field, "cd");
    field.tap(point_in(&field, 0, 0.25));

    assert_eq!(field.tags(), vec!["ab", "cd"]);
    assert_eq!(field.selection(), TextRange::collapsed(0));
    assert_eq!(field.engine().active().location(), 0);
    assert_in_sync(&field);
}

// ========================================================================
// Long Press
// ========================================================================

#[test]
fn test_long_press_on_tag_selects_it_and_shows_menu() {
    let mut field = field_with_tags(&["ab", "c"]);
    let menu = field.long_press(point_in(&field, 1, 0.5)).unwrap();

    assert_eq!(menu.index, 1);
    assert_eq!(menu.actions, vec![MenuAction::Edit, MenuAction::Delete]);
    assert_rect_eq(
        menu.rect,
        Rect::new(pill_width("ab"), 0.0, pill_width("c"), LINE_HEIGHT),
    );
    assert_eq!(field.engine().registry().selected_index(), Some(1));
    assert!(field.buffer().attachments().nth(1).unwrap().selected);
    assert!(field.can_perform(StandardAction::Delete));
    assert_in_sync(&field);
}

#[test]
fn test_long_press_message_returns_show_menu() {
    let mut field = field_with_tags(&["ab"]);
    let point = point_in(&field, 0, 0.25);
    let cmd = update(
        &mut field,
        Msg::LongPress {
            x: point.x,
            y: point.y,
        },
    );

    match cmd {
        Some(Cmd::ShowMenu { rect, actions }) => {
            assert_rect_eq(rect, Rect::new(0.0, 0.0, pill_width("ab"), LINE_HEIGHT));
            assert_eq!(actions, MenuAction::ALL.to_vec());
        }
        other => panic!("expected a menu, got {:?}", other),
    }
}

#[test]
fn test_long_press_honors_container_inset() {
    let config = TagFieldConfig {
        container: ContainerConfig {
            width: 0.0,
            inset_top: 30.0,
            inset_left: 10.0,
        },
        ..test_config()
    };
    let mut field = tags_in(&config, &["ab"]);
    let menu = field
        .long_press(Point::new(10.0 + pill_width("ab") / 2.0, 30.0 + 12.0))
        .unwrap();

    assert_eq!(menu.index, 0);
    assert_rect_eq(
        menu.rect,
        Rect::new(10.0, 30.0, pill_width("ab"), LINE_HEIGHT),
    );
}

#[test]
fn test_long_press_on_wrapped_line() {
    let config = TagFieldConfig {
        container: ContainerConfig {
            width: 100.0,
            ..Default::default()
        },
        ..test_config()
    };
    let mut field = tags_in(&config, &["abcd", "ef"]);
    let menu = field
        .long_press(Point::new(pill_width("ef") / 2.0, LINE_HEIGHT * 1.5))
        .unwrap();

    assert_eq!(menu.index, 1);
    assert_rect_eq(
        menu.rect,
        Rect::new(0.0, LINE_HEIGHT, pill_width("ef"), LINE_HEIGHT),
    );
}

#[test]
fn test_long_press_commits_typed_text_first() {
    let mut field = field_with_tags(&["ab"]);
    type_text(&mut field, "cd");
    let menu = field.long_press(point_in(&field, 0, 0.5)).unwrap();

    assert_eq!(field.tags(), vec!["ab", "cd"]);
    assert_eq!(menu.index, 0);
    assert_eq!(field.engine().registry().selected_index(), Some(0));
    assert_in_sync(&field);
}

#[test]
fn test_long_press_on_tag_behind_typed_text() {
    let mut field = field_with_tags(&["t"]);
    field.set_selection(TextRange::collapsed(0));
    type_text(&mut field, "xy");

    // Committing "xy" moves the pressed tag from offset 2 to offset 1
    let menu = field.long_press(point_in(&field, 2, 0.75)).unwrap();

    assert_eq!(field.tags(), vec!["xy", "t"]);
    assert_eq!(menu.index, 1);
    assert_eq!(field.engine().registry().selected_index(), Some(1));
}

#[test]
fn test_long_press_on_text_selects_typed_range() {
    let mut field = field_with_tags(&["ab"]);
    type_text(&mut field, "cd");

    let menu = field.long_press(point_in(&field, 1, 0.5));

    assert!(menu.is_none());
    assert!(field.menu().is_none());
    assert_eq!(field.selection(), TextRange::new(1, 2));
    assert_eq!(field.tags(), vec!["ab"]);
}

#[test]
fn test_long_press_on_edge_only_moves_caret() {
    let mut field = field_with_tags(&["ab", "c"]);
    let menu = field.long_press(point_in(&field, 1, 0.0));

    assert!(menu.is_none());
    assert_eq!(field.selection(), TextRange::collapsed(1));
    assert_eq!(field.engine().registry().selected_index(), None);
}

#[test]
fn test_second_long_press_replaces_menu() {
    let mut field = field_with_tags(&["ab", "c"]);
    field.long_press(point_in(&field, 0, 0.5)).unwrap();
    field.long_press(point_in(&field, 1, 0.5)).unwrap();

    assert_eq!(field.engine().registry().selected_index(), Some(1));
    assert_eq!(field.menu().map(|m| m.index), Some(1));
    let selected: Vec<bool> = field.buffer().attachments().map(|a| a.selected).collect();
    assert_eq!(selected, vec![false, true]);
}

// ========================================================================
// Menu Actions
// ========================================================================

#[test]
fn test_menu_edit_turns_tag_into_text() {
    let mut field = field_with_tags(&["ab", "c"]);
    field.long_press(point_in(&field, 1, 0.5)).unwrap();

    let cmd = update(
        &mut field,
        Msg::Menu {
            action: MenuAction::Edit,
        },
    );

    assert_eq!(cmd, Some(Cmd::HideMenu));
    assert!(field.menu().is_none());
    assert_eq!(field.tags(), vec!["ab"]);
    assert_eq!(render_content(&field), "[ab]c");
    assert_eq!(field.edited_text(), "c");
    assert_in_sync(&field);
}

#[test]
fn test_menu_delete_removes_tag() {
    let mut field = field_with_tags(&["ab", "c"]);
    field.long_press(point_in(&field, 0, 0.5)).unwrap();

    update(
        &mut field,
        Msg::Menu {
            action: MenuAction::Delete,
        },
    );

    assert!(field.menu().is_none());
    assert_eq!(field.tags(), vec!["c"]);
    assert!(!field.can_perform(StandardAction::Delete));
    assert_in_sync(&field);
}

#[test]
fn test_dismiss_menu_restores_tag() {
    let mut field = field_with_tags(&["ab", "c"]);
    let unselected: Vec<_> = field.buffer().attachments().cloned().collect();
    field.long_press(point_in(&field, 1, 0.5)).unwrap();

    let cmd = update(&mut field, Msg::DismissMenu);

    assert_eq!(cmd, Some(Cmd::HideMenu));
    assert!(field.menu().is_none());
    assert_eq!(field.engine().registry().selected_index(), None);
    let restored: Vec<_> = field.buffer().attachments().cloned().collect();
    assert_eq!(restored, unselected);
}

#[test]
fn test_deleting_menu_tag_closes_menu() {
    let mut field = field_with_tags(&["a", "b"]);
    field.long_press(point_in(&field, 0, 0.5));
    assert_eq!(field.menu().map(|m| m.index), Some(0));

    field.delete_tag(0).unwrap();

    assert!(field.menu().is_none());
    assert!(!field.can_perform(StandardAction::Delete));
    assert_eq!(field.tags(), vec!["b"]);
    assert!(field.perform_menu_action(MenuAction::Delete).is_err());
    assert_eq!(field.tags(), vec!["b"]);
    assert_in_sync(&field);
}

#[test]
fn test_editing_menu_tag_closes_menu() {
    let mut field = field_with_tags(&["a", "b"]);
    field.long_press(point_in(&field, 0, 0.5));

    field.edit_tag(0).unwrap();

    assert!(field.menu().is_none());
    assert!(!field.can_perform(StandardAction::Delete));
    assert_eq!(field.tags(), vec!["b"]);
    assert_eq!(field.edited_text(), "a");
    assert_in_sync(&field);
}

#[test]
fn test_menu_follows_its_tag_when_earlier_tag_goes() {
    let mut field = field_with_tags(&["a", "b", "c"]);
    field.long_press(point_in(&field, 1, 0.5));
    assert_eq!(field.menu().map(|m| m.index), Some(1));

    field.delete_tag(0).unwrap();
    assert_eq!(field.menu().map(|m| m.index), Some(0));

    field.perform_menu_action(MenuAction::Delete).unwrap();
    assert_eq!(field.tags(), vec!["c"]);
    assert!(field.menu().is_none());
    assert_in_sync(&field);
}

#[test]
fn test_menu_action_without_menu_is_an_error() {
    let mut field = field_with_tags(&["ab"]);
    assert!(field.perform_menu_action(MenuAction::Delete).is_err());
    assert_eq!(field.tags(), vec!["ab"]);
}

#[test]
fn test_standard_edit_actions() {
    let field = field_with_tags(&["ab"]);
    assert!(!field.can_perform(StandardAction::Select));
    assert!(!field.can_perform(StandardAction::SelectAll));
    assert!(!field.can_perform(StandardAction::Copy));
    assert!(!field.can_perform(StandardAction::Paste));
    assert!(!field.can_perform(StandardAction::Delete));
    assert!(field.can_perform(StandardAction::Cut));
}
