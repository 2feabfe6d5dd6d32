//! Update function for the Elm-style architecture
//!
//! All host events flow through [`update`].

use tracing::warn;

use crate::commands::Cmd;
use crate::editable::{TagBufferMut, TextRange};
use crate::field::TagField;
use crate::geometry::Point;
use crate::messages::Msg;

#[cfg(debug_assertions)]
use crate::tracing::EngineSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, error, span, Level};

/// Main update function
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update<B: TagBufferMut>(field: &mut TagField<B>, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(field, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(field, msg)
    }
}

fn update_inner<B: TagBufferMut>(field: &mut TagField<B>, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Type { text } => {
            let mut key = [0u8; 4];
            for ch in text.chars() {
                field.insert_text(ch.encode_utf8(&mut key));
            }
            Some(Cmd::Redraw)
        }
        Msg::InsertText { text } => {
            field.insert_text(&text);
            Some(Cmd::Redraw)
        }
        Msg::Newline => {
            field.insert_text("\n");
            Some(Cmd::Redraw)
        }
        Msg::DeleteBackward => {
            field.delete_backward();
            Some(Cmd::Redraw)
        }
        Msg::Paste { text } => {
            field.paste(&text);
            Some(Cmd::Redraw)
        }
        Msg::Select { location, length } => {
            field.set_selection(TextRange::new(location, length));
            Some(Cmd::Redraw)
        }
        Msg::Tap { x, y } => {
            field.tap(Point::new(x, y));
            Some(Cmd::Redraw)
        }
        Msg::LongPress { x, y } => match field.long_press(Point::new(x, y)) {
            Some(menu) => Some(Cmd::show_menu(&menu)),
            None => Some(Cmd::Redraw),
        },
        Msg::Menu { action } => {
            if let Err(e) = field.perform_menu_action(action) {
                warn!("Menu action {:?} failed: {}", action, e);
            }
            Some(Cmd::HideMenu)
        }
        Msg::DismissMenu => {
            if let Err(e) = field.dismiss_menu() {
                warn!("Failed to restore tag selection: {}", e);
            }
            Some(Cmd::HideMenu)
        }
        Msg::EndEditing => {
            field.end_editing();
            Some(Cmd::Redraw)
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after engine state, logs the diff and checks that the
/// registry still matches the buffer's attachment slots.
#[cfg(debug_assertions)]
fn update_traced<B: TagBufferMut>(field: &mut TagField<B>, msg: Msg) -> Option<Cmd> {
    let msg_name = format!("{:?}", msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = EngineSnapshot::from_field(field);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(field, msg);

    let after = EngineSnapshot::from_field(field);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "field", %diff, "state changed");
    }
    if !after.is_in_sync() {
        error!(
            target: "field",
            tags = after.tags.len(),
            slots = after.attachment_slots,
            "registry out of sync after {}",
            msg_name
        );
    }

    result
}
