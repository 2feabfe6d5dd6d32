//! Command types for the Elm-style architecture
//!
//! Commands are the side effects the host performs after an update.

use serde::Serialize;

use crate::engine::{ContextMenu, MenuAction};
use crate::geometry::Rect;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Cmd {
    /// Buffer or selection changed
    Redraw,
    /// Present the tag menu anchored to `rect`
    ShowMenu {
        rect: Rect,
        actions: Vec<MenuAction>,
    },
    /// Take the tag menu down
    HideMenu,
}

impl Cmd {
    pub fn show_menu(menu: &ContextMenu) -> Self {
        Cmd::ShowMenu {
            rect: menu.rect,
            actions: menu.actions.clone(),
        }
    }
}
