//! Message types for the Elm-style architecture
//!
//! Every host event reaches the field as a `Msg`. Messages deserialize from
//! YAML so sessions can be scripted and replayed.

use serde::{Deserialize, Serialize};

use crate::engine::MenuAction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", rename_all = "snake_case")]
pub enum Msg {
    /// Type `text` one keystroke at a time; `\n` commits
    Type { text: String },
    /// Insert `text` over the selection in a single raw edit
    InsertText { text: String },
    /// Return key
    Newline,
    /// Backspace
    DeleteBackward,
    Paste { text: String },
    /// Move the selection
    Select {
        location: usize,
        #[serde(default)]
        length: usize,
    },
    /// Tap at a point in view coordinates
    Tap { x: f32, y: f32 },
    /// Long press at a point in view coordinates
    LongPress { x: f32, y: f32 },
    /// An action picked from the tag menu
    Menu { action: MenuAction },
    /// The tag menu was dismissed without an action
    DismissMenu,
    /// The field lost focus
    EndEditing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_parses() {
        let yaml = r#"
- { msg: type, text: "rust\n" }
- { msg: select, location: 0 }
- { msg: long_press, x: 12.0, y: 4.0 }
- { msg: menu, action: delete }
- msg: end_editing
"#;
        let script: Vec<Msg> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(script.len(), 5);
        assert_eq!(
            script[0],
            Msg::Type {
                text: "rust\n".to_string()
            }
        );
        assert_eq!(
            script[1],
            Msg::Select {
                location: 0,
                length: 0
            }
        );
        assert_eq!(
            script[3],
            Msg::Menu {
                action: MenuAction::Delete
            }
        );
        assert_eq!(script[4], Msg::EndEditing);
    }
}
