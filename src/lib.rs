//! tagfield - tag input field engine
//!
//! Users type free text into a field; the engine turns each finished span
//! into a tag rendered as a pill occupying a single character slot, and keeps
//! an ordered tag registry in step with the buffer through every edit.
//!
//! The crate follows the Elm Architecture: host events arrive as [`Msg`],
//! [`update`] applies them to a [`TagField`] and returns the [`Cmd`] the host
//! should carry out.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod engine;
pub mod error;
pub mod field;
pub mod geometry;
pub mod layout;
pub mod messages;
pub mod render;
pub mod style;
pub mod tags;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::TagFieldConfig;
pub use engine::{EditEngine, EditEngineState, TextViewDelegate};
pub use error::TagError;
pub use field::TagField;
pub use messages::Msg;
pub use render::TagRenderer;
pub use tags::{Tag, TagRegistry};
pub use update::update;
