//! Tracing setup and state snapshots for diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=tagfield::engine=trace` - per-keystroke engine logs
//! - `RUST_LOG=message=debug,field=debug` - message flow and state diffs
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tagfield/logs/tagfield.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::{TagBufferMut, TextRange};
use crate::field::TagField;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// the config directory's `logs/` folder; if that cannot be created only the
/// console layer is installed.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "tagfield.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of engine and selection state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    pub tags: Vec<String>,
    pub selected_tag: Option<usize>,
    pub active: TextRange,
    pub selection: TextRange,
    pub attachment_slots: usize,
}

impl EngineSnapshot {
    pub fn from_field<B: TagBufferMut>(field: &TagField<B>) -> Self {
        let buffer = field.buffer();
        Self {
            tags: field.tags(),
            selected_tag: field.engine().registry().selected_index(),
            active: field.engine().active().text_range(),
            selection: field.selection(),
            attachment_slots: buffer
                .enumerate_attachments(TextRange::new(0, buffer.len_chars()))
                .len(),
        }
    }

    /// Registry and buffer agree on the number of tags
    pub fn is_in_sync(&self) -> bool {
        self.tags.len() == self.attachment_slots
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &EngineSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.tags != other.tags {
            changes.push(format!("tags: {:?} → {:?}", self.tags, other.tags));
        }
        if self.selected_tag != other.selected_tag {
            changes.push(format!(
                "selected: {:?} → {:?}",
                self.selected_tag, other.selected_tag
            ));
        }
        if self.active != other.active {
            changes.push(format!("active: {} → {}", self.active, other.active));
        }
        if self.selection != other.selection {
            changes.push(format!(
                "selection: {} → {}",
                self.selection, other.selection
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> EngineSnapshot {
        EngineSnapshot {
            tags: vec!["a".to_string()],
            selected_tag: None,
            active: TextRange::collapsed(1),
            selection: TextRange::collapsed(1),
            attachment_slots: 1,
        }
    }

    #[test]
    fn test_diff_identical_is_none() {
        assert_eq!(snapshot().diff(&snapshot()), None);
    }

    #[test]
    fn test_diff_lists_changes() {
        let before = snapshot();
        let mut after = snapshot();
        after.active = TextRange::new(1, 2);
        after.selection = TextRange::collapsed(3);

        let diff = before.diff(&after).unwrap();
        assert_eq!(diff, "active: {1, 0} → {1, 2}; selection: {1, 0} → {3, 0}");
    }

    #[test]
    fn test_sync_check() {
        let mut snap = snapshot();
        assert!(snap.is_in_sync());
        snap.attachment_slots = 2;
        assert!(!snap.is_in_sync());
    }
}
