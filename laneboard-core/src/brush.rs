//! Brush matching for cross-filter highlighting.
//!
//! A brush is a transient, single-active filter criterion. Matching drives a
//! visual dim/highlight only; non-matching events stay in the layout so the
//! time axis never shifts while brushing. At most one brush is live at a
//! time, owned by the board.

use crate::types::{EventRecord, EventStatus};
use serde::{Deserialize, Serialize};

/// What a brush value is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    /// Substring of the event's model identifier
    Model,
    /// Exact rendering category of the event
    Tool,
    /// A derived outcome flag: `error`, `cancelled`, or `commit`
    Status,
    /// Exact touched-file path, or a path suffix of one
    File,
}

/// The current transient filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBrush {
    pub kind: BrushKind,
    pub value: String,
}

impl ActiveBrush {
    pub fn new(kind: BrushKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Whether `event` satisfies `brush`.
///
/// No active brush matches everything. Called once per event per brush
/// change; no side effects.
pub fn matches(brush: Option<&ActiveBrush>, event: &EventRecord) -> bool {
    let Some(brush) = brush else {
        return true;
    };

    match brush.kind {
        BrushKind::Model => event
            .model
            .as_deref()
            .is_some_and(|m| m.contains(&brush.value)),
        BrushKind::Tool => event.render_category() == brush.value,
        BrushKind::Status => match brush.value.as_str() {
            "error" => event.status == EventStatus::Error,
            "cancelled" => event.status == EventStatus::Cancelled,
            "commit" => event.made_commit,
            _ => false,
        },
        BrushKind::File => event
            .touched_files
            .iter()
            .any(|path| path_matches(path, &brush.value)),
    }
}

/// Exact match, or `needle` is a `/`-delimited suffix of `path` (so a bare
/// basename matches without full-path knowledge).
fn path_matches(path: &str, needle: &str) -> bool {
    if path == needle {
        return true;
    }
    path.strip_suffix(needle)
        .is_some_and(|prefix| prefix.ends_with('/'))
}
