//! Core domain types for laneboard
//!
//! These types represent the normalized event model the board renders.
//! One [`EventRecord`] is one interaction turn or tool call inside a
//! session; the board never mutates records after load.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Session** | One agent conversation, rendered as a horizontal lane |
//! | **Event** | One turn or tool call within a session |
//! | **Lane** | A session's track of events on the board |
//! | **Brush** | A transient highlight filter (see [`crate::brush`]) |
//! | **Zoom level** | One of three fixed visual fidelities for an event |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Who produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human driving the session
    User,
    /// The assistant's own turns
    Assistant,
    /// A tool invocation made by the assistant
    Tool,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

/// Category of a tool invocation, set only when `role == Role::Tool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    /// Read/write/edit of a file
    FileOp,
    /// Grep/glob style searching
    Search,
    /// Shell command execution
    Shell,
    /// Git operations (commit, diff, log)
    Git,
    /// Web fetch or web search
    Web,
    /// Sub-agent / delegated task
    Task,
    /// Anything we do not categorize further
    Other,
}

impl ToolKind {
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::FileOp => "file-op",
            ToolKind::Search => "search",
            ToolKind::Shell => "shell",
            ToolKind::Git => "git",
            ToolKind::Web => "web",
            ToolKind::Task => "task",
            ToolKind::Other => "other",
        }
    }
}

/// Derived outcome flag for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Ok,
    Error,
    Cancelled,
}

/// Token usage attached to assistant turns when the log reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub input: u64,
    pub output: u64,
}

impl TokenCounts {
    pub fn total(self) -> u64 {
        self.input + self.output
    }
}

/// One interaction turn or tool call.
///
/// Invariants: `id` is unique across all loaded sessions; events within a
/// session are ordered by `timestamp` with ties broken by insertion order.
/// Records are immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Stable unique identifier, used for deep-linking
    pub id: String,
    /// Owning session identifier
    pub session_id: String,
    /// Event time; source of truth for ordering and bucketing
    pub timestamp: DateTime<Utc>,
    /// Who produced the event
    pub role: Role,
    /// Tool category when `role == Tool`
    pub tool_kind: Option<ToolKind>,
    /// Derived outcome flag
    pub status: EventStatus,
    /// Model identifier, present on assistant turns
    pub model: Option<String>,
    /// File paths this event created or modified
    pub touched_files: Vec<String>,
    /// Token usage when the log reports it
    pub token_counts: Option<TokenCounts>,
    /// True when this event made a git commit
    pub made_commit: bool,
    /// Single-line content preview for summary cards
    pub preview: String,
    /// Full content for detail cards and the popover
    pub content: String,
}

impl EventRecord {
    /// Total token count, zero when the log reported none.
    pub fn token_total(&self) -> u64 {
        self.token_counts.map(TokenCounts::total).unwrap_or(0)
    }

    /// True when this event created or modified at least one file.
    pub fn edits_files(&self) -> bool {
        !self.touched_files.is_empty()
    }

    /// Stable rendering category for this event.
    ///
    /// Tool events report their [`ToolKind`] label, turns report their
    /// [`Role`] label. Tool-brush matching compares against this value.
    pub fn render_category(&self) -> &'static str {
        match self.tool_kind {
            Some(kind) => kind.label(),
            None => self.role.label(),
        }
    }
}

/// Compact-tick height for an event, in height units.
///
/// Scales with total token count and is clamped to `[4, 20]` so a tick is
/// always visible but never dominates the lane.
pub fn tick_height(token_total: u64) -> u16 {
    (token_total / 50).clamp(4, 20) as u16
}

/// Metadata describing one loaded session, used to label and sort lanes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Session identifier
    pub id: String,
    /// Human-friendly title, usually derived from the first user turn
    pub title: String,
    /// Number of valid events loaded
    pub event_count: usize,
    /// Timestamp of the earliest event, if any
    pub first_activity: Option<DateTime<Utc>>,
    /// Timestamp of the latest event, if any
    pub last_activity: Option<DateTime<Utc>>,
}

/// One of three fixed visual fidelities for rendering an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomLevel {
    /// Compact heatmap tick
    #[default]
    Compact,
    /// Fixed-height summary row
    Summary,
    /// Multi-line detail card
    Detail,
}

impl ZoomLevel {
    /// Cycle to the next zoom level.
    pub fn next(self) -> Self {
        match self {
            ZoomLevel::Compact => ZoomLevel::Summary,
            ZoomLevel::Summary => ZoomLevel::Detail,
            ZoomLevel::Detail => ZoomLevel::Compact,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoomLevel::Compact => "compact",
            ZoomLevel::Summary => "summary",
            ZoomLevel::Detail => "detail",
        }
    }
}

/// Snapshot of the board's navigational state.
///
/// Captured before jumping to event detail and restored exactly on back
/// navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// Vertical scroll offset into the lane list
    pub scroll_offset: usize,
    /// Active zoom level
    pub zoom: ZoomLevel,
    /// Session ids pinned to the top of the board
    pub pinned_sessions: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_height_clamps() {
        assert_eq!(tick_height(0), 4);
        assert_eq!(tick_height(199), 4);
        assert_eq!(tick_height(200), 4);
        assert_eq!(tick_height(500), 10);
        assert_eq!(tick_height(1_000), 20);
        assert_eq!(tick_height(1_000_000), 20);
    }

    #[test]
    fn test_render_category_prefers_tool_kind() {
        let event = EventRecord {
            id: "e1".into(),
            session_id: "s1".into(),
            timestamp: Utc::now(),
            role: Role::Tool,
            tool_kind: Some(ToolKind::Shell),
            status: EventStatus::Ok,
            model: None,
            touched_files: vec![],
            token_counts: None,
            made_commit: false,
            preview: String::new(),
            content: String::new(),
        };
        assert_eq!(event.render_category(), "shell");

        let turn = EventRecord {
            role: Role::Assistant,
            tool_kind: None,
            ..event
        };
        assert_eq!(turn.render_category(), "assistant");
    }
}
