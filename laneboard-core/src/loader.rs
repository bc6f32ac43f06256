//! Session log loading.
//!
//! The board itself never does I/O; this module is the collaborator that
//! turns `*.jsonl` session logs under a root directory into normalized
//! [`EventRecord`]s, delivered once per session load. One file is one
//! session. Malformed lines (missing id or timestamp) are counted and
//! skipped so a few bad records never block rendering of the rest.

use crate::error::{Error, Result};
use crate::format::truncate;
use crate::types::{EventRecord, EventStatus, Role, SessionMeta, TokenCounts, ToolKind};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

/// One session's metadata and ordered events.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub meta: SessionMeta,
    pub events: Vec<EventRecord>,
}

/// Everything a load pass produced.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Sessions with at least one valid event
    pub sessions: Vec<LoadedSession>,
    /// Records dropped for missing required fields, surfaced as a
    /// diagnostic counter
    pub skipped_records: usize,
}

/// Raw shape of one JSONL line. Everything is optional; validation happens
/// after deserialization so a partial line degrades instead of failing the
/// whole file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawEvent {
    id: Option<String>,
    session_id: Option<String>,
    timestamp: Option<String>,
    role: Option<String>,
    tool: Option<String>,
    model: Option<String>,
    status: Option<String>,
    files: Option<Vec<String>>,
    usage: Option<RawUsage>,
    content: Option<String>,
    command: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawUsage {
    input_tokens: Option<u64>,
    output_tokens: Option<u64>,
}

/// Load every `*.jsonl` session log under `root`.
///
/// Unreadable files are logged and skipped. Sessions come back sorted by
/// last activity, most recent first.
pub fn load_sessions(root: &Path) -> Result<LoadOutcome> {
    if !root.is_dir() {
        return Err(Error::SessionRootNotFound(root.display().to_string()));
    }

    let pattern = root.join("**/*.jsonl");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::SessionRootNotFound(root.display().to_string()))?;

    let mut outcome = LoadOutcome::default();
    let paths = glob::glob(pattern)
        .map_err(|e| Error::Config(format!("bad session glob: {e}")))?;

    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "skipping unreadable session path");
                continue;
            }
        };
        match load_session_file(&path) {
            Ok((session, skipped)) => {
                outcome.skipped_records += skipped;
                if let Some(session) = session {
                    outcome.sessions.push(session);
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load session log");
            }
        }
    }

    outcome
        .sessions
        .sort_by(|a, b| b.meta.last_activity.cmp(&a.meta.last_activity));

    debug!(
        sessions = outcome.sessions.len(),
        skipped = outcome.skipped_records,
        "session load complete"
    );
    Ok(outcome)
}

/// Parse one session log. Returns `None` for a file with no valid events,
/// along with the count of skipped records.
pub fn load_session_file(path: &Path) -> Result<(Option<LoadedSession>, usize)> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let fallback_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session")
        .to_string();

    let mut events = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawEvent = match serde_json::from_str(&line) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "malformed session line");
                skipped += 1;
                continue;
            }
        };
        match normalize(raw, &fallback_id) {
            Some(event) => events.push(event),
            None => skipped += 1,
        }
    }

    if events.is_empty() {
        return Ok((None, skipped));
    }

    // Stable sort preserves insertion order for equal timestamps.
    events.sort_by_key(|e| e.timestamp);

    let session_id = events[0].session_id.clone();
    let title = events
        .iter()
        .find(|e| e.role == Role::User && !e.preview.is_empty())
        .map(|e| e.preview.clone())
        .unwrap_or_else(|| session_id.clone());

    let meta = SessionMeta {
        id: session_id,
        title,
        event_count: events.len(),
        first_activity: events.first().map(|e| e.timestamp),
        last_activity: events.last().map(|e| e.timestamp),
    };

    Ok((Some(LoadedSession { meta, events }), skipped))
}

/// Validate and derive one event from its raw line. `None` means the record
/// is malformed (missing id or timestamp).
fn normalize(raw: RawEvent, fallback_session: &str) -> Option<EventRecord> {
    let id = raw.id.filter(|id| !id.is_empty())?;
    let timestamp = raw
        .timestamp
        .as_deref()
        .and_then(parse_timestamp)?;

    let role = match raw.role.as_deref() {
        Some("user") => Role::User,
        Some("assistant") => Role::Assistant,
        Some("tool") => Role::Tool,
        _ => Role::User,
    };

    let tool_kind = match role {
        Role::Tool => Some(categorize_tool(raw.tool.as_deref().unwrap_or(""))),
        _ => None,
    };

    let status = match raw.status.as_deref() {
        Some("error") => EventStatus::Error,
        Some("cancelled") => EventStatus::Cancelled,
        _ => EventStatus::Ok,
    };

    let command = raw.command.unwrap_or_default();
    let made_commit = matches!(tool_kind, Some(ToolKind::Shell) | Some(ToolKind::Git))
        && command.contains("git commit")
        && status == EventStatus::Ok;

    let token_counts = raw.usage.and_then(|u| {
        match (u.input_tokens, u.output_tokens) {
            (None, None) => None,
            (input, output) => Some(TokenCounts {
                input: input.unwrap_or(0),
                output: output.unwrap_or(0),
            }),
        }
    });

    let content = raw.content.unwrap_or_default();
    let preview = truncate(content.lines().next().unwrap_or(""), 80);

    Some(EventRecord {
        id,
        session_id: raw
            .session_id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback_session.to_string()),
        timestamp,
        role,
        tool_kind,
        status,
        model: raw.model,
        touched_files: raw.files.unwrap_or_default(),
        token_counts,
        made_commit,
        preview,
        content,
    })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Map a tool name from the log to its rendering category.
fn categorize_tool(name: &str) -> ToolKind {
    match name {
        "Read" | "Write" | "Edit" | "MultiEdit" | "NotebookEdit" => ToolKind::FileOp,
        "Grep" | "Glob" | "LS" => ToolKind::Search,
        "Bash" | "BashOutput" | "KillShell" => ToolKind::Shell,
        "Git" => ToolKind::Git,
        "WebFetch" | "WebSearch" => ToolKind::Web,
        "Task" | "Agent" => ToolKind::Task,
        _ => ToolKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_tool() {
        assert_eq!(categorize_tool("Edit"), ToolKind::FileOp);
        assert_eq!(categorize_tool("Grep"), ToolKind::Search);
        assert_eq!(categorize_tool("Bash"), ToolKind::Shell);
        assert_eq!(categorize_tool("WebSearch"), ToolKind::Web);
        assert_eq!(categorize_tool("Task"), ToolKind::Task);
        assert_eq!(categorize_tool("SomethingNew"), ToolKind::Other);
    }

    #[test]
    fn test_normalize_rejects_missing_id_or_timestamp() {
        let no_id = RawEvent {
            timestamp: Some("2026-02-08T10:00:00Z".to_string()),
            ..RawEvent::default()
        };
        assert!(normalize(no_id, "s1").is_none());

        let no_ts = RawEvent {
            id: Some("e1".to_string()),
            ..RawEvent::default()
        };
        assert!(normalize(no_ts, "s1").is_none());
    }

    #[test]
    fn test_normalize_derives_commit_flag() {
        let raw = RawEvent {
            id: Some("e1".to_string()),
            timestamp: Some("2026-02-08T10:00:00Z".to_string()),
            role: Some("tool".to_string()),
            tool: Some("Bash".to_string()),
            command: Some("git commit -m 'fix'".to_string()),
            ..RawEvent::default()
        };
        let event = normalize(raw, "s1").unwrap();
        assert_eq!(event.tool_kind, Some(ToolKind::Shell));
        assert!(event.made_commit);
    }

    #[test]
    fn test_normalize_preview_is_first_line() {
        let raw = RawEvent {
            id: Some("e1".to_string()),
            timestamp: Some("2026-02-08T10:00:00Z".to_string()),
            role: Some("user".to_string()),
            content: Some("fix the login bug\nplease also add tests".to_string()),
            ..RawEvent::default()
        };
        let event = normalize(raw, "s1").unwrap();
        assert_eq!(event.preview, "fix the login bug");
    }
}
