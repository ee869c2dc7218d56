//! In-memory session history of generated codes.
//!
//! History is an explicit state value, not ambient state: update
//! operations take a [`SessionHistory`] and return the new one, so the
//! CLI (or a future interactive surface) owns exactly one copy and tests
//! need no setup. Nothing is persisted — the history lives and dies with
//! the session.

use crate::render::OutputFormat;
use crate::types::{ItemStatus, WorkItem};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// One generated code: what was encoded, in which format, when.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// Content hash prefix — stable for identical (text, format, time).
    pub id: String,
    pub text: String,
    pub format: OutputFormat,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u128,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>, format: OutputFormat) -> Self {
        let text = text.into();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let id = entry_id(&text, format, timestamp);
        Self {
            id,
            text,
            format,
            timestamp,
        }
    }
}

/// First 12 hex chars of `sha256(text | format | timestamp)`.
fn entry_id(text: &str, format: OutputFormat, timestamp: u128) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(format.extension().as_bytes());
    hasher.update(timestamp.to_le_bytes());
    let digest = hasher.finalize();
    digest.iter().take(6).map(|b| format!("{b:02x}")).collect()
}

/// Session-scoped history. Newest entries first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionHistory {
    pub entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation. Returns the updated history.
    pub fn record(mut self, entry: HistoryEntry) -> Self {
        self.entries.insert(0, entry);
        self
    }

    /// Record every completed item of a bulk run. Failed items carry no
    /// generated code and are skipped.
    pub fn record_batch(self, items: &[WorkItem], format: OutputFormat) -> Self {
        items
            .iter()
            .filter(|item| item.status == ItemStatus::Completed)
            .fold(self, |session, item| {
                session.record(HistoryEntry::new(item.text.clone(), format))
            })
    }

    /// Remove an entry by id. Unknown ids are a no-op.
    pub fn remove(mut self, id: &str) -> Self {
        self.entries.retain(|e| e.id != id);
        self
    }

    /// Drop all entries.
    pub fn clear(self) -> Self {
        Self::new()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
