//! CLI output formatting.
//!
//! Each surface has a `format_*` function returning lines for
//! testability, with a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! Bulk run output, one line per item as it finishes plus a summary:
//!
//! ```text
//! [1/3] homepage.png: ok
//! [2/3] qr-code-2.png: error: QR encoding failed: data too long
//! [3/3] globe.png: ok
//!
//! Completed 2 of 3 items (1 failed)
//! Archive: qr-codes-1724419200123.zip (2 entries)
//! ```
//!
//! Failed items surface their message inline; there is no separate error
//! banner for a partially failed batch.

use crate::history::SessionHistory;
use crate::render::OutputFormat;
use crate::template::TEMPLATES;
use crate::types::{ItemStatus, WorkItem};

/// One line per finished item, emitted from the progress callback.
pub fn format_progress_line(
    done: usize,
    total: usize,
    item: &WorkItem,
    format: OutputFormat,
) -> String {
    let name = format!("{}.{}", item.filename, format.extension());
    match item.status {
        ItemStatus::Error => format!(
            "[{done}/{total}] {name}: error: {}",
            item.error.as_deref().unwrap_or("Unknown error")
        ),
        _ => format!("[{done}/{total}] {name}: ok"),
    }
}

/// Batch summary: counts, then the archive line when one was written.
pub fn format_batch_summary(items: &[WorkItem], archive: Option<(&str, usize)>) -> Vec<String> {
    let total = items.len();
    let completed = items
        .iter()
        .filter(|i| i.status == ItemStatus::Completed)
        .count();
    let failed = total - completed;

    let mut lines = Vec::new();
    if failed > 0 {
        lines.push(format!(
            "Completed {completed} of {total} items ({failed} failed)"
        ));
    } else {
        lines.push(format!("Completed {completed} of {total} items"));
    }
    match archive {
        Some((name, entries)) => lines.push(format!(
            "Archive: {name} ({entries} {})",
            if entries == 1 { "entry" } else { "entries" }
        )),
        None => {
            if total > 0 && completed == 0 {
                lines.push("No archive written: every item failed".to_string());
            }
        }
    }
    lines
}

/// Template catalog for the `templates` subcommand.
pub fn format_templates() -> Vec<String> {
    let mut lines = Vec::new();
    for template in TEMPLATES {
        lines.push(format!("{} — {}", template.id, template.name));
        lines.push(format!("    {}", template.description));
        lines.push(format!("    Example: {}", template.placeholder));
    }
    lines
}

/// Decode result line.
pub fn format_decode_result(content: Option<&str>) -> String {
    match content {
        Some(text) => text.to_string(),
        None => "No QR code found".to_string(),
    }
}

/// Session history recap, newest first.
pub fn format_history(history: &SessionHistory) -> Vec<String> {
    if history.is_empty() {
        return vec!["Session: no codes generated".to_string()];
    }
    let mut lines = vec![format!(
        "Session: {} code{} generated",
        history.len(),
        if history.len() == 1 { "" } else { "s" }
    )];
    for entry in &history.entries {
        lines.push(format!("    {} [{}] {}", entry.id, entry.format, entry.text));
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
