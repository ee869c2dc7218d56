//! Bulk input parsing: the `content, filename` line convention.
//!
//! Bulk input is free text, one QR code per line:
//!
//! ```text
//! https://example.com, homepage
//! hello world
//! tel:+15551234567, Front Desk!
//! ```
//!
//! Each non-blank line becomes one [`WorkItem`]:
//!
//! - Text before the first comma is the content to encode.
//! - Text after the first comma is the filename hint. Missing or empty
//!   hints fall back to `qr-code-<N>` (1-based position).
//! - Filenames are sanitized: every character outside `[A-Za-z0-9_-]`
//!   becomes `-`, so `Front Desk!` is written as `Front-Desk-`.
//! - Items get the stable id `bulk-<N>` (0-based position).
//!
//! Parsing is pure and total: there is no malformed line, only lines that
//! degrade to defaults. Blank and whitespace-only lines are discarded, so
//! the output length always equals the number of non-blank lines.

use crate::types::WorkItem;

/// Parse raw multi-line bulk input into an ordered list of pending items.
pub fn parse_bulk_input(input: &str) -> Vec<WorkItem> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| {
            let (text, hint) = match line.split_once(',') {
                Some((text, hint)) => (text.trim(), hint.trim()),
                None => (line, ""),
            };
            let filename = if hint.is_empty() {
                format!("qr-code-{}", index + 1)
            } else {
                sanitize_filename(hint)
            };
            WorkItem::pending(format!("bulk-{index}"), text, filename)
        })
        .collect()
}

/// Replace every character outside `[A-Za-z0-9_-]` with `-`.
///
/// Entry names end up inside a ZIP archive and on user filesystems, so
/// the safe set is deliberately small.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Rebuild raw bulk input from a working list.
///
/// Used when the user removes an item: the remaining items are turned
/// back into `text, filename` lines, and re-parsing that text yields the
/// same items in the same order with the same filenames. Filenames are
/// always emitted explicitly — positional `qr-code-<N>` defaults would
/// shift after a removal.
pub fn regenerate_input(items: &[WorkItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}, {}", item.text, item.filename))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemStatus;

    #[test]
    fn empty_input_yields_no_items() {
        assert!(parse_bulk_input("").is_empty());
    }

    #[test]
    fn whitespace_only_input_yields_no_items() {
        assert!(parse_bulk_input("   ").is_empty());
        assert!(parse_bulk_input(" \n\t\n  \n").is_empty());
    }

    #[test]
    fn line_with_filename_hint() {
        let items = parse_bulk_input("https://a.com, site\nhello world");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "https://a.com");
        assert_eq!(items[0].filename, "site");
        assert_eq!(items[1].text, "hello world");
        assert_eq!(items[1].filename, "qr-code-2");
    }

    #[test]
    fn ids_are_zero_based_and_stable() {
        let items = parse_bulk_input("a\nb\nc");
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["bulk-0", "bulk-1", "bulk-2"]);
    }

    #[test]
    fn all_items_start_pending() {
        let items = parse_bulk_input("a\nb");
        assert!(items.iter().all(|i| i.status == ItemStatus::Pending));
        assert!(items.iter().all(|i| i.image.is_none() && i.error.is_none()));
    }

    #[test]
    fn blank_lines_are_discarded() {
        let items = parse_bulk_input("one\n\n   \ntwo\n");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "one");
        assert_eq!(items[1].text, "two");
        // Default filename counts non-blank lines, not raw lines.
        assert_eq!(items[1].filename, "qr-code-2");
    }

    #[test]
    fn filename_is_sanitized() {
        let items = parse_bulk_input("x, My File (v2).png");
        assert_eq!(items[0].filename, "My-File--v2--png");
    }

    #[test]
    fn trailing_comma_means_empty_hint() {
        let items = parse_bulk_input("just text,");
        assert_eq!(items[0].text, "just text");
        assert_eq!(items[0].filename, "qr-code-1");
    }

    #[test]
    fn only_first_comma_splits() {
        let items = parse_bulk_input("a,b,c");
        assert_eq!(items[0].text, "a");
        // The hint keeps its inner comma, which sanitization turns into a dash.
        assert_eq!(items[0].filename, "b-c");
    }

    #[test]
    fn sanitize_keeps_safe_set_only() {
        assert_eq!(sanitize_filename("ab_C-9"), "ab_C-9");
        assert_eq!(sanitize_filename("a b/c"), "a-b-c");
        assert_eq!(sanitize_filename("über"), "-ber");
    }

    #[test]
    fn parsed_filenames_contain_only_safe_characters() {
        let raw = "x, weird name!\ny, päth/to\\file\nz";
        for item in parse_bulk_input(raw) {
            assert!(
                item.filename
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unsafe character in {:?}",
                item.filename
            );
        }
    }

    #[test]
    fn removal_round_trip_preserves_remaining_items() {
        let mut items = parse_bulk_input("https://a.com, site\nhello\nworld, globe");
        items.remove(1);

        let regenerated = regenerate_input(&items);
        let reparsed = parse_bulk_input(&regenerated);

        assert_eq!(reparsed.len(), items.len());
        for (kept, re) in items.iter().zip(&reparsed) {
            assert_eq!(kept.text, re.text);
            assert_eq!(kept.filename, re.filename);
        }
    }
}
