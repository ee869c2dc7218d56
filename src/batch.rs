//! Batch driving: per-item rendering with error isolation, sequential
//! progress-reporting runs.
//!
//! The runner is deliberately sequential. One item renders at a time, in
//! input order, so progress counts are monotonic and deterministic and at
//! most one render holds drawing resources at any moment. There is no
//! cancellation and no per-item timeout: a started batch runs to
//! completion.
//!
//! Failure semantics: a failing item never aborts the run. Failures are
//! converted to data at the [`render_item`] boundary — status plus a
//! human-readable message — and recorded in-line. The batch itself always
//! completes, even if every item errored; "did anything succeed" is a
//! question for the caller (and the archive exporter only consumes
//! completed items).

use crate::render::{OutputFormat, QrRenderer, RenderOptions};
use crate::types::WorkItem;

/// Render one item, isolating any failure.
///
/// Returns a copy of the item in a terminal state: `Completed` with the
/// image attached, or `Error` with a message derived from the failure
/// (`"Unknown error"` when the failure carries no text). This function
/// never propagates an error to its caller — one bad item must not take
/// the batch down with it.
pub fn render_item(
    item: &WorkItem,
    options: &RenderOptions,
    format: OutputFormat,
    renderer: &impl QrRenderer,
) -> WorkItem {
    match renderer.render(&item.text, options, format) {
        Ok(image) => item.completed(image),
        Err(err) => {
            let message = err.to_string();
            if message.trim().is_empty() {
                item.failed("Unknown error")
            } else {
                item.failed(message)
            }
        }
    }
}

/// Process all items strictly in input order, one at a time.
///
/// After each item — success or failure — `on_progress` is called with
/// `(items processed so far, total, the finished item)`. The count is
/// strictly increasing and reaches the total on the final call. An empty
/// input yields an empty result without a single progress call.
pub fn run_batch(
    items: &[WorkItem],
    options: &RenderOptions,
    format: OutputFormat,
    renderer: &impl QrRenderer,
    mut on_progress: impl FnMut(usize, usize, &WorkItem),
) -> Vec<WorkItem> {
    let total = items.len();
    let mut results = Vec::with_capacity(total);

    for (index, item) in items.iter().enumerate() {
        let result = render_item(item, options, format, renderer);
        on_progress(index + 1, total, &result);
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_bulk_input;
    use crate::render::backend::tests::MockRenderer;
    use crate::types::ItemStatus;

    fn opts() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn render_item_success_attaches_image() {
        let renderer = MockRenderer::new();
        let item = WorkItem::pending("bulk-0", "hello", "hello");
        let result = render_item(&item, &opts(), OutputFormat::Png, &renderer);
        assert_eq!(result.status, ItemStatus::Completed);
        assert_eq!(result.image.unwrap().bytes, b"png:hello");
        assert!(result.error.is_none());
    }

    #[test]
    fn render_item_failure_becomes_error_status() {
        let renderer = MockRenderer::failing("disk on fire");
        let item = WorkItem::pending("bulk-0", "hello", "hello");
        let result = render_item(&item, &opts(), OutputFormat::Png, &renderer);
        assert_eq!(result.status, ItemStatus::Error);
        assert!(result.image.is_none());
        assert!(result.error.unwrap().contains("disk on fire"));
    }

    #[test]
    fn results_preserve_input_order() {
        let renderer = MockRenderer::new();
        let items = parse_bulk_input("one\ntwo\nthree");
        let results = run_batch(&items, &opts(), OutputFormat::Svg, &renderer, |_, _, _| {});
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert_eq!(renderer.rendered_texts(), ["one", "two", "three"]);
    }

    #[test]
    fn progress_is_called_once_per_item_strictly_increasing() {
        let renderer = MockRenderer::new();
        let items = parse_bulk_input("a\nb\nc\nd");
        let mut calls = Vec::new();
        run_batch(&items, &opts(), OutputFormat::Png, &renderer, |done, total, _| {
            calls.push((done, total));
        });
        assert_eq!(calls, [(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn progress_counts_failures_too() {
        let renderer = MockRenderer::failing_texts(&["b"]);
        let items = parse_bulk_input("a\nb\nc");
        let mut calls = Vec::new();
        let results = run_batch(&items, &opts(), OutputFormat::Png, &renderer, |done, total, _| {
            calls.push((done, total));
        });
        assert_eq!(calls, [(1, 3), (2, 3), (3, 3)]);
        assert_eq!(results[0].status, ItemStatus::Completed);
        assert_eq!(results[1].status, ItemStatus::Error);
        assert_eq!(results[2].status, ItemStatus::Completed);
    }

    #[test]
    fn empty_batch_never_calls_progress() {
        let renderer = MockRenderer::new();
        let mut called = false;
        let results = run_batch(&[], &opts(), OutputFormat::Png, &renderer, |_, _, _| {
            called = true;
        });
        assert!(results.is_empty());
        assert!(!called);
    }

    #[test]
    fn all_failures_still_complete_the_batch() {
        let renderer = MockRenderer::failing("nope");
        let items = parse_bulk_input("a\nb\nc");
        let results = run_batch(&items, &opts(), OutputFormat::Png, &renderer, |_, _, _| {});
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.status == ItemStatus::Error));
        assert!(results.iter().all(|r| r.image.is_none()));
    }

    #[test]
    fn terminal_items_have_exactly_one_of_image_or_error() {
        let renderer = MockRenderer::failing_texts(&["bad"]);
        let items = parse_bulk_input("good\nbad");
        for result in run_batch(&items, &opts(), OutputFormat::Png, &renderer, |_, _, _| {}) {
            assert_ne!(result.image.is_some(), result.error.is_some());
        }
    }
}
