//! Shared types for the bulk-generation pipeline.
//!
//! A [`WorkItem`] is created by the line parser, driven through its status
//! transitions by the batch runner, and consumed by the archive exporter.
//! Items are serialized into the bulk run manifest (minus the image bytes)
//! so a run can be inspected after the fact.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single work item within one batch run.
///
/// ```text
/// Pending → Generating → { Completed | Error }
/// ```
///
/// `Generating` is transient: the synchronous runner finishes each item
/// before reporting, so the state is never observable between calls. It
/// exists so a displaying caller has a name for "render outstanding".
/// Terminal states are final for the item within a run; re-parsing the raw
/// input produces fresh `Pending` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Generating,
    Completed,
    Error,
}

/// Bytes of one rendered QR code, in whatever output format the batch
/// requested (PNG/JPEG/PDF binary, SVG text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
}

/// One unit of bulk-generation work: a line of input, normalized.
///
/// Invariant: once `status` is terminal, exactly one of `image` / `error`
/// is set — `Completed` carries the image, `Error` carries the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    /// Stable per-line identifier: `bulk-<0-based line index>`.
    pub id: String,
    /// Content to encode.
    pub text: String,
    /// Target filename (no extension), sanitized to `[A-Za-z0-9_-]`.
    pub filename: String,
    pub status: ItemStatus,
    /// Present only when `status == Completed`. Not serialized — the
    /// manifest records outcomes, the archive records bytes.
    #[serde(skip)]
    pub image: Option<RenderedImage>,
    /// Present only when `status == Error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkItem {
    /// A fresh, pending item. Used by the parser; tests build items the
    /// same way.
    pub fn pending(
        id: impl Into<String>,
        text: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            filename: filename.into(),
            status: ItemStatus::Pending,
            image: None,
            error: None,
        }
    }

    /// Terminal success: same identity, image attached.
    pub fn completed(&self, image: RenderedImage) -> Self {
        Self {
            status: ItemStatus::Completed,
            image: Some(image),
            error: None,
            ..self.clone()
        }
    }

    /// Terminal failure: same identity, message attached.
    pub fn failed(&self, message: impl Into<String>) -> Self {
        Self {
            status: ItemStatus::Error,
            image: None,
            error: Some(message.into()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_sets_image_and_clears_error() {
        let item = WorkItem::pending("bulk-0", "hello", "hello");
        let done = item.completed(RenderedImage { bytes: vec![1, 2, 3] });
        assert_eq!(done.status, ItemStatus::Completed);
        assert!(done.image.is_some());
        assert!(done.error.is_none());
        assert_eq!(done.id, "bulk-0");
    }

    #[test]
    fn failed_sets_error_and_clears_image() {
        let item = WorkItem::pending("bulk-3", "x", "x");
        let failed = item.failed("data too long");
        assert_eq!(failed.status, ItemStatus::Error);
        assert!(failed.image.is_none());
        assert_eq!(failed.error.as_deref(), Some("data too long"));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ItemStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
