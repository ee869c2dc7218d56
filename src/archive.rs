//! ZIP packaging of completed batch items.
//!
//! The exporter consumes only items that finished with an image. Each
//! entry is named `<sanitized filename>.<lowercase extension>`; the
//! archive itself is named `qr-codes-<epoch-millis>.zip` so repeated
//! exports never collide.
//!
//! An all-failed (or empty) batch still packages into a valid, empty
//! archive — callers that want to refuse writing a useless file check for
//! at least one completed item first.

use crate::render::OutputFormat;
use crate::types::{ItemStatus, WorkItem};
use std::io::{Cursor, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Build a ZIP archive from the completed items of a batch result.
///
/// Items with any other status are skipped. Entries appear in batch
/// order.
pub fn build_archive(items: &[WorkItem], format: OutputFormat) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let entry_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for item in items {
        let Some(image) = completed_image(item) else {
            continue;
        };
        writer.start_file(entry_name(item, format), entry_options)?;
        writer.write_all(&image.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Number of items the exporter would include.
pub fn completed_count(items: &[WorkItem]) -> usize {
    items.iter().filter(|i| completed_image(i).is_some()).count()
}

/// Entry name for one item: `<filename>.<extension>`.
pub fn entry_name(item: &WorkItem, format: OutputFormat) -> String {
    format!("{}.{}", item.filename, format.extension())
}

/// Download name for the archive: `qr-codes-<epoch-millis>.zip`.
pub fn archive_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("qr-codes-{millis}.zip")
}

fn completed_image(item: &WorkItem) -> Option<&crate::types::RenderedImage> {
    if item.status == ItemStatus::Completed {
        item.image.as_ref()
    } else {
        None
    }
}
