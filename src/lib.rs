//! # qrsmith
//!
//! A command-line QR code toolkit: generate a single styled code, decode
//! a code from an image, and bulk-generate many codes from a `content,
//! filename` list packaged into one ZIP archive.
//!
//! # Architecture: The Bulk Pipeline
//!
//! Bulk generation is a four-step pipeline over plain data:
//!
//! ```text
//! 1. Parse    raw text   →  Vec<WorkItem>      (lines → normalized items)
//! 2. Render   WorkItem   →  WorkItem           (per item, error-isolated)
//! 3. Run      all items  →  BatchResult        (sequential, progress-reporting)
//! 4. Archive  completed  →  qr-codes-<ts>.zip  (only successful items)
//! ```
//!
//! The separation exists for three reasons:
//!
//! - **Error isolation**: a failing item becomes data (`status: error` +
//!   message) at the render boundary, never a batch abort.
//! - **Determinism**: one item at a time, strict input order, progress
//!   counts that only count up.
//! - **Testability**: every step is a function over values; the renderer
//!   and decoder are injected traits, so pipeline tests run without
//!   encoding a single pixel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`parse`] | Line parser — `content, filename` lines → pending [`types::WorkItem`]s |
//! | [`batch`] | Per-item renderer wrapper + the sequential batch runner |
//! | [`archive`] | ZIP packaging of completed items |
//! | [`render`] | [`render::RenderOptions`], the [`render::QrRenderer`] trait, and the qrcode/image/printpdf backend |
//! | [`decode`] | [`decode::Decoder`] capability + the rqrr implementation |
//! | [`template`] | WiFi/email/vCard/… payload formatting |
//! | [`history`] | In-memory session history of generated codes |
//! | [`config`] | `qrsmith.toml` defaults loading and validation |
//! | [`output`] | CLI output formatting — pure `format_*` functions |
//! | [`types`] | Shared pipeline types (`WorkItem`, `ItemStatus`) |
//!
//! # Design Decisions
//!
//! ## Sequential By Design
//!
//! The batch runner processes one item at a time. QR batches are small
//! (tens to hundreds of items) and renders are milliseconds; sequencing
//! buys deterministic ordering, monotonic progress, and bounded memory
//! for free, and keeps the runner a ten-line loop instead of a worker
//! pool. If parallel rendering is ever wanted, the seam is the injected
//! [`render::QrRenderer`] — the runner's contract (input order preserved,
//! progress monotonic) would not change.
//!
//! ## Failures Are Data
//!
//! One bad input line must not cost the user the other 99 codes. The
//! per-item renderer catches every failure and records it on the item;
//! the archive exporter simply skips non-completed items. "The batch
//! failed" is not a state that exists.
//!
//! ## Injected Capabilities
//!
//! Rendering and decoding sit behind one-method traits. The pipeline is
//! written against the traits, production wires in `qrcode`/`image`/
//! `printpdf` and `rqrr`, and tests wire in a recording mock.

pub mod archive;
pub mod batch;
pub mod config;
pub mod decode;
pub mod history;
pub mod output;
pub mod parse;
pub mod render;
pub mod template;
pub mod types;
