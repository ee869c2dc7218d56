//! Rendering backend trait and error type.
//!
//! [`QrRenderer`] is the seam between the batch pipeline and the actual
//! rendering machinery. The production implementation is
//! [`QrcodeRenderer`](super::qrcode_backend::QrcodeRenderer); tests inject
//! a recording mock so pipeline logic can be exercised without encoding a
//! single pixel.

use super::options::{OutputFormat, RenderOptions};
use crate::types::RenderedImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("logo image could not be read: {0}")]
    Logo(String),
    #[error("code with quiet zone is too large to rasterize ({0} modules across)")]
    TooLarge(u64),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Trait for QR rendering backends.
///
/// One call renders one code: text plus the batch-wide options, in the
/// requested output format. Implementations report failures through the
/// error type; converting failures to per-item data is the batch layer's
/// job, not the backend's.
pub trait QrRenderer {
    fn render(
        &self,
        text: &str,
        options: &RenderOptions,
        format: OutputFormat,
    ) -> Result<RenderedImage, RenderError>;
}
