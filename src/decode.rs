//! QR decoding from image bytes.
//!
//! [`Decoder`] is an injected capability: the pipeline asks "is there a
//! QR code in these bytes" and does not care which detection library
//! answers. `Ok(None)` means the image decoded fine but contains no
//! readable code — that is an answer, not an error.
//!
//! The production implementation feeds a grayscale view of the image to
//! the pure-Rust `rqrr` detector. Camera capture is out of scope; input
//! is a decoded image file (PNG/JPEG).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("image could not be read: {0}")]
    Image(#[from] image::ImageError),
    #[error("QR payload could not be decoded: {0}")]
    Payload(String),
}

/// Injected QR-detection capability.
pub trait Decoder {
    /// Detect and decode the first QR code in an image.
    ///
    /// Returns `Ok(None)` when the image contains no detectable code.
    fn decode(&self, image_bytes: &[u8]) -> Result<Option<String>, DecodeError>;
}

/// Production decoder built on `rqrr`.
#[derive(Debug, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for RqrrDecoder {
    fn decode(&self, image_bytes: &[u8]) -> Result<Option<String>, DecodeError> {
        let gray = image::load_from_memory(image_bytes)?.to_luma8();
        let (width, height) = gray.dimensions();

        // prepare_from_greyscale keeps rqrr decoupled from our image
        // buffer types.
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| gray.get_pixel(x as u32, y as u32).0[0],
        );

        let grids = prepared.detect_grids();
        let Some(grid) = grids.first() else {
            return Ok(None);
        };

        match grid.decode() {
            Ok((_meta, content)) => Ok(Some(content)),
            Err(err) => Err(DecodeError::Payload(err.to_string())),
        }
    }
}
