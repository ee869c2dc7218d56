//! QR rendering — pure Rust, no system dependencies.
//!
//! | Concern | Crate / function |
//! |---|---|
//! | **Module matrix** | `qrcode::QrCode` |
//! | **Raster (PNG/JPEG)** | `image` RGBA buffer, per-module dot painting |
//! | **SVG** | `qrcode::render::svg` |
//! | **PDF** | rendered PNG embedded on an A4 page via `printpdf` |
//!
//! The module is split into:
//! - **Options**: [`RenderOptions`], [`OutputFormat`] and friends — the
//!   shared, read-only styling for a batch
//! - **Backend**: the [`QrRenderer`] trait the pipeline is written against
//! - **Qrcode backend**: [`QrcodeRenderer`], the production implementation

pub mod backend;
mod options;
pub mod qrcode_backend;

pub use backend::{QrRenderer, RenderError};
pub use options::{
    DotStyle, EcLevel, MAX_MARGIN, MAX_SIZE, MIN_SIZE, OutputFormat, RenderOptions,
    parse_hex_color,
};
pub use qrcode_backend::QrcodeRenderer;
