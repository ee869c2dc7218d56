//! Production rendering backend.
//!
//! Encodes the text with the `qrcode` crate, then materializes the module
//! matrix per format:
//!
//! - **PNG / JPEG**: modules painted onto an RGBA buffer, one
//!   `scale × scale` pixel block per module, honoring colors, margin and
//!   dot style. An optional logo is composited at the center over a
//!   background-colored patch sized at 20% of the image.
//! - **SVG**: the qrcode crate's svg renderer with the configured colors.
//!   Vector output always uses square modules.
//! - **PDF**: the PNG raster embedded at 50×50 mm near the top-left of an
//!   A4 page.
//!
//! The raster is sized to a whole number of pixels per module: with `w`
//! modules and margin `m`, scale is `size / (w + 2m)` (at least 1), so the
//! final image is the nearest module multiple at or below the requested
//! size.

use super::backend::{QrRenderer, RenderError};
use super::options::{DotStyle, EcLevel, OutputFormat, RenderOptions, parse_hex_color};
use crate::types::RenderedImage;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use qrcode::QrCode;
use qrcode::render::svg;
use std::io::Cursor;

/// Logo edge length as a fraction of the image edge.
const LOGO_FRACTION: f32 = 0.2;

/// Pure-Rust renderer built on `qrcode` + `image` + `printpdf`.
#[derive(Debug, Default)]
pub struct QrcodeRenderer;

impl QrcodeRenderer {
    pub fn new() -> Self {
        Self
    }

    fn build_code(text: &str, level: EcLevel) -> Result<QrCode, RenderError> {
        let ec = match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        };
        Ok(QrCode::with_error_correction_level(text.as_bytes(), ec)?)
    }

    /// Whole-pixel geometry: pixels per module and final edge length.
    ///
    /// Computed in `u64` so an absurd margin surfaces as an error instead
    /// of overflowing `u32` arithmetic.
    fn raster_geometry(width: u32, options: &RenderOptions) -> Result<(u32, u32), RenderError> {
        let total = u64::from(width) + 2 * u64::from(options.margin);
        let scale = (u64::from(options.size) / total).max(1);
        let img_size =
            u32::try_from(total * scale).map_err(|_| RenderError::TooLarge(total))?;
        Ok((scale as u32, img_size))
    }

    /// Paint the module matrix onto an RGBA buffer.
    fn rasterize(code: &QrCode, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
        let fg = color_of(&options.foreground)?;
        let bg = color_of(&options.background)?;

        let modules = code.to_colors();
        let width = code.width() as u32;
        let (scale, img_size) = Self::raster_geometry(width, options)?;

        let mut img = RgbaImage::from_pixel(img_size, img_size, bg);
        for (i, module) in modules.iter().enumerate() {
            if *module != qrcode::Color::Dark {
                continue;
            }
            let mx = (i as u32) % width + options.margin;
            let my = (i as u32) / width + options.margin;
            for dy in 0..scale {
                for dx in 0..scale {
                    if module_pixel_on(options.dot_style, dx, dy, scale) {
                        img.put_pixel(mx * scale + dx, my * scale + dy, fg);
                    }
                }
            }
        }

        if let Some(logo_bytes) = &options.logo {
            overlay_logo(&mut img, logo_bytes, bg)?;
        }

        Ok(img)
    }

    fn render_raster(
        &self,
        text: &str,
        options: &RenderOptions,
        format: ImageFormat,
    ) -> Result<Vec<u8>, RenderError> {
        let code = Self::build_code(text, options.ec_level)?;
        let img = Self::rasterize(&code, options)?;
        let dynamic = match format {
            // JPEG has no alpha channel.
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
            _ => DynamicImage::ImageRgba8(img),
        };
        let mut bytes = Vec::new();
        dynamic.write_to(&mut Cursor::new(&mut bytes), format)?;
        Ok(bytes)
    }

    fn render_svg(&self, text: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        // Validate colors up front: the svg renderer embeds them verbatim.
        color_of(&options.foreground)?;
        color_of(&options.background)?;

        let code = Self::build_code(text, options.ec_level)?;
        let rendered = code
            .render::<svg::Color<'_>>()
            .min_dimensions(options.size, options.size)
            .quiet_zone(options.margin > 0)
            .dark_color(svg::Color(&options.foreground))
            .light_color(svg::Color(&options.background))
            .build();
        Ok(rendered.into_bytes())
    }

    /// A4 page with the code at 50×50 mm, 10 mm from the top-left corner.
    fn render_pdf(&self, text: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        use printpdf::{ImageTransform, Mm, PdfDocument};

        let png = self.render_raster(text, options, ImageFormat::Png)?;
        let px = {
            let code = Self::build_code(text, options.ec_level)?;
            let (_, img_size) = Self::raster_geometry(code.width() as u32, options)?;
            img_size
        };

        let (doc, page, layer) = PdfDocument::new("QR Code", Mm(210.0), Mm(297.0), "qr");
        // printpdf bundles its own image crate version; decode the PNG
        // bytes with that one instead of converting buffers across crates.
        let decoder = printpdf::image_crate::codecs::png::PngDecoder::new(Cursor::new(&png))
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let pdf_image =
            printpdf::Image::try_from(decoder).map_err(|e| RenderError::Pdf(e.to_string()))?;

        pdf_image.add_to_layer(
            doc.get_page(page).get_layer(layer),
            ImageTransform {
                translate_x: Some(Mm(10.0)),
                // PDF origin is bottom-left; place the 50 mm code 10 mm
                // below the top edge.
                translate_y: Some(Mm(297.0 - 10.0 - 50.0)),
                // dpi such that `px` pixels print as exactly 50 mm.
                dpi: Some(px as f32 * 25.4 / 50.0),
                ..Default::default()
            },
        );

        doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

impl QrRenderer for QrcodeRenderer {
    fn render(
        &self,
        text: &str,
        options: &RenderOptions,
        format: OutputFormat,
    ) -> Result<RenderedImage, RenderError> {
        let bytes = match format {
            OutputFormat::Png => self.render_raster(text, options, ImageFormat::Png)?,
            OutputFormat::Jpeg => self.render_raster(text, options, ImageFormat::Jpeg)?,
            OutputFormat::Svg => self.render_svg(text, options)?,
            OutputFormat::Pdf => self.render_pdf(text, options)?,
        };
        Ok(RenderedImage { bytes })
    }
}

fn color_of(hex: &str) -> Result<Rgba<u8>, RenderError> {
    let [r, g, b] =
        parse_hex_color(hex).ok_or_else(|| RenderError::InvalidColor(hex.to_string()))?;
    Ok(Rgba([r, g, b, 255]))
}

/// Whether pixel `(dx, dy)` inside a `scale × scale` module cell is dark.
fn module_pixel_on(style: DotStyle, dx: u32, dy: u32, scale: u32) -> bool {
    match style {
        DotStyle::Square => true,
        DotStyle::Dots => {
            let c = (scale as f32 - 1.0) / 2.0;
            let r = scale as f32 * 0.5 * 0.9;
            let (fx, fy) = (dx as f32 - c, dy as f32 - c);
            fx * fx + fy * fy <= r * r
        }
        DotStyle::Rounded => {
            let r = (scale as f32 / 3.0).max(1.0);
            let (fx, fy) = (dx as f32 + 0.5, dy as f32 + 0.5);
            let edge = scale as f32;
            // Inside unless within a corner square and outside its arc.
            let cx = if fx < r {
                Some(r)
            } else if fx > edge - r {
                Some(edge - r)
            } else {
                None
            };
            let cy = if fy < r {
                Some(r)
            } else if fy > edge - r {
                Some(edge - r)
            } else {
                None
            };
            match (cx, cy) {
                (Some(cx), Some(cy)) => {
                    let (ox, oy) = (fx - cx, fy - cy);
                    ox * ox + oy * oy <= r * r
                }
                _ => true,
            }
        }
    }
}

/// Composite the logo at the center: a background-colored patch slightly
/// larger than the logo, then the logo itself at 20% of the image edge.
fn overlay_logo(img: &mut RgbaImage, logo_bytes: &[u8], bg: Rgba<u8>) -> Result<(), RenderError> {
    let logo = image::load_from_memory(logo_bytes).map_err(|e| RenderError::Logo(e.to_string()))?;

    let img_size = img.width();
    let logo_size = ((img_size as f32 * LOGO_FRACTION) as u32).max(1);
    let pad = (img_size / 60).max(2);

    let resized = logo
        .resize_exact(logo_size, logo_size, imageops::FilterType::Lanczos3)
        .to_rgba8();

    let origin = (img_size - logo_size) / 2;
    let patch_start = origin.saturating_sub(pad);
    let patch_end = (origin + logo_size + pad).min(img_size);
    for y in patch_start..patch_end {
        for x in patch_start..patch_end {
            img.put_pixel(x, y, bg);
        }
    }

    imageops::overlay(img, &resized, i64::from(origin), i64::from(origin));
    Ok(())
}
