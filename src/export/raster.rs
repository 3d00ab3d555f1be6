//! Rasterizes the SVG scene to PNG or JPEG bytes.

use super::{ExportError, scene};
use crate::document::Document;
use crate::geometry::{CANVAS_HEIGHT, CANVAS_WIDTH};
use std::sync::Arc;

/// Base density the canvas is authored at.
pub const BASE_DPI: f32 = 96.0;
/// JPEG quality used for every JPEG export.
pub const JPEG_QUALITY: u8 = 90;
/// Refuse rasters beyond this edge length; keeps a typo'd DPI from
/// allocating gigabytes.
const MAX_EDGE: u32 = 16_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpg",
        }
    }
}

/// Render the document at `dpi` and encode it. The scale factor is
/// `dpi / 96`, so 96 exports at canvas size and 300 roughly triples it.
pub fn export_image(doc: &Document, dpi: f32, format: RasterFormat) -> Result<Vec<u8>, ExportError> {
    let scale = dpi / BASE_DPI;
    let width = (CANVAS_WIDTH * scale).round() as u32;
    let height = (CANVAS_HEIGHT * scale).round() as u32;
    if width == 0 || height == 0 || width > MAX_EDGE || height > MAX_EDGE {
        return Err(ExportError::RasterSize { width, height });
    }

    let pixmap = render_scene(&scene::build_scene(doc), width, height, scale)?;
    match format {
        RasterFormat::Png => pixmap
            .encode_png()
            .map_err(|e| ExportError::Scene(e.to_string())),
        RasterFormat::Jpeg => encode_jpeg(&pixmap),
    }
}

fn render_scene(
    svg: &str,
    width: u32,
    height: u32,
    scale: f32,
) -> Result<tiny_skia::Pixmap, ExportError> {
    let mut fonts = fontdb::Database::new();
    fonts.load_system_fonts();
    let options = usvg::Options {
        fontdb: Arc::new(fonts),
        ..usvg::Options::default()
    };
    let tree =
        usvg::Tree::from_str(svg, &options).map_err(|e| ExportError::Scene(e.to_string()))?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(ExportError::RasterSize {
        width,
        height,
    })?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// JPEG has no alpha; the scene paints a white background, so demultiplied
/// RGB is already composited.
fn encode_jpeg(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut rgb = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * 3);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgb.extend_from_slice(&[c.red(), c.green(), c.blue()]);
    }
    let mut out = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(std::io::Cursor::new(&mut out), JPEG_QUALITY);
    image::ImageEncoder::write_image(
        encoder,
        &rgb,
        pixmap.width(),
        pixmap.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}
