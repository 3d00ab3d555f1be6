//! Converts section icons into PNG bitmaps for embedding in a slide deck.
//!
//! Slide packages cannot reference glyph fonts or remote URLs, so every icon
//! becomes pixels here: catalog glyphs are rasterized in the theme color,
//! data-URL bitmaps are decoded and flattened onto white, and anything that
//! cannot be resolved falls back to a filled placeholder disc so the deck
//! never loses a visual slot silently.

use super::ExportError;
use crate::document::parse_hex_color;
use crate::icons;
use crate::section::IconRef;
use base64::Engine as _;
use std::sync::Arc;

/// Edge length of rendered icon bitmaps. Icons are placed as squares, so one
/// size fits every layout.
pub const ICON_BITMAP_SIZE: u32 = 256;

/// Best-effort icon conversion. Errors never escape; a failed decode logs
/// and yields the placeholder so deck export always completes.
pub fn icon_png_or_placeholder(icon: &IconRef, theme: &str) -> Vec<u8> {
    let result = match icon {
        IconRef::Glyph(name) => match icons::lookup(name) {
            Some(path) => rasterize_glyph(path, theme),
            None => Err(ExportError::Icon(format!("unknown glyph {name}"))),
        },
        IconRef::Bitmap(data) => flatten_bitmap(data),
        IconRef::Catalog(name) => Err(ExportError::Icon(format!("unresolved catalog icon {name}"))),
    };
    match result {
        Ok(png) => png,
        Err(e) => {
            log::warn!("icon conversion failed, using placeholder: {e}");
            placeholder_png(theme)
        }
    }
}

/// Render one 24x24 glyph path at bitmap size, filled with the theme color.
fn rasterize_glyph(path: &str, theme: &str) -> Result<Vec<u8>, ExportError> {
    let (r, g, b) = parse_hex_color(theme);
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><path d="{path}" fill="rgb({r},{g},{b})"/></svg>"##
    );
    let options = usvg::Options {
        fontdb: Arc::new(fontdb::Database::new()),
        ..usvg::Options::default()
    };
    let tree =
        usvg::Tree::from_str(&svg, &options).map_err(|e| ExportError::Icon(e.to_string()))?;
    let mut pixmap = tiny_skia::Pixmap::new(ICON_BITMAP_SIZE, ICON_BITMAP_SIZE).ok_or_else(
        || ExportError::Icon("pixmap allocation failed".to_owned()),
    )?;
    let scale = ICON_BITMAP_SIZE as f32 / 24.0;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap
        .encode_png()
        .map_err(|e| ExportError::Icon(e.to_string()))
}

/// Decode a `data:` URL bitmap and re-encode as PNG composited onto white.
fn flatten_bitmap(data: &str) -> Result<Vec<u8>, ExportError> {
    let b64 = data
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .ok_or_else(|| ExportError::Icon("not a base64 data url".to_owned()))?;
    let raw = base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|e| ExportError::Icon(e.to_string()))?;
    let decoded = image::load_from_memory(&raw)
        .map_err(|e| ExportError::Icon(e.to_string()))?
        .to_rgba8();

    let mut flat = image::RgbImage::from_pixel(decoded.width(), decoded.height(), image::Rgb([255, 255, 255]));
    for (x, y, px) in decoded.enumerate_pixels() {
        let a = px.0[3] as u32;
        let blend = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * (255 - a)) / 255) as u8;
        let out = flat.get_pixel_mut(x, y);
        out.0 = [
            blend(px.0[0], 255),
            blend(px.0[1], 255),
            blend(px.0[2], 255),
        ];
    }

    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(flat)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| ExportError::Icon(e.to_string()))?;
    Ok(png)
}

/// Filled disc in the theme color, used when nothing better can be drawn.
pub fn placeholder_png(theme: &str) -> Vec<u8> {
    let (r, g, b) = parse_hex_color(theme);
    let size = ICON_BITMAP_SIZE;
    let mut pixmap = match tiny_skia::Pixmap::new(size, size) {
        Some(p) => p,
        // Fixed-size allocation; only reachable under memory exhaustion.
        None => return Vec::new(),
    };
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    let center = size as f32 / 2.0;
    if let Some(circle) = tiny_skia::PathBuilder::from_circle(center, center, center * 0.9) {
        pixmap.fill_path(
            &circle,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }
    pixmap.encode_png().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

    #[test]
    fn glyphs_render_to_png_at_bitmap_size() {
        let png = icon_png_or_placeholder(&IconRef::Glyph("group".into()), "#C62828");
        assert_eq!(&png[..4], &PNG_MAGIC);
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.width(), ICON_BITMAP_SIZE);
    }

    #[test]
    fn unknown_glyph_gets_the_placeholder_disc() {
        let png = icon_png_or_placeholder(&IconRef::Glyph("no-such-glyph".into()), "#1565C0");
        assert_eq!(png, placeholder_png("#1565C0"));
    }

    #[test]
    fn data_url_bitmaps_are_flattened_onto_white() {
        // 1x1 fully transparent PNG.
        let mut tiny = Vec::new();
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            1,
            1,
            image::Rgba([0, 0, 0, 0]),
        ))
        .write_to(&mut std::io::Cursor::new(&mut tiny), image::ImageFormat::Png)
        .unwrap();
        let url = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&tiny)
        );
        let png = icon_png_or_placeholder(&IconRef::Bitmap(url), "#C62828");
        let img = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn catalog_icons_fall_back_to_placeholder() {
        let png = icon_png_or_placeholder(&IconRef::Catalog("Stethoscope".into()), "#C62828");
        assert_eq!(&png[..4], &PNG_MAGIC);
    }
}
