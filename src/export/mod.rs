//! Turning a document into shareable artifacts.
//!
//! Two export routes share the same source of truth. The raster route builds
//! an SVG scene of the whole canvas and rasterizes it to PNG or JPEG at a
//! chosen density. The deck route lays the document out as one editable
//! slide, mapping canvas pixels to inches, and writes a minimal
//! presentation package by hand.

pub mod deck;
pub mod icon;
pub mod pptx;
pub mod raster;
pub mod scene;
mod zip;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export io: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene could not be parsed: {0}")]
    Scene(String),
    #[error("raster target too large: {width}x{height}")]
    RasterSize { width: u32, height: u32 },
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("icon could not be decoded: {0}")]
    Icon(String),
}

/// Derive a safe file stem from a document title: every non-alphanumeric
/// character becomes an underscore. Empty titles get a generic stem.
pub fn sanitize_file_stem(title: &str) -> String {
    if title.is_empty() {
        return "graphical_abstract".to_owned();
    }
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
