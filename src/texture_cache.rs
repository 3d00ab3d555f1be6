//! Caches GPU textures for section icons.
//!
//! Icon bitmaps are produced by the same conversion path the exporter uses,
//! then uploaded once per (icon, theme color) pair. The canvas asks for a
//! texture every frame; the cache makes that a hash lookup after the first
//! request. Changing the theme color invalidates naturally through the key.

use crate::export::icon::icon_png_or_placeholder;
use crate::section::IconRef;
use std::collections::HashMap;

/// Drop the least recently used entries beyond this count. Documents have a
/// handful of icons; the bound only matters after many theme switches.
const MAX_ENTRIES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IconKey {
    icon: String,
    color: String,
}

fn key_for(icon: &IconRef, color: &str) -> IconKey {
    let icon = match icon {
        IconRef::Glyph(name) => format!("g:{name}"),
        IconRef::Catalog(name) => format!("c:{name}"),
        IconRef::Bitmap(data) => format!("b:{data}"),
    };
    IconKey {
        icon,
        color: color.to_owned(),
    }
}

struct CacheEntry {
    texture: egui::TextureHandle,
    last_used: u64,
}

#[derive(Default)]
pub struct IconTextureCache {
    entries: HashMap<IconKey, CacheEntry>,
    tick: u64,
}

impl IconTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for an icon in the given theme color, uploading on first use.
    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        icon: &IconRef,
        color: &str,
    ) -> egui::TextureId {
        self.tick += 1;
        let key = key_for(icon, color);
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = self.tick;
            return entry.texture.id();
        }

        let png = icon_png_or_placeholder(icon, color);
        let image = decode_to_color_image(&png);
        let texture = ctx.load_texture(
            format!("icon:{}:{}", key.icon, key.color),
            image,
            egui::TextureOptions::LINEAR,
        );
        let id = texture.id();
        self.entries.insert(
            key,
            CacheEntry {
                texture,
                last_used: self.tick,
            },
        );
        self.prune();
        id
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn prune(&mut self) {
        while self.entries.len() > MAX_ENTRIES {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone())
            else {
                return;
            };
            self.entries.remove(&oldest);
        }
    }
}

fn decode_to_color_image(png: &[u8]) -> egui::ColorImage {
    match image::load_from_memory(png) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
        }
        Err(e) => {
            log::warn!("icon bitmap failed to decode: {e}");
            egui::ColorImage::new([1, 1], egui::Color32::TRANSPARENT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_separate_kind_color_and_payload() {
        let glyph = key_for(&IconRef::Glyph("group".into()), "#C62828");
        let catalog = key_for(&IconRef::Catalog("group".into()), "#C62828");
        let recolored = key_for(&IconRef::Glyph("group".into()), "#1565C0");
        assert_ne!(glyph, catalog);
        assert_ne!(glyph, recolored);
        assert_eq!(glyph, key_for(&IconRef::Glyph("group".into()), "#C62828"));
    }

    #[test]
    fn decode_survives_garbage_bytes() {
        let img = decode_to_color_image(b"not a png");
        assert_eq!(img.size, [1, 1]);
    }
}
