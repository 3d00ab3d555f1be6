use crate::geometry::SectionRect;
use crate::section::Section;
use crate::store::SavedProject;
use crate::template;
use serde::{Deserialize, Serialize};

/// Default theme color, also the fallback of the journal color table.
pub const DEFAULT_HEADER_COLOR: &str = "#C62828";

/// Accent prefix rendered before the document title.
pub const TITLE_ACCENT_PREFIX: &str = "RCT: ";

/// The whole editable artifact: metadata plus an ordered section list.
/// Section order is display/z-order only, not positional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub citation: String,
    pub journal_name: String,
    /// Hex color string, e.g. `#C62828`.
    pub header_color: String,
    pub layout_template_id: String,
    pub sections: Vec<Section>,
}

impl Document {
    /// Instantiate a document from a named layout template, with one section
    /// per template slot. Unknown ids fall back to the default template.
    pub fn from_template(template_id: &str) -> Self {
        let t = template::template(template_id).unwrap_or_else(template::default_template);
        Self {
            title: t.title.to_owned(),
            citation: t.citation.to_owned(),
            journal_name: String::new(),
            header_color: DEFAULT_HEADER_COLOR.to_owned(),
            layout_template_id: t.id.to_owned(),
            sections: t.sections,
        }
    }

    /// Rebuild a document from a persisted project; sections are taken
    /// verbatim.
    pub fn from_saved(project: &SavedProject) -> Self {
        Self {
            title: project.title.clone(),
            citation: project.citation.clone(),
            journal_name: project.journal_name.clone(),
            header_color: project.header_color.clone(),
            layout_template_id: project.layout_id.clone(),
            sections: project.sections.clone(),
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn section_rect(&self, id: &str) -> Option<SectionRect> {
        self.section(id).map(|s| s.rect)
    }
}

/// Parse a `#RRGGBB` hex color; falls back to the default header color for
/// malformed input rather than erroring.
pub fn parse_hex_color(hex: &str) -> (u8, u8, u8) {
    fn parse(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
    parse(hex).unwrap_or((0xC6, 0x28, 0x28))
}
