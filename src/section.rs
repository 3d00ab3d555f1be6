use crate::geometry::SectionRect;
use serde::{Deserialize, Serialize};

/// Soft cap on displayed content length. Longer text is truncated for
/// rendering and export, never removed from storage.
pub const CONTENT_DISPLAY_CAP: usize = 500;

/// One {label, value} pair of a simple bar representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Icon identity. The three representations are mutually exclusive and the
/// export pipeline rasterizes each differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IconRef {
    /// Symbolic glyph name resolved through the built-in glyph catalog.
    Glyph(String),
    /// Tagged reference into the external icon catalog.
    Catalog(String),
    /// Embedded bitmap (data URL) or a linked image path.
    Bitmap(String),
}

impl IconRef {
    /// Classify a raw icon string the way the source material conflated the
    /// three representations: catalog references carry a `healthicon:` tag,
    /// bitmaps start with `http` or `data:`, anything else is a glyph name.
    /// Empty strings carry no icon at all.
    pub fn parse(raw: &str) -> Option<IconRef> {
        if raw.is_empty() {
            return None;
        }
        if let Some(name) = raw.strip_prefix("healthicon:") {
            return Some(IconRef::Catalog(name.to_owned()));
        }
        if raw.starts_with("http") || raw.starts_with("data:") {
            return Some(IconRef::Bitmap(raw.to_owned()));
        }
        Some(IconRef::Glyph(raw.to_owned()))
    }
}

/// Visual payload of a section. A section carries at most one of an icon or
/// a chart; the tagged variant makes the exclusivity structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionVisual {
    #[default]
    None,
    Icon {
        icon: IconRef,
    },
    Chart {
        points: Vec<ChartPoint>,
    },
}

/// Whether the icon/visual precedes or follows the text, and whether the
/// split is vertical or horizontal stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SectionLayout {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl SectionLayout {
    /// Left/right layouts split the interior horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, SectionLayout::Left | SectionLayout::Right)
    }

    /// Top/left place the visual before the text.
    pub fn visual_first(self) -> bool {
        matches!(self, SectionLayout::Top | SectionLayout::Left)
    }
}

/// Percentage-space offset of the icon within its visual sub-area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconOffset {
    pub x: f32,
    pub y: f32,
}

impl Default for IconOffset {
    fn default() -> Self {
        Self { x: 50.0, y: 30.0 }
    }
}

/// One content box on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier, unique within a document and never reused.
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub visual: SectionVisual,
    #[serde(default)]
    pub statistics: Option<String>,
    #[serde(default = "default_scale")]
    pub image_scale: f32,
    #[serde(default = "default_scale")]
    pub text_scale: f32,
    #[serde(default)]
    pub icon_position: IconOffset,
    #[serde(default)]
    pub layout: SectionLayout,
    pub rect: SectionRect,
}

fn default_scale() -> f32 {
    1.0
}

impl Section {
    pub fn new(id: &str, title: &str, content: &str, rect: SectionRect) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            content: content.to_owned(),
            visual: SectionVisual::None,
            statistics: None,
            image_scale: 1.0,
            text_scale: 1.0,
            icon_position: IconOffset::default(),
            layout: SectionLayout::default(),
            rect,
        }
    }

    pub fn with_icon(mut self, raw: &str) -> Self {
        if let Some(icon) = IconRef::parse(raw) {
            self.visual = SectionVisual::Icon { icon };
        }
        self
    }

    pub fn with_layout(mut self, layout: SectionLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_chart(mut self, points: Vec<ChartPoint>) -> Self {
        self.visual = SectionVisual::Chart { points };
        self
    }

    pub fn with_statistics(mut self, stats: &str) -> Self {
        self.statistics = Some(stats.to_owned());
        self
    }

    pub fn with_image_scale(mut self, scale: f32) -> Self {
        self.image_scale = scale;
        self
    }

    pub fn icon(&self) -> Option<&IconRef> {
        match &self.visual {
            SectionVisual::Icon { icon } => Some(icon),
            _ => None,
        }
    }

    pub fn chart(&self) -> Option<&[ChartPoint]> {
        match &self.visual {
            SectionVisual::Chart { points } => Some(points),
            _ => None,
        }
    }

    /// Assign an icon; clears any chart data.
    pub fn set_icon(&mut self, icon: IconRef) {
        self.visual = SectionVisual::Icon { icon };
    }

    /// Assign chart data; clears any icon.
    pub fn set_chart(&mut self, points: Vec<ChartPoint>) {
        self.visual = SectionVisual::Chart { points };
    }

    pub fn clear_visual(&mut self) {
        self.visual = SectionVisual::None;
    }

    /// Content as shown on the canvas and in exports: truncated at the soft
    /// cap on a character boundary and trimmed of trailing whitespace.
    pub fn display_content(&self) -> &str {
        match self
            .content
            .char_indices()
            .nth(CONTENT_DISPLAY_CAP)
            .map(|(i, _)| i)
        {
            Some(cut) => self.content[..cut].trim_end(),
            None => &self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_parse_classifies_representations() {
        assert_eq!(
            IconRef::parse("healthicon:Stethoscope"),
            Some(IconRef::Catalog("Stethoscope".into()))
        );
        assert_eq!(
            IconRef::parse("data:image/png;base64,AAAA"),
            Some(IconRef::Bitmap("data:image/png;base64,AAAA".into()))
        );
        assert_eq!(IconRef::parse("group"), Some(IconRef::Glyph("group".into())));
        assert_eq!(IconRef::parse(""), None);
    }

    #[test]
    fn icon_and_chart_are_mutually_exclusive() {
        let mut s = Section::new("a", "A", "", SectionRect::new(0.0, 160.0, 100.0, 100.0));
        s.set_chart(vec![ChartPoint {
            label: "x".into(),
            value: 1.0,
        }]);
        assert!(s.chart().is_some());
        s.set_icon(IconRef::Glyph("group".into()));
        assert!(s.chart().is_none());
        assert!(s.icon().is_some());
        s.set_chart(vec![]);
        assert!(s.icon().is_none());
    }

    #[test]
    fn display_content_truncates_at_cap() {
        let mut s = Section::new("a", "A", "", SectionRect::new(0.0, 160.0, 100.0, 100.0));
        s.content = "x".repeat(600);
        assert_eq!(s.display_content().len(), 500);
        // Storage keeps the full text.
        assert_eq!(s.content.len(), 600);
    }
}
