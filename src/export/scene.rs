//! Renders a document into a self-contained SVG scene string.
//!
//! The scene is the single source of truth for raster export: everything the
//! canvas shows (header band, sections, icons, charts, footer) is emitted as
//! plain SVG and handed to the rasterizer. Coordinates are canvas pixels.

use crate::document::{Document, TITLE_ACCENT_PREFIX, parse_hex_color};
use crate::geometry::{
    BAND_HEIGHT, CANVAS_HEIGHT, CANVAS_WIDTH, FOOTER_HEIGHT, SECTION_PADDING, TITLE_ROW_HEIGHT,
    SectionRect,
};
use crate::icons;
use crate::section::{ChartPoint, IconRef, Section, SectionVisual};
use std::fmt::Write;

pub const SECTION_FILL: &str = "#D0D1CA";
pub const SECTION_STROKE: &str = "#E0E0E0";
pub const BODY_TEXT: &str = "#333333";
pub const FOOTER_LINE: &str = "#E5E7EB";
pub const FOOTER_FILL: &str = "#F9FAFB";
pub const CITATION_TEXT: &str = "#9CA3AF";
pub const CHART_BAR: &str = "#8B5CF6";
pub const DEFAULT_JOURNAL: &str = "JAMA";

const FONT: &str = "DejaVu Sans, Arial, sans-serif";

/// Interior split of a section: where the visual goes and where text goes,
/// after padding and the title row are taken out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionAreas {
    pub title_origin: (f32, f32),
    pub visual: SectionRect,
    pub text: SectionRect,
}

/// Compute the visual/text split used identically by the canvas, the scene,
/// and the deck exporter. Horizontal layouts halve the interior width;
/// vertical layouts give the visual 40% of the interior height.
pub fn section_areas(section: &Section) -> SectionAreas {
    let r = section.rect;
    let pad = SECTION_PADDING;
    let inner = SectionRect::new(
        r.x + pad,
        r.y + pad + TITLE_ROW_HEIGHT,
        (r.w - 2.0 * pad).max(0.0),
        (r.h - 2.0 * pad - TITLE_ROW_HEIGHT).max(0.0),
    );
    let has_visual = !matches!(section.visual, SectionVisual::None);
    if !has_visual {
        return SectionAreas {
            title_origin: (r.x + pad, r.y + pad),
            visual: SectionRect::new(inner.x, inner.y, 0.0, 0.0),
            text: inner,
        };
    }
    let (visual, text) = if section.layout.is_horizontal() {
        let half = inner.w / 2.0;
        let left = SectionRect::new(inner.x, inner.y, half, inner.h);
        let right = SectionRect::new(inner.x + half, inner.y, half, inner.h);
        if section.layout.visual_first() {
            (left, right)
        } else {
            (right, left)
        }
    } else {
        // The visual gets 40% of the interior height regardless of whether
        // it sits above or below the text.
        let visual_h = inner.h * 0.4;
        let text_h = inner.h - visual_h;
        if section.layout.visual_first() {
            (
                SectionRect::new(inner.x, inner.y, inner.w, visual_h),
                SectionRect::new(inner.x, inner.y + visual_h, inner.w, text_h),
            )
        } else {
            (
                SectionRect::new(inner.x, inner.y + text_h, inner.w, visual_h),
                SectionRect::new(inner.x, inner.y, inner.w, text_h),
            )
        }
    };
    SectionAreas {
        title_origin: (r.x + pad, r.y + pad),
        visual,
        text,
    }
}

pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Greedy word wrap by estimated glyph width. `width_px` at `font_size`
/// assumes an average advance of 0.55em, which tracks the UI font closely
/// enough for panel text.
pub fn wrap_text(text: &str, width_px: f32, font_size: f32) -> Vec<String> {
    let max_chars = ((width_px / (font_size * 0.55)).floor() as usize).max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line = word.to_owned();
            } else if line.chars().count() + 1 + word.chars().count() <= max_chars {
                line.push(' ');
                line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut line));
                line = word.to_owned();
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// Build the complete scene for a document.
pub fn build_scene(doc: &Document) -> String {
    let mut svg = String::with_capacity(16 * 1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = CANVAS_WIDTH,
        h = CANVAS_HEIGHT
    );
    let _ = write!(
        svg,
        r##"<rect width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" fill="#FFFFFF"/>"##
    );

    header(&mut svg, doc);
    for section in &doc.sections {
        section_svg(&mut svg, section, &doc.header_color);
    }
    footer(&mut svg, doc);

    svg.push_str("</svg>");
    svg
}

fn header(svg: &mut String, doc: &Document) {
    let journal = if doc.journal_name.is_empty() {
        DEFAULT_JOURNAL
    } else {
        &doc.journal_name
    };
    let _ = write!(
        svg,
        r#"<rect width="{CANVAS_WIDTH}" height="{BAND_HEIGHT}" fill="{}"/>"#,
        doc.header_color
    );
    let _ = write!(
        svg,
        r##"<text x="40" y="{y}" font-family="{FONT}" font-size="26" font-weight="bold" fill="#FFFFFF">{}</text>"##,
        xml_escape(journal),
        y = BAND_HEIGHT / 2.0 + 9.0,
    );
    // Title row sits between the band and the section safe area.
    let title_y = BAND_HEIGHT + 55.0;
    let _ = write!(
        svg,
        r#"<text x="40" y="{title_y}" font-family="{FONT}" font-size="30" font-weight="bold"><tspan fill="{}">{}</tspan><tspan fill="{BODY_TEXT}">{}</tspan></text>"#,
        doc.header_color,
        xml_escape(TITLE_ACCENT_PREFIX),
        xml_escape(&doc.title),
    );
}

fn footer(svg: &mut String, doc: &Document) {
    let top = CANVAS_HEIGHT - FOOTER_HEIGHT;
    let _ = write!(
        svg,
        r#"<rect y="{top}" width="{CANVAS_WIDTH}" height="{FOOTER_HEIGHT}" fill="{FOOTER_FILL}"/>"#
    );
    let _ = write!(
        svg,
        r#"<line x1="0" y1="{top}" x2="{CANVAS_WIDTH}" y2="{top}" stroke="{FOOTER_LINE}" stroke-width="1"/>"#
    );
    let _ = write!(
        svg,
        r#"<text x="40" y="{y}" font-family="{FONT}" font-size="12" fill="{CITATION_TEXT}">{}</text>"#,
        xml_escape(&doc.citation),
        y = top + FOOTER_HEIGHT / 2.0 + 4.0,
    );
}

fn section_svg(svg: &mut String, section: &Section, theme: &str) {
    let r = section.rect;
    let _ = write!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="{SECTION_FILL}" stroke="{SECTION_STROKE}" stroke-width="1"/>"#,
        r.x, r.y, r.w, r.h
    );
    let areas = section_areas(section);

    let title_size = 14.0 * section.text_scale;
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" font-family="{FONT}" font-size="{title_size}" font-weight="bold" fill="{theme}">{}</text>"#,
        areas.title_origin.0,
        areas.title_origin.1 + title_size,
        xml_escape(&section.title),
    );

    match &section.visual {
        SectionVisual::None => {}
        SectionVisual::Icon { icon } => icon_svg(svg, section, icon, areas.visual, theme),
        SectionVisual::Chart { points } => chart_svg(svg, points, areas.visual),
    }

    body_text(svg, section, areas.text);
}

fn body_text(svg: &mut String, section: &Section, area: SectionRect) {
    let size = 12.0 * section.text_scale;
    let line_h = size * 1.35;
    let mut y = area.y + size;
    let max_y = area.bottom();
    for line in wrap_text(section.display_content(), area.w, size) {
        if y > max_y {
            break;
        }
        if !line.is_empty() {
            let _ = write!(
                svg,
                r#"<text x="{}" y="{y}" font-family="{FONT}" font-size="{size}" fill="{BODY_TEXT}">{}</text>"#,
                area.x,
                xml_escape(&line),
            );
        }
        y += line_h;
    }
    if let Some(stats) = &section.statistics {
        let stat_size = 16.0 * section.text_scale;
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{FONT}" font-size="{stat_size}" font-weight="bold" fill="{BODY_TEXT}">{}</text>"#,
            area.x,
            max_y - 4.0,
            xml_escape(stats),
        );
    }
}

fn icon_svg(svg: &mut String, section: &Section, icon: &IconRef, area: SectionRect, theme: &str) {
    if area.w <= 0.0 || area.h <= 0.0 {
        return;
    }
    let size = area.w.min(area.h) * 0.6 * section.image_scale;
    let cx = area.x + section.icon_position.x / 100.0 * area.w;
    let cy = area.y + section.icon_position.y / 100.0 * area.h;
    match icon {
        IconRef::Glyph(name) => {
            if let Some(path) = icons::lookup(name) {
                let scale = size / 24.0;
                let _ = write!(
                    svg,
                    r#"<path transform="translate({tx} {ty}) scale({scale})" d="{path}" fill="{theme}"/>"#,
                    tx = cx - size / 2.0,
                    ty = cy - size / 2.0,
                );
                return;
            }
            placeholder_circle(svg, cx, cy, size, theme);
        }
        IconRef::Bitmap(data) if data.starts_with("data:") => {
            let _ = write!(
                svg,
                r#"<image x="{}" y="{}" width="{size}" height="{size}" href="{}"/>"#,
                cx - size / 2.0,
                cy - size / 2.0,
                xml_escape(data),
            );
        }
        // Remote URLs and catalog references cannot be resolved inside the
        // scene; they render as the placeholder disc.
        _ => placeholder_circle(svg, cx, cy, size, theme),
    }
}

fn placeholder_circle(svg: &mut String, cx: f32, cy: f32, size: f32, theme: &str) {
    let (r, g, b) = parse_hex_color(theme);
    let _ = write!(
        svg,
        r#"<circle cx="{cx}" cy="{cy}" r="{}" fill="rgb({r},{g},{b})" fill-opacity="0.85"/>"#,
        size / 2.0,
    );
}

fn chart_svg(svg: &mut String, points: &[ChartPoint], area: SectionRect) {
    if points.is_empty() || area.w <= 0.0 || area.h <= 0.0 {
        return;
    }
    let max = points.iter().map(|p| p.value).fold(f64::EPSILON, f64::max);
    let label_h = 14.0;
    let plot_h = (area.h - label_h).max(1.0);
    let slot = area.w / points.len() as f32;
    let bar_w = (slot * 0.6).min(60.0);
    for (i, p) in points.iter().enumerate() {
        let h = (p.value.max(0.0) / max) as f32 * plot_h;
        let x = area.x + slot * i as f32 + (slot - bar_w) / 2.0;
        let y = area.y + plot_h - h;
        let _ = write!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{bar_w}" height="{h}" rx="2" fill="{CHART_BAR}"/>"#
        );
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{FONT}" font-size="10" fill="{BODY_TEXT}" text-anchor="middle">{}</text>"#,
            x + bar_w / 2.0,
            area.y + plot_h + 11.0,
            xml_escape(&p.label),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionLayout;

    #[test]
    fn scene_contains_chrome_and_every_section_title() {
        let doc = Document::from_template("clinical-trial");
        let svg = build_scene(&doc);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(DEFAULT_JOURNAL));
        assert!(svg.contains("RCT: "));
        assert!(svg.contains(FOOTER_FILL));
        for s in &doc.sections {
            assert!(svg.contains(&xml_escape(&s.title)), "missing {}", s.id);
        }
    }

    #[test]
    fn scene_escapes_markup_in_text() {
        let mut doc = Document::from_template("blank-canvas");
        doc.title = "A<B & \"C\"".into();
        let svg = build_scene(&doc);
        assert!(svg.contains("A&lt;B &amp; &quot;C&quot;"));
        assert!(!svg.contains("A<B"));
    }

    #[test]
    fn horizontal_layout_splits_interior_in_half() {
        let mut doc = Document::from_template("clinical-trial");
        let s = doc.section_mut("population").unwrap();
        s.layout = SectionLayout::Left;
        let areas = section_areas(doc.section("population").unwrap());
        assert_eq!(areas.visual.w, areas.text.w);
        assert_eq!(areas.visual.right(), areas.text.x);
    }

    #[test]
    fn vertical_layout_gives_visual_forty_percent() {
        let doc = Document::from_template("clinical-trial");
        // findings uses Bottom: text above, visual below.
        let areas = section_areas(doc.section("findings").unwrap());
        assert!((areas.visual.h / (areas.visual.h + areas.text.h) - 0.4).abs() < 1e-4);
        assert!(areas.text.y < areas.visual.y);
    }

    #[test]
    fn wrap_text_respects_paragraphs() {
        let lines = wrap_text("alpha beta gamma\n\ndelta", 60.0, 10.0);
        assert!(lines.len() >= 4);
        assert!(lines.contains(&String::new()));
        assert_eq!(lines.last().unwrap(), "delta");
    }
}
