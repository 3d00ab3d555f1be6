//! Lays a document out as one editable slide.
//!
//! The deck route does not rasterize the canvas. Every section becomes real
//! slide shapes (a rounded box, text frames, an embedded icon picture) so
//! the result stays editable in presentation software. Canvas pixels map to
//! inches through the fixed divisor, which lands the 1280x720 canvas on a
//! 10 x 5.625 inch 16:9 slide.

use super::{icon, scene, sanitize_file_stem};
use crate::document::{Document, TITLE_ACCENT_PREFIX};
use crate::geometry::{
    BAND_HEIGHT, CANVAS_HEIGHT, CANVAS_WIDTH, FOOTER_HEIGHT, SectionRect, px_to_inch,
};
use crate::section::{ChartPoint, Section, SectionVisual};

/// Shape frame in slide inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Frame {
    fn from_px(r: SectionRect) -> Self {
        Self {
            x: px_to_inch(r.x),
            y: px_to_inch(r.y),
            w: px_to_inch(r.w),
            h: px_to_inch(r.h),
        }
    }
}

/// One run of styled text. A text shape holds one paragraph per run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Point size before autofit shrink.
    pub size_pt: f32,
    pub bold: bool,
    /// `#RRGGBB` without the hash is resolved at write time.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeckShape {
    /// Rounded rectangle with solid fill and a hairline border.
    Box {
        frame: Frame,
        fill: String,
        stroke: Option<String>,
    },
    /// Text frame; shrinks its content to fit rather than overflowing.
    Text {
        frame: Frame,
        runs: Vec<TextRun>,
        centered: bool,
    },
    /// Embedded PNG.
    Picture { frame: Frame, png: Vec<u8> },
    /// Horizontal rule.
    Line { frame: Frame, color: String },
}

/// A fully laid out single-slide deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub width_in: f32,
    pub height_in: f32,
    pub shapes: Vec<DeckShape>,
    pub file_name: String,
}

/// Neutral dark used for the title run after the accent prefix.
const TITLE_TEXT: &str = "#111111";

fn hex(color: &str) -> String {
    color.trim_start_matches('#').to_uppercase()
}

fn run(text: &str, size_pt: f32, bold: bool, color: &str) -> TextRun {
    TextRun {
        text: text.to_owned(),
        size_pt,
        bold,
        color: hex(color),
    }
}

/// Build the slide model for a document.
pub fn build_deck(doc: &Document) -> Deck {
    let mut shapes = Vec::new();
    let theme = hex(&doc.header_color);

    // Header band with journal name.
    let band = Frame::from_px(SectionRect::new(0.0, 0.0, CANVAS_WIDTH, BAND_HEIGHT));
    shapes.push(DeckShape::Box {
        frame: band,
        fill: theme.clone(),
        stroke: None,
    });
    let journal = if doc.journal_name.is_empty() {
        scene::DEFAULT_JOURNAL
    } else {
        &doc.journal_name
    };
    shapes.push(DeckShape::Text {
        frame: Frame {
            x: 0.3,
            y: 0.05,
            w: band.w - 0.6,
            h: band.h - 0.1,
        },
        runs: vec![run(journal, 20.0, true, "#FFFFFF")],
        centered: false,
    });

    // Document title between the band and the section area. The accent
    // prefix keeps the theme color; the title itself stays neutral dark.
    shapes.push(DeckShape::Text {
        frame: Frame {
            x: 0.3,
            y: band.h + 0.05,
            w: px_to_inch(CANVAS_WIDTH) - 0.6,
            h: 0.6,
        },
        runs: vec![
            run(TITLE_ACCENT_PREFIX, 18.0, true, &doc.header_color),
            run(&doc.title, 18.0, true, TITLE_TEXT),
        ],
        centered: false,
    });

    for section in &doc.sections {
        section_shapes(&mut shapes, section, &doc.header_color);
    }

    // Footer rule, band, citation.
    let footer_top = CANVAS_HEIGHT - FOOTER_HEIGHT;
    shapes.push(DeckShape::Box {
        frame: Frame::from_px(SectionRect::new(0.0, footer_top, CANVAS_WIDTH, FOOTER_HEIGHT)),
        fill: hex(scene::FOOTER_FILL),
        stroke: None,
    });
    shapes.push(DeckShape::Line {
        frame: Frame::from_px(SectionRect::new(0.0, footer_top, CANVAS_WIDTH, 0.0)),
        color: hex(scene::FOOTER_LINE),
    });
    shapes.push(DeckShape::Text {
        frame: Frame::from_px(SectionRect::new(
            40.0,
            footer_top + 2.0,
            CANVAS_WIDTH - 80.0,
            FOOTER_HEIGHT - 4.0,
        )),
        runs: vec![run(&doc.citation, 8.0, false, scene::CITATION_TEXT)],
        centered: false,
    });

    Deck {
        width_in: px_to_inch(CANVAS_WIDTH),
        height_in: px_to_inch(CANVAS_HEIGHT),
        shapes,
        file_name: format!("{}.pptx", sanitize_file_stem(&doc.title)),
    }
}

fn section_shapes(shapes: &mut Vec<DeckShape>, section: &Section, theme: &str) {
    shapes.push(DeckShape::Box {
        frame: Frame::from_px(section.rect),
        fill: hex(scene::SECTION_FILL),
        stroke: Some(hex(scene::SECTION_STROKE)),
    });

    let areas = scene::section_areas(section);
    shapes.push(DeckShape::Text {
        frame: Frame {
            x: px_to_inch(areas.title_origin.0),
            y: px_to_inch(areas.title_origin.1),
            w: px_to_inch(section.rect.w - 32.0).max(0.1),
            h: 0.25,
        },
        runs: vec![run(
            &section.title.to_uppercase(),
            10.0 * section.text_scale,
            true,
            theme,
        )],
        centered: false,
    });

    match &section.visual {
        SectionVisual::None => {}
        SectionVisual::Icon { icon: icon_ref } => {
            let area = areas.visual;
            if area.w > 0.0 && area.h > 0.0 {
                // The slide icon is the largest square the sub-area holds,
                // centered in it. Canvas nudge offsets and the image scale
                // are canvas affordances and do not carry onto the slide.
                let side = area.w.min(area.h);
                shapes.push(DeckShape::Picture {
                    frame: Frame::from_px(SectionRect::new(
                        area.x + (area.w - side) / 2.0,
                        area.y + (area.h - side) / 2.0,
                        side,
                        side,
                    )),
                    png: icon::icon_png_or_placeholder(icon_ref, theme),
                });
            }
        }
        // Native slide charts are out of reach of a hand-written package;
        // the data is preserved as a readable summary instead.
        SectionVisual::Chart { points } => {
            shapes.push(DeckShape::Text {
                frame: Frame::from_px(areas.visual),
                runs: vec![run(
                    &chart_summary(points),
                    9.0 * section.text_scale,
                    false,
                    scene::CHART_BAR,
                )],
                centered: true,
            });
        }
    }

    let mut runs = vec![run(
        section.display_content(),
        8.0 * section.text_scale,
        false,
        scene::BODY_TEXT,
    )];
    if let Some(stats) = &section.statistics {
        runs.push(run(stats, 11.0 * section.text_scale, true, scene::BODY_TEXT));
    }
    shapes.push(DeckShape::Text {
        frame: Frame::from_px(areas.text),
        runs,
        centered: false,
    });
}

fn chart_summary(points: &[ChartPoint]) -> String {
    let body = points
        .iter()
        .map(|p| format!("{}: {}", p.label, p.value))
        .collect::<Vec<_>>()
        .join("  |  ");
    if body.is_empty() {
        "No chart data".to_owned()
    } else {
        body
    }
}

/// Build and serialize the deck package in one step.
pub fn export_pptx(doc: &Document) -> Vec<u8> {
    super::pptx::write_package(&build_deck(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::IconOffset;

    fn texts(deck: &Deck) -> Vec<String> {
        deck.shapes
            .iter()
            .filter_map(|s| match s {
                DeckShape::Text { runs, .. } => {
                    Some(runs.iter().map(|r| r.text.clone()).collect::<Vec<_>>().join("\n"))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn slide_is_sixteen_by_nine_inches() {
        let deck = build_deck(&Document::from_template("clinical-trial"));
        assert_eq!(deck.width_in, 10.0);
        assert_eq!(deck.height_in, 5.625);
    }

    #[test]
    fn every_section_contributes_box_and_texts() {
        let doc = Document::from_template("clinical-trial");
        let deck = build_deck(&doc);
        let boxes = deck
            .shapes
            .iter()
            .filter(|s| matches!(s, DeckShape::Box { .. }))
            .count();
        // One per section plus the header band and footer band.
        assert_eq!(boxes, doc.sections.len() + 2);
        let all = texts(&deck).join("\n");
        for s in &doc.sections {
            assert!(all.contains(&s.title), "missing {}", s.id);
        }
        assert!(all.contains(&doc.citation));
    }

    #[test]
    fn icon_sections_embed_pictures() {
        let deck = build_deck(&Document::from_template("clinical-trial"));
        let pics = deck
            .shapes
            .iter()
            .filter(|s| matches!(s, DeckShape::Picture { .. }))
            .count();
        // All five clinical-trial sections carry icons.
        assert_eq!(pics, 5);
    }

    #[test]
    fn chart_sections_fall_back_to_a_data_summary() {
        let deck = build_deck(&Document::from_template("comparative-study"));
        let all = texts(&deck).join("\n");
        assert!(all.contains("Baseline: 140"));
        assert!(all.contains("End: 125"));
        let pics = deck
            .shapes
            .iter()
            .any(|s| matches!(s, DeckShape::Picture { .. }));
        // The two icon sections still embed pictures; charts never do.
        assert!(pics);
    }

    #[test]
    fn slide_title_pairs_accent_and_neutral_runs() {
        let mut doc = Document::from_template("blank-canvas");
        doc.title = "Mixed Case Title".into();
        doc.header_color = "#1565C0".into();
        let deck = build_deck(&doc);
        let runs = deck
            .shapes
            .iter()
            .find_map(|s| match s {
                DeckShape::Text { runs, .. }
                    if runs.first().map(|r| r.text.as_str()) == Some(TITLE_ACCENT_PREFIX) =>
                {
                    Some(runs.clone())
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].color, "1565C0");
        assert_eq!(runs[1].text, "Mixed Case Title");
        assert_eq!(runs[1].color, "111111");
    }

    #[test]
    fn section_titles_are_uppercased_on_the_slide() {
        let mut doc = Document::from_template("blank-canvas");
        doc.sections[0].title = "Key finding".into();
        let deck = build_deck(&doc);
        let all = texts(&deck).join("\n");
        assert!(all.contains("KEY FINDING"));
        assert!(!all.contains("Key finding"));
    }

    #[test]
    fn slide_icons_center_in_their_sub_area_ignoring_canvas_nudges() {
        let mut doc = Document::from_template("clinical-trial");
        let s = doc.section_mut("population").unwrap();
        s.icon_position = IconOffset { x: 10.0, y: 80.0 };
        s.image_scale = 0.5;
        let area = scene::section_areas(doc.section("population").unwrap()).visual;
        let side = area.w.min(area.h);
        let expected = Frame::from_px(SectionRect::new(
            area.x + (area.w - side) / 2.0,
            area.y + (area.h - side) / 2.0,
            side,
            side,
        ));
        let deck = build_deck(&doc);
        let found = deck
            .shapes
            .iter()
            .any(|sh| matches!(sh, DeckShape::Picture { frame, .. } if *frame == expected));
        assert!(found);
    }

    #[test]
    fn file_name_derives_from_the_title() {
        let mut doc = Document::from_template("blank-canvas");
        doc.title = "Peanut OFC: TEWL!".into();
        let deck = build_deck(&doc);
        assert_eq!(deck.file_name, "Peanut_OFC__TEWL_.pptx");
    }
}
