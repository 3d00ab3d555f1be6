//! Maps extracted article content onto an existing document.
//!
//! Binding never changes the geometry of a document: section rects, layouts,
//! and the section count all stay exactly as the template laid them out.
//! Only titles, content text, icons, and document metadata are rewritten.

use crate::document::{DEFAULT_HEADER_COLOR, Document};
use crate::section::IconRef;

/// Article metadata recovered by an extraction service.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArticleMetadata {
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub publish_date: String,
}

/// One extracted content block destined for a section slot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtractedSection {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub recommended_icon: String,
}

/// Journal identity as the extraction service reports it: a stable key for
/// the color table plus the display name.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JournalRef {
    pub key: String,
    pub name: String,
}

/// Full extraction result for one article.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtractedArticle {
    pub metadata: ArticleMetadata,
    #[serde(default)]
    pub journal: Option<JournalRef>,
    pub sections: Vec<ExtractedSection>,
}

/// Bind an extracted article into `doc` in place.
///
/// Extracted blocks fill the document's slots in order. Surplus blocks do
/// not create new sections; each one is appended to the last slot's content
/// as an upper-cased inline heading followed by its description. A document
/// with zero sections is left untouched.
pub fn bind_extracted(doc: &mut Document, article: &ExtractedArticle) {
    apply_metadata(doc, &article.metadata, article.journal.as_ref());
    if doc.sections.is_empty() {
        log::warn!("binding extracted content into a document with no sections");
        return;
    }
    let slots = doc.sections.len();
    for (i, block) in article.sections.iter().enumerate() {
        if i < slots {
            let section = &mut doc.sections[i];
            section.title = block.title.to_uppercase();
            section.content = block.description.clone();
            // No recommendation keeps whatever the template slot carried.
            if !block.recommended_icon.trim().is_empty() {
                if let Some(icon) = IconRef::parse(map_icon_name(&block.recommended_icon)) {
                    section.set_icon(icon);
                }
            }
        } else {
            let last = &mut doc.sections[slots - 1];
            last.content.push_str(&format!(
                "\n\n{}:\n{}",
                block.title.to_uppercase(),
                block.description
            ));
        }
    }
}

fn apply_metadata(doc: &mut Document, meta: &ArticleMetadata, journal: Option<&JournalRef>) {
    if !meta.title.is_empty() {
        doc.title = meta.title.clone();
    }
    // The structured journal ref wins over the free-text metadata field.
    let journal_name = journal.map(|j| j.name.as_str()).unwrap_or(&meta.journal);
    if !journal_name.is_empty() {
        doc.journal_name = journal_name.to_owned();
    }
    doc.citation = build_citation(meta);
    // The category key comes from the structured ref; a free-text journal
    // name rarely names a category and then falls through to the default.
    let color_key = journal.map(|j| j.key.as_str()).unwrap_or(&meta.journal);
    doc.header_color = journal_color(color_key).to_owned();
}

/// `Author et al. Journal. Year.` with placeholder fallbacks per field.
pub fn build_citation(meta: &ArticleMetadata) -> String {
    let authors = if meta.authors.is_empty() {
        "Author et al."
    } else {
        &meta.authors
    };
    let journal = if meta.journal.is_empty() {
        "Journal"
    } else {
        &meta.journal
    };
    let year = publish_year(&meta.publish_date);
    format!("{authors} {journal}. {year}.")
}

/// First 4-digit run of the publish date, or "2024" when none is found.
fn publish_year(date: &str) -> String {
    let bytes = date.as_bytes();
    let mut run = 0;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            run += 1;
            if run == 4 {
                return date[i + 1 - 4..=i].to_owned();
            }
        } else {
            run = 0;
        }
    }
    "2024".to_owned()
}

/// Category palette for journal theming. Keys are lowercase hyphenated
/// category slugs as the extraction service reports them (`cardiology`,
/// `computer-science`, ...); anything unrecognized gets the default theme
/// color.
pub fn journal_color(category: &str) -> &'static str {
    const TABLE: [(&str, &str); 19] = [
        ("cardiology", "#C62828"),
        ("neurology", "#1565C0"),
        ("oncology", "#2E7D32"),
        ("endocrinology", "#F9A825"),
        ("psychiatry", "#6A1B9A"),
        ("dermatology", "#455A64"),
        ("radiology", "#00897B"),
        ("pediatrics", "#E91E63"),
        ("surgery", "#D32F2F"),
        ("orthopedics", "#F57C00"),
        ("ophthalmology", "#00ACC1"),
        ("gastroenterology", "#7CB342"),
        ("biology", "#2E7D32"),
        ("chemistry", "#1565C0"),
        ("physics", "#6A1B9A"),
        ("mathematics", "#F9A825"),
        ("engineering", "#455A64"),
        ("computer-science", "#00897B"),
        ("environmental", "#7CB342"),
    ];
    let key = category.trim().to_lowercase();
    for (k, color) in TABLE {
        if key == k {
            return color;
        }
    }
    DEFAULT_HEADER_COLOR
}

/// Translate an extractor's suggested icon name into a glyph the built-in
/// catalog can render. Exact matches win, then substring matches in table
/// order, then the generic fallback.
pub fn map_icon_name(recommended: &str) -> &'static str {
    const TABLE: [(&str, &str); 24] = [
        ("population", "group"),
        ("patients", "group"),
        ("people", "groups"),
        ("person", "person"),
        ("intervention", "healing"),
        ("treatment", "healing"),
        ("drug", "pill"),
        ("medication", "pill"),
        ("vaccine", "vaccines"),
        ("outcome", "target"),
        ("endpoint", "target"),
        ("result", "bar_chart"),
        ("finding", "bar_chart"),
        ("chart", "bar_chart"),
        ("statistic", "query_stats"),
        ("analysis", "analytics"),
        ("hospital", "domain"),
        ("location", "domain"),
        ("setting", "domain"),
        ("heart", "favorite"),
        ("cardio", "monitor_heart"),
        ("lab", "science"),
        ("time", "schedule"),
        ("follow", "schedule"),
    ];
    let lower = recommended.trim().to_lowercase();
    if lower.is_empty() {
        return "category";
    }
    if crate::icons::lookup(&lower).is_some() {
        // Already a catalog glyph name.
        return crate::icons::canonical(&lower).unwrap_or("category");
    }
    for (key, glyph) in TABLE {
        if lower == key {
            return glyph;
        }
    }
    for (key, glyph) in TABLE {
        if lower.contains(key) || key.contains(lower.as_str()) {
            return glyph;
        }
    }
    "category"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn block(title: &str, description: &str, icon: &str) -> ExtractedSection {
        ExtractedSection {
            title: title.to_owned(),
            description: description.to_owned(),
            recommended_icon: icon.to_owned(),
        }
    }

    fn article(blocks: Vec<ExtractedSection>) -> ExtractedArticle {
        ExtractedArticle {
            metadata: ArticleMetadata {
                title: "Aspirin and Stroke".into(),
                authors: "Rivera M et al.".into(),
                journal: "NEJM".into(),
                publish_date: "2025-03-14".into(),
            },
            journal: None,
            sections: blocks,
        }
    }

    #[test]
    fn binding_fills_slots_in_order_without_moving_them() {
        let mut doc = Document::from_template("clinical-trial");
        let before: Vec<_> = doc.sections.iter().map(|s| s.rect).collect();
        bind_extracted(
            &mut doc,
            &article(vec![
                block("Population", "12000 adults", "patients"),
                block("Intervention", "81mg daily", "drug"),
            ]),
        );
        assert_eq!(doc.sections[0].title, "POPULATION");
        assert_eq!(doc.sections[0].content, "12000 adults");
        assert_eq!(doc.sections[1].content, "81mg daily");
        // Geometry untouched, later slots untouched.
        let after: Vec<_> = doc.sections.iter().map(|s| s.rect).collect();
        assert_eq!(before, after);
        assert_eq!(doc.sections.len(), 5);
    }

    #[test]
    fn overflow_appends_to_the_last_slot() {
        let mut doc = Document::from_template("blank-canvas");
        bind_extracted(
            &mut doc,
            &article(vec![
                block("First", "one", ""),
                block("Second", "two", ""),
                block("Third", "three", ""),
            ]),
        );
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "FIRST");
        assert_eq!(doc.sections[0].content, "one\n\nSECOND:\ntwo\n\nTHIRD:\nthree");
    }

    #[test]
    fn metadata_sets_title_citation_and_theme() {
        let mut doc = Document::from_template("clinical-trial");
        bind_extracted(&mut doc, &article(vec![]));
        assert_eq!(doc.title, "Aspirin and Stroke");
        assert_eq!(doc.journal_name, "NEJM");
        assert_eq!(doc.citation, "Rivera M et al. NEJM. 2025.");
        // Without a structured journal ref there is no category to match.
        assert_eq!(doc.header_color, DEFAULT_HEADER_COLOR);
    }

    #[test]
    fn citation_falls_back_per_field() {
        let meta = ArticleMetadata::default();
        assert_eq!(build_citation(&meta), "Author et al. Journal. 2024.");
        let meta = ArticleMetadata {
            publish_date: "March 7, 1999".into(),
            ..ArticleMetadata::default()
        };
        assert_eq!(build_citation(&meta), "Author et al. Journal. 1999.");
    }

    #[test]
    fn icon_mapping_prefers_exact_then_partial() {
        assert_eq!(map_icon_name("drug"), "pill");
        assert_eq!(map_icon_name("Drug therapy"), "pill");
        assert_eq!(map_icon_name("group"), "group");
        assert_eq!(map_icon_name("zzz-nothing"), "category");
        assert_eq!(map_icon_name(""), "category");
    }

    #[test]
    fn missing_recommendation_keeps_the_template_icon() {
        let mut doc = Document::from_template("blank-canvas");
        let before = doc.sections[0].icon().cloned();
        assert!(before.is_some());
        bind_extracted(&mut doc, &article(vec![block("Main", "filled", "")]));
        assert_eq!(doc.sections[0].icon(), before.as_ref());
    }

    #[test]
    fn structured_journal_ref_overrides_free_text() {
        let mut doc = Document::from_template("clinical-trial");
        let mut article = article(vec![]);
        article.journal = Some(JournalRef {
            key: "neurology".into(),
            name: "Lancet Neurology".into(),
        });
        bind_extracted(&mut doc, &article);
        assert_eq!(doc.journal_name, "Lancet Neurology");
        assert_eq!(doc.header_color, "#1565C0");
        // Citation still comes from the free-text metadata.
        assert_eq!(doc.citation, "Rivera M et al. NEJM. 2025.");
    }

    #[test]
    fn category_palette_resolves_keys_case_insensitively() {
        assert_eq!(journal_color("neurology"), "#1565C0");
        assert_eq!(journal_color("Cardiology"), "#C62828");
        assert_eq!(journal_color("computer-science"), "#00897B");
        assert_eq!(journal_color("basket-weaving"), DEFAULT_HEADER_COLOR);
        assert_eq!(journal_color(""), DEFAULT_HEADER_COLOR);
    }
}
