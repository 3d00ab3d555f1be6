//! Built-in glyph catalog.
//!
//! Each glyph is a single SVG path in a 24x24 viewBox, stroked/filled in the
//! document theme color at render time. The catalog is intentionally small;
//! anything it cannot name falls back to the `category` glyph, and documents
//! can always embed bitmaps instead.

/// Glyph name to 24x24 SVG path data. Kept sorted by name.
static GLYPHS: [(&str, &str); 27] = [
    (
        "analytics",
        "M4 20h16v1.5H4zM5 11h2.5v7H5zm5.5-5H13v12h-2.5zm5.5 3h2.5v9H16z",
    ),
    (
        "autorenew",
        "M12 4a8 8 0 0 1 7.7 5.9l-2 .5A6 6 0 0 0 12 6V9L7.5 5.5 12 2zm0 16a8 8 0 0 1-7.7-5.9l2-.5A6 6 0 0 0 12 18v-3l4.5 3.5L12 22z",
    ),
    (
        "bar_chart",
        "M5 10h3v9H5zm5.5-6h3v15h-3zM16 13h3v6h-3z",
    ),
    (
        "category",
        "M12 2 6.5 10h11zM6.5 13A4.25 4.25 0 1 0 6.5 21.5 4.25 4.25 0 1 0 6.5 13zM13.5 13.5h8v8h-8z",
    ),
    (
        "check_circle",
        "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm-1.6 14.2-4-4 1.4-1.4 2.6 2.6 5.8-5.8 1.4 1.4z",
    ),
    (
        "clinical_notes",
        "M5 3h14v18H5zm2.5 4h9v1.5h-9zm0 3.5h9V12h-9zm0 3.5h5.5v1.5H7.5z",
    ),
    (
        "construction",
        "M4 18.5 13.5 9l1.5 1.5-9.5 9.5zM14.5 4l5.5 5.5-2.5 2.5L12 6.5zM16 17l3 3 1.5-1.5-3-3z",
    ),
    (
        "domain",
        "M3 21V5h8v4h10v12zm2-2h2v-2H5zm0-4h2v-2H5zm0-4h2V9H5zm0-4h2V5H5zm4 12h2v-2H9zm0-4h2v-2H9zm0-4h2V9H9zm0-4h2V5H9zm4 12h6v-8h-6zm2-6h2v2h-2zm0 4h2v2h-2z",
    ),
    (
        "draw",
        "M16.8 3.2a2 2 0 0 1 2.8 0l1.2 1.2a2 2 0 0 1 0 2.8L9.5 18.5 4 20l1.5-5.5zM4 21.5h16V23H4z",
    ),
    (
        "favorite",
        "M12 21 4.5 13.5a5 5 0 0 1 7.1-7.1l.4.4.4-.4a5 5 0 0 1 7.1 7.1z",
    ),
    (
        "filter_list",
        "M4 6h16v2H4zm3 5h10v2H7zm3 5h4v2h-4z",
    ),
    (
        "flag",
        "M6 3h1.8v18H6zm1.8 1h10.7l-2.5 4 2.5 4H7.8z",
    ),
    (
        "folder_open",
        "M3 6h6l2 2h10v2H6.5L4 17.5zM4 19l2.5-7.5H22L19.5 19z",
    ),
    (
        "group",
        "M9 11a3 3 0 1 0 0-6 3 3 0 0 0 0 6zm7 .5a2.5 2.5 0 1 0 0-5 2.5 2.5 0 0 0 0 5zM2.5 18.5c0-3 4.3-4.5 6.5-4.5s6.5 1.5 6.5 4.5V20h-13zm14.8 1.5h4.2v-1.2c0-2.2-2.9-3.4-5-3.6a5.9 5.9 0 0 1 .8 4.8z",
    ),
    (
        "groups",
        "M12 10a2.75 2.75 0 1 0 0-5.5A2.75 2.75 0 0 0 12 10zM4.5 12a2.25 2.25 0 1 0 0-4.5 2.25 2.25 0 0 0 0 4.5zm15 0a2.25 2.25 0 1 0 0-4.5 2.25 2.25 0 0 0 0 4.5zM6.5 18c0-2.7 3.6-4 5.5-4s5.5 1.3 5.5 4v1.5h-11zM1 19.5V18c0-1.8 2.2-2.8 3.8-3a6.7 6.7 0 0 0-1 4.5zm19.2 0a6.7 6.7 0 0 0-1-4.5c1.6.2 3.8 1.2 3.8 3v1.5z",
    ),
    (
        "healing",
        "M9.5 3 3 9.5l3.2 3.2L3 15.9 9.5 22l3.2-3.2 3.2 3.2L22 15.5l-3.2-3.2L22 9.1 15.5 3l-3.2 3.2zm2.5 7h1.5v2.5H16V14h-2.5v2.5H12V14H9.5v-1.5H12z",
    ),
    (
        "insights",
        "M4 15l4-4 3 3 6-6v3h2V5h-6v2h3l-5 5-3-3-5.5 5.5zM5 19h2v2H5zm5.5 0h2v2h-2zm5.5 0h2v2h-2z",
    ),
    (
        "list_alt",
        "M4 4h16v16H4zm3 3.5h2v2H7zm4 0h6v2h-6zM7 11h2v2H7zm4 0h6v2h-6zm-4 3.5h2v2H7zm4 0h6v2h-6z",
    ),
    (
        "monitor_heart",
        "M2 11h4l1.5-3.5L10 15l2-4h1.5a3.8 3.8 0 0 1-.3-1.5c0-2.1 1.7-3.5 3.4-3.5 1 0 1.9.4 2.4 1.1.5-.7 1.4-1.1 2.4-1.1.3 0 .6 0 .9.1V4H2zm20 2h-5.2l-1.3 2.6L11 8l-2 4.6H2V20h20zm-5.6-3.6c-.6-.8-.4-2 .5-2.4.7-.3 1.4 0 1.7.6l.4.8.4-.8c.3-.6 1-.9 1.7-.6.9.4 1.1 1.6.5 2.4L19 12.5z",
    ),
    (
        "person",
        "M12 11a3.5 3.5 0 1 0 0-7 3.5 3.5 0 0 0 0 7zm-7.5 8c0-3.3 5-5 7.5-5s7.5 1.7 7.5 5v1.5h-15z",
    ),
    (
        "pill",
        "M5 13.6 13.6 5a4.95 4.95 0 0 1 7 7l-8.6 8.6a4.95 4.95 0 0 1-7-7zm4.3-4.3 5.4 5.4 3.5-3.5-5.4-5.4z",
    ),
    (
        "query_stats",
        "M3.5 16 8 10.5l2.5 3L15 7l3 4.5h-2.2L14.8 10l-4 6-2.6-3.1L5 17.2zM19 14a4 4 0 1 0-1.2 6.6l2.7 2.7 1.4-1.4-2.7-2.7A4 4 0 0 0 19 14z",
    ),
    (
        "schedule",
        "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm0 18a8 8 0 1 1 0-16 8 8 0 0 1 0 16zm.8-13h-1.5v6l4.7 2.8.8-1.3-4-2.4z",
    ),
    (
        "science",
        "M9 3h6v1.5l-1 .5v5l5.3 8.8A1.5 1.5 0 0 1 18 21H6a1.5 1.5 0 0 1-1.3-2.2L10 10V5l-1-.5zm2.5 8.5-3 5h7l-3-5z",
    ),
    (
        "target",
        "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm0 17a7 7 0 1 1 0-14 7 7 0 0 1 0 14zm0-3a4 4 0 1 1 0-8 4 4 0 0 1 0 8zm0-2.5a1.5 1.5 0 1 0 0-3 1.5 1.5 0 0 0 0 3z",
    ),
    (
        "vaccines",
        "M7 2h4v1.5H9.8V6H12l6 6-7 7-6-6V9h2.2V3.5H7zm1.5 8.5v2h3v1.5h-3v1.5h2v1.5h-2l2.5 2.5 4.9-4.9L12 10.2zM19.5 3l2.5 2.5-2 2L17.5 5z",
    ),
    (
        "workspace_premium",
        "M12 2a6 6 0 1 0 0 12 6 6 0 0 0 0-12zm0 2.3 1.1 2.2 2.4.4-1.7 1.7.4 2.4-2.2-1.1-2.2 1.1.4-2.4-1.7-1.7 2.4-.4zM8 14.6V22l4-2 4 2v-7.4a7.5 7.5 0 0 1-8 0z",
    ),
];

/// Path data for a glyph name, or `None` if the catalog has no such glyph.
pub fn lookup(name: &str) -> Option<&'static str> {
    GLYPHS
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| GLYPHS[i].1)
}

/// The catalog's own `'static` copy of a known glyph name.
pub fn canonical(name: &str) -> Option<&'static str> {
    GLYPHS
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| GLYPHS[i].0)
}

/// All glyph names, for the icon picker.
pub fn names() -> impl Iterator<Item = &'static str> {
    GLYPHS.iter().map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_for_binary_search() {
        for pair in GLYPHS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} before {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn lookup_round_trips_every_name() {
        for name in names() {
            assert!(lookup(name).is_some());
            assert_eq!(canonical(name), Some(name));
        }
        assert!(lookup("not-a-glyph").is_none());
    }

    #[test]
    fn template_glyphs_are_all_present() {
        for id in crate::template::template_ids() {
            for s in crate::template::template(id).unwrap().sections {
                if let Some(crate::section::IconRef::Glyph(name)) = s.icon() {
                    assert!(lookup(name).is_some(), "missing glyph {name}");
                }
            }
        }
    }
}
