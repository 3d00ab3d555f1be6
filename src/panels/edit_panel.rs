//! Right-hand property panel.
//!
//! With a section selected it edits that section; otherwise it edits
//! document metadata, the theme, the template, and article import. Text
//! fields edit a local draft and commit on focus loss so one editing pass
//! produces one history entry instead of one per keystroke.

use crate::icons;
use crate::section::{ChartPoint, IconRef, SectionLayout, SectionVisual};
use crate::session::EditorSession;
use crate::template;

/// Theme swatches offered next to the journal-derived default.
pub const THEME_SWATCHES: [&str; 6] = [
    "#C62828", "#1565C0", "#2E7D32", "#F9A825", "#6A1B9A", "#455A64",
];

/// Requests the panel cannot satisfy on its own; the app shell owns the
/// services and the texture cache.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    PolishRequested { id: String, text: String },
    ExtractRequested { url: String },
    ThemeChanged,
}

/// Which async requests are currently running, to disable their buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelBusy {
    pub polishing: bool,
    pub extracting: bool,
}

#[derive(Default)]
pub struct EditPanel {
    draft_id: Option<String>,
    title_draft: String,
    content_draft: String,
    stats_draft: String,
    chart_draft: Vec<ChartPoint>,
    source_url: String,
}

impl EditPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all drafts so they resync from the document on the next frame.
    /// Called after binding or project load rewrites sections wholesale.
    pub fn clear_drafts(&mut self) {
        self.draft_id = None;
    }

    /// Replace the content draft after an out-of-panel rewrite (polishing).
    pub fn set_content_draft(&mut self, id: &str, text: &str) {
        if self.draft_id.as_deref() == Some(id) {
            self.content_draft = text.to_owned();
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        session: &mut EditorSession,
        busy: PanelBusy,
    ) -> Vec<EditAction> {
        let mut actions = Vec::new();
        match session.selected_id().map(str::to_owned) {
            Some(id) => self.section_ui(ui, session, &id, busy, &mut actions),
            None => self.document_ui(ui, session, busy, &mut actions),
        }
        actions
    }

    fn sync_drafts(&mut self, session: &EditorSession, id: &str) {
        if self.draft_id.as_deref() == Some(id) {
            return;
        }
        let Some(section) = session.document.section(id) else {
            return;
        };
        self.draft_id = Some(id.to_owned());
        self.title_draft = section.title.clone();
        self.content_draft = section.content.clone();
        self.stats_draft = section.statistics.clone().unwrap_or_default();
        self.chart_draft = section.chart().map(<[_]>::to_vec).unwrap_or_default();
    }

    fn section_ui(
        &mut self,
        ui: &mut egui::Ui,
        session: &mut EditorSession,
        id: &str,
        busy: PanelBusy,
        actions: &mut Vec<EditAction>,
    ) {
        self.sync_drafts(session, id);
        ui.heading("Section");
        ui.separator();

        ui.label("Title");
        let title = ui.text_edit_singleline(&mut self.title_draft);
        if title.lost_focus() && self.title_draft != session.document.section(id).map_or("", |s| &s.title)
        {
            session.commit_title(id, self.title_draft.clone());
        }

        ui.label("Content");
        let content = ui.add(
            egui::TextEdit::multiline(&mut self.content_draft)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        if content.lost_focus()
            && self.content_draft != session.document.section(id).map_or("", |s| &s.content)
        {
            session.commit_content(id, self.content_draft.clone());
        }
        ui.add_enabled_ui(!busy.polishing && !self.content_draft.is_empty(), |ui| {
            if ui.button("Polish text").clicked() {
                actions.push(EditAction::PolishRequested {
                    id: id.to_owned(),
                    text: self.content_draft.clone(),
                });
            }
        });
        if busy.polishing {
            ui.spinner();
        }

        ui.label("Key statistic");
        let stats = ui.text_edit_singleline(&mut self.stats_draft);
        if stats.lost_focus() {
            let value = (!self.stats_draft.trim().is_empty()).then(|| self.stats_draft.clone());
            if value != session.document.section(id).and_then(|s| s.statistics.clone()) {
                session.commit_statistics(id, value);
            }
        }

        ui.separator();
        self.layout_ui(ui, session, id);
        ui.separator();
        self.visual_ui(ui, session, id);
        ui.separator();
        self.scale_ui(ui, session, id);
    }

    fn layout_ui(&mut self, ui: &mut egui::Ui, session: &mut EditorSession, id: &str) {
        let Some(current) = session.document.section(id).map(|s| s.layout) else {
            return;
        };
        ui.label("Layout");
        ui.horizontal(|ui| {
            for (label, layout) in [
                ("Top", SectionLayout::Top),
                ("Bottom", SectionLayout::Bottom),
                ("Left", SectionLayout::Left),
                ("Right", SectionLayout::Right),
            ] {
                if ui.selectable_label(current == layout, label).clicked() && current != layout {
                    session.commit_layout(id, layout);
                }
            }
        });
    }

    fn visual_ui(&mut self, ui: &mut egui::Ui, session: &mut EditorSession, id: &str) {
        let Some(section) = session.document.section(id) else {
            return;
        };
        ui.label("Visual");
        let current_glyph = match section.icon() {
            Some(IconRef::Glyph(name)) => Some(name.clone()),
            _ => None,
        };
        let is_chart = section.chart().is_some();

        egui::ComboBox::from_id_salt("icon_picker")
            .selected_text(current_glyph.as_deref().unwrap_or("(no icon)"))
            .show_ui(ui, |ui| {
                for name in icons::names() {
                    let selected = current_glyph.as_deref() == Some(name);
                    if ui.selectable_label(selected, name).clicked() && !selected {
                        session.commit_icon(id, Some(IconRef::Glyph(name.to_owned())));
                    }
                }
            });

        ui.horizontal(|ui| {
            if ui
                .selectable_label(is_chart, "Chart")
                .on_hover_text("Replace the icon with a bar chart")
                .clicked()
                && !is_chart
            {
                let points = if self.chart_draft.is_empty() {
                    vec![
                        ChartPoint {
                            label: "A".into(),
                            value: 1.0,
                        },
                        ChartPoint {
                            label: "B".into(),
                            value: 2.0,
                        },
                    ]
                } else {
                    self.chart_draft.clone()
                };
                self.chart_draft = points.clone();
                session.commit_visual(id, SectionVisual::Chart { points });
            }
            if ui.button("Remove visual").clicked() {
                session.commit_icon(id, None);
            }
        });

        if is_chart {
            self.chart_editor(ui, session, id);
        }
    }

    fn chart_editor(&mut self, ui: &mut egui::Ui, session: &mut EditorSession, id: &str) {
        let mut remove = None;
        for (i, point) in self.chart_draft.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut point.label);
                ui.add(egui::DragValue::new(&mut point.value).speed(0.5));
                if ui.small_button("x").clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            self.chart_draft.remove(i);
        }
        ui.horizontal(|ui| {
            if ui.button("Add bar").clicked() {
                self.chart_draft.push(ChartPoint {
                    label: format!("#{}", self.chart_draft.len() + 1),
                    value: 1.0,
                });
            }
            let dirty = session.document.section(id).and_then(|s| s.chart())
                != Some(self.chart_draft.as_slice());
            if ui.add_enabled(dirty, egui::Button::new("Apply chart")).clicked() {
                session.commit_visual(
                    id,
                    SectionVisual::Chart {
                        points: self.chart_draft.clone(),
                    },
                );
            }
        });
    }

    fn scale_ui(&mut self, ui: &mut egui::Ui, session: &mut EditorSession, id: &str) {
        let Some(section) = session.visible_section(id) else {
            return;
        };
        let mut image_scale = section.image_scale;
        let mut text_scale = section.text_scale;

        ui.label("Icon size");
        let img = ui.add(egui::Slider::new(&mut image_scale, 0.5..=2.0));
        if img.dragged() || img.changed() {
            session.preview_image_scale(id, image_scale);
        }
        if img.drag_stopped() {
            session.commit_image_scale(id, image_scale);
        }

        ui.label("Text size");
        let txt = ui.add(egui::Slider::new(&mut text_scale, 0.5..=2.0));
        if txt.dragged() || txt.changed() {
            session.preview_text_scale(id, text_scale);
        }
        if txt.drag_stopped() {
            session.commit_text_scale(id, text_scale);
        }
    }

    fn document_ui(
        &mut self,
        ui: &mut egui::Ui,
        session: &mut EditorSession,
        busy: PanelBusy,
        actions: &mut Vec<EditAction>,
    ) {
        self.draft_id = None;
        ui.heading("Document");
        ui.separator();

        // Metadata edits are deliberate non-history edits.
        ui.label("Title");
        ui.text_edit_singleline(&mut session.document.title);
        ui.label("Journal");
        ui.text_edit_singleline(&mut session.document.journal_name);
        ui.label("Citation");
        ui.text_edit_singleline(&mut session.document.citation);

        ui.separator();
        ui.label("Theme");
        ui.horizontal(|ui| {
            for swatch in THEME_SWATCHES {
                let (r, g, b) = crate::document::parse_hex_color(swatch);
                let color = egui::Color32::from_rgb(r, g, b);
                let selected = session.document.header_color.eq_ignore_ascii_case(swatch);
                let button = egui::Button::new(if selected { "●" } else { "" })
                    .fill(color)
                    .min_size(egui::vec2(24.0, 24.0));
                if ui.add(button).clicked() && !selected {
                    session.document.header_color = swatch.to_owned();
                    actions.push(EditAction::ThemeChanged);
                }
            }
        });
        if ui.button("Reset theme color").clicked() {
            let color = crate::document::DEFAULT_HEADER_COLOR;
            if session.document.header_color != color {
                session.document.header_color = color.to_owned();
                actions.push(EditAction::ThemeChanged);
            }
        }

        ui.separator();
        ui.label("Template");
        template_picker(ui, session);

        ui.separator();
        ui.label("Import article");
        ui.text_edit_singleline(&mut self.source_url);
        ui.add_enabled_ui(!busy.extracting && !self.source_url.trim().is_empty(), |ui| {
            if ui.button("Extract & fill").clicked() {
                actions.push(EditAction::ExtractRequested {
                    url: self.source_url.trim().to_owned(),
                });
            }
        });
        if busy.extracting {
            ui.spinner();
        }
    }
}

fn template_picker(ui: &mut egui::Ui, session: &mut EditorSession) {
    let current = session.document.layout_template_id.clone();
    let current_name = template::template(&current)
        .map(|t| t.name)
        .unwrap_or("Unknown");
    egui::ComboBox::from_id_salt("template_picker")
        .selected_text(current_name)
        .show_ui(ui, |ui| {
            for id in template::template_ids() {
                let Some(t) = template::template(id) else {
                    continue;
                };
                if ui.selectable_label(current == *id, t.name).clicked() && current != *id {
                    // Switching discards edits and history.
                    session.switch_template(id);
                }
            }
        });
}
