//! Editing session: a document, its undo history, the selection, and the
//! in-flight preview.
//!
//! Every mutation goes through one of two doors. Preview methods mutate a
//! scratch copy of a single section so the canvas can track the pointer at
//! frame rate; commit methods fold the change into the document and record a
//! history snapshot. Document metadata (title, citation, theme) is edited
//! directly and deliberately kept out of the history.

use crate::document::Document;
use crate::geometry::{self, SectionRect};
use crate::history::History;
use crate::section::{IconOffset, IconRef, Section, SectionLayout, SectionVisual};
use crate::store::SavedProject;

pub struct EditorSession {
    pub document: Document,
    history: History,
    selected: Option<String>,
    preview: Option<Section>,
    /// Storage id once the project has been saved at least once.
    pub project_id: Option<String>,
}

impl EditorSession {
    pub fn new(document: Document) -> Self {
        let history = History::new(document.sections.clone());
        Self {
            document,
            history,
            selected: None,
            preview: None,
            project_id: None,
        }
    }

    pub fn from_template(template_id: &str) -> Self {
        Self::new(Document::from_template(template_id))
    }

    // ---- selection ----

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: Option<&str>) {
        let id = id.filter(|id| self.document.section(id).is_some());
        if self.selected.as_deref() != id {
            self.preview = None;
            self.selected = id.map(str::to_owned);
        }
    }

    /// The section as it should be drawn: the preview copy while a gesture
    /// or slider drag is live, the committed state otherwise.
    pub fn visible_section(&self, id: &str) -> Option<&Section> {
        if let Some(p) = &self.preview {
            if p.id == id {
                return Some(p);
            }
        }
        self.document.section(id)
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.selected.as_deref().and_then(|id| self.visible_section(id))
    }

    // ---- preview path (no history) ----

    fn preview_mut(&mut self, id: &str) -> Option<&mut Section> {
        if self.preview.as_ref().is_none_or(|p| p.id != id) {
            self.preview = Some(self.document.section(id)?.clone());
        }
        self.preview.as_mut()
    }

    pub fn preview_rect(&mut self, id: &str, rect: SectionRect) {
        if let Some(p) = self.preview_mut(id) {
            p.rect = rect;
        }
    }

    pub fn preview_icon_position(&mut self, id: &str, offset: IconOffset) {
        if let Some(p) = self.preview_mut(id) {
            p.icon_position = offset;
        }
    }

    pub fn preview_image_scale(&mut self, id: &str, scale: f32) {
        if let Some(p) = self.preview_mut(id) {
            p.image_scale = scale;
        }
    }

    pub fn preview_text_scale(&mut self, id: &str, scale: f32) {
        if let Some(p) = self.preview_mut(id) {
            p.text_scale = scale;
        }
    }

    pub fn discard_preview(&mut self) {
        self.preview = None;
    }

    // ---- commit path (one history entry per call) ----

    fn commit_with(&mut self, id: &str, apply: impl FnOnce(&mut Section)) {
        let Some(section) = self.document.section_mut(id) else {
            log::warn!("commit for unknown section {id}");
            self.preview = None;
            return;
        };
        apply(section);
        self.preview = None;
        self.history.commit(self.document.sections.clone());
    }

    pub fn commit_rect(&mut self, id: &str, rect: SectionRect) {
        self.commit_with(id, |s| s.rect = geometry::clamp_rect(rect));
    }

    pub fn commit_icon_position(&mut self, id: &str, offset: IconOffset) {
        self.commit_with(id, |s| {
            s.icon_position = IconOffset {
                x: geometry::clamp_percent(offset.x),
                y: geometry::clamp_percent(offset.y),
            };
        });
    }

    pub fn commit_title(&mut self, id: &str, title: String) {
        self.commit_with(id, |s| s.title = title);
    }

    pub fn commit_content(&mut self, id: &str, content: String) {
        self.commit_with(id, |s| s.content = content);
    }

    pub fn commit_statistics(&mut self, id: &str, statistics: Option<String>) {
        self.commit_with(id, |s| s.statistics = statistics);
    }

    pub fn commit_layout(&mut self, id: &str, layout: SectionLayout) {
        self.commit_with(id, |s| s.layout = layout);
    }

    pub fn commit_icon(&mut self, id: &str, icon: Option<IconRef>) {
        self.commit_with(id, |s| match icon {
            Some(icon) => s.set_icon(icon),
            None => s.clear_visual(),
        });
    }

    pub fn commit_visual(&mut self, id: &str, visual: SectionVisual) {
        self.commit_with(id, |s| s.visual = visual);
    }

    pub fn commit_image_scale(&mut self, id: &str, scale: f32) {
        self.commit_with(id, |s| s.image_scale = scale);
    }

    pub fn commit_text_scale(&mut self, id: &str, scale: f32) {
        self.commit_with(id, |s| s.text_scale = scale);
    }

    /// Commit a whole-document section rewrite (content binding). One entry
    /// regardless of how many sections changed.
    pub fn commit_sections(&mut self) {
        self.preview = None;
        self.history.commit(self.document.sections.clone());
    }

    // ---- history ----

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.preview = None;
            self.document.sections = snapshot;
            self.drop_stale_selection();
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.preview = None;
            self.document.sections = snapshot;
            self.drop_stale_selection();
        }
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.document.section(id).is_none() {
                self.selected = None;
            }
        }
    }

    // ---- document-level operations ----

    /// Replace the document with a fresh template instance. History and
    /// selection do not survive the switch.
    pub fn switch_template(&mut self, template_id: &str) {
        self.document = Document::from_template(template_id);
        self.history.reset(self.document.sections.clone());
        self.selected = None;
        self.preview = None;
    }

    pub fn load_project(&mut self, project: &SavedProject) {
        self.document = Document::from_saved(project);
        self.history.reset(self.document.sections.clone());
        self.selected = None;
        self.preview = None;
        self.project_id = Some(project.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_rect_is_one_undo_step() {
        let mut s = EditorSession::from_template("clinical-trial");
        let original = s.document.section_rect("population").unwrap();
        s.commit_rect("population", SectionRect::new(60.0, 200.0, 300.0, 200.0));
        assert!(s.can_undo());
        s.undo();
        assert_eq!(s.document.section_rect("population").unwrap(), original);
        s.redo();
        assert_eq!(
            s.document.section_rect("population").unwrap().x,
            60.0
        );
    }

    #[test]
    fn preview_does_not_touch_document_or_history() {
        let mut s = EditorSession::from_template("clinical-trial");
        let original = s.document.section_rect("population").unwrap();
        s.preview_rect("population", SectionRect::new(70.0, 210.0, 300.0, 200.0));
        assert_eq!(s.document.section_rect("population").unwrap(), original);
        assert!(!s.can_undo());
        // The canvas sees the preview.
        assert_eq!(s.visible_section("population").unwrap().rect.x, 70.0);
        s.discard_preview();
        assert_eq!(s.visible_section("population").unwrap().rect, original);
    }

    #[test]
    fn commit_clamps_out_of_bounds_rects() {
        let mut s = EditorSession::from_template("clinical-trial");
        s.commit_rect("population", SectionRect::new(-40.0, 10.0, 300.0, 200.0));
        let r = s.document.section_rect("population").unwrap();
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, crate::geometry::HEADER_HEIGHT);
    }

    #[test]
    fn selecting_unknown_id_clears_nothing_selects_nothing() {
        let mut s = EditorSession::from_template("clinical-trial");
        s.select(Some("population"));
        assert_eq!(s.selected_id(), Some("population"));
        s.select(Some("ghost"));
        assert_eq!(s.selected_id(), None);
    }

    #[test]
    fn template_switch_resets_history_and_selection() {
        let mut s = EditorSession::from_template("clinical-trial");
        s.select(Some("population"));
        s.commit_title("population", "EDITED".into());
        s.switch_template("meta-analysis");
        assert!(!s.can_undo());
        assert_eq!(s.selected_id(), None);
        assert_eq!(s.document.layout_template_id, "meta-analysis");
    }

    #[test]
    fn metadata_edits_do_not_enter_history() {
        let mut s = EditorSession::from_template("clinical-trial");
        s.document.title = "New Title".into();
        s.document.header_color = "#1565C0".into();
        assert!(!s.can_undo());
    }
}
