//! Application shell: window chrome, toolbars, background jobs.

use crate::binder;
use crate::export::deck;
use crate::export::raster::{self, RasterFormat};
use crate::export::sanitize_file_stem;
use crate::panels::edit_panel::{EditAction, PanelBusy};
use crate::panels::{CanvasPanel, EditPanel};
use crate::services::{ArticleExtractor, ArticleSource, InFlight, TextPolisher};
use crate::session::EditorSession;
use crate::store::{ProjectStore, SavedProject};
use crate::template::DEFAULT_TEMPLATE;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 2.0;
const ZOOM_STEP: f32 = 0.1;

const POLISH_INSTRUCTION: &str =
    "Rewrite this section text as concise abstract-panel prose. Keep every number.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportKind {
    Png { dpi: u32 },
    Jpeg,
    Pptx,
}

impl ExportKind {
    fn default_file_name(self, title: &str) -> String {
        let stem = sanitize_file_stem(title);
        match self {
            ExportKind::Png { .. } => format!("{stem}.png"),
            ExportKind::Jpeg => format!("{stem}.jpg"),
            ExportKind::Pptx => format!("{stem}.pptx"),
        }
    }
}

#[derive(Debug, Clone)]
enum ExportStatus {
    Running,
    Done(PathBuf),
    Failed(String),
}

/// External services the app can run with. Both are optional; the related
/// UI disables itself when a service is absent.
#[derive(Default)]
pub struct AppServices {
    pub extractor: Option<Arc<dyn ArticleExtractor>>,
    pub polisher: Option<Arc<dyn TextPolisher>>,
}

pub struct AbsketchApp {
    session: EditorSession,
    canvas: CanvasPanel,
    edit: EditPanel,
    zoom: f32,
    store: ProjectStore,
    services: AppServices,
    extract_inflight: InFlight<binder::ExtractedArticle>,
    polish_inflight: InFlight<String>,
    polish_target: Option<String>,
    export_status: Arc<Mutex<Option<ExportStatus>>>,
    status_line: Option<String>,
}

impl AbsketchApp {
    pub fn new(cc: &eframe::CreationContext<'_>, services: AppServices) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let store_path = eframe::storage_dir("absketch")
            .unwrap_or_else(|| PathBuf::from("."))
            .join("projects.json");
        Self {
            session: EditorSession::from_template(DEFAULT_TEMPLATE),
            canvas: CanvasPanel::new(),
            edit: EditPanel::new(),
            zoom: 0.75,
            store: ProjectStore::new(store_path),
            services,
            extract_inflight: InFlight::idle(),
            polish_inflight: InFlight::idle(),
            polish_target: None,
            export_status: Arc::new(Mutex::new(None)),
            status_line: None,
        }
    }

    fn poll_jobs(&mut self) {
        if let Some(result) = self.extract_inflight.try_take() {
            match result {
                Ok(article) => {
                    binder::bind_extracted(&mut self.session.document, &article);
                    self.session.commit_sections();
                    self.edit.clear_drafts();
                    self.canvas.invalidate_textures();
                    self.status_line = Some(format!("Imported \"{}\"", article.metadata.title));
                }
                Err(e) => {
                    log::error!("article extraction failed: {e}");
                    self.status_line = Some(format!("Import failed: {e}"));
                }
            }
        }
        if let Some(result) = self.polish_inflight.try_take() {
            let target = self.polish_target.take();
            match (result, target) {
                (Ok(text), Some(id)) => {
                    self.edit.set_content_draft(&id, &text);
                    self.session.commit_content(&id, text);
                }
                (Err(e), _) => {
                    log::error!("polish failed: {e}");
                    self.status_line = Some(format!("Polish failed: {e}"));
                }
                (Ok(_), None) => {}
            }
        }
        let status = self.export_status.lock().clone();
        if let Some(status) = status {
            match status {
                ExportStatus::Running => {}
                ExportStatus::Done(path) => {
                    self.status_line = Some(format!("Exported to {}", path.display()));
                    *self.export_status.lock() = None;
                }
                ExportStatus::Failed(e) => {
                    self.status_line = Some(format!("Export failed: {e}"));
                    *self.export_status.lock() = None;
                }
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let undo = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Z);
        let redo = egui::KeyboardShortcut::new(
            egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
            egui::Key::Z,
        );
        let redo_alt = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Y);
        ctx.input_mut(|i| {
            if i.consume_shortcut(&redo) || i.consume_shortcut(&redo_alt) {
                self.session.redo();
            } else if i.consume_shortcut(&undo) {
                self.session.undo();
            }
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_enabled_ui(self.session.can_undo(), |ui| {
                if ui.button("⟲ Undo").clicked() {
                    self.session.undo();
                }
            });
            ui.add_enabled_ui(self.session.can_redo(), |ui| {
                if ui.button("⟳ Redo").clicked() {
                    self.session.redo();
                }
            });
            ui.separator();

            if ui.button("−").clicked() {
                self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
            }
            ui.label(format!("{:.0}%", self.zoom * 100.0));
            if ui.button("+").clicked() {
                self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
            }
            ui.separator();

            let exporting = matches!(*self.export_status.lock(), Some(ExportStatus::Running));
            ui.add_enabled_ui(!exporting, |ui| {
                ui.menu_button("Export", |ui| {
                    if ui.button("PNG (screen, 96 dpi)").clicked() {
                        self.start_export(ExportKind::Png { dpi: 96 });
                        ui.close_menu();
                    }
                    if ui.button("PNG (print, 300 dpi)").clicked() {
                        self.start_export(ExportKind::Png { dpi: 300 });
                        ui.close_menu();
                    }
                    if ui.button("JPEG (96 dpi)").clicked() {
                        self.start_export(ExportKind::Jpeg);
                        ui.close_menu();
                    }
                    if ui.button("PowerPoint (.pptx)").clicked() {
                        self.start_export(ExportKind::Pptx);
                        ui.close_menu();
                    }
                });
            });
            if exporting {
                ui.spinner();
            }

            if ui.button("Save").clicked() {
                self.save_project();
            }

            if let Some(status) = &self.status_line {
                ui.separator();
                ui.label(status.clone());
            }
        });
    }

    fn save_project(&mut self) {
        let saved =
            SavedProject::from_document(&self.session.document, self.session.project_id.as_deref());
        match self.store.save(&saved) {
            Ok(()) => {
                self.session.project_id = Some(saved.id);
                self.status_line = Some("Project saved".to_owned());
            }
            Err(e) => {
                log::error!("save failed: {e}");
                self.status_line = Some(format!("Save failed: {e}"));
            }
        }
    }

    fn start_export(&mut self, kind: ExportKind) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(kind.default_file_name(&self.session.document.title))
            .save_file()
        else {
            return;
        };
        let doc = self.session.document.clone();
        let status = Arc::clone(&self.export_status);
        *status.lock() = Some(ExportStatus::Running);
        std::thread::spawn(move || {
            let result = match kind {
                ExportKind::Png { dpi } => {
                    raster::export_image(&doc, dpi as f32, RasterFormat::Png)
                }
                ExportKind::Jpeg => raster::export_image(&doc, 96.0, RasterFormat::Jpeg),
                ExportKind::Pptx => Ok(deck::export_pptx(&doc)),
            };
            let outcome = result.and_then(|bytes| {
                std::fs::write(&path, bytes)?;
                Ok(())
            });
            *status.lock() = Some(match outcome {
                Ok(()) => ExportStatus::Done(path),
                Err(e) => ExportStatus::Failed(e.to_string()),
            });
        });
    }

    fn dispatch_action(&mut self, action: EditAction) {
        match action {
            EditAction::PolishRequested { id, text } => match &self.services.polisher {
                Some(polisher) => {
                    self.polish_target = Some(id);
                    self.polish_inflight
                        .dispatch(polisher.polish(text, POLISH_INSTRUCTION.to_owned()));
                }
                None => {
                    self.status_line = Some("No text service configured".to_owned());
                }
            },
            EditAction::ExtractRequested { url } => match &self.services.extractor {
                Some(extractor) => {
                    self.extract_inflight
                        .dispatch(extractor.extract(ArticleSource::Url(url)));
                }
                None => {
                    self.status_line = Some("No extraction service configured".to_owned());
                }
            },
            EditAction::ThemeChanged => self.canvas.invalidate_textures(),
        }
    }
}

impl eframe::App for AbsketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs();
        self.handle_shortcuts(ctx);
        if self.extract_inflight.is_pending() || self.polish_inflight.is_pending() {
            // Keep polling while a worker is out.
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::SidePanel::right("edit_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                let busy = PanelBusy {
                    polishing: self.polish_inflight.is_pending(),
                    extracting: self.extract_inflight.is_pending(),
                };
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let actions = self.edit.ui(ui, &mut self.session, busy);
                    for action in actions {
                        self.dispatch_action(action);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.canvas.ui(ui, &mut self.session, self.zoom);
            });
        });
    }
}
