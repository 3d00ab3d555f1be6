//! The drawing surface: paints the document and routes pointer input
//! through the gesture machine.
//!
//! All painting and hit testing happens in canvas coordinates; a single
//! transform maps them to screen space at the current zoom. The gesture
//! machine owns click-versus-drag disambiguation, so input handling here is
//! just hit testing on press and forwarding moves and releases.

use crate::document::parse_hex_color;
use crate::export::scene::{self, DEFAULT_JOURNAL};
use crate::geometry::{BAND_HEIGHT, CANVAS_HEIGHT, CANVAS_WIDTH, FOOTER_HEIGHT, SectionRect};
use crate::gesture::{GestureMachine, GestureOutcome, Handle};
use crate::section::{ChartPoint, Section, SectionVisual};
use crate::session::EditorSession;
use crate::texture_cache::IconTextureCache;
use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2, pos2, vec2};

/// Screen-space pick radius for resize handles.
const HANDLE_PICK_RADIUS: f32 = 8.0;
const HANDLE_DRAW_RADIUS: f32 = 4.0;

fn hex_color(hex: &str) -> Color32 {
    let (r, g, b) = parse_hex_color(hex);
    Color32::from_rgb(r, g, b)
}

pub struct CanvasPanel {
    machine: GestureMachine,
    textures: IconTextureCache,
}

impl Default for CanvasPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasPanel {
    pub fn new() -> Self {
        Self {
            machine: GestureMachine::new(),
            textures: IconTextureCache::new(),
        }
    }

    pub fn invalidate_textures(&mut self) {
        self.textures.clear();
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, session: &mut EditorSession, zoom: f32) {
        let size = vec2(CANVAS_WIDTH * zoom, CANVAS_HEIGHT * zoom);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let origin = response.rect.min;
        let to_screen = move |p: Pos2| pos2(origin.x + p.x * zoom, origin.y + p.y * zoom);
        let to_canvas = move |p: Pos2| pos2((p.x - origin.x) / zoom, (p.y - origin.y) / zoom);

        self.handle_input(ui, session, &response, zoom, to_canvas);
        self.paint(ui.ctx(), &painter, session, zoom, to_screen);
        self.update_cursor(ui, session, &response, zoom, to_canvas);
    }

    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        session: &mut EditorSession,
        response: &egui::Response,
        zoom: f32,
        to_canvas: impl Fn(Pos2) -> Pos2,
    ) {
        let (pressed, down, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        let Some(screen_pos) = pointer else {
            if !self.machine.is_idle() && !down {
                self.machine.cancel();
                session.discard_preview();
            }
            return;
        };
        let pos = to_canvas(screen_pos);

        if pressed && response.hovered() {
            self.begin_gesture(session, pos, zoom);
        } else if down {
            let outcome = self.machine.pointer_moved(pos);
            Self::apply(session, outcome);
        } else if released {
            let outcome = self.machine.pointer_released(pos);
            Self::apply(session, outcome);
        }
    }

    fn begin_gesture(&mut self, session: &mut EditorSession, pos: Pos2, zoom: f32) {
        // Resize handles of the selected section win over everything. The
        // pick radius is screen pixels, so divide it out of the zoom.
        if let Some(selected) = session.selected_section() {
            let rect = selected.rect;
            let id = selected.id.clone();
            for handle in Handle::ALL {
                let hp = handle.position(rect);
                if (hp - pos).length() <= HANDLE_PICK_RADIUS / zoom {
                    self.machine.begin_resize(&id, handle, rect, pos);
                    return;
                }
            }
            // Icon micro-gesture inside the selected section's visual area.
            if let SectionVisual::Icon { .. } = selected.visual {
                let areas = scene::section_areas(selected);
                if areas.visual.contains(pos.x, pos.y) {
                    self.machine.begin_icon(
                        &id,
                        selected.icon_position,
                        vec2(areas.visual.w, areas.visual.h),
                        pos,
                    );
                    return;
                }
            }
        }

        // Topmost section under the pointer; last in the list draws last.
        let hit = session
            .document
            .sections
            .iter()
            .rev()
            .find(|s| s.rect.contains(pos.x, pos.y))
            .map(|s| (s.id.clone(), s.rect));
        match hit {
            Some((id, rect)) => self.machine.begin_section(&id, rect, pos),
            // Pressing empty canvas deselects immediately.
            None => session.select(None),
        }
    }

    fn apply(session: &mut EditorSession, outcome: GestureOutcome) {
        match outcome {
            GestureOutcome::None => {}
            GestureOutcome::Selected(id) => session.select(Some(&id)),
            GestureOutcome::RectPreview { id, rect } => session.preview_rect(&id, rect),
            GestureOutcome::RectCommitted { id, rect } => {
                session.select(Some(&id));
                session.commit_rect(&id, rect);
            }
            GestureOutcome::IconPreview { id, offset } => {
                session.preview_icon_position(&id, offset);
            }
            GestureOutcome::IconCommitted { id, offset } => {
                session.commit_icon_position(&id, offset);
            }
        }
    }

    fn update_cursor(
        &self,
        ui: &egui::Ui,
        session: &EditorSession,
        response: &egui::Response,
        zoom: f32,
        to_canvas: impl Fn(Pos2) -> Pos2,
    ) {
        if !response.hovered() {
            return;
        }
        let Some(screen_pos) = response.hover_pos() else {
            return;
        };
        let pos = to_canvas(screen_pos);
        if let Some(selected) = session.selected_section() {
            for handle in Handle::ALL {
                let hp = handle.position(selected.rect);
                if (hp - pos).length() <= HANDLE_PICK_RADIUS / zoom {
                    ui.ctx().set_cursor_icon(handle.cursor_icon());
                    return;
                }
            }
        }
        let over_section = session
            .document
            .sections
            .iter()
            .any(|s| s.rect.contains(pos.x, pos.y));
        if over_section {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Move);
        }
    }

    // ---- painting ----

    fn paint(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        session: &EditorSession,
        zoom: f32,
        to_screen: impl Fn(Pos2) -> Pos2 + Copy,
    ) {
        let doc = &session.document;
        let canvas_rect = Rect::from_two_pos(
            to_screen(pos2(0.0, 0.0)),
            to_screen(pos2(CANVAS_WIDTH, CANVAS_HEIGHT)),
        );
        painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);

        // Header band and title.
        let theme = hex_color(&doc.header_color);
        let band = Rect::from_two_pos(
            to_screen(pos2(0.0, 0.0)),
            to_screen(pos2(CANVAS_WIDTH, BAND_HEIGHT)),
        );
        painter.rect_filled(band, 0.0, theme);
        let journal = if doc.journal_name.is_empty() {
            DEFAULT_JOURNAL
        } else {
            &doc.journal_name
        };
        painter.text(
            to_screen(pos2(40.0, BAND_HEIGHT / 2.0)),
            egui::Align2::LEFT_CENTER,
            journal,
            FontId::proportional(26.0 * zoom),
            Color32::WHITE,
        );
        let title_pos = to_screen(pos2(40.0, BAND_HEIGHT + 45.0));
        let accent_rect = painter.text(
            title_pos,
            egui::Align2::LEFT_CENTER,
            crate::document::TITLE_ACCENT_PREFIX,
            FontId::proportional(30.0 * zoom),
            theme,
        );
        painter.text(
            pos2(accent_rect.max.x, title_pos.y),
            egui::Align2::LEFT_CENTER,
            &doc.title,
            FontId::proportional(30.0 * zoom),
            hex_color(scene::BODY_TEXT),
        );

        for section in &doc.sections {
            let visible = session.visible_section(&section.id).unwrap_or(section);
            self.paint_section(ctx, painter, visible, &doc.header_color, zoom, to_screen);
        }

        self.paint_footer(painter, doc, zoom, to_screen);

        if let Some(selected) = session.selected_section() {
            self.paint_selection(painter, selected.rect, zoom, to_screen);
        }
    }

    fn paint_footer(
        &self,
        painter: &egui::Painter,
        doc: &crate::document::Document,
        zoom: f32,
        to_screen: impl Fn(Pos2) -> Pos2,
    ) {
        let top = CANVAS_HEIGHT - FOOTER_HEIGHT;
        let band = Rect::from_two_pos(
            to_screen(pos2(0.0, top)),
            to_screen(pos2(CANVAS_WIDTH, CANVAS_HEIGHT)),
        );
        painter.rect_filled(band, 0.0, hex_color(scene::FOOTER_FILL));
        painter.line_segment(
            [to_screen(pos2(0.0, top)), to_screen(pos2(CANVAS_WIDTH, top))],
            Stroke::new(1.0, hex_color(scene::FOOTER_LINE)),
        );
        painter.text(
            to_screen(pos2(40.0, top + FOOTER_HEIGHT / 2.0)),
            egui::Align2::LEFT_CENTER,
            &doc.citation,
            FontId::proportional(12.0 * zoom),
            hex_color(scene::CITATION_TEXT),
        );
    }

    fn paint_section(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        section: &Section,
        theme: &str,
        zoom: f32,
        to_screen: impl Fn(Pos2) -> Pos2 + Copy,
    ) {
        let r = section.rect;
        let screen = Rect::from_two_pos(
            to_screen(pos2(r.x, r.y)),
            to_screen(pos2(r.right(), r.bottom())),
        );
        painter.rect(
            screen,
            8.0 * zoom,
            hex_color(scene::SECTION_FILL),
            Stroke::new(1.0, hex_color(scene::SECTION_STROKE)),
        );

        let areas = scene::section_areas(section);
        painter.text(
            to_screen(pos2(areas.title_origin.0, areas.title_origin.1)),
            egui::Align2::LEFT_TOP,
            &section.title,
            FontId::proportional(14.0 * section.text_scale * zoom),
            hex_color(theme),
        );

        match &section.visual {
            SectionVisual::None => {}
            SectionVisual::Icon { icon } => {
                let area = areas.visual;
                if area.w > 0.0 && area.h > 0.0 {
                    let side = area.w.min(area.h) * 0.6 * section.image_scale;
                    let cx = area.x + section.icon_position.x / 100.0 * area.w;
                    let cy = area.y + section.icon_position.y / 100.0 * area.h;
                    let icon_rect = Rect::from_two_pos(
                        to_screen(pos2(cx - side / 2.0, cy - side / 2.0)),
                        to_screen(pos2(cx + side / 2.0, cy + side / 2.0)),
                    );
                    let texture = self.textures.texture(ctx, icon, theme);
                    painter.image(
                        texture,
                        icon_rect,
                        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
            }
            SectionVisual::Chart { points } => {
                self.paint_chart(painter, points, areas.visual, zoom, to_screen);
            }
        }

        self.paint_body_text(painter, section, areas.text, zoom, to_screen);
    }

    fn paint_body_text(
        &self,
        painter: &egui::Painter,
        section: &Section,
        area: SectionRect,
        zoom: f32,
        to_screen: impl Fn(Pos2) -> Pos2,
    ) {
        let size = 12.0 * section.text_scale;
        let line_h = size * 1.35;
        let mut y = area.y;
        for line in scene::wrap_text(section.display_content(), area.w, size) {
            if y + size > area.bottom() {
                break;
            }
            if !line.is_empty() {
                painter.text(
                    to_screen(pos2(area.x, y)),
                    egui::Align2::LEFT_TOP,
                    line,
                    FontId::proportional(size * zoom),
                    hex_color(scene::BODY_TEXT),
                );
            }
            y += line_h;
        }
        if let Some(stats) = &section.statistics {
            painter.text(
                to_screen(pos2(area.x, area.bottom())),
                egui::Align2::LEFT_BOTTOM,
                stats,
                FontId::proportional(16.0 * section.text_scale * zoom),
                hex_color(scene::BODY_TEXT),
            );
        }
    }

    fn paint_chart(
        &self,
        painter: &egui::Painter,
        points: &[ChartPoint],
        area: SectionRect,
        zoom: f32,
        to_screen: impl Fn(Pos2) -> Pos2,
    ) {
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
            let bar = Rect::from_two_pos(
                to_screen(pos2(x, area.y + plot_h - h)),
                to_screen(pos2(x + bar_w, area.y + plot_h)),
            );
            painter.rect_filled(bar, 2.0 * zoom, hex_color(scene::CHART_BAR));
            painter.text(
                to_screen(pos2(x + bar_w / 2.0, area.y + plot_h + 2.0)),
                egui::Align2::CENTER_TOP,
                &p.label,
                FontId::proportional(10.0 * zoom),
                hex_color(scene::BODY_TEXT),
            );
        }
    }

    fn paint_selection(
        &self,
        painter: &egui::Painter,
        rect: SectionRect,
        zoom: f32,
        to_screen: impl Fn(Pos2) -> Pos2,
    ) {
        let screen = Rect::from_two_pos(
            to_screen(pos2(rect.x, rect.y)),
            to_screen(pos2(rect.right(), rect.bottom())),
        );
        let accent = Color32::from_rgb(0x3B, 0x82, 0xF6);
        painter.rect_stroke(screen, 8.0 * zoom, Stroke::new(2.0, accent));
        for handle in Handle::ALL {
            let hp = handle.position(rect);
            let center = to_screen(pos2(hp.x, hp.y));
            painter.circle(
                center,
                HANDLE_DRAW_RADIUS,
                Color32::WHITE,
                Stroke::new(1.5, accent),
            );
        }
    }
}

impl CanvasPanel {
    /// Content size at a zoom level, for scroll-area sizing.
    pub fn desired_size(zoom: f32) -> Vec2 {
        vec2(CANVAS_WIDTH * zoom, CANVAS_HEIGHT * zoom)
    }
}
