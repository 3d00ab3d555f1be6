use serde::{Deserialize, Serialize};

/// Fixed canvas dimensions, in canvas pixels.
pub const CANVAS_WIDTH: f32 = 1280.0;
pub const CANVAS_HEIGHT: f32 = 720.0;

/// Header band: 60 px color bar plus 90 px title area. Sections may never
/// overlap this band or the footer.
pub const HEADER_HEIGHT: f32 = 150.0;
pub const BAND_HEIGHT: f32 = 60.0;
pub const FOOTER_HEIGHT: f32 = 30.0;

/// Minimum usable section size on either axis.
pub const MIN_SECTION_SIZE: f32 = 50.0;

/// Divisor for converting canvas pixels to slide-deck inches.
pub const PX_PER_INCH: f32 = 128.0;

/// Interior padding of a section box.
pub const SECTION_PADDING: f32 = 16.0;
/// Height reserved for the section title row inside the box.
pub const TITLE_ROW_HEIGHT: f32 = 20.0;

/// Axis-aligned section rectangle in canvas pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl SectionRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// True when the rect satisfies all canvas invariants: inside the
    /// header/footer-excluded area and at least the minimum size.
    pub fn is_valid(&self) -> bool {
        self.x >= 0.0
            && self.right() <= CANVAS_WIDTH
            && self.y >= HEADER_HEIGHT
            && self.bottom() <= CANVAS_HEIGHT - FOOTER_HEIGHT
            && self.w >= MIN_SECTION_SIZE
            && self.h >= MIN_SECTION_SIZE
    }
}

impl From<SectionRect> for egui::Rect {
    fn from(r: SectionRect) -> Self {
        egui::Rect::from_min_size(egui::pos2(r.x, r.y), egui::vec2(r.w, r.h))
    }
}

/// Translate `start` by `(dx, dy)` and clamp the origin so the rect stays
/// within the header/footer-excluded canvas area. Size is never changed.
pub fn clamp_drag(start: SectionRect, dx: f32, dy: f32) -> SectionRect {
    let max_y = CANVAS_HEIGHT - FOOTER_HEIGHT;
    let x = (start.x + dx).clamp(0.0, (CANVAS_WIDTH - start.w).max(0.0));
    let y = (start.y + dy).clamp(HEADER_HEIGHT, (max_y - start.h).max(HEADER_HEIGHT));
    SectionRect { x, y, ..start }
}

/// Clamp an arbitrary rect into the valid canvas area, flooring the size at
/// the minimum. Used at commit boundaries so geometry violations are
/// corrected rather than raised.
pub fn clamp_rect(rect: SectionRect) -> SectionRect {
    let w = rect.w.max(MIN_SECTION_SIZE).min(CANVAS_WIDTH);
    let max_h = CANVAS_HEIGHT - FOOTER_HEIGHT - HEADER_HEIGHT;
    let h = rect.h.max(MIN_SECTION_SIZE).min(max_h);
    clamp_drag(SectionRect { w, h, ..rect }, 0.0, 0.0)
}

/// Canvas pixels to slide-deck inches.
pub fn px_to_inch(px: f32) -> f32 {
    px / PX_PER_INCH
}

/// Clamp a percentage-space coordinate to [0, 100].
pub fn clamp_percent(v: f32) -> f32 {
    v.clamp(0.0, 100.0)
}
