//! Pointer-driven move/resize state machine.
//!
//! The machine is pure: it consumes canvas-space pointer positions and
//! produces preview and commit outcomes. The UI layer is responsible for hit
//! testing (section bodies, resize handles, icon sub-areas) and for applying
//! outcomes to the editing session. Exactly one gesture is active at a time.

use crate::geometry::{
    self, CANVAS_HEIGHT, CANVAS_WIDTH, FOOTER_HEIGHT, HEADER_HEIGHT, MIN_SECTION_SIZE, SectionRect,
};
use crate::section::IconOffset;
use egui::{CursorIcon, Pos2, Vec2};

/// Movement below this threshold is treated as a click (selection), not a
/// drag.
pub const CLICK_TOLERANCE: f32 = 3.0;

/// One of the eight resize handles attached to a selected section. Each
/// handle constrains which rect fields may change; the opposite edge is held
/// fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::North,
        Handle::NorthEast,
        Handle::East,
        Handle::SouthEast,
        Handle::South,
        Handle::SouthWest,
        Handle::West,
    ];

    fn touches_north(self) -> bool {
        matches!(self, Handle::North | Handle::NorthEast | Handle::NorthWest)
    }

    fn touches_south(self) -> bool {
        matches!(self, Handle::South | Handle::SouthEast | Handle::SouthWest)
    }

    fn touches_east(self) -> bool {
        matches!(self, Handle::East | Handle::NorthEast | Handle::SouthEast)
    }

    fn touches_west(self) -> bool {
        matches!(self, Handle::West | Handle::NorthWest | Handle::SouthWest)
    }

    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            Handle::North | Handle::South => CursorIcon::ResizeVertical,
            Handle::East | Handle::West => CursorIcon::ResizeHorizontal,
            Handle::NorthWest | Handle::SouthEast => CursorIcon::ResizeNwSe,
            Handle::NorthEast | Handle::SouthWest => CursorIcon::ResizeNeSw,
        }
    }

    /// Handle center position on a section rect, for drawing and hit
    /// testing.
    pub fn position(self, rect: SectionRect) -> Pos2 {
        let x = if self.touches_west() {
            rect.x
        } else if self.touches_east() {
            rect.right()
        } else {
            rect.x + rect.w / 2.0
        };
        let y = if self.touches_north() {
            rect.y
        } else if self.touches_south() {
            rect.bottom()
        } else {
            rect.y + rect.h / 2.0
        };
        Pos2::new(x, y)
    }

    /// Apply a cumulative pointer delta to `start`. Width/height are floored
    /// at the minimum size, the box is kept inside the header/footer-excluded
    /// canvas, and the edge opposite the handle never moves.
    pub fn apply(self, start: SectionRect, delta: Vec2) -> SectionRect {
        let mut r = start;
        if self.touches_east() {
            r.w = (start.w + delta.x)
                .max(MIN_SECTION_SIZE)
                .min(CANVAS_WIDTH - start.x);
        }
        if self.touches_west() {
            let dx = delta.x.max(-start.x).min(start.w - MIN_SECTION_SIZE);
            r.x = start.x + dx;
            r.w = start.w - dx;
        }
        if self.touches_south() {
            r.h = (start.h + delta.y)
                .max(MIN_SECTION_SIZE)
                .min(CANVAS_HEIGHT - FOOTER_HEIGHT - start.y);
        }
        if self.touches_north() {
            let dy = delta
                .y
                .max(-(start.y - HEADER_HEIGHT))
                .min(start.h - MIN_SECTION_SIZE);
            r.y = start.y + dy;
            r.h = start.h - dy;
        }
        r
    }
}

/// What the UI layer should do in response to a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    None,
    /// Click on a section without exceeding the tolerance: select it.
    Selected(String),
    /// Live move/resize preview; not a history boundary.
    RectPreview { id: String, rect: SectionRect },
    /// Gesture released: commit the final rect.
    RectCommitted { id: String, rect: SectionRect },
    /// Live icon-offset preview within the visual sub-area.
    IconPreview { id: String, offset: IconOffset },
    /// Icon micro-gesture released: commit the offset.
    IconCommitted { id: String, offset: IconOffset },
}

#[derive(Debug, Clone)]
enum GestureState {
    Idle,
    /// Pointer down on a section body, still within the click tolerance.
    Pressed {
        id: String,
        start: Pos2,
        origin: SectionRect,
    },
    Dragging {
        id: String,
        start: Pos2,
        origin: SectionRect,
        current: SectionRect,
    },
    Resizing {
        id: String,
        handle: Handle,
        start: Pos2,
        origin: SectionRect,
        current: SectionRect,
    },
    DraggingIcon {
        id: String,
        start: Pos2,
        origin: IconOffset,
        /// Size of the visual sub-area, for pixel-to-percent conversion.
        area: Vec2,
        current: IconOffset,
    },
}

/// Tracks the single active pointer gesture.
#[derive(Debug)]
pub struct GestureMachine {
    state: GestureState,
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureMachine {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    /// Pointer down on a section body. A new gesture cannot start while
    /// another is active.
    pub fn begin_section(&mut self, id: &str, rect: SectionRect, pos: Pos2) {
        if !self.is_idle() {
            return;
        }
        self.state = GestureState::Pressed {
            id: id.to_owned(),
            start: pos,
            origin: rect,
        };
    }

    /// Pointer down on a resize handle of the selected section.
    pub fn begin_resize(&mut self, id: &str, handle: Handle, rect: SectionRect, pos: Pos2) {
        if !self.is_idle() {
            return;
        }
        self.state = GestureState::Resizing {
            id: id.to_owned(),
            handle,
            start: pos,
            origin: rect,
            current: rect,
        };
    }

    /// Pointer down on the icon inside a section's visual sub-area. This is
    /// a commit-on-release micro-gesture scoped to the icon offset only.
    pub fn begin_icon(&mut self, id: &str, offset: IconOffset, area: Vec2, pos: Pos2) {
        if !self.is_idle() || area.x <= 0.0 || area.y <= 0.0 {
            return;
        }
        self.state = GestureState::DraggingIcon {
            id: id.to_owned(),
            start: pos,
            origin: offset,
            area,
            current: offset,
        };
    }

    pub fn pointer_moved(&mut self, pos: Pos2) -> GestureOutcome {
        match &mut self.state {
            GestureState::Idle => GestureOutcome::None,
            GestureState::Pressed { id, start, origin } => {
                let delta = pos - *start;
                if delta.x.abs() <= CLICK_TOLERANCE && delta.y.abs() <= CLICK_TOLERANCE {
                    return GestureOutcome::None;
                }
                let current = geometry::clamp_drag(*origin, delta.x, delta.y);
                let id = id.clone();
                self.state = GestureState::Dragging {
                    id: id.clone(),
                    start: *start,
                    origin: *origin,
                    current,
                };
                GestureOutcome::RectPreview { id, rect: current }
            }
            GestureState::Dragging {
                id,
                start,
                origin,
                current,
            } => {
                let delta = pos - *start;
                *current = geometry::clamp_drag(*origin, delta.x, delta.y);
                GestureOutcome::RectPreview {
                    id: id.clone(),
                    rect: *current,
                }
            }
            GestureState::Resizing {
                id,
                handle,
                start,
                origin,
                current,
            } => {
                *current = handle.apply(*origin, pos - *start);
                GestureOutcome::RectPreview {
                    id: id.clone(),
                    rect: *current,
                }
            }
            GestureState::DraggingIcon {
                id,
                start,
                origin,
                area,
                current,
            } => {
                let delta = pos - *start;
                current.x = geometry::clamp_percent(origin.x + delta.x / area.x * 100.0);
                current.y = geometry::clamp_percent(origin.y + delta.y / area.y * 100.0);
                GestureOutcome::IconPreview {
                    id: id.clone(),
                    offset: *current,
                }
            }
        }
    }

    pub fn pointer_released(&mut self, pos: Pos2) -> GestureOutcome {
        let outcome = match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => GestureOutcome::None,
            // Released without an intermediate move event: the tolerance
            // still decides between a click and a drop.
            GestureState::Pressed { id, start, origin } => {
                let delta = pos - start;
                if delta.x.abs() <= CLICK_TOLERANCE && delta.y.abs() <= CLICK_TOLERANCE {
                    GestureOutcome::Selected(id)
                } else {
                    GestureOutcome::RectCommitted {
                        id,
                        rect: geometry::clamp_drag(origin, delta.x, delta.y),
                    }
                }
            }
            GestureState::Dragging {
                id, start, origin, ..
            } => {
                let delta = pos - start;
                GestureOutcome::RectCommitted {
                    id,
                    rect: geometry::clamp_drag(origin, delta.x, delta.y),
                }
            }
            // A resize commits regardless of distance moved; there is no
            // click-vs-drag ambiguity on a handle.
            GestureState::Resizing {
                id,
                handle,
                start,
                origin,
                ..
            } => GestureOutcome::RectCommitted {
                id,
                rect: handle.apply(origin, pos - start),
            },
            GestureState::DraggingIcon {
                id,
                start,
                origin,
                area,
                ..
            } => {
                let delta = pos - start;
                GestureOutcome::IconCommitted {
                    id,
                    offset: IconOffset {
                        x: geometry::clamp_percent(origin.x + delta.x / area.x * 100.0),
                        y: geometry::clamp_percent(origin.y + delta.y / area.y * 100.0),
                    },
                }
            }
        };
        outcome
    }

    /// Abandon the active gesture without committing (e.g. pointer left the
    /// window).
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> SectionRect {
        SectionRect::new(x, y, w, h)
    }

    #[test]
    fn click_within_tolerance_selects() {
        let mut m = GestureMachine::new();
        m.begin_section("a", rect(100.0, 200.0, 300.0, 200.0), Pos2::new(150.0, 250.0));
        assert_eq!(m.pointer_moved(Pos2::new(152.0, 251.0)), GestureOutcome::None);
        assert_eq!(
            m.pointer_released(Pos2::new(152.0, 251.0)),
            GestureOutcome::Selected("a".into())
        );
        assert!(m.is_idle());
    }

    #[test]
    fn drag_past_tolerance_previews_then_commits() {
        let mut m = GestureMachine::new();
        m.begin_section("a", rect(100.0, 200.0, 300.0, 200.0), Pos2::new(150.0, 250.0));
        let preview = m.pointer_moved(Pos2::new(170.0, 250.0));
        assert_eq!(
            preview,
            GestureOutcome::RectPreview {
                id: "a".into(),
                rect: rect(120.0, 200.0, 300.0, 200.0),
            }
        );
        let commit = m.pointer_released(Pos2::new(180.0, 260.0));
        assert_eq!(
            commit,
            GestureOutcome::RectCommitted {
                id: "a".into(),
                rect: rect(130.0, 210.0, 300.0, 200.0),
            }
        );
    }

    #[test]
    fn drag_above_header_clamps_to_exactly_header_height() {
        let mut m = GestureMachine::new();
        m.begin_section("a", rect(100.0, 200.0, 300.0, 200.0), Pos2::new(150.0, 250.0));
        let GestureOutcome::RectCommitted { rect: r, .. } =
            m.pointer_released(Pos2::new(150.0, -400.0))
        else {
            panic!("expected commit");
        };
        assert_eq!(r.y, HEADER_HEIGHT);
    }

    #[test]
    fn north_handle_never_changes_x() {
        let start = rect(100.0, 300.0, 300.0, 200.0);
        let r = Handle::North.apply(start, Vec2::new(40.0, -30.0));
        assert_eq!(r.x, start.x);
        assert_eq!(r.w, start.w);
        assert_eq!(r.y, 270.0);
        assert_eq!(r.h, 230.0);
        // Opposite (south) edge is invariant.
        assert_eq!(r.bottom(), start.bottom());
    }

    #[test]
    fn west_handle_never_changes_y() {
        let start = rect(100.0, 300.0, 300.0, 200.0);
        let r = Handle::West.apply(start, Vec2::new(30.0, -40.0));
        assert_eq!(r.y, start.y);
        assert_eq!(r.h, start.h);
        assert_eq!(r.x, 130.0);
        assert_eq!(r.w, 270.0);
        assert_eq!(r.right(), start.right());
    }

    #[test]
    fn resize_floors_at_minimum_size() {
        let start = rect(100.0, 300.0, 120.0, 120.0);
        let r = Handle::SouthEast.apply(start, Vec2::new(-500.0, -500.0));
        assert_eq!(r.w, MIN_SECTION_SIZE);
        assert_eq!(r.h, MIN_SECTION_SIZE);
        assert_eq!(r.x, start.x);
        assert_eq!(r.y, start.y);
    }

    #[test]
    fn icon_drag_clamps_percent_axes() {
        let mut m = GestureMachine::new();
        m.begin_icon(
            "a",
            IconOffset { x: 50.0, y: 30.0 },
            Vec2::new(200.0, 100.0),
            Pos2::new(0.0, 0.0),
        );
        let GestureOutcome::IconCommitted { offset, .. } =
            m.pointer_released(Pos2::new(400.0, -500.0))
        else {
            panic!("expected icon commit");
        };
        assert_eq!(offset.x, 100.0);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn only_one_gesture_at_a_time() {
        let mut m = GestureMachine::new();
        m.begin_section("a", rect(100.0, 200.0, 300.0, 200.0), Pos2::new(150.0, 250.0));
        m.begin_resize("b", Handle::East, rect(0.0, 160.0, 100.0, 100.0), Pos2::ZERO);
        // Second begin is ignored; release still resolves the first.
        assert_eq!(
            m.pointer_released(Pos2::new(150.0, 250.0)),
            GestureOutcome::Selected("a".into())
        );
    }
}
