//! Raw touch tracking.
//!
//! Turns the controller's press / drag / release stream into per-element
//! touch phases. The element hit by the press captures the gesture: later
//! drags and the release are reported to it as `*In` or `*Out` depending on
//! whether the point is still inside its bounds.

use embedded_graphics::prelude::*;
use log::debug;

use super::{ElemRef, Gui, report};
use crate::error::GuiResult;
use crate::ui::{TouchEvent, TouchPhase, TouchPoint};

/// Element that captured the current gesture
#[derive(Debug, Default)]
pub(crate) struct TouchTracker {
    captured: Option<ElemRef>,
}

impl TouchTracker {
    /// Drop the captured element; its page is no longer shown.
    pub(crate) fn release(&mut self) {
        self.captured = None;
    }
}

/// Clamp an element-relative coordinate into the `i16` range.
fn rel_coord(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

impl Gui {
    /// Feed one raw touch event through the tracker.
    ///
    /// Returns whether an element handled the resulting phase. Presses that
    /// hit no clickable element on the current page are ignored.
    pub fn track_touch(&mut self, event: TouchEvent) -> GuiResult<bool> {
        let (point, phase) = match event {
            TouchEvent::Press(point) => {
                self.tracker.captured = self.hit_test(point);
                (point, TouchPhase::DownIn)
            }
            TouchEvent::Drag(point) => (point, TouchPhase::MoveIn),
            TouchEvent::Release(point) => (point, TouchPhase::UpIn),
        };

        let Some(elem_ref) = self.tracker.captured else {
            return Ok(false);
        };
        if matches!(event, TouchEvent::Release(_)) {
            self.tracker.captured = None;
        }

        let rect = report("track_touch", self.elem(elem_ref))?.rect;
        let inside = rect.contains(point.to_point());
        let phase = match (phase, inside) {
            (TouchPhase::MoveIn, false) => TouchPhase::MoveOut,
            (TouchPhase::UpIn, false) => TouchPhase::UpOut,
            (phase, _) => phase,
        };

        let rel_x = rel_coord(point.x as i32 - rect.top_left.x);
        let rel_y = rel_coord(point.y as i32 - rect.top_left.y);
        debug!(
            "Touch {:?} -> {:?} at ({}, {}) on {:?}",
            event, phase, rel_x, rel_y, elem_ref
        );
        self.touch_elem(elem_ref, phase, rel_x, rel_y)
    }

    /// Element currently capturing the gesture, if any.
    pub fn captured(&self) -> Option<ElemRef> {
        self.tracker.captured
    }

    /// Topmost (last registered) clickable element on the current page that
    /// contains the point.
    fn hit_test(&self, point: TouchPoint) -> Option<ElemRef> {
        let p = point.to_point();
        let mut hit = None;
        for elem_ref in self.current_page_elems() {
            if let Ok(elem) = self.elem(elem_ref)
                && elem.features.click
                && elem.rect.contains(p)
            {
                hit = Some(elem_ref);
            }
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{ElemId, PageId, RedrawMode};
    use crate::widgets::checkbox::CheckboxStyle;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::primitives::Rectangle;

    fn setup() -> (Gui, ElemRef) {
        let mut gui = Gui::default();
        gui.add_page(PageId(0)).unwrap();
        gui.set_page(PageId(0)).unwrap();
        let r = gui
            .create_checkbox(
                ElemId(1),
                Some(PageId(0)),
                Rectangle::new(Point::new(10, 10), Size::new(20, 20)),
                false,
                CheckboxStyle::Box,
                Rgb565::GREEN,
                false,
            )
            .unwrap();
        gui.set_redraw(r, RedrawMode::None).unwrap();
        (gui, r)
    }

    #[test]
    fn test_tap_inside_toggles() {
        let (mut gui, r) = setup();
        assert!(gui.track_touch(TouchEvent::Press(TouchPoint::new(15, 15))).unwrap());
        assert_eq!(gui.captured(), Some(r));
        assert!(gui.glow(r).unwrap());

        assert!(gui.track_touch(TouchEvent::Release(TouchPoint::new(16, 16))).unwrap());
        assert_eq!(gui.captured(), None);
        assert!(gui.checkbox_state(r).unwrap());
        assert!(!gui.glow(r).unwrap());
    }

    #[test]
    fn test_drag_off_then_release_does_not_toggle() {
        let (mut gui, r) = setup();
        gui.track_touch(TouchEvent::Press(TouchPoint::new(15, 15))).unwrap();
        gui.track_touch(TouchEvent::Drag(TouchPoint::new(100, 100))).unwrap();
        assert!(!gui.glow(r).unwrap());

        gui.track_touch(TouchEvent::Release(TouchPoint::new(100, 100))).unwrap();
        assert!(!gui.checkbox_state(r).unwrap());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let (mut gui, r) = setup();
        assert!(!gui.track_touch(TouchEvent::Press(TouchPoint::new(0, 0))).unwrap());
        assert!(!gui.track_touch(TouchEvent::Release(TouchPoint::new(15, 15))).unwrap());
        assert!(!gui.checkbox_state(r).unwrap());
        assert_eq!(gui.redraw_mode(r), Ok(RedrawMode::None));
    }

    #[test]
    fn test_page_change_drops_capture() {
        let (mut gui, r) = setup();
        gui.add_page(PageId(1)).unwrap();

        gui.track_touch(TouchEvent::Press(TouchPoint::new(15, 15))).unwrap();
        gui.push_page(PageId(1)).unwrap();
        assert_eq!(gui.captured(), None);
        gui.pop_page();
        assert!(!gui.track_touch(TouchEvent::Release(TouchPoint::new(15, 15))).unwrap());
        assert!(!gui.checkbox_state(r).unwrap());

        gui.track_touch(TouchEvent::Press(TouchPoint::new(15, 15))).unwrap();
        gui.set_page(PageId(1)).unwrap();
        assert!(!gui.track_touch(TouchEvent::Release(TouchPoint::new(15, 15))).unwrap());
        assert!(!gui.checkbox_state(r).unwrap());
    }

    #[test]
    fn test_rel_coord_clamps() {
        assert_eq!(rel_coord(40_000), i16::MAX);
        assert_eq!(rel_coord(-40_000), i16::MIN);
        assert_eq!(rel_coord(-3), -3);
    }
}
