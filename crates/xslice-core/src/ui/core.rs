//! Core element types for the widget system

use embedded_graphics::prelude::*;

/// Element identifier, unique within a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElemId(pub i16);

/// Grouping key shared by radio buttons that exclude each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub i16);

/// Page identifier for the page stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub i16);

/// Handle returned by [`Gui::add_font`](crate::Gui::add_font)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u8);

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Raw touch events as reported by the touch controller
#[derive(Debug, Clone, Copy)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Touch drag to a new point
    Drag(TouchPoint),
    /// Touch lifted at a point
    Release(TouchPoint),
}

/// Touch phase delivered to a single element.
///
/// The `*In` / `*Out` phases say whether the point lies inside the element
/// that captured the press. `SetRel` and `SetAbs` carry an index in the
/// `rel_y` argument instead of a coordinate (keypad or encoder input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    None,
    Down,
    DownIn,
    DownOut,
    Move,
    MoveIn,
    MoveOut,
    Up,
    UpIn,
    UpOut,
    SetRel,
    SetAbs,
}

/// Pending redraw request of an element.
///
/// Ordered by cost so a request can never downgrade a pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RedrawMode {
    #[default]
    None,
    /// Only the parts that changed (indicator, glow, selection)
    Incremental,
    /// Everything, including the background
    Full,
}

impl RedrawMode {
    /// Combine a new request with the pending one.
    ///
    /// `None` clears; anything else keeps the costlier of the two.
    pub fn merge(self, request: RedrawMode) -> RedrawMode {
        match request {
            RedrawMode::None => RedrawMode::None,
            other => self.max(other),
        }
    }

    pub fn is_pending(self) -> bool {
        self != RedrawMode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incremental_does_not_downgrade_full() {
        assert_eq!(
            RedrawMode::Full.merge(RedrawMode::Incremental),
            RedrawMode::Full
        );
        assert_eq!(
            RedrawMode::None.merge(RedrawMode::Incremental),
            RedrawMode::Incremental
        );
    }

    #[test]
    fn test_none_clears() {
        assert_eq!(RedrawMode::Full.merge(RedrawMode::None), RedrawMode::None);
        assert!(!RedrawMode::Full.merge(RedrawMode::None).is_pending());
    }
}
