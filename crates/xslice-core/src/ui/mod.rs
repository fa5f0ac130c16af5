//! Shared element types: identifiers, touch input, redraw requests and colors.

pub mod colors;
pub mod core;

pub use colors::ElemColors;
pub use self::core::{
    ElemId, FontId, GroupId, PageId, RedrawMode, TouchEvent, TouchPhase, TouchPoint,
};
