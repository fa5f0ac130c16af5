//! Hardware-independent widget library for small touch displays
//!
//! This crate holds the element registry ([`Gui`]) together with the
//! extended widget controllers built on top of it:
//!
//! - Checkbox / radio button (with single-selection radio groups)
//! - List box driven by a `'|'`-separated item string
//!
//! Each widget turns a stream of touch phases into glow, value and redraw
//! decisions. Rendering goes through `embedded-graphics`.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod framebuffer;
pub mod gui;
pub mod ui;
pub mod widgets;

pub use config::{CheckboxLayout, GuiConfig, ListBoxLayout};
pub use error::{DrawError, GuiError, GuiResult};
pub use framebuffer::FrameBuffer;
pub use gui::{ElemRef, Gui};
pub use ui::{
    ElemColors, ElemId, FontId, GroupId, PageId, RedrawMode, TouchEvent, TouchPhase, TouchPoint,
};
pub use widgets::checkbox::{CheckboxStyle, ToggleCallback};
pub use widgets::items::{get_item, item, item_count};
pub use widgets::listbox::{SEL_NONE, SelectCallback};
