//! Element color definitions
//!
//! Colors are RGB565, the native depth of the target panels.
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Medium gray - default frame of an idle widget
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray - for subtle fills
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

/// Colors used to render one element.
///
/// The `*_glow` variants apply while a touch is held over the element. The
/// list box also uses `fill_glow` to highlight the selected row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElemColors {
    pub fill: Rgb565,
    pub fill_glow: Rgb565,
    pub frame: Rgb565,
    pub frame_glow: Rgb565,
    pub text: Rgb565,
}

impl Default for ElemColors {
    fn default() -> Self {
        Self {
            fill: Rgb565::BLACK,
            fill_glow: Rgb565::BLACK,
            frame: GRAY,
            frame_glow: WHITE,
            text: WHITE,
        }
    }
}

impl ElemColors {
    pub fn with_fill(mut self, fill: Rgb565, fill_glow: Rgb565) -> Self {
        self.fill = fill;
        self.fill_glow = fill_glow;
        self
    }

    pub fn with_frame(mut self, frame: Rgb565, frame_glow: Rgb565) -> Self {
        self.frame = frame;
        self.frame_glow = frame_glow;
        self
    }

    pub fn with_text(mut self, text: Rgb565) -> Self {
        self.text = text;
        self
    }

    /// Frame color for the given glow state.
    pub fn frame_for(&self, glowing: bool) -> Rgb565 {
        if glowing { self.frame_glow } else { self.frame }
    }

    /// Fill color for the given glow state.
    pub fn fill_for(&self, glowing: bool) -> Rgb565 {
        if glowing { self.fill_glow } else { self.fill }
    }
}
