//! Widget geometry configuration.
//!
//! The defaults reproduce the fixed layout constants of the widget set. A
//! serialized [`GuiConfig`] can be kept in flash and loaded at boot with
//! [`GuiConfig::from_bytes`].

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::{GuiError, GuiResult};

/// Row geometry of a list box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBoxLayout {
    /// Horizontal inset of the rows from the element edge
    pub margin_x: u16,
    /// Vertical inset of the first row from the element top
    pub margin_y: u16,
    /// Height of the text area of one row
    pub item_height: u16,
    /// Left inset of the text within a row
    pub item_margin_x: u16,
    /// Space above and below the text area of one row
    pub item_margin_y: u16,
    /// Longest item string rendered, in bytes
    pub max_item_len: u8,
}

impl Default for ListBoxLayout {
    fn default() -> Self {
        Self {
            margin_x: 5,
            margin_y: 5,
            item_height: 20,
            item_margin_x: 5,
            item_margin_y: 5,
            max_item_len: 20,
        }
    }
}

impl ListBoxLayout {
    /// Vertical distance between the tops of consecutive rows.
    pub fn row_pitch(&self) -> i32 {
        self.item_height as i32 + 2 * self.item_margin_y as i32
    }

    /// Row index under an element-relative y coordinate.
    ///
    /// Division truncates toward zero, so the top margin belongs to row 0.
    /// Returns `None` for a zero row pitch.
    pub fn row_at(&self, rel_y: i16) -> Option<i32> {
        match self.row_pitch() {
            0 => None,
            pitch => Some((rel_y as i32 - self.margin_y as i32) / pitch),
        }
    }
}

/// Indicator geometry of a checkbox, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxLayout {
    /// Inset of the filled square of the box style
    pub box_inset: u16,
    /// Radius of the filled dot of the round style
    pub mark_radius: u16,
}

impl Default for CheckboxLayout {
    fn default() -> Self {
        Self {
            box_inset: 5,
            mark_radius: 5,
        }
    }
}

/// Geometry configuration shared by every widget of a [`Gui`](crate::Gui).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuiConfig {
    pub listbox: ListBoxLayout,
    pub checkbox: CheckboxLayout,
}

impl GuiConfig {
    /// Decode a configuration blob.
    ///
    /// A blob whose list rows have zero height is rejected.
    pub fn from_bytes(bytes: &[u8]) -> GuiResult<Self> {
        let config: Self = postcard::from_bytes(bytes).map_err(|err| {
            log::error!("Config decode failed: {:?}", err);
            GuiError::Config
        })?;
        if config.listbox.row_pitch() == 0 {
            log::error!("Config rejected: list box row pitch is zero");
            return Err(GuiError::Config);
        }
        Ok(config)
    }

    /// Encode this configuration into a blob suitable for flash storage.
    pub fn to_vec(&self) -> GuiResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|err| {
            log::error!("Config encode failed: {:?}", err);
            GuiError::Config
        })
    }
}
