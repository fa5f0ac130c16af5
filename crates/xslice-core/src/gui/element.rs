//! Generic element record and its variant-specific state.
//!
//! Every element carries the same generic fields (id, group, bounds, glow,
//! redraw request, colors). The widget-specific state lives in [`ElemKind`],
//! a closed sum type: draw and touch dispatch match on the variant tag, and
//! accessors report a type mismatch instead of reinterpreting the data.

use embedded_graphics::primitives::Rectangle;

use crate::error::{GuiError, GuiResult};
use crate::ui::{ElemColors, ElemId, FontId, GroupId, RedrawMode};
use crate::widgets::checkbox::CheckboxData;
use crate::widgets::listbox::ListBoxData;

/// Rendering and input features of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElemFeatures {
    /// Background fill is drawn
    pub fill: bool,
    /// A one-pixel frame is drawn inside the bounds
    pub frame: bool,
    /// The element captures touch presses
    pub click: bool,
    /// Glow colors are used while touched
    pub glow: bool,
}

impl Default for ElemFeatures {
    fn default() -> Self {
        Self {
            fill: true,
            frame: true,
            click: false,
            glow: false,
        }
    }
}

/// Variant-specific element state
pub enum ElemKind {
    /// Plain filled box with an optional frame
    Box,
    Checkbox(CheckboxData),
    ListBox(ListBoxData),
}

/// Bare variant tag of an [`ElemKind`], used for dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemType {
    Box,
    Checkbox,
    ListBox,
}

impl ElemKind {
    pub fn elem_type(&self) -> ElemType {
        match self {
            ElemKind::Box => ElemType::Box,
            ElemKind::Checkbox(_) => ElemType::Checkbox,
            ElemKind::ListBox(_) => ElemType::ListBox,
        }
    }

    /// Short kind name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ElemKind::Box => "box",
            ElemKind::Checkbox(_) => "checkbox",
            ElemKind::ListBox(_) => "listbox",
        }
    }
}

/// One element stored in a page (or in the scratch slot)
pub struct Element {
    pub(crate) id: ElemId,
    pub(crate) group: Option<GroupId>,
    pub(crate) rect: Rectangle,
    pub(crate) glowing: bool,
    pub(crate) redraw: RedrawMode,
    pub(crate) features: ElemFeatures,
    pub(crate) colors: ElemColors,
    pub(crate) font: Option<FontId>,
    pub(crate) kind: ElemKind,
}

impl Element {
    pub(crate) fn new(id: ElemId, rect: Rectangle, kind: ElemKind) -> Self {
        Self {
            id,
            group: None,
            rect,
            glowing: false,
            // Never drawn yet
            redraw: RedrawMode::Full,
            features: ElemFeatures::default(),
            colors: ElemColors::default(),
            font: None,
            kind,
        }
    }

    pub fn id(&self) -> ElemId {
        self.id
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn kind(&self) -> &ElemKind {
        &self.kind
    }

    /// Glow as rendered: requires both the feature and an active touch.
    pub(crate) fn glow_visible(&self) -> bool {
        self.features.glow && self.glowing
    }

    pub(crate) fn checkbox(&self) -> GuiResult<&CheckboxData> {
        match &self.kind {
            ElemKind::Checkbox(data) => Ok(data),
            other => Err(GuiError::TypeMismatch {
                expected: "checkbox",
                found: other.name(),
            }),
        }
    }

    pub(crate) fn checkbox_mut(&mut self) -> GuiResult<&mut CheckboxData> {
        match &mut self.kind {
            ElemKind::Checkbox(data) => Ok(data),
            other => Err(GuiError::TypeMismatch {
                expected: "checkbox",
                found: other.name(),
            }),
        }
    }

    pub(crate) fn listbox(&self) -> GuiResult<&ListBoxData> {
        match &self.kind {
            ElemKind::ListBox(data) => Ok(data),
            other => Err(GuiError::TypeMismatch {
                expected: "listbox",
                found: other.name(),
            }),
        }
    }

    pub(crate) fn listbox_mut(&mut self) -> GuiResult<&mut ListBoxData> {
        match &mut self.kind {
            ElemKind::ListBox(data) => Ok(data),
            other => Err(GuiError::TypeMismatch {
                expected: "listbox",
                found: other.name(),
            }),
        }
    }
}
