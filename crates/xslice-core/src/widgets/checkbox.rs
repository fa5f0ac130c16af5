//! Checkbox and radio button controller
//!
//! A checkbox owns one boolean. In radio mode, widgets sharing a group on
//! the current page exclude each other: checking one unchecks the others.
//!
//! # Touch Behavior
//! - Glows while a touch is held over it
//! - Acts on release inside: a checkbox toggles, a radio button checks
//! - Releasing outside only clears the glow
//!
//! # Toggle callback
//! The callback receives the element that issued it, plus:
//! - Checkbox: its own id and `true` when checked, `None` and `false` otherwise
//! - Radio button: the id of the checked member of its group and `true`, or
//!   `None` and `false` when no member is checked

use alloc::boxed::Box;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use heapless::Vec;
use log::debug;

use crate::error::{DrawError, GuiResult};
use crate::gui::{ElemKind, ElemRef, Element, Gui, MAX_ELEMS_PER_PAGE, frame_style, report};
use crate::ui::{ElemId, GroupId, PageId, RedrawMode, TouchPhase};

/// Toggle notification: `(gui, issuer, selected id, checked)`
pub type ToggleCallback = Box<dyn FnMut(&Gui, ElemRef, Option<ElemId>, bool)>;

/// Indicator drawn for the checked state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxStyle {
    /// Filled inner square
    Box,
    /// Diagonal cross corner to corner
    Cross,
    /// Filled dot inside a circular frame
    Round,
}

/// Extended state of a checkbox element
pub struct CheckboxData {
    pub(crate) radio: bool,
    pub(crate) checked: bool,
    pub(crate) style: CheckboxStyle,
    pub(crate) check_color: Rgb565,
    pub(crate) on_toggle: Option<ToggleCallback>,
}

impl CheckboxData {
    pub fn is_radio(&self) -> bool {
        self.radio
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn style(&self) -> CheckboxStyle {
        self.style
    }
}

/// How a state change is reported to the toggle callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    /// Use the widget's own mode (checkbox or radio)
    Own,
    /// Report as a plain checkbox, used for siblings unchecked by a radio
    /// selection
    AsCheckbox,
}

impl Gui {
    /// Create a checkbox (or radio button when `radio` is set).
    ///
    /// With `page = None` the widget goes into the scratch slot. The widget
    /// starts ungrouped; use [`Gui::set_group`] to join a radio group.
    #[allow(clippy::too_many_arguments)]
    pub fn create_checkbox(
        &mut self,
        id: ElemId,
        page: Option<PageId>,
        rect: Rectangle,
        radio: bool,
        style: CheckboxStyle,
        check_color: Rgb565,
        checked: bool,
    ) -> GuiResult<ElemRef> {
        let data = CheckboxData {
            radio,
            checked,
            style,
            check_color,
            on_toggle: None,
        };
        let mut elem = Element::new(id, rect, ElemKind::Checkbox(data));
        elem.features.frame = false;
        elem.features.fill = true;
        elem.features.click = true;
        elem.features.glow = true;

        report("create_checkbox", self.add_elem(page, elem))
    }

    /// Current checked state.
    pub fn checkbox_state(&self, elem_ref: ElemRef) -> GuiResult<bool> {
        report(
            "checkbox_state",
            self.elem(elem_ref).and_then(|e| e.checkbox()).map(|d| d.checked),
        )
    }

    /// First checked checkbox of `group` on the current page, in registration
    /// order.
    pub fn find_checked(&self, group: GroupId) -> Option<ElemRef> {
        self.current_page_elems().find(|&elem_ref| {
            self.elem(elem_ref).is_ok_and(|elem| {
                elem.group == Some(group) && elem.checkbox().is_ok_and(|d| d.checked)
            })
        })
    }

    /// Replace the toggle callback.
    pub fn set_checkbox_callback(
        &mut self,
        elem_ref: ElemRef,
        callback: Option<ToggleCallback>,
    ) -> GuiResult<()> {
        let data = report(
            "set_checkbox_callback",
            self.elem_mut(elem_ref).and_then(|e| e.checkbox_mut()),
        )?;
        data.on_toggle = callback;
        Ok(())
    }

    /// Set the checked state, enforcing radio-group exclusivity.
    ///
    /// Without a current page this is a no-op. Checking a radio button that
    /// is already its group's checked member produces no events at all.
    pub fn set_checkbox_state(&mut self, elem_ref: ElemRef, checked: bool) -> GuiResult<()> {
        let Some(page) = self.current_page() else {
            debug!("set_checkbox_state: no current page, ignored");
            return Ok(());
        };

        let elem = report("set_checkbox_state", self.elem(elem_ref))?;
        let data = report("set_checkbox_state", elem.checkbox())?;
        let radio = data.radio;
        let already_checked = data.checked;
        let group = elem.group;

        if radio && checked {
            match group {
                Some(group) => {
                    if self.find_checked(group) == Some(elem_ref) {
                        return Ok(());
                    }

                    // Snapshot the siblings first; their states change below
                    let mut siblings: Vec<ElemRef, MAX_ELEMS_PER_PAGE> = Vec::new();
                    for other in self.current_page_elems() {
                        if other == elem_ref {
                            continue;
                        }
                        let Ok(sibling) = self.elem(other) else {
                            continue;
                        };
                        if sibling.group == Some(group)
                            && sibling.checkbox().is_ok_and(|d| d.checked)
                        {
                            // A page never holds more than MAX_ELEMS_PER_PAGE
                            siblings.push(other).ok();
                        }
                    }

                    for sibling in siblings {
                        debug!("Radio group {:?}: unchecking {:?}", group, sibling);
                        self.set_state_help(sibling, false, Report::AsCheckbox)?;
                    }
                }
                None if already_checked => return Ok(()),
                None => {}
            }
        }

        debug!("Checkbox {:?} on page {:?} -> {}", elem_ref, page, checked);
        self.set_state_help(elem_ref, checked, Report::Own)
    }

    /// Invert the checked state.
    pub fn toggle_checkbox(&mut self, elem_ref: ElemRef) -> GuiResult<()> {
        let checked = self.checkbox_state(elem_ref)?;
        self.set_checkbox_state(elem_ref, !checked)?;
        self.set_redraw(elem_ref, RedrawMode::Incremental)
    }

    /// Store the state, request a redraw if it changed, and notify the
    /// callback (always, even when unchanged).
    fn set_state_help(&mut self, elem_ref: ElemRef, checked: bool, mode: Report) -> GuiResult<()> {
        let elem = self.elem_mut(elem_ref)?;
        let id = elem.id;
        let group = elem.group;
        let data = elem.checkbox_mut()?;
        let changed = data.checked != checked;
        data.checked = checked;
        let radio = data.radio;
        let callback = data.on_toggle.take();
        if changed {
            elem.redraw = elem.redraw.merge(RedrawMode::Incremental);
        }

        let Some(mut callback) = callback else {
            return Ok(());
        };

        let (selected, reported) = match (radio, mode, group) {
            (true, Report::Own, Some(group)) => match self.find_checked(group) {
                Some(found) => (Some(self.elem(found)?.id), true),
                None => (None, false),
            },
            _ => (checked.then_some(id), checked),
        };
        callback(self, elem_ref, selected, reported);

        // Put it back unless the slot was overwritten meanwhile
        if let Ok(data) = self.elem_mut(elem_ref).and_then(|e| e.checkbox_mut())
            && data.on_toggle.is_none()
        {
            data.on_toggle = Some(callback);
        }
        Ok(())
    }

    pub(crate) fn draw_checkbox<D>(
        &mut self,
        elem_ref: ElemRef,
        _mode: RedrawMode,
        display: &mut D,
    ) -> Result<(), DrawError<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let layout = self.config().checkbox;
        let elem = report("draw_checkbox", self.elem(elem_ref))?;
        let data = report("draw_checkbox", elem.checkbox())?;
        let rect = elem.rect;
        let colors = elem.colors;
        let frame_color = colors.frame_for(elem.glow_visible());
        let checked = data.checked;
        let check_color = data.check_color;
        let style = data.style;

        rect.into_styled(PrimitiveStyle::with_fill(colors.fill))
            .draw(display)
            .map_err(DrawError::Display)?;

        let x0 = rect.top_left.x;
        let y0 = rect.top_left.y;
        let x1 = x0 + rect.size.width as i32 - 1;
        let y1 = y0 + rect.size.height as i32 - 1;
        let mid = Point::new((x0 + x1) / 2, (y0 + y1) / 2);

        match style {
            CheckboxStyle::Box => {
                if checked {
                    rect.offset(-(layout.box_inset as i32))
                        .into_styled(PrimitiveStyle::with_fill(check_color))
                        .draw(display)
                        .map_err(DrawError::Display)?;
                }
                rect.into_styled(frame_style(frame_color))
                    .draw(display)
                    .map_err(DrawError::Display)?;
            }
            CheckboxStyle::Cross => {
                if checked {
                    let stroke = PrimitiveStyle::with_stroke(check_color, 1);
                    Line::new(Point::new(x0, y0), Point::new(x1, y1))
                        .into_styled(stroke)
                        .draw(display)
                        .map_err(DrawError::Display)?;
                    Line::new(Point::new(x0, y1), Point::new(x1, y0))
                        .into_styled(stroke)
                        .draw(display)
                        .map_err(DrawError::Display)?;
                }
                rect.into_styled(frame_style(frame_color))
                    .draw(display)
                    .map_err(DrawError::Display)?;
            }
            CheckboxStyle::Round => {
                if checked {
                    Circle::with_center(mid, 2 * layout.mark_radius as u32 + 1)
                        .into_styled(PrimitiveStyle::with_fill(check_color))
                        .draw(display)
                        .map_err(DrawError::Display)?;
                }
                let radius = rect.size.width / 2;
                Circle::with_center(mid, 2 * radius + 1)
                    .into_styled(frame_style(frame_color))
                    .draw(display)
                    .map_err(DrawError::Display)?;
            }
        }

        self.elem_mut(elem_ref)?.redraw = RedrawMode::None;
        self.request_page_flip();
        Ok(())
    }

    pub(crate) fn touch_checkbox(
        &mut self,
        elem_ref: ElemRef,
        phase: TouchPhase,
        _rel_x: i16,
        _rel_y: i16,
    ) -> GuiResult<bool> {
        let elem = report("touch_checkbox", self.elem(elem_ref))?;
        let data = report("touch_checkbox", elem.checkbox())?;
        let radio = data.radio;
        let checked_old = data.checked;
        let glow_old = elem.glowing;

        match phase {
            TouchPhase::DownIn | TouchPhase::MoveIn => self.set_glow(elem_ref, true)?,
            TouchPhase::MoveOut | TouchPhase::UpOut => self.set_glow(elem_ref, false)?,
            TouchPhase::UpIn => {
                self.set_glow(elem_ref, false)?;
                // Radio buttons only ever check on tap; checkboxes toggle
                let checked_new = radio || !checked_old;
                self.set_checkbox_state(elem_ref, checked_new)?;
            }
            _ => return Ok(false),
        }

        let elem = self.elem(elem_ref)?;
        let changed = elem.glowing != glow_old || elem.checkbox()?.checked != checked_old;
        if changed {
            self.set_redraw(elem_ref, RedrawMode::Incremental)?;
        }
        Ok(true)
    }
}
