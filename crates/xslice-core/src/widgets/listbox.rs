//! List box controller
//!
//! Shows a vertical list of text rows taken from a `'|'`-separated item
//! string and tracks one selected row (or none).
//!
//! # Layout
//! Rows are stacked from the top-left corner, inset by the configured
//! margins, one [`row_pitch`](crate::ListBoxLayout::row_pitch) apart. Rows
//! starting below the element are not drawn; rows are clipped at its
//! bottom edge.
//!
//! # Touch Behavior
//! - Press and drag inside: glow, select the row under the touch
//! - Drag or release outside: glow off, selection kept
//! - Release inside: glow off
//! - `SetRel` / `SetAbs`: move the selection by, or to, `rel_y`
//!
//! The top margin counts as part of the first row. Touches past the last
//! row leave the selection as it is.

use alloc::boxed::Box;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use log::{debug, warn};

use crate::error::{DrawError, GuiResult};
use crate::gui::{ElemKind, ElemRef, Element, Gui, frame_style, report};
use crate::ui::{ElemId, FontId, PageId, RedrawMode, TouchPhase};
use crate::widgets::items::{get_item, item, item_count, item_str};

/// Selected index meaning "nothing selected"
pub const SEL_NONE: i16 = -1;

/// Size of the stack buffer an item is copied into for rendering
const ITEM_BUF_LEN: usize = 64;

/// Selection notification: `(gui, issuer, new index)`
pub type SelectCallback = Box<dyn FnMut(&Gui, ElemRef, i16)>;

/// Extended state of a list box element
pub struct ListBoxData {
    pub(crate) items: Option<&'static str>,
    /// Counted once at creation
    pub(crate) item_count: i16,
    pub(crate) selected: i16,
    pub(crate) on_select: Option<SelectCallback>,
}

impl ListBoxData {
    pub fn selected(&self) -> i16 {
        self.selected
    }

    pub fn item_count(&self) -> i16 {
        self.item_count
    }
}

impl Gui {
    /// Create a list box over `items`.
    ///
    /// `font` must have been registered with [`Gui::add_font`]. A default
    /// selection outside `-1..item_count` is replaced by [`SEL_NONE`].
    pub fn create_listbox(
        &mut self,
        id: ElemId,
        page: Option<PageId>,
        rect: Rectangle,
        font: FontId,
        items: Option<&'static str>,
        default_sel: i16,
    ) -> GuiResult<ElemRef> {
        report("create_listbox", self.font(font))?;

        let count = item_count(items);
        let selected = if (SEL_NONE..count).contains(&default_sel) {
            default_sel
        } else {
            warn!(
                "List box {:?}: default selection {} out of range (0..{}), using none",
                id, default_sel, count
            );
            SEL_NONE
        };

        let data = ListBoxData {
            items,
            item_count: count,
            selected,
            on_select: None,
        };
        let mut elem = Element::new(id, rect, ElemKind::ListBox(data));
        elem.features.frame = false;
        elem.features.fill = true;
        elem.features.click = true;
        elem.features.glow = true;
        elem.font = Some(font);

        report("create_listbox", self.add_elem(page, elem))
    }

    /// Selected index, or [`SEL_NONE`].
    pub fn listbox_sel(&self, elem_ref: ElemRef) -> GuiResult<i16> {
        report(
            "listbox_sel",
            self.elem(elem_ref).and_then(|e| e.listbox()).map(|d| d.selected),
        )
    }

    /// Select `index` programmatically; [`SEL_NONE`] clears the selection.
    ///
    /// An index outside the list is ignored.
    pub fn set_listbox_sel(&mut self, elem_ref: ElemRef, index: i16) -> GuiResult<()> {
        let count = report("set_listbox_sel", self.listbox_item_count(elem_ref))?;
        if !(SEL_NONE..count).contains(&index) {
            debug!("List box {:?}: selection {} out of range, ignored", elem_ref, index);
            return Ok(());
        }
        self.change_selection(elem_ref, index)?;
        Ok(())
    }

    pub fn set_listbox_callback(
        &mut self,
        elem_ref: ElemRef,
        callback: Option<SelectCallback>,
    ) -> GuiResult<()> {
        let data = report(
            "set_listbox_callback",
            self.elem_mut(elem_ref).and_then(|e| e.listbox_mut()),
        )?;
        data.on_select = callback;
        Ok(())
    }

    pub fn listbox_item_count(&self, elem_ref: ElemRef) -> GuiResult<i16> {
        report(
            "listbox_item_count",
            self.elem(elem_ref).and_then(|e| e.listbox()).map(|d| d.item_count),
        )
    }

    /// The item string the list box was created with.
    pub fn listbox_items(&self, elem_ref: ElemRef) -> GuiResult<Option<&'static str>> {
        report(
            "listbox_items",
            self.elem(elem_ref).and_then(|e| e.listbox()).map(|d| d.items),
        )
    }

    /// Text of item `index`, if it exists.
    pub fn listbox_item(&self, elem_ref: ElemRef, index: i16) -> GuiResult<Option<&'static str>> {
        let items = self.listbox_items(elem_ref)?;
        Ok(items.and_then(|items| item(items, index)))
    }

    /// Store a new selection. When it differs from the old one, notify the
    /// callback and request an incremental redraw.
    ///
    /// Returns whether the selection changed.
    fn change_selection(&mut self, elem_ref: ElemRef, index: i16) -> GuiResult<bool> {
        let elem = self.elem_mut(elem_ref)?;
        let data = elem.listbox_mut()?;
        if data.selected == index {
            return Ok(false);
        }
        data.selected = index;
        let callback = data.on_select.take();
        elem.redraw = elem.redraw.merge(RedrawMode::Incremental);
        debug!("List box {:?}: selected {}", elem_ref, index);

        if let Some(mut callback) = callback {
            callback(self, elem_ref, index);
            if let Ok(data) = self.elem_mut(elem_ref).and_then(|e| e.listbox_mut())
                && data.on_select.is_none()
            {
                data.on_select = Some(callback);
            }
        }
        Ok(true)
    }

    pub(crate) fn draw_listbox<D>(
        &mut self,
        elem_ref: ElemRef,
        mode: RedrawMode,
        display: &mut D,
    ) -> Result<(), DrawError<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let layout = self.config().listbox;
        let elem = report("draw_listbox", self.elem(elem_ref))?;
        let data = report("draw_listbox", elem.listbox())?;
        let font = match elem.font {
            Some(id) => Some(report("draw_listbox", self.font(id))?),
            None => None,
        };
        let colors = elem.colors;
        let features = elem.features;
        let items = data.items;
        let count = data.item_count;
        let selected = data.selected;

        let inner = if features.frame {
            elem.rect
                .into_styled(frame_style(colors.frame))
                .draw(display)
                .map_err(DrawError::Display)?;
            elem.rect.offset(-1)
        } else {
            elem.rect
        };

        let mut target = display.clipped(&inner);
        if features.fill && mode == RedrawMode::Full {
            inner
                .into_styled(PrimitiveStyle::with_fill(colors.fill))
                .draw(&mut target)
                .map_err(DrawError::Display)?;
        }

        let base = inner.top_left + Point::new(layout.margin_x as i32, layout.margin_y as i32);
        let row_width = inner.size.width.saturating_sub(2 * layout.margin_x as u32);
        let pitch = layout.row_pitch();
        let bottom = inner.top_left.y + inner.size.height as i32;
        let buf_len = (layout.max_item_len as usize + 1).min(ITEM_BUF_LEN);
        let mut buf = [0u8; ITEM_BUF_LEN];

        for index in 0..count {
            let row_top = base + Point::new(0, index as i32 * pitch);
            if row_top.y >= bottom {
                break;
            }

            let row_fill = if index == selected {
                colors.fill_glow
            } else {
                colors.fill
            };
            Rectangle::new(row_top, Size::new(row_width, pitch as u32))
                .into_styled(PrimitiveStyle::with_fill(row_fill))
                .draw(&mut target)
                .map_err(DrawError::Display)?;

            let Some(font) = font else {
                continue;
            };
            if !get_item(items, index, &mut buf[..buf_len]) {
                continue;
            }
            let style = MonoTextStyleBuilder::new()
                .font(font)
                .text_color(colors.text)
                .build();
            let text_pos =
                row_top + Point::new(layout.item_margin_x as i32, layout.item_margin_y as i32);
            Text::with_baseline(item_str(&buf), text_pos, style, Baseline::Top)
                .draw(&mut target)
                .map_err(DrawError::Display)?;
        }

        self.elem_mut(elem_ref)?.redraw = RedrawMode::None;
        self.request_page_flip();
        Ok(())
    }

    pub(crate) fn touch_listbox(
        &mut self,
        elem_ref: ElemRef,
        phase: TouchPhase,
        _rel_x: i16,
        rel_y: i16,
    ) -> GuiResult<bool> {
        let elem = report("touch_listbox", self.elem(elem_ref))?;
        let data = report("touch_listbox", elem.listbox())?;
        let count = data.item_count;
        let selected = data.selected;

        match phase {
            TouchPhase::DownIn | TouchPhase::MoveIn => {
                self.set_glow(elem_ref, true)?;
                let row = self.config().listbox.row_at(rel_y);
                if let Some(row) = row
                    && (0..count as i32).contains(&row)
                {
                    self.change_selection(elem_ref, row as i16)?;
                }
            }
            // The point is off the element: no row to pick
            TouchPhase::MoveOut | TouchPhase::UpOut | TouchPhase::UpIn => {
                self.set_glow(elem_ref, false)?;
            }
            TouchPhase::SetRel | TouchPhase::SetAbs => {
                if count > 0 {
                    let target = if phase == TouchPhase::SetRel {
                        selected.saturating_add(rel_y)
                    } else {
                        rel_y
                    };
                    self.change_selection(elem_ref, target.clamp(0, count - 1))?;
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuiError;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::ElemColors;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    const PAGE: PageId = PageId(0);
    const COLORS: &str = "Red|Blue|Green";

    fn gui() -> (Gui, FontId) {
        let mut gui = Gui::default();
        gui.add_page(PAGE).unwrap();
        gui.set_page(PAGE).unwrap();
        let font = gui.add_font(&FONT_6X10).unwrap();
        (gui, font)
    }

    fn listbox(gui: &mut Gui, font: FontId, height: u32, default_sel: i16) -> ElemRef {
        gui.create_listbox(
            ElemId(3),
            Some(PAGE),
            Rectangle::new(Point::zero(), Size::new(100, height)),
            font,
            Some(COLORS),
            default_sel,
        )
        .unwrap()
    }

    fn record(gui: &mut Gui, elem_ref: ElemRef) -> Rc<RefCell<Vec<i16>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        gui.set_listbox_callback(
            elem_ref,
            Some(Box::new(move |_gui, _issuer, index| sink.borrow_mut().push(index))),
        )
        .unwrap();
        log
    }

    #[test]
    fn test_create() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, 2);
        assert_eq!(gui.listbox_sel(r), Ok(2));
        assert_eq!(gui.listbox_item_count(r), Ok(3));
        assert_eq!(gui.listbox_items(r), Ok(Some(COLORS)));
        assert_eq!(gui.listbox_item(r, 1), Ok(Some("Blue")));
        assert_eq!(gui.listbox_item(r, 3), Ok(None));
        let elem = gui.elem(r).unwrap();
        assert!(!elem.features.frame);
        assert!(elem.features.click);
    }

    #[test]
    fn test_create_out_of_range_default() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, 3);
        assert_eq!(gui.listbox_sel(r), Ok(SEL_NONE));
        let r = listbox(&mut gui, font, 100, -5);
        assert_eq!(gui.listbox_sel(r), Ok(SEL_NONE));
    }

    #[test]
    fn test_create_unknown_font() {
        let (mut gui, _) = gui();
        let result = gui.create_listbox(
            ElemId(1),
            Some(PAGE),
            Rectangle::new(Point::zero(), Size::new(10, 10)),
            FontId(3),
            None,
            SEL_NONE,
        );
        assert_eq!(result, Err(GuiError::FontNotFound(FontId(3))));
    }

    #[test]
    fn test_empty_list() {
        let (mut gui, font) = gui();
        let r = gui
            .create_listbox(
                ElemId(1),
                Some(PAGE),
                Rectangle::new(Point::zero(), Size::new(50, 50)),
                font,
                Some(""),
                0,
            )
            .unwrap();
        assert_eq!(gui.listbox_item_count(r), Ok(0));
        assert_eq!(gui.listbox_sel(r), Ok(SEL_NONE));

        assert!(gui.touch_elem(r, TouchPhase::DownIn, 5, 10).unwrap());
        assert!(gui.touch_elem(r, TouchPhase::SetAbs, 0, 2).unwrap());
        assert_eq!(gui.listbox_sel(r), Ok(SEL_NONE));
    }

    #[test]
    fn test_touch_selects_row() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, SEL_NONE);
        let log = record(&mut gui, r);

        assert!(gui.touch_elem(r, TouchPhase::DownIn, 10, 10).unwrap());
        assert_eq!(gui.listbox_sel(r), Ok(0));
        assert!(gui.glow(r).unwrap());
        assert!(gui.touch_elem(r, TouchPhase::MoveIn, 10, 40).unwrap());
        assert_eq!(gui.listbox_sel(r), Ok(1));
        // Same row again: no event
        assert!(gui.touch_elem(r, TouchPhase::MoveIn, 10, 50).unwrap());
        assert_eq!(*log.borrow(), [0, 1]);
    }

    #[test]
    fn test_touch_past_last_row_keeps_selection() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, 1);
        let log = record(&mut gui, r);

        gui.touch_elem(r, TouchPhase::DownIn, 10, 5 + 3 * 30).unwrap();
        gui.touch_elem(r, TouchPhase::MoveIn, 10, 99).unwrap();
        assert_eq!(gui.listbox_sel(r), Ok(1));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_touch_in_top_margin_selects_first_row() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, SEL_NONE);
        let log = record(&mut gui, r);

        gui.touch_elem(r, TouchPhase::DownIn, 10, 2).unwrap();
        assert_eq!(gui.listbox_sel(r), Ok(0));
        assert_eq!(*log.borrow(), [0]);
    }

    #[test]
    fn test_zero_row_pitch_never_selects() {
        let mut config = crate::GuiConfig::default();
        config.listbox.item_height = 0;
        config.listbox.item_margin_y = 0;
        let mut gui = Gui::new(config);
        gui.add_page(PAGE).unwrap();
        gui.set_page(PAGE).unwrap();
        let font = gui.add_font(&FONT_6X10).unwrap();
        let r = listbox(&mut gui, font, 100, SEL_NONE);

        assert!(gui.touch_elem(r, TouchPhase::DownIn, 10, 10).unwrap());
        assert_eq!(gui.listbox_sel(r), Ok(SEL_NONE));
        assert!(gui.glow(r).unwrap());

        let mut fb = FrameBuffer::new(Size::new(120, 120));
        gui.draw_elem(r, RedrawMode::Full, &mut fb).unwrap();
    }

    #[test]
    fn test_release_inside_does_not_select() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, 0);
        gui.touch_elem(r, TouchPhase::DownIn, 10, 10).unwrap();
        assert!(gui.touch_elem(r, TouchPhase::UpIn, 10, 70).unwrap());
        assert_eq!(gui.listbox_sel(r), Ok(0));
        assert!(!gui.glow(r).unwrap());
    }

    #[test]
    fn test_touch_outside_keeps_selection() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, 0);
        let log = record(&mut gui, r);
        gui.touch_elem(r, TouchPhase::DownIn, 10, 10).unwrap();

        // Level with rows 1 and 2, but off to the side
        assert!(gui.touch_elem(r, TouchPhase::MoveOut, 250, 40).unwrap());
        assert_eq!(gui.listbox_sel(r), Ok(0));
        assert!(!gui.glow(r).unwrap());
        assert!(gui.touch_elem(r, TouchPhase::UpOut, -80, 70).unwrap());
        assert_eq!(gui.listbox_sel(r), Ok(0));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_indexed_phases_clamp() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, SEL_NONE);

        gui.touch_elem(r, TouchPhase::SetRel, 0, 1).unwrap();
        assert_eq!(gui.listbox_sel(r), Ok(0));
        gui.touch_elem(r, TouchPhase::SetRel, 0, 5).unwrap();
        assert_eq!(gui.listbox_sel(r), Ok(2));
        gui.touch_elem(r, TouchPhase::SetAbs, 0, -4).unwrap();
        assert_eq!(gui.listbox_sel(r), Ok(0));
        assert!(!gui.glow(r).unwrap());
    }

    #[test]
    fn test_unhandled_phase() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, SEL_NONE);
        assert!(!gui.touch_elem(r, TouchPhase::None, 0, 0).unwrap());
        assert!(!gui.touch_elem(r, TouchPhase::Up, 0, 0).unwrap());
    }

    #[test]
    fn test_set_sel() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, SEL_NONE);
        gui.set_redraw(r, RedrawMode::None).unwrap();
        let log = record(&mut gui, r);

        gui.set_listbox_sel(r, 2).unwrap();
        assert_eq!(gui.redraw_mode(r), Ok(RedrawMode::Incremental));
        gui.set_listbox_sel(r, 2).unwrap();
        gui.set_listbox_sel(r, 7).unwrap();
        gui.set_listbox_sel(r, SEL_NONE).unwrap();
        assert_eq!(*log.borrow(), [2, SEL_NONE]);
    }

    #[test]
    fn test_wrong_kind() {
        let (mut gui, _) = gui();
        let b = gui
            .add_box(Some(PAGE), ElemId(1), Rectangle::new(Point::zero(), Size::new(4, 4)))
            .unwrap();
        assert_eq!(
            gui.listbox_sel(b),
            Err(GuiError::TypeMismatch {
                expected: "listbox",
                found: "box"
            })
        );
    }

    #[test]
    fn test_draw_highlights_selected_row() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 100, 1);
        gui.set_colors(
            r,
            ElemColors::default().with_fill(Rgb565::BLACK, Rgb565::BLUE),
        )
        .unwrap();
        let mut fb = FrameBuffer::new(Size::new(120, 120));

        gui.draw_elem(r, RedrawMode::Full, &mut fb).unwrap();
        assert_eq!(fb.pixel(Point::new(90, 40)), Some(Rgb565::BLUE));
        assert_eq!(fb.pixel(Point::new(90, 10)), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(Point::new(90, 70)), Some(Rgb565::BLACK));
        // Right margin is not part of any row
        assert_eq!(fb.pixel(Point::new(97, 40)), Some(Rgb565::BLACK));
        assert_eq!(gui.redraw_mode(r), Ok(RedrawMode::None));
        assert!(gui.take_page_flip());
    }

    #[test]
    fn test_draw_clips_to_rect() {
        let (mut gui, font) = gui();
        let r = listbox(&mut gui, font, 50, 1);
        gui.set_colors(
            r,
            ElemColors::default().with_fill(Rgb565::BLACK, Rgb565::BLUE),
        )
        .unwrap();
        let mut fb = FrameBuffer::new(Size::new(120, 120));

        gui.draw_elem(r, RedrawMode::Full, &mut fb).unwrap();
        assert_eq!(fb.pixel(Point::new(90, 45)), Some(Rgb565::BLUE));
        assert_eq!(fb.pixel(Point::new(90, 52)), Some(Rgb565::BLACK));
        assert_eq!(fb.dirty_area().map(|a| a.size.height <= 50), Some(true));
    }
}
