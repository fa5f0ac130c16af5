//! Element registry, page stack and generic dispatch.
//!
//! [`Gui`] owns every page and its ordered element collection. Widgets are
//! addressed through copyable [`ElemRef`] handles. The "current page" is the
//! top of an explicit page stack held here rather than in global state.
//!
//! The registry calls back into the widget controllers through exactly two
//! entry points, [`Gui::draw_elem`] and [`Gui::touch_elem`], both resolved by
//! the element's variant tag.

mod element;
mod touch;

pub use element::{ElemFeatures, ElemKind, ElemType, Element};

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use heapless::Vec;
use log::{debug, error};

use crate::config::GuiConfig;
use crate::error::{DrawError, GuiError, GuiResult};
use crate::ui::{ElemColors, ElemId, FontId, GroupId, PageId, RedrawMode, TouchPhase};

use touch::TouchTracker;

/// Maximum number of pages registered with one GUI
pub const MAX_PAGES: usize = 8;

/// Maximum depth of the page stack
pub const MAX_PAGE_STACK: usize = 4;

/// Maximum number of elements on one page
pub const MAX_ELEMS_PER_PAGE: usize = 32;

/// Maximum number of registered fonts
pub const MAX_FONTS: usize = 4;

/// Handle to an element owned by the GUI.
///
/// Handles stay valid for the lifetime of the owning page: elements are
/// never removed individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemRef {
    /// Element `index` (registration order) on page `page`
    Page { page: PageId, index: usize },
    /// The reusable scratch slot used for elements created without a page
    Temp,
}

/// A page and its ordered element collection
struct Page {
    id: PageId,
    elements: Vec<Element, MAX_ELEMS_PER_PAGE>,
}

/// Log a failed operation on the diagnostic channel and pass the error on.
pub(crate) fn report<T>(op: &'static str, result: GuiResult<T>) -> GuiResult<T> {
    result.inspect_err(|err| error!("{}: {}", op, err))
}

/// The GUI context: pages, page stack, fonts, scratch element, flip flag.
pub struct Gui {
    config: GuiConfig,
    pages: Vec<Page, MAX_PAGES>,
    page_stack: Vec<PageId, MAX_PAGE_STACK>,
    temp: Option<Element>,
    fonts: Vec<&'static MonoFont<'static>, MAX_FONTS>,
    page_flip: bool,
    tracker: TouchTracker,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new(GuiConfig::default())
    }
}

impl Gui {
    pub fn new(config: GuiConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            page_stack: Vec::new(),
            temp: None,
            fonts: Vec::new(),
            page_flip: false,
            tracker: TouchTracker::default(),
        }
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Fonts
    // -----------------------------------------------------------------------

    /// Register a font and return its id.
    pub fn add_font(&mut self, font: &'static MonoFont<'static>) -> GuiResult<FontId> {
        let id = FontId(self.fonts.len() as u8);
        report(
            "add_font",
            self.fonts
                .push(font)
                .map_err(|_| GuiError::CapacityExceeded { max: MAX_FONTS }),
        )?;
        Ok(id)
    }

    pub fn font(&self, id: FontId) -> GuiResult<&'static MonoFont<'static>> {
        self.fonts
            .get(id.0 as usize)
            .copied()
            .ok_or(GuiError::FontNotFound(id))
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    /// Register an empty page.
    pub fn add_page(&mut self, id: PageId) -> GuiResult<()> {
        let page = Page {
            id,
            elements: Vec::new(),
        };
        report(
            "add_page",
            self.pages
                .push(page)
                .map_err(|_| GuiError::CapacityExceeded { max: MAX_PAGES }),
        )
    }

    /// Replace the top of the page stack with `id` and schedule a full redraw.
    pub fn set_page(&mut self, id: PageId) -> GuiResult<()> {
        report("set_page", self.page_index(id))?;
        self.tracker.release();
        self.page_stack.pop();
        // Cannot fail: one slot was just freed (or the stack was empty)
        self.page_stack.push(id).ok();
        self.invalidate_page(id);
        debug!("Current page is now {:?}", id);
        Ok(())
    }

    /// Push `id` on top of the page stack (overlay / popup).
    pub fn push_page(&mut self, id: PageId) -> GuiResult<()> {
        report("push_page", self.page_index(id))?;
        report(
            "push_page",
            self.page_stack.push(id).map_err(|_| GuiError::CapacityExceeded {
                max: MAX_PAGE_STACK,
            }),
        )?;
        self.tracker.release();
        self.invalidate_page(id);
        Ok(())
    }

    /// Pop the top page; the page below becomes current and is redrawn.
    pub fn pop_page(&mut self) -> Option<PageId> {
        let popped = self.page_stack.pop()?;
        self.tracker.release();
        if let Some(current) = self.current_page() {
            self.invalidate_page(current);
        }
        Some(popped)
    }

    /// Page at the top of the page stack.
    pub fn current_page(&self) -> Option<PageId> {
        self.page_stack.last().copied()
    }

    /// References of every element on the current page, in registration order.
    pub fn current_page_elems(&self) -> impl Iterator<Item = ElemRef> + '_ {
        let page = self.current_page();
        let count = page
            .and_then(|id| self.page(id).ok())
            .map_or(0, |p| p.elements.len());
        (0..count).filter_map(move |index| page.map(|page| ElemRef::Page { page, index }))
    }

    fn page_index(&self, id: PageId) -> GuiResult<usize> {
        self.pages
            .iter()
            .position(|p| p.id == id)
            .ok_or(GuiError::PageNotFound(id))
    }

    fn page(&self, id: PageId) -> GuiResult<&Page> {
        let index = self.page_index(id)?;
        Ok(&self.pages[index])
    }

    fn page_mut(&mut self, id: PageId) -> GuiResult<&mut Page> {
        let index = self.page_index(id)?;
        Ok(&mut self.pages[index])
    }

    fn invalidate_page(&mut self, id: PageId) {
        if let Ok(page) = self.page_mut(id) {
            for elem in page.elements.iter_mut() {
                elem.redraw = RedrawMode::Full;
            }
        }
        self.page_flip = true;
    }

    // -----------------------------------------------------------------------
    // Element registry
    // -----------------------------------------------------------------------

    /// Insert an element into a page, or into the scratch slot when `page` is
    /// `None`. The scratch slot holds one element and is overwritten by the
    /// next page-less create.
    pub(crate) fn add_elem(&mut self, page: Option<PageId>, elem: Element) -> GuiResult<ElemRef> {
        match page {
            Some(page_id) => {
                let page = self.page_mut(page_id)?;
                page.elements
                    .push(elem)
                    .map_err(|_| GuiError::CapacityExceeded {
                        max: MAX_ELEMS_PER_PAGE,
                    })?;
                let index = page.elements.len() - 1;
                debug!("Added element to page {:?} at index {}", page_id, index);
                Ok(ElemRef::Page {
                    page: page_id,
                    index,
                })
            }
            None => {
                let mut elem = elem;
                elem.redraw = RedrawMode::Full;
                self.temp = Some(elem);
                Ok(ElemRef::Temp)
            }
        }
    }

    /// Create a plain box element (fill and frame, not clickable).
    pub fn add_box(&mut self, page: Option<PageId>, id: ElemId, rect: Rectangle) -> GuiResult<ElemRef> {
        report("add_box", self.add_elem(page, Element::new(id, rect, ElemKind::Box)))
    }

    /// Resolve a reference to its element.
    pub fn elem(&self, elem_ref: ElemRef) -> GuiResult<&Element> {
        match elem_ref {
            ElemRef::Page { page, index } => {
                self.page(page)?.elements.get(index).ok_or(GuiError::InvalidRef)
            }
            ElemRef::Temp => self.temp.as_ref().ok_or(GuiError::InvalidRef),
        }
    }

    pub(crate) fn elem_mut(&mut self, elem_ref: ElemRef) -> GuiResult<&mut Element> {
        match elem_ref {
            ElemRef::Page { page, index } => self
                .page_mut(page)?
                .elements
                .get_mut(index)
                .ok_or(GuiError::InvalidRef),
            ElemRef::Temp => self.temp.as_mut().ok_or(GuiError::InvalidRef),
        }
    }

    pub fn elem_id(&self, elem_ref: ElemRef) -> GuiResult<ElemId> {
        report("elem_id", self.elem(elem_ref).map(|e| e.id))
    }

    pub fn elem_rect(&self, elem_ref: ElemRef) -> GuiResult<Rectangle> {
        report("elem_rect", self.elem(elem_ref).map(|e| e.rect))
    }

    pub fn group(&self, elem_ref: ElemRef) -> GuiResult<Option<GroupId>> {
        report("group", self.elem(elem_ref).map(|e| e.group))
    }

    /// Assign (or clear) the element's group.
    pub fn set_group(&mut self, elem_ref: ElemRef, group: Option<GroupId>) -> GuiResult<()> {
        report("set_group", self.elem_mut(elem_ref).map(|e| e.group = group))
    }

    pub fn glow(&self, elem_ref: ElemRef) -> GuiResult<bool> {
        report("glow", self.elem(elem_ref).map(|e| e.glowing))
    }

    pub fn set_glow(&mut self, elem_ref: ElemRef, glowing: bool) -> GuiResult<()> {
        report("set_glow", self.elem_mut(elem_ref).map(|e| e.glowing = glowing))
    }

    pub fn redraw_mode(&self, elem_ref: ElemRef) -> GuiResult<RedrawMode> {
        report("redraw_mode", self.elem(elem_ref).map(|e| e.redraw))
    }

    /// Request a redraw. See [`RedrawMode::merge`] for how requests combine.
    pub fn set_redraw(&mut self, elem_ref: ElemRef, mode: RedrawMode) -> GuiResult<()> {
        report(
            "set_redraw",
            self.elem_mut(elem_ref).map(|e| e.redraw = e.redraw.merge(mode)),
        )
    }

    pub fn set_colors(&mut self, elem_ref: ElemRef, colors: ElemColors) -> GuiResult<()> {
        let elem = report("set_colors", self.elem_mut(elem_ref))?;
        elem.colors = colors;
        elem.redraw = elem.redraw.merge(RedrawMode::Full);
        Ok(())
    }

    pub fn set_frame_enabled(&mut self, elem_ref: ElemRef, enabled: bool) -> GuiResult<()> {
        let elem = report("set_frame_enabled", self.elem_mut(elem_ref))?;
        elem.features.frame = enabled;
        elem.redraw = elem.redraw.merge(RedrawMode::Full);
        Ok(())
    }

    /// Whether a screen flip was requested since the last call; clears it.
    pub fn take_page_flip(&mut self) -> bool {
        core::mem::take(&mut self.page_flip)
    }

    pub(crate) fn request_page_flip(&mut self) {
        self.page_flip = true;
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Draw one element according to its variant.
    pub fn draw_elem<D>(
        &mut self,
        elem_ref: ElemRef,
        mode: RedrawMode,
        display: &mut D,
    ) -> Result<(), DrawError<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let elem_type = report("draw_elem", self.elem(elem_ref))?.kind.elem_type();
        match elem_type {
            ElemType::Box => self.draw_box(elem_ref, display),
            ElemType::Checkbox => self.draw_checkbox(elem_ref, mode, display),
            ElemType::ListBox => self.draw_listbox(elem_ref, mode, display),
        }
    }

    /// Deliver one touch phase to an element according to its variant.
    ///
    /// Returns whether the element handled the phase.
    pub fn touch_elem(
        &mut self,
        elem_ref: ElemRef,
        phase: TouchPhase,
        rel_x: i16,
        rel_y: i16,
    ) -> GuiResult<bool> {
        let elem_type = report("touch_elem", self.elem(elem_ref))?.kind.elem_type();
        match elem_type {
            ElemType::Box => Ok(false),
            ElemType::Checkbox => self.touch_checkbox(elem_ref, phase, rel_x, rel_y),
            ElemType::ListBox => self.touch_listbox(elem_ref, phase, rel_x, rel_y),
        }
    }

    /// Draw every element with a pending redraw on the current page, then the
    /// scratch element.
    ///
    /// Returns `true` if anything was drawn.
    pub fn redraw_pending<D>(&mut self, display: &mut D) -> Result<bool, DrawError<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut pending: Vec<(ElemRef, RedrawMode), { MAX_ELEMS_PER_PAGE + 1 }> = Vec::new();
        for elem_ref in self.current_page_elems() {
            let mode = self.elem(elem_ref)?.redraw;
            if mode.is_pending() {
                // Capacity covers a full page plus the scratch slot
                pending.push((elem_ref, mode)).ok();
            }
        }
        if let Some(temp) = &self.temp
            && temp.redraw.is_pending()
        {
            pending.push((ElemRef::Temp, temp.redraw)).ok();
        }

        for &(elem_ref, mode) in pending.iter() {
            self.draw_elem(elem_ref, mode, display)?;
        }
        Ok(!pending.is_empty())
    }

    fn draw_box<D>(&mut self, elem_ref: ElemRef, display: &mut D) -> Result<(), DrawError<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let elem = self.elem(elem_ref)?;
        let rect = elem.rect;
        let features = elem.features;
        let colors = elem.colors;
        let glow = elem.glow_visible();

        if features.fill {
            rect.into_styled(PrimitiveStyle::with_fill(colors.fill_for(glow)))
                .draw(display)
                .map_err(DrawError::Display)?;
        }
        if features.frame {
            rect.into_styled(frame_style(colors.frame_for(glow)))
                .draw(display)
                .map_err(DrawError::Display)?;
        }

        self.elem_mut(elem_ref)?.redraw = RedrawMode::None;
        self.request_page_flip();
        Ok(())
    }
}

/// One-pixel outline drawn on the innermost pixels of a shape.
pub(crate) fn frame_style(color: Rgb565) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}
