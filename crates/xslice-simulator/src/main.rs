//! Desktop simulator for the xslice widget library.
//!
//! Renders a demo page in an SDL2 window via `embedded-graphics-simulator`:
//! a pair of checkboxes, a three-member radio group and a list box.
//!
//! # Key bindings
//!
//! | Key        | Action                          |
//! |------------|---------------------------------|
//! | Up / Down  | Move the list box selection     |
//! | Home       | Select the first list item      |
//! | T          | Toggle the first checkbox       |
//! | P          | Open / close the popup page     |
//! | Q / Esc    | Quit                            |
//!
//! Mouse press, drag and release are forwarded as touch events.

use std::time::{Duration, Instant};

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use xslice_core::ui::colors::{DARK_GRAY, WHITE};
use xslice_core::{
    CheckboxStyle, ElemColors, ElemId, ElemRef, GroupId, Gui, GuiResult, PageId, SEL_NONE,
    TouchEvent, TouchPhase, TouchPoint,
};

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

const MAIN_PAGE: PageId = PageId(0);
const POPUP_PAGE: PageId = PageId(1);

const COLOR_GROUP: GroupId = GroupId(1);

const ITEMS: &str = "Red|Orange|Yellow|Green|Blue|Violet";

/// Handles the key bindings act on.
struct Demo {
    first_checkbox: ElemRef,
    listbox: ElemRef,
}

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

/// Build both pages and register logging callbacks on every widget.
fn build_ui(gui: &mut Gui) -> GuiResult<Demo> {
    let font = gui.add_font(&FONT_6X10)?;
    gui.add_page(MAIN_PAGE)?;
    gui.add_page(POPUP_PAGE)?;

    let title = gui.add_box(Some(MAIN_PAGE), ElemId(1), rect(0, 0, 320, 24))?;
    gui.set_colors(title, ElemColors::default().with_fill(Rgb565::CSS_NAVY, Rgb565::CSS_NAVY))?;

    let mut first_checkbox = None;
    for (n, style) in [CheckboxStyle::Box, CheckboxStyle::Cross].into_iter().enumerate() {
        let r = gui.create_checkbox(
            ElemId(10 + n as i16),
            Some(MAIN_PAGE),
            rect(20, 40 + 35 * n as i32, 24, 24),
            false,
            style,
            Rgb565::GREEN,
            false,
        )?;
        gui.set_checkbox_callback(
            r,
            Some(Box::new(|_, _, selected, checked| {
                info!("Checkbox -> {:?} checked={}", selected, checked)
            })),
        )?;
        first_checkbox.get_or_insert(r);
    }

    for n in 0..3 {
        let r = gui.create_checkbox(
            ElemId(20 + n),
            Some(MAIN_PAGE),
            rect(20, 120 + 35 * n as i32, 25, 25),
            true,
            CheckboxStyle::Round,
            Rgb565::YELLOW,
            n == 0,
        )?;
        gui.set_group(r, Some(COLOR_GROUP))?;
        gui.set_checkbox_callback(
            r,
            Some(Box::new(|_, _, selected, checked| {
                info!("Radio group -> {:?} checked={}", selected, checked)
            })),
        )?;
    }

    let listbox = gui.create_listbox(
        ElemId(30),
        Some(MAIN_PAGE),
        rect(140, 40, 160, 190),
        font,
        Some(ITEMS),
        SEL_NONE,
    )?;
    gui.set_colors(
        listbox,
        ElemColors::default()
            .with_fill(Rgb565::BLACK, Rgb565::CSS_DARK_SLATE_BLUE)
            .with_text(Rgb565::CSS_LIGHT_GRAY),
    )?;
    gui.set_frame_enabled(listbox, true)?;
    gui.set_listbox_callback(
        listbox,
        Some(Box::new(|gui: &Gui, r: ElemRef, index: i16| {
            let text = gui.listbox_item(r, index).ok().flatten().unwrap_or("-");
            info!("List box -> {} ({})", index, text)
        })),
    )?;

    let panel = gui.add_box(Some(POPUP_PAGE), ElemId(40), rect(60, 60, 200, 120))?;
    gui.set_colors(
        panel,
        ElemColors::default()
            .with_fill(DARK_GRAY, DARK_GRAY)
            .with_frame(WHITE, WHITE),
    )?;
    gui.set_frame_enabled(panel, true)?;
    let dismiss = gui.create_checkbox(
        ElemId(41),
        Some(POPUP_PAGE),
        rect(148, 108, 24, 24),
        false,
        CheckboxStyle::Box,
        Rgb565::RED,
        true,
    )?;
    gui.set_colors(
        dismiss,
        ElemColors::default()
            .with_fill(Rgb565::BLACK, DARK_GRAY)
            .with_frame(Rgb565::CSS_SILVER, Rgb565::RED),
    )?;

    gui.set_page(MAIN_PAGE)?;
    Ok(Demo {
        first_checkbox: first_checkbox.ok_or(xslice_core::GuiError::InvalidRef)?,
        listbox,
    })
}

/// Translate a key press into a GUI operation.
fn handle_key(gui: &mut Gui, demo: &Demo, keycode: Keycode) -> GuiResult<()> {
    match keycode {
        Keycode::Up => {
            gui.touch_elem(demo.listbox, TouchPhase::SetRel, 0, -1)?;
        }
        Keycode::Down => {
            gui.touch_elem(demo.listbox, TouchPhase::SetRel, 0, 1)?;
        }
        Keycode::Home => {
            gui.touch_elem(demo.listbox, TouchPhase::SetAbs, 0, 0)?;
        }
        Keycode::T => gui.toggle_checkbox(demo.first_checkbox)?,
        Keycode::P => {
            if gui.current_page() == Some(POPUP_PAGE) {
                gui.pop_page();
            } else {
                gui.push_page(POPUP_PAGE)?;
            }
            info!("Current page: {:?}", gui.current_page());
        }
        _ => {}
    }
    Ok(())
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

fn main() {
    env_logger::init();
    info!("Starting xslice simulator");
    info!("Keys: Up/Down/Home=list  T=toggle  P=popup  Q=Quit");

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("xslice Simulator", &output_settings);

    let mut gui = Gui::default();
    let demo = match build_ui(&mut gui) {
        Ok(demo) => demo,
        Err(err) => {
            error!("Failed to build UI: {}", err);
            return;
        }
    };

    let mut pressed = false;
    let mut shown_page = None;
    // The window must be shown once before it yields events
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            let result = match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    handle_key(&mut gui, &demo, keycode)
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    pressed = true;
                    gui.track_touch(TouchEvent::Press(touch_point(point))).map(drop)
                }
                SimulatorEvent::MouseMove { point } if pressed => {
                    gui.track_touch(TouchEvent::Drag(touch_point(point))).map(drop)
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    pressed = false;
                    gui.track_touch(TouchEvent::Release(touch_point(point))).map(drop)
                }
                _ => Ok(()),
            };
            if let Err(err) = result {
                error!("Event handling failed: {}", err);
            }
        }

        // A different page leaves stale pixels outside its elements
        if shown_page != gui.current_page() {
            let _ = display.clear(Rgb565::BLACK);
            shown_page = gui.current_page();
        }
        if let Err(err) = gui.redraw_pending(&mut display) {
            error!("Draw error: {}", err);
        }
        // The window is refreshed every frame to keep the event pump alive
        gui.take_page_flip();
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
