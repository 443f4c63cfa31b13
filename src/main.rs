// What you SEE:
// • A dark toolbar on top (Clear, color swatches, eraser, Analyse) and a black canvas below.
// • Hold Left Mouse on the canvas to draw; with the eraser on, you wipe a square instead.
// • Analyse (or Enter) sends the drawing off; answers pop up as boxes centered on your ink.
// • Drag answer boxes anywhere. C clears, E toggles the eraser, 1-8 pick a color. ESC quits.

use mathpad::analysis::AnalysisClient;
use mathpad::canvas::ERASER_SIZE;
use mathpad::config::Config;
use mathpad::draw::{Drawer, composite_canvas, draw_crosshair, draw_label, draw_rect_outline};
use mathpad::error::Error;
use mathpad::input::PointerTracker;
use mathpad::logging;
use mathpad::overlay::Visibility;
use mathpad::session::Session;
use mathpad::toolbar::{self, SWATCHES, TOOLBAR_HEIGHT, ToolbarAction};
use mathpad::types::{FrameBuffer, Point};
use mathpad::typeset::TypesetLoader;
use mathpad::worker::Analyzer;

const BACKGROUND: u32 = 0x00_00_00_00; // canvas background (black)
const CURSOR_COLOR: u32 = 0x00_FF_CC_33;
const STATUS_MAX_CHARS: usize = 48;

fn main() -> Result<(), Error> {
    /* --- Config first: without an endpoint there is nothing to analyse against --- */
    let _ = dotenvy::dotenv();
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            logging::init(false);
            tracing::error!(error = %e, "startup aborted");
            return Err(e);
        }
    };
    logging::init(config.debug);

    /* --- Session: canvas + tools + variables + labels + background workers --- */
    let typesetter = TypesetLoader::spawn(config.macros.clone());
    let client = AnalysisClient::new(&config.api_url)?;
    tracing::info!(endpoint = client.url(), width = config.width, height = config.height, "starting");
    let mut session = Session::new(config.width, config.height, client, typesetter);

    /* --- Window + reusable screen buffer (toolbar strip on top of the canvas) --- */
    let win_h = config.height + TOOLBAR_HEIGHT;
    let mut drawer = Drawer::new("mathpad", config.width, win_h)?;
    let mut screen = FrameBuffer::new(config.width, win_h);
    let mut tracker = PointerTracker::new();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Keyboard shortcuts */
        if drawer.clear_pressed_once() {
            session.clear();
        }
        if drawer.eraser_pressed_once() {
            session.toggle_eraser();
        }
        if let Some(i) = drawer.swatch_pressed_once() {
            session.select_color(SWATCHES[i]);
        }
        let mut analyse = drawer.analyse_pressed_once();

        /* 2) Mouse: toolbar clicks, then canvas pointer events (canvas-local coords) */
        let mouse = drawer.sample_mouse();
        if mouse.pressed {
            if let Some((x, y)) = mouse.pos.filter(|&(_, y)| y < TOOLBAR_HEIGHT as f32) {
                match toolbar::hit(x as i32, y as i32) {
                    Some(ToolbarAction::Clear) => session.clear(),
                    Some(ToolbarAction::Swatch(i)) => session.select_color(SWATCHES[i]),
                    Some(ToolbarAction::ToggleEraser) => session.toggle_eraser(),
                    Some(ToolbarAction::Analyse) => analyse = true,
                    None => {}
                }
            }
        }
        let canvas_pos = mouse.pos.and_then(|(x, y)| {
            let y = y - TOOLBAR_HEIGHT as f32;
            (y >= 0.0).then_some(Point::new(x, y))
        });
        if let Some(event) = tracker.update(canvas_pos, mouse.down) {
            session.pointer(event);
        }

        // failures are logged and shown in the status line by the session
        if analyse {
            let _ = session.analyze();
        }

        /* 3) Pick up finished analyses and the typesetter */
        session.tick();

        /* 4) Compose the frame: canvas, labels, cursor, toolbar */
        composite_canvas(&mut screen, session.canvas().buffer(), TOOLBAR_HEIGHT, BACKGROUND);

        if session.overlay().visibility() == Visibility::Shown {
            for label in session.overlay().labels() {
                let x = label.position.x.round() as i32;
                let y = label.position.y.round() as i32 + TOOLBAR_HEIGHT as i32;
                draw_label(&mut screen, x, y, &label.rendered);
            }
        }

        if let Some(p) = canvas_pos {
            let (cx, cy) = (p.x as i32, p.y as i32 + TOOLBAR_HEIGHT as i32);
            if session.tool().eraser {
                let half = ERASER_SIZE / 2;
                draw_rect_outline(&mut screen, cx - half, cy - half, ERASER_SIZE, ERASER_SIZE, CURSOR_COLOR);
            } else {
                draw_crosshair(&mut screen, cx, cy, 8, CURSOR_COLOR);
            }
        }

        toolbar::draw_toolbar(&mut screen, session.tool(), &status_text(&session));

        /* 5) Present */
        drawer.present(&screen)?;
    }

    tracing::info!(pending = session.in_flight(), "window closed");
    Ok(())
}

/// Right-hand side of the toolbar.
fn status_text<A: Analyzer>(session: &Session<A>) -> String {
    let text = if session.in_flight() > 0 {
        format!("ANALYSING... ({})", session.in_flight())
    } else if let Some(err) = session.last_error() {
        format!("FAILED: {err}")
    } else if session.typesetter_pending() {
        "LOADING MATH...".to_string()
    } else if session.vars().is_empty() {
        "READY".to_string()
    } else {
        format!("VARS: {}", session.vars().len())
    };
    text.chars().take(STATUS_MAX_CHARS).collect()
}
