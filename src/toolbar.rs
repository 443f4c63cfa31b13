// The strip above the canvas: Clear, color swatches, eraser toggle, Analyse, status text.
// Visual: a dark bar with small buttons; the active swatch has a yellow outline.

use crate::draw::{TEXT_COLOR, draw_rect_outline, draw_text_5x7, fill_rect, text_size};
use crate::drawing::ToolState;
use crate::types::{FrameBuffer, Rgb};

pub const TOOLBAR_HEIGHT: usize = 40;

pub const SWATCHES: [Rgb; 8] = [
    Rgb::new(255, 255, 255), // white
    Rgb::new(238, 51, 51),   // red
    Rgb::new(34, 139, 230),  // blue
    Rgb::new(64, 192, 87),   // green
    Rgb::new(250, 176, 5),   // yellow
    Rgb::new(190, 75, 219),  // purple
    Rgb::new(21, 170, 191),  // cyan
    Rgb::new(253, 126, 20),  // orange
];

const BAR_BG: u32 = 0x00_11_11_11;
const BUTTON_BG: u32 = 0x00_1F_29_37;
const HIGHLIGHT: u32 = 0x00_FF_CC_33;
const MARGIN: i32 = 8;
const BUTTON_H: i32 = 24;
const SWATCH: i32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Clear,
    Swatch(usize),
    ToggleEraser,
    Analyse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

fn button_width(label: &str) -> i32 {
    text_size(label, 1).0 + 2 * MARGIN
}

fn eraser_label(eraser: bool) -> &'static str {
    if eraser { "DISABLE ERASER" } else { "ENABLE ERASER" }
}

/// Buttons left to right, in window coordinates.
pub fn layout() -> Vec<(ToolbarAction, Rect)> {
    let top = (TOOLBAR_HEIGHT as i32 - BUTTON_H) / 2;
    let mut x = MARGIN;
    let mut out = Vec::with_capacity(SWATCHES.len() + 3);

    let w = button_width("CLEAR SCREEN");
    out.push((ToolbarAction::Clear, Rect { x, y: top, w, h: BUTTON_H }));
    x += w + MARGIN;

    for i in 0..SWATCHES.len() {
        out.push((ToolbarAction::Swatch(i), Rect { x, y: top, w: SWATCH, h: SWATCH }));
        x += SWATCH + MARGIN / 2;
    }
    x += MARGIN / 2;

    // wide enough for either eraser label so the buttons never shift
    let w = button_width(eraser_label(true));
    out.push((ToolbarAction::ToggleEraser, Rect { x, y: top, w, h: BUTTON_H }));
    x += w + MARGIN;

    let w = button_width("ANALYSE");
    out.push((ToolbarAction::Analyse, Rect { x, y: top, w, h: BUTTON_H }));

    out
}

/// Which button, if any, is under window point (x,y).
pub fn hit(x: i32, y: i32) -> Option<ToolbarAction> {
    layout().into_iter().find(|(_, r)| r.contains(x, y)).map(|(a, _)| a)
}

pub fn draw_toolbar(fb: &mut FrameBuffer, tool: ToolState, status: &str) {
    fill_rect(fb, 0, 0, fb.width as i32, TOOLBAR_HEIGHT as i32, BAR_BG);

    for (action, r) in layout() {
        match action {
            ToolbarAction::Swatch(i) => {
                fill_rect(fb, r.x, r.y, r.w, r.h, SWATCHES[i].to_rgb());
                if !tool.eraser && tool.color == SWATCHES[i] {
                    draw_rect_outline(fb, r.x - 2, r.y - 2, r.w + 4, r.h + 4, HIGHLIGHT);
                }
            }
            _ => {
                let label = match action {
                    ToolbarAction::Clear => "CLEAR SCREEN",
                    ToolbarAction::ToggleEraser => eraser_label(tool.eraser),
                    _ => "ANALYSE",
                };
                fill_rect(fb, r.x, r.y, r.w, r.h, BUTTON_BG);
                if action == ToolbarAction::ToggleEraser && tool.eraser {
                    draw_rect_outline(fb, r.x, r.y, r.w, r.h, HIGHLIGHT);
                }
                let (tw, th) = text_size(label, 1);
                draw_text_5x7(fb, r.x + (r.w - tw) / 2, r.y + (r.h - th) / 2, label, TEXT_COLOR);
            }
        }
    }

    let (sw, sh) = text_size(status, 1);
    let sx = fb.width as i32 - sw - MARGIN;
    draw_text_5x7(fb, sx, (TOOLBAR_HEIGHT as i32 - sh) / 2, status, TEXT_COLOR);
}
