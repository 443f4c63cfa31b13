// Pointer-driven drawing state: which tool is active and whether a stroke is in progress.
// Visual expectation: holding the left button paints (or erases) under the cursor;
// releasing it or leaving the canvas stops the stroke.

use crate::canvas::{CanvasSurface, ERASER_SIZE};
use crate::types::{Point, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    Idle,
    Drawing,
}

/// Pointer transitions in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    pub color: Rgb,
    pub eraser: bool,
    pub pointer_down: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self { color: Rgb::WHITE, eraser: false, pointer_down: false }
    }
}

#[derive(Debug, Default)]
pub struct DrawingMachine {
    tool: ToolState,
}

impl DrawingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawingState {
        if self.tool.pointer_down { DrawingState::Drawing } else { DrawingState::Idle }
    }

    pub fn tool(&self) -> ToolState {
        self.tool
    }

    /// Pick a pen color. Always switches the eraser off.
    pub fn select_color(&mut self, color: Rgb) {
        self.tool.color = color;
        self.tool.eraser = false;
    }

    pub fn toggle_eraser(&mut self) {
        self.tool.eraser = !self.tool.eraser;
    }

    /// Feed one pointer event; mutates the canvas when a stroke is in progress.
    pub fn handle(&mut self, event: PointerEvent, canvas: &mut CanvasSurface) {
        match (self.state(), event) {
            (_, PointerEvent::Down(p)) => {
                let (x, y) = pixel(p);
                canvas.begin_stroke(x, y);
                self.tool.pointer_down = true;
            }
            (DrawingState::Drawing, PointerEvent::Move(p)) => {
                let (x, y) = pixel(p);
                if self.tool.eraser {
                    canvas.erase(x, y, ERASER_SIZE);
                } else {
                    canvas.extend_stroke(x, y, self.tool.color);
                }
            }
            (DrawingState::Idle, PointerEvent::Move(_)) => {}
            (_, PointerEvent::Up | PointerEvent::Leave) => {
                self.tool.pointer_down = false;
            }
        }
    }
}

#[inline]
fn pixel(p: Point) -> (i32, i32) {
    (p.x.floor() as i32, p.y.floor() as i32)
}

#[cfg(test)]
#[path = "drawing_test.rs"]
mod tests;
