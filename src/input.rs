// Turns per-frame mouse samples into discrete pointer events for the canvas.
// minifb only reports "where is the mouse" and "is the button held", so edges
// (down, up, leave) are derived here by comparing with the previous frame.

use crate::drawing::PointerEvent;
use crate::types::Point;

#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    inside: bool,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `pos` is canvas-local, or None when the pointer is off the canvas.
    pub fn update(&mut self, pos: Option<Point>, down: bool) -> Option<PointerEvent> {
        let was_down = std::mem::replace(&mut self.was_down, down);

        let Some(p) = pos else {
            self.last = None;
            return std::mem::replace(&mut self.inside, false).then_some(PointerEvent::Leave);
        };
        self.inside = true;
        let moved = self.last != Some(p);
        self.last = Some(p);

        match (was_down, down) {
            (false, true) => Some(PointerEvent::Down(p)),
            (true, false) => Some(PointerEvent::Up),
            _ if moved => Some(PointerEvent::Move(p)),
            _ => None,
        }
    }
}
