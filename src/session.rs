//! Everything one running board owns: canvas, tool state, variables, labels,
//! in-flight analyses and the typesetting engine.
//!
//! Event handlers take `&mut Session`; nothing lives in globals. The window
//! loop calls `tick` once per frame to pick up finished analyses and the
//! typesetter's completion signal.

use crate::canvas::CanvasSurface;
use crate::drawing::{DrawingMachine, PointerEvent, ToolState};
use crate::error::Error;
use crate::overlay::Overlay;
use crate::types::Rgb;
use crate::typeset::TypesetLoader;
use crate::vars::VariableDictionary;
use crate::worker::{AnalysisWorker, Analyzer};

/// What a `tick` picked up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub applied: usize,
    pub failed: usize,
}

pub struct Session<A: Analyzer> {
    canvas: CanvasSurface,
    drawing: DrawingMachine,
    vars: VariableDictionary,
    overlay: Overlay,
    worker: AnalysisWorker<A>,
    typesetter: TypesetLoader,
    last_error: Option<String>,
}

impl<A: Analyzer> Session<A> {
    pub fn new(width: usize, height: usize, analyzer: A, typesetter: TypesetLoader) -> Self {
        Self {
            canvas: CanvasSurface::new(width, height),
            drawing: DrawingMachine::new(),
            vars: VariableDictionary::new(),
            overlay: Overlay::new(),
            worker: AnalysisWorker::new(analyzer),
            typesetter,
            last_error: None,
        }
    }

    /// Route a canvas pointer event. Labels sit above the ink, so a press on a
    /// label drags it instead of starting a stroke.
    pub fn pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(p) if self.overlay.begin_drag(p) => {}
            PointerEvent::Move(p) if self.overlay.is_dragging() => self.overlay.drag_to(p),
            PointerEvent::Up | PointerEvent::Leave => {
                self.overlay.end_drag();
                self.drawing.handle(event, &mut self.canvas);
            }
            _ => self.drawing.handle(event, &mut self.canvas),
        }
    }

    pub fn select_color(&mut self, color: Rgb) {
        self.drawing.select_color(color);
    }

    pub fn toggle_eraser(&mut self) {
        self.drawing.toggle_eraser();
    }

    /// Wipe the canvas and the results. Variables are kept.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.overlay.clear();
        self.last_error = None;
        tracing::info!("board cleared");
    }

    /// Snapshot the canvas and send it off with the current variables.
    /// Returns the request id; the answer shows up in a later `tick`.
    pub fn analyze(&mut self) -> Result<u64, Error> {
        let submitted = self
            .canvas
            .snapshot()
            .and_then(|image| self.worker.submit(image, self.vars.current_snapshot()));
        if let Err(e) = &submitted {
            tracing::error!(error = %e, "could not start analysis");
            self.last_error = Some(e.to_string());
        }
        submitted
    }

    /// Apply finished analyses (in arrival order) and notice the typesetter finishing.
    pub fn tick(&mut self) -> TickReport {
        if self.typesetter.poll() {
            self.overlay.retypeset(self.typesetter.engine());
        }

        let mut report = TickReport::default();
        for outcome in self.worker.poll() {
            match outcome.result {
                Ok(results) => {
                    let content = self.canvas.bounding_box_of_content();
                    self.overlay.apply_batch(results, &mut self.vars, content, self.typesetter.engine());
                    self.last_error = None;
                    report.applied += 1;
                }
                Err(e) => {
                    tracing::error!(id = outcome.id, error = %e, "analysis failed");
                    self.last_error = Some(e.to_string());
                    report.failed += 1;
                }
            }
        }
        report
    }

    pub fn canvas(&self) -> &CanvasSurface {
        &self.canvas
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn vars(&self) -> &VariableDictionary {
        &self.vars
    }

    pub fn tool(&self) -> ToolState {
        self.drawing.tool()
    }

    pub fn in_flight(&self) -> usize {
        self.worker.in_flight()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn typesetter_pending(&self) -> bool {
        self.typesetter.is_pending()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
