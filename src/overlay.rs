// Result labels on top of the canvas: where new ones appear, and dragging them around.
// Visual expectation: after an analysis, "x = 5" style boxes pop up centered on
// the ink; each box can be dragged independently and stays where it is dropped.

use crate::analysis::AnalysisResult;
use crate::draw::label_size;
use crate::types::{BoundingBox, Point};
use crate::typeset::Typesetter;
use crate::vars::VariableDictionary;

/// Where labels go when nothing is drawn.
pub const DEFAULT_ANCHOR: Point = Point::new(10.0, 200.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLabel {
    /// `"<expression> = <answer>"` exactly as returned.
    pub text: String,
    /// What is drawn: `text` after typesetting, or `text` itself without an engine.
    pub rendered: String,
    /// Top-left corner, canvas-local.
    pub position: Point,
}

impl DisplayLabel {
    fn contains(&self, p: Point) -> bool {
        let (w, h) = label_size(&self.rendered);
        p.x >= self.position.x
            && p.y >= self.position.y
            && p.x < self.position.x + w as f32
            && p.y < self.position.y + h as f32
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    index: usize,
    last: Point,
}

#[derive(Debug)]
pub struct Overlay {
    labels: Vec<DisplayLabel>,
    anchor: Point,
    visibility: Visibility,
    drag: Option<Drag>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self { labels: Vec::new(), anchor: DEFAULT_ANCHOR, visibility: Visibility::Hidden, drag: None }
    }
}

/// Anchor for a batch: the center of the drawn content, or the default when empty.
pub fn placement(content: Option<BoundingBox>) -> Point {
    content.map_or(DEFAULT_ANCHOR, |b| b.center())
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[DisplayLabel] {
        &self.labels
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Consume one response batch.
    ///
    /// Assignments are recorded in `vars`, every item becomes a label in server
    /// order, then the anchor is recomputed from `content` and given to the new
    /// labels only. Earlier labels keep wherever they were dragged.
    pub fn apply_batch(
        &mut self,
        results: Vec<AnalysisResult>,
        vars: &mut VariableDictionary,
        content: Option<BoundingBox>,
        typesetter: Option<&Typesetter>,
    ) -> usize {
        let first_new = self.labels.len();

        for result in results {
            let text = result.label_text();
            if let AnalysisResult::Assignment { name, value } = result {
                vars.record_assignment(name, value);
            }
            self.labels.push(DisplayLabel { rendered: text.clone(), text, position: self.anchor });
        }

        self.anchor = placement(content);
        for label in &mut self.labels[first_new..] {
            label.position = self.anchor;
        }
        self.visibility = Visibility::Shown;
        self.retypeset(typesetter);

        let added = self.labels.len() - first_new;
        tracing::debug!(added, total = self.labels.len(), x = self.anchor.x, y = self.anchor.y, "labels placed");
        added
    }

    /// Re-render every label's text. Plain text when no engine is available.
    pub fn retypeset(&mut self, typesetter: Option<&Typesetter>) {
        for label in &mut self.labels {
            label.rendered = match typesetter {
                Some(engine) => engine.typeset(&label.text),
                None => label.text.clone(),
            };
        }
    }

    /// Drop all labels and hide the overlay.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.drag = None;
        self.visibility = Visibility::Hidden;
    }

    /// Grab the topmost label under `p`. Returns false when `p` hits no label.
    pub fn begin_drag(&mut self, p: Point) -> bool {
        if self.visibility == Visibility::Hidden {
            return false;
        }
        self.drag = self
            .labels
            .iter()
            .rposition(|l| l.contains(p))
            .map(|index| Drag { index, last: p });
        self.drag.is_some()
    }

    /// Move the grabbed label by the pointer's travel since the last call.
    pub fn drag_to(&mut self, p: Point) {
        let Some(drag) = self.drag.as_mut() else { return };
        if let Some(label) = self.labels.get_mut(drag.index) {
            label.position.x += p.x - drag.last.x;
            label.position.y += p.y - drag.last.y;
        }
        drag.last = p;
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
#[path = "overlay_test.rs"]
mod tests;
