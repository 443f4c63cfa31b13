// The drawing surface: strokes, eraser, snapshot and content bounds.
// Visual expectation: whatever this buffer holds is composited over a black
// background by draw.rs, so transparent pixels look black on screen.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, RgbaImage};

use crate::draw::for_each_line_point;
use crate::error::Error;
use crate::types::{BoundingBox, FrameBuffer, Rgb, alpha};

pub const STROKE_WIDTH: i32 = 3; // pen thickness in pixels, round caps
pub const ERASER_SIZE: i32 = 20; // side of the square the eraser clears

pub struct CanvasSurface {
    buffer: FrameBuffer,
    pen: Option<(i32, i32)>, // current path position, None before the first stroke
}

impl CanvasSurface {
    /// A fully transparent surface.
    pub fn new(width: usize, height: usize) -> Self {
        Self { buffer: FrameBuffer::new(width, height), pen: None }
    }

    pub fn width(&self) -> usize {
        self.buffer.width
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Start a new path at (x,y). Nothing is painted until the path is extended.
    pub fn begin_stroke(&mut self, x: i32, y: i32) {
        self.pen = Some((x, y));
    }

    /// Paint a round-capped segment from the path position to (x,y).
    /// Visual: a 3px line in `color` follows the pointer.
    pub fn extend_stroke(&mut self, x: i32, y: i32, color: Rgb) {
        let (x0, y0) = self.pen.unwrap_or((x, y));
        let argb = color.to_argb();
        let buffer = &mut self.buffer;
        for_each_line_point(x0, y0, x, y, |px, py| stamp_disc(buffer, px, py, argb));
        self.pen = Some((x, y));
    }

    /// Clear the square of side `size` centered on (x,y) back to transparent.
    pub fn erase(&mut self, x: i32, y: i32, size: i32) {
        let half = size / 2;
        let (x0, y0) = (x - half, y - half);
        for sy in y0..y0 + size {
            for sx in x0..x0 + size {
                if let Some(i) = self.buffer.index(sx, sy) {
                    self.buffer.pixels[i] = 0;
                }
            }
        }
    }

    /// Wipe every pixel and forget the current path.
    pub fn clear(&mut self) {
        self.buffer.pixels.fill(0);
        self.pen = None;
    }

    /// Encode the buffer as a `data:image/png;base64,...` URI.
    pub fn snapshot(&self) -> Result<String, Error> {
        let mut rgba = Vec::with_capacity(self.buffer.pixels.len() * 4);
        for &px in &self.buffer.pixels {
            // 0xAARRGGBB -> R, G, B, A bytes
            rgba.extend_from_slice(&[(px >> 16) as u8, (px >> 8) as u8, px as u8, alpha(px)]);
        }
        let img = RgbaImage::from_raw(self.buffer.width as u32, self.buffer.height as u32, rgba)
            .ok_or_else(|| Error::Encode("pixel buffer does not match its dimensions".into()))?;

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| Error::Encode(e.to_string()))?;

        Ok(format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(png)))
    }

    /// Smallest box holding every pixel with nonzero alpha, or None if nothing is drawn.
    /// Full-frame scan on every call.
    pub fn bounding_box_of_content(&self) -> Option<BoundingBox> {
        let w = self.buffer.width;
        let mut found: Option<BoundingBox> = None;

        for (y, row) in self.buffer.pixels.chunks_exact(w.max(1)).enumerate() {
            for (x, &px) in row.iter().enumerate() {
                if alpha(px) == 0 {
                    continue;
                }
                found = Some(match found {
                    None => BoundingBox { min_x: x, min_y: y, max_x: x, max_y: y },
                    Some(b) => BoundingBox {
                        min_x: b.min_x.min(x),
                        min_y: b.min_y.min(y),
                        max_x: b.max_x.max(x),
                        max_y: b.max_y.max(y),
                    },
                });
            }
        }

        found
    }

    #[cfg(test)]
    pub(crate) fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }
}

/// Paint a filled disc of diameter STROKE_WIDTH at (cx,cy), clipped to the buffer.
fn stamp_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, argb: u32) {
    let r = STROKE_WIDTH / 2;
    let r2 = (STROKE_WIDTH as f32 / 2.0).powi(2);
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx * dx + dy * dy) as f32 > r2 {
                continue;
            }
            if let Some(i) = fb.index(cx + dx, cy + dy) {
                fb.pixels[i] = argb;
            }
        }
    }
}

#[cfg(test)]
#[path = "canvas_test.rs"]
mod tests;
