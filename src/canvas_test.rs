use super::*;
use base64::Engine as _;

fn fill_square(canvas: &mut CanvasSurface, x0: usize, y0: usize, x1: usize, y1: usize) {
    let w = canvas.width();
    let fb = canvas.buffer_mut();
    for y in y0..=y1 {
        for x in x0..=x1 {
            fb.pixels[y * w + x] = Rgb::WHITE.to_argb();
        }
    }
}

#[test]
fn empty_canvas_has_no_bounding_box() {
    let canvas = CanvasSurface::new(64, 48);
    assert_eq!(canvas.bounding_box_of_content(), None);
}

#[test]
fn filled_square_at_origin_reports_inclusive_bounds() {
    let mut canvas = CanvasSurface::new(64, 48);
    fill_square(&mut canvas, 0, 0, 10, 10);

    let bbox = canvas.bounding_box_of_content().unwrap();
    assert_eq!(bbox, BoundingBox { min_x: 0, min_y: 0, max_x: 10, max_y: 10 });
    assert_eq!(bbox.center(), crate::types::Point::new(5.0, 5.0));
}

#[test]
fn begin_stroke_alone_paints_nothing() {
    let mut canvas = CanvasSurface::new(32, 32);
    canvas.begin_stroke(10, 10);
    assert_eq!(canvas.bounding_box_of_content(), None);
}

#[test]
fn horizontal_stroke_is_three_pixels_thick() {
    let mut canvas = CanvasSurface::new(64, 64);
    canvas.begin_stroke(10, 20);
    canvas.extend_stroke(30, 20, Rgb::WHITE);

    let bbox = canvas.bounding_box_of_content().unwrap();
    assert_eq!(bbox, BoundingBox { min_x: 9, min_y: 19, max_x: 31, max_y: 21 });
    assert_eq!(canvas.buffer().get(20, 20), Some(Rgb::WHITE.to_argb()));
    assert_eq!(canvas.buffer().get(20, 22), Some(0));
}

const RECT: (i32, i32, i32, i32) = (12, 8, 40, 30); // left, top, right, bottom (inclusive)

fn assert_stroke_stays_in_rect(path: &[(i32, i32)]) {
    let (left, top, right, bottom) = RECT;
    let mut canvas = CanvasSurface::new(80, 60);
    canvas.begin_stroke(path[0].0, path[0].1);
    for &(x, y) in &path[1..] {
        canvas.extend_stroke(x, y, Rgb::new(255, 0, 0));
    }

    let half = STROKE_WIDTH / 2;
    let allowed = BoundingBox {
        min_x: (left - half) as usize,
        min_y: (top - half) as usize,
        max_x: (right + half) as usize,
        max_y: (bottom + half) as usize,
    };
    let bbox = canvas.bounding_box_of_content().unwrap();
    assert!(allowed.contains(&bbox), "path {path:?}: {bbox:?} escapes {allowed:?}");
}

#[test]
fn every_segment_between_grid_points_stays_inside_rect_plus_half_width() {
    let (left, top, right, bottom) = RECT;
    let xs = [left, left + 1, (left + right) / 2, right - 1, right];
    let ys = [top, top + 1, (top + bottom) / 2, bottom - 1, bottom];
    let grid: Vec<(i32, i32)> = xs.iter().flat_map(|&x| ys.iter().map(move |&y| (x, y))).collect();

    for &a in &grid {
        for &b in &grid {
            assert_stroke_stays_in_rect(&[a, b]);
        }
    }
}

#[test]
fn long_wandering_strokes_stay_inside_rect_plus_half_width() {
    let (left, top, right, bottom) = RECT;
    // small LCG so the paths are the same on every run
    let mut seed: u32 = 0x2545_F491;
    let mut next = |lo: i32, hi: i32| {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        lo + ((seed >> 16) as i32).rem_euclid(hi - lo + 1)
    };

    for _ in 0..64 {
        let len = next(2, 12) as usize;
        let path: Vec<(i32, i32)> = (0..len).map(|_| (next(left, right), next(top, bottom))).collect();
        assert_stroke_stays_in_rect(&path);
    }
}

#[test]
fn extend_continues_from_previous_end_point() {
    let mut canvas = CanvasSurface::new(64, 64);
    canvas.begin_stroke(5, 5);
    canvas.extend_stroke(5, 20, Rgb::WHITE);
    canvas.extend_stroke(20, 20, Rgb::WHITE);

    // the corner joining both segments is inked
    assert_eq!(canvas.buffer().get(5, 20).map(alpha), Some(255));
    assert_eq!(canvas.buffer().get(12, 20).map(alpha), Some(255));
    assert_eq!(canvas.buffer().get(12, 12).map(alpha), Some(0));
}

#[test]
fn strokes_off_the_edge_are_clipped() {
    let mut canvas = CanvasSurface::new(16, 16);
    canvas.begin_stroke(-10, 8);
    canvas.extend_stroke(40, 8, Rgb::WHITE);

    let bbox = canvas.bounding_box_of_content().unwrap();
    assert_eq!(bbox, BoundingBox { min_x: 0, min_y: 7, max_x: 15, max_y: 9 });
}

#[test]
fn erase_clears_a_centered_square() {
    let mut canvas = CanvasSurface::new(64, 64);
    fill_square(&mut canvas, 0, 0, 63, 63);
    canvas.erase(32, 32, ERASER_SIZE);

    assert_eq!(canvas.buffer().get(22, 22), Some(0));
    assert_eq!(canvas.buffer().get(41, 41), Some(0));
    assert_eq!(canvas.buffer().get(42, 42).map(alpha), Some(255));
    assert_eq!(canvas.buffer().get(21, 32).map(alpha), Some(255));
}

#[test]
fn erasing_all_ink_empties_the_bounding_box() {
    let mut canvas = CanvasSurface::new(64, 64);
    canvas.begin_stroke(28, 30);
    canvas.extend_stroke(34, 30, Rgb::WHITE);
    canvas.erase(31, 30, ERASER_SIZE);
    assert_eq!(canvas.bounding_box_of_content(), None);
}

#[test]
fn clear_resets_buffer_and_path() {
    let mut canvas = CanvasSurface::new(32, 32);
    canvas.begin_stroke(2, 2);
    canvas.extend_stroke(20, 20, Rgb::WHITE);
    canvas.clear();

    assert_eq!(canvas.bounding_box_of_content(), None);
    assert!(canvas.buffer().pixels.iter().all(|&p| p == 0));

    // after a clear the next extend starts a fresh path at the pointer
    canvas.extend_stroke(10, 10, Rgb::WHITE);
    let bbox = canvas.bounding_box_of_content().unwrap();
    assert_eq!(bbox, BoundingBox { min_x: 9, min_y: 9, max_x: 11, max_y: 11 });
}

#[test]
fn snapshot_is_a_png_data_uri_that_decodes_back() {
    let mut canvas = CanvasSurface::new(20, 10);
    canvas.begin_stroke(2, 5);
    canvas.extend_stroke(17, 5, Rgb::new(0, 128, 255));

    let uri = canvas.snapshot().unwrap();
    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    let bytes = general_purpose::STANDARD.decode(payload).unwrap();
    let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .unwrap()
        .to_rgba8();

    assert_eq!(img.dimensions(), (20, 10));
    assert_eq!(img.get_pixel(10, 5).0, [0, 128, 255, 255]);
    assert_eq!(img.get_pixel(10, 0).0, [0, 0, 0, 0]);
}
