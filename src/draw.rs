//! Coverage-based anti-aliased rasterization.
//!
//! Each pixel's coverage is estimated from the distance between its centre and
//! the shape edge, then blended towards the draw colour with
//! `imageproc::pixelops::interpolate`.

use image::{Rgb, RgbImage};
use imageproc::pixelops::interpolate;
use imageproc::point::Point;

fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if coverage <= 0.0 || x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let existing = *canvas.get_pixel(x, y);
    canvas.put_pixel(x, y, interpolate(color, existing, coverage.min(1.0)));
}

fn distance_to_segment(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - a.0) * dx + (py - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Draws a closed polyline of the given stroke `width`.
///
/// Each segment is rasterised inside its own padded bounding box into a
/// coverage buffer that keeps the per-pixel maximum, so joints are blended
/// once and the cost follows the stroke length rather than the loop's extent.
pub fn stroke_closed_polyline(canvas: &mut RgbImage, points: &[Point<i32>], width: f32, color: Rgb<u8>) {
    if points.is_empty() || canvas.width() == 0 || canvas.height() == 0 {
        return;
    }
    let half = width / 2.0;
    let reach = (half + 1.0).ceil() as i32;

    let min_x = (points.iter().map(|p| p.x).min().unwrap_or(0) - reach).max(0);
    let min_y = (points.iter().map(|p| p.y).min().unwrap_or(0) - reach).max(0);
    let max_x = (points.iter().map(|p| p.x).max().unwrap_or(0) + reach).min(canvas.width() as i32 - 1);
    let max_y = (points.iter().map(|p| p.y).max().unwrap_or(0) + reach).min(canvas.height() as i32 - 1);
    if min_x > max_x || min_y > max_y {
        return;
    }
    let box_w = (max_x - min_x + 1) as usize;
    let box_h = (max_y - min_y + 1) as usize;
    let mut coverage = vec![0f32; box_w * box_h];

    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let seg = ((a.x as f32, a.y as f32), (b.x as f32, b.y as f32));
        let x0 = (a.x.min(b.x) - reach).max(min_x);
        let x1 = (a.x.max(b.x) + reach).min(max_x);
        let y0 = (a.y.min(b.y) - reach).max(min_y);
        let y1 = (a.y.max(b.y) + reach).min(max_y);
        for y in y0..=y1 {
            let row = (y - min_y) as usize * box_w;
            for x in x0..=x1 {
                let dist = distance_to_segment(x as f32, y as f32, seg.0, seg.1);
                let c = (half + 0.5 - dist).clamp(0.0, 1.0);
                let slot = &mut coverage[row + (x - min_x) as usize];
                if c > *slot {
                    *slot = c;
                }
            }
        }
    }

    for (idx, &c) in coverage.iter().enumerate() {
        if c > 0.0 {
            let x = min_x + (idx % box_w) as i32;
            let y = min_y + (idx / box_w) as i32;
            blend(canvas, x, y, color, c);
        }
    }
}

/// Draws a filled disc with a soft one-pixel edge.
pub fn fill_disc(canvas: &mut RgbImage, center: (i32, i32), radius: f32, color: Rgb<u8>) {
    let reach = (radius + 1.0).ceil() as i32;
    for y in center.1 - reach..=center.1 + reach {
        for x in center.0 - reach..=center.0 + reach {
            let dx = (x - center.0) as f32;
            let dy = (y - center.1) as f32;
            let dist = (dx * dx + dy * dy).sqrt();
            blend(canvas, x, y, color, (radius + 0.5 - dist).clamp(0.0, 1.0));
        }
    }
}

/// Outlines a circle of `radius` around a sub-pixel `center` with a soft
/// edge, `thickness` pixels wide.
pub fn draw_ring(canvas: &mut RgbImage, center: (f32, f32), radius: f32, thickness: f32, color: Rgb<u8>) {
    let radius = radius.max(1.0);
    let half = thickness / 2.0;
    let outer = (radius + half + 1.0).ceil() as i32;
    let (cx, cy) = (center.0.round() as i32, center.1.round() as i32);
    for y in cy - outer..=cy + outer {
        for x in cx - outer..=cx + outer {
            let dist = (x as f32 - center.0).hypot(y as f32 - center.1);
            let off_ring = (dist - radius).abs();
            blend(canvas, x, y, color, (half + 0.5 - off_ring).clamp(0.0, 1.0));
        }
    }
}
