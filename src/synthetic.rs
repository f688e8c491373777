//! Deterministic synthetic kolam images.
//!
//! Produces photographs-without-noise: a mid-grey floor, dark pulli and bright
//! stroke loops. Used by the tests and by `kolam --demo`.

use image::{Rgb, RgbImage};

pub const FLOOR: Rgb<u8> = Rgb([128, 128, 128]);
pub const PULLI: Rgb<u8> = Rgb([20, 20, 20]);
pub const STROKE: Rgb<u8> = Rgb([250, 250, 250]);

/// Builder for a synthetic kolam photograph.
#[derive(Debug, Clone)]
pub struct SyntheticKolam {
    canvas: RgbImage,
}

impl SyntheticKolam {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbImage::from_pixel(width, height, FLOOR),
        }
    }

    /// Solid dot of the given radius.
    pub fn dot(mut self, center: (f32, f32), radius: f32) -> Self {
        let (cx, cy) = center;
        let r2 = radius * radius;
        let x0 = (cx - radius).floor().max(0.0) as u32;
        let y0 = (cy - radius).floor().max(0.0) as u32;
        let x1 = ((cx + radius).ceil() as u32).min(self.canvas.width().saturating_sub(1));
        let y1 = ((cy + radius).ceil() as u32).min(self.canvas.height().saturating_sub(1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.canvas.put_pixel(x, y, PULLI);
                }
            }
        }
        self
    }

    /// `rows` x `cols` dots, `spacing` apart, first dot at `origin`.
    pub fn dot_grid(mut self, rows: usize, cols: usize, spacing: f32, origin: (f32, f32), radius: f32) -> Self {
        for r in 0..rows {
            for c in 0..cols {
                let center = (origin.0 + c as f32 * spacing, origin.1 + r as f32 * spacing);
                self = self.dot(center, radius);
            }
        }
        self
    }

    /// Axis-aligned rectangular outline, `thickness` pixels wide, drawn inward
    /// from the given outer bounds (inclusive).
    pub fn rect_loop(mut self, x0: u32, y0: u32, x1: u32, y1: u32, thickness: u32) -> Self {
        for y in y0..=y1 {
            for x in x0..=x1 {
                let on_edge = x < x0 + thickness
                    || x + thickness > x1
                    || y < y0 + thickness
                    || y + thickness > y1;
                if on_edge && x < self.canvas.width() && y < self.canvas.height() {
                    self.canvas.put_pixel(x, y, STROKE);
                }
            }
        }
        self
    }

    /// Circular outline between `inner` and `outer` radii.
    pub fn ring_loop(mut self, center: (f32, f32), inner: f32, outer: f32) -> Self {
        let (cx, cy) = center;
        let (w, h) = self.canvas.dimensions();
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d >= inner && d <= outer {
                    self.canvas.put_pixel(x, y, STROKE);
                }
            }
        }
        self
    }

    /// Filled bright square patch, useful as a tiny stroke fragment.
    pub fn bright_patch(mut self, x0: u32, y0: u32, side: u32) -> Self {
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                if x < self.canvas.width() && y < self.canvas.height() {
                    self.canvas.put_pixel(x, y, STROKE);
                }
            }
        }
        self
    }

    pub fn build(self) -> RgbImage {
        self.canvas
    }
}

/// A 5x5 pulli grid surrounded by four round loops, as rendered by `kolam --demo`.
pub fn demo_kolam() -> RgbImage {
    SyntheticKolam::new(480, 480)
        .dot_grid(5, 5, 60.0, (120.0, 120.0), 4.0)
        .ring_loop((60.0, 60.0), 20.0, 23.0)
        .ring_loop((420.0, 60.0), 20.0, 23.0)
        .ring_loop((60.0, 420.0), 20.0, 23.0)
        .ring_loop((420.0, 420.0), 20.0, 23.0)
        .build()
}
