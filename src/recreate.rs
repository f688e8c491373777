//! Simplified redraw of a kolam from its detected loops.
//!
//! Every loop is redrawn as a white stroke on black. Loops that are roughly
//! round and of motif size also get a small dot at their centroid, standing in
//! for the pulli a hand-drawn kolam would have there. The stroke topology itself
//! is not reconstructed.

use image::{Rgb, RgbImage};
use log::{debug, warn};

use crate::config::RecreateConfig;
use crate::draw::{fill_disc, stroke_closed_polyline};
use crate::geometry::{Moments, circularity, closed_perimeter, polygon_area};
use crate::types::Contour;

const STROKE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Centroid of a loop that qualifies for a decoration dot, truncated to pixels.
pub fn decoration_center(contour: &Contour, config: &RecreateConfig) -> Option<(i32, i32)> {
    let area = polygon_area(&contour.points);
    let perimeter = closed_perimeter(&contour.points);
    let circularity = match circularity(area, perimeter) {
        Some(c) if area > 0.0 => c,
        _ => {
            debug!(
                "skipping degenerate contour with {} points: area={area:.1} perimeter={perimeter:.1}",
                contour.len()
            );
            return None;
        }
    };
    if !config.is_decorated(area, circularity) {
        return None;
    }
    let (cx, cy) = Moments::of_polygon(&contour.points).centroid()?;
    Some((cx as i32, cy as i32))
}

/// Redraws `contours` on a black `width` x `height` canvas.
pub fn recreate_kolam(
    contours: &[Contour],
    width: u32,
    height: u32,
    config: &RecreateConfig,
) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);

    if contours.is_empty() {
        warn!("No contours were provided to recreate the design.");
        return canvas;
    }

    for contour in contours {
        stroke_closed_polyline(&mut canvas, &contour.points, config.stroke_width, STROKE_COLOR);
    }

    for center in contours.iter().filter_map(|c| decoration_center(c, config)) {
        fill_disc(&mut canvas, center, config.decoration_radius, STROKE_COLOR);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_trace_is_not_decorated() {
        // Back-and-forth run: length but no enclosed area.
        let flat = Contour::from_coords(&[(10, 10), (60, 10), (30, 10)]);
        assert!(closed_perimeter(&flat.points) > 0.0);
        assert_eq!(polygon_area(&flat.points), 0.0);
        assert!(decoration_center(&flat, &RecreateConfig::default()).is_none());
    }
}
