//! Detection overlays for visual inspection.

use image::{Rgb, RgbImage};

use crate::draw::{draw_ring, stroke_closed_polyline};
use crate::types::{Contour, Keypoint};

const DOT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CONTOUR_WIDTH: f32 = 2.0;
const RING_THICKNESS: f32 = 1.5;

/// Copy of `source` with a ring drawn at each keypoint's size.
pub fn annotate_dots(source: &RgbImage, keypoints: &[Keypoint]) -> RgbImage {
    let mut canvas = source.clone();
    for kp in keypoints {
        draw_ring(&mut canvas, kp.center, kp.size / 2.0, RING_THICKNESS, DOT_COLOR);
    }
    canvas
}

/// Copy of `source` with every contour outlined.
pub fn annotate_contours(source: &RgbImage, contours: &[Contour]) -> RgbImage {
    let mut canvas = source.clone();
    for contour in contours {
        stroke_closed_polyline(&mut canvas, &contour.points, CONTOUR_WIDTH, CONTOUR_COLOR);
    }
    canvas
}
