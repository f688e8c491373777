//! Pulli (dot) detection.
//!
//! The image is binarised against a Gaussian-weighted local mean so that dots
//! darker than their surroundings become foreground regardless of global
//! lighting. Each foreground region's outer boundary is then measured and kept
//! only if it looks like a small round mark.

use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::filter::separable_filter_equal;
use imageproc::map::map_colors2;
use imageproc::point::Point;
use log::{debug, info};

use crate::config::DotDetectorConfig;
use crate::error::KolamError;
use crate::geometry::{Moments, circularity, closed_perimeter, convex_hull_area};
use crate::grey::to_gray;
use crate::types::Keypoint;

/// Shape measurements of one candidate blob boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobShape {
    pub center: (f64, f64),
    pub area: f64,
    pub perimeter: f64,
    pub circularity: f64,
    pub convexity: f64,
    pub inertia_ratio: f64,
    /// Median distance from the centre to the boundary points.
    pub radius: f64,
}

impl BlobShape {
    /// Measures a traced boundary. Returns `None` when it encloses no area.
    pub fn measure(boundary: &[Point<i32>]) -> Option<Self> {
        let moments = Moments::of_polygon(boundary);
        let (cx, cy) = moments.centroid()?;
        let area = moments.m00;
        let perimeter = closed_perimeter(boundary);
        let circularity = circularity(area, perimeter)?;
        let hull_area = convex_hull_area(boundary);
        let convexity = if hull_area > 0.0 { area / hull_area } else { 0.0 };

        let mut dists: Vec<f64> = boundary
            .iter()
            .map(|p| ((p.x as f64 - cx).powi(2) + (p.y as f64 - cy).powi(2)).sqrt())
            .collect();
        dists.sort_by(|a, b| a.total_cmp(b));
        let radius = dists[dists.len() / 2];

        Some(Self {
            center: (cx, cy),
            area,
            perimeter,
            circularity,
            convexity,
            inertia_ratio: moments.inertia_ratio(),
            radius,
        })
    }

    pub fn keypoint(&self) -> Keypoint {
        Keypoint::new(
            self.center.0 as f32,
            self.center.1 as f32,
            (self.radius * 2.0) as f32,
        )
    }
}

impl DotDetectorConfig {
    pub fn passes_area(&self, shape: &BlobShape) -> bool {
        shape.area >= self.min_area && shape.area < self.max_area
    }

    pub fn passes_circularity(&self, shape: &BlobShape) -> bool {
        shape.circularity >= self.min_circularity
    }

    pub fn passes_convexity(&self, shape: &BlobShape) -> bool {
        shape.convexity >= self.min_convexity
    }

    pub fn passes_inertia(&self, shape: &BlobShape) -> bool {
        shape.inertia_ratio >= self.min_inertia_ratio
    }

    pub fn accepts(&self, shape: &BlobShape) -> bool {
        self.passes_area(shape)
            && self.passes_circularity(shape)
            && self.passes_convexity(shape)
            && self.passes_inertia(shape)
    }
}

/// Foreground (255) wherever a pixel is darker than its weighted neighbourhood
/// mean minus `config.offset`.
pub fn adaptive_mask(gray: &GrayImage, config: &DotDetectorConfig) -> GrayImage {
    let local_mean = separable_filter_equal(gray, &config.gaussian_kernel());
    let offset = config.offset;
    map_colors2(gray, &local_mean, |px, mean| {
        if (px[0] as i16) <= mean[0] as i16 - offset {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Measures every outer boundary in a binary mask.
pub fn blob_shapes(mask: &GrayImage) -> Vec<BlobShape> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .filter_map(|c| BlobShape::measure(&c.points))
        .collect()
}

/// Detects the pulli in a colour raster.
pub fn detect_dots(
    source: &RgbImage,
    config: &DotDetectorConfig,
) -> Result<Vec<Keypoint>, KolamError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Ok(Vec::new());
    }

    let gray = to_gray(source)?;
    let mask = adaptive_mask(&gray, config);

    let keypoints: Vec<Keypoint> = blob_shapes(&mask)
        .into_iter()
        .filter(|shape| {
            let keep = config.accepts(shape);
            if !keep {
                debug!(
                    "rejected blob at ({:.1}, {:.1}): area={:.1} circularity={:.2} convexity={:.2} inertia={:.2}",
                    shape.center.0,
                    shape.center.1,
                    shape.area,
                    shape.circularity,
                    shape.convexity,
                    shape.inertia_ratio
                );
            }
            keep
        })
        .map(|shape| shape.keypoint())
        .collect();

    info!("Detected {} dots.", keypoints.len());
    Ok(keypoints)
}
