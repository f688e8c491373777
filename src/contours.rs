//! Stroke loop extraction.
//!
//! Strokes are assumed to be bright (chalk or rice flour) against a darker
//! floor, so a fixed intensity band is enough to separate them.

use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::find_contours;
use imageproc::map::map_colors;
use log::info;

use crate::config::ContourDetectorConfig;
use crate::error::KolamError;
use crate::geometry::{compress_chain, polygon_area};
use crate::grey::to_gray;
use crate::types::Contour;

/// Foreground (255) for pixels inside `[config.lower, config.upper]`.
pub fn stroke_mask(gray: &GrayImage, config: &ContourDetectorConfig) -> GrayImage {
    let band = config.lower..=config.upper;
    map_colors(gray, |px| {
        if band.contains(&px[0]) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Traces every boundary of the mask, outer borders and holes alike, and
/// keeps the compressed polygons that enclose more than `config.min_area`.
pub fn trace_contours(mask: &GrayImage, config: &ContourDetectorConfig) -> Vec<Contour> {
    find_contours::<i32>(mask)
        .into_iter()
        .map(|c| compress_chain(&c.points))
        .filter(|points| polygon_area(points) > config.min_area)
        .map(Contour::new)
        .collect()
}

/// Detects stroke loops in a colour raster.
pub fn detect_contours(
    source: &RgbImage,
    config: &ContourDetectorConfig,
) -> Result<Vec<Contour>, KolamError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Ok(Vec::new());
    }

    let gray = to_gray(source)?;
    let mask = stroke_mask(&gray, config);
    let contours = trace_contours(&mask, config);

    info!("Detected {} significant contours/curves.", contours.len());
    Ok(contours)
}
