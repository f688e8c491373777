//! Design principle inference from detected dots and loops.
//!
//! Rows and columns are counted by clustering each axis independently, which
//! assumes the kolam was photographed roughly square-on. Rotated or
//! perspective-distorted grids will over- or under-count on both axes.

use log::warn;

use crate::config::{GridConfig, KolamConfig, SymmetryConfig};
use crate::error::KolamError;
use crate::grid::cluster_axis;
use crate::types::{Contour, DesignPrinciples, GridSize, Keypoint};

/// Infers rows and columns from dot centres.
///
/// When `rows * cols` does not match the dot count the layout is not a full
/// rectangle; both dimensions are then forced to the larger of the two, with
/// the axis of greater coordinate span deciding which count wins. That is a
/// rough square-grid guess, not a reconstruction.
pub fn infer_grid(keypoints: &[Keypoint], config: &GridConfig) -> GridSize {
    if keypoints.len() <= 1 {
        return GridSize { rows: 1, cols: 1 };
    }

    let xs: Vec<f32> = keypoints.iter().map(|k| k.center.0).collect();
    let ys: Vec<f32> = keypoints.iter().map(|k| k.center.1).collect();
    let mut rows = cluster_axis(&ys, config.cluster_radius, config.min_samples).label_count();
    let mut cols = cluster_axis(&xs, config.cluster_radius, config.min_samples).label_count();

    if rows * cols != keypoints.len() {
        let span_y = span(&ys);
        let span_x = span(&xs);
        if span_y > span_x {
            rows = rows.max(cols);
            cols = rows;
        } else {
            cols = rows.max(cols);
            rows = cols;
        }
        warn!("Non-rectangular dot pattern detected. Assuming a {rows}x{cols} grid for recreation.");
    }

    GridSize { rows, cols }
}

fn span(values: &[f32]) -> f32 {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    max - min
}

/// Balance of dots either side of the vertical centre line of an image `width` wide.
///
/// Dots exactly on the centre line count for neither side.
pub fn is_symmetric(keypoints: &[Keypoint], width: u32, config: &SymmetryConfig) -> bool {
    let mid_x = width as f32 / 2.0;
    let left = keypoints.iter().filter(|k| k.center.0 < mid_x).count();
    let right = keypoints.iter().filter(|k| k.center.0 > mid_x).count();
    (left.abs_diff(right) as f64) <= config.tolerance(keypoints.len())
}

/// Summarises a detection run on an image of `(height, width)`.
pub fn analyze_principles(
    keypoints: &[Keypoint],
    contours: Option<&[Contour]>,
    (_height, width): (u32, u32),
    config: &KolamConfig,
) -> Result<DesignPrinciples, KolamError> {
    if keypoints.is_empty() {
        return Err(KolamError::NoDots);
    }

    Ok(DesignPrinciples {
        dot_count: keypoints.len(),
        contour_count: contours.map_or(0, <[Contour]>::len),
        grid: infer_grid(keypoints, &config.grid),
        is_symmetric: is_symmetric(keypoints, width, &config.symmetry),
        dots: keypoints.iter().map(|k| [k.center.0, k.center.1]).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_points(rows: usize, cols: usize, spacing: f32, origin: (f32, f32)) -> Vec<Keypoint> {
        (0..rows)
            .flat_map(|r| {
                (0..cols).map(move |c| {
                    Keypoint::new(origin.0 + c as f32 * spacing, origin.1 + r as f32 * spacing, 8.0)
                })
            })
            .collect()
    }

    #[test]
    fn rectangular_grid_is_recovered() {
        let dots = grid_points(3, 5, 40.0, (20.0, 30.0));
        let grid = infer_grid(&dots, &GridConfig::default());
        assert_eq!(grid, GridSize { rows: 3, cols: 5 });
    }

    #[test]
    fn single_dot_is_one_by_one() {
        let dots = vec![Keypoint::new(5.0, 5.0, 4.0)];
        assert_eq!(infer_grid(&dots, &GridConfig::default()), GridSize { rows: 1, cols: 1 });
    }

    #[test]
    fn incomplete_grid_falls_back_to_square() {
        // 2 rows x 4 cols with one dot missing: 7 != 8.
        let mut dots = grid_points(2, 4, 40.0, (0.0, 0.0));
        dots.pop();
        let grid = infer_grid(&dots, &GridConfig::default());
        assert_eq!(grid, GridSize { rows: 4, cols: 4 });
    }

    #[test]
    fn fallback_uses_larger_count_on_tall_layouts() {
        // Diamond: 3 distinct rows and 3 distinct columns but only 5 dots.
        let dots = vec![
            Keypoint::new(50.0, 0.0, 6.0),
            Keypoint::new(0.0, 60.0, 6.0),
            Keypoint::new(50.0, 60.0, 6.0),
            Keypoint::new(100.0, 60.0, 6.0),
            Keypoint::new(50.0, 120.0, 6.0),
        ];
        let grid = infer_grid(&dots, &GridConfig::default());
        assert_eq!(grid, GridSize { rows: 3, cols: 3 });
    }

    #[test]
    fn symmetry_tolerates_small_imbalance() {
        let config = SymmetryConfig::default();
        let mut dots = grid_points(3, 2, 40.0, (30.0, 30.0));
        // Both columns left of centre in a 400 px image: 6 vs 0.
        assert!(!is_symmetric(&dots, 400, &config));
        // Balanced within two dots.
        dots.truncate(2);
        assert!(is_symmetric(&dots, 400, &config));
    }

    #[test]
    fn centre_line_dots_count_for_neither_side() {
        let dots = vec![
            Keypoint::new(100.0, 10.0, 4.0),
            Keypoint::new(100.0, 50.0, 4.0),
            Keypoint::new(100.0, 90.0, 4.0),
            Keypoint::new(100.0, 130.0, 4.0),
        ];
        assert!(is_symmetric(&dots, 200, &SymmetryConfig::default()));
    }

    #[test]
    fn empty_keypoints_report_no_dots() {
        let err = analyze_principles(&[], None, (100, 100), &KolamConfig::default()).unwrap_err();
        assert!(matches!(err, KolamError::NoDots));
        assert_eq!(err.to_string(), "No dots to analyze.");
    }

    #[test]
    fn missing_contours_count_as_zero() {
        let dots = grid_points(2, 2, 50.0, (75.0, 75.0));
        let principles =
            analyze_principles(&dots, None, (200, 200), &KolamConfig::default()).unwrap();
        assert_eq!(principles.contour_count, 0);
        assert_eq!(principles.dot_count, 4);
        assert_eq!(principles.grid, GridSize { rows: 2, cols: 2 });
        assert!(principles.is_symmetric);
        assert_eq!(principles.dots[3], [125.0, 125.0]);
    }
}
