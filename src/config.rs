//! Tunable thresholds for every stage of the kolam pipeline.
//!
//! The defaults are calibrated for photographs where a single dot covers a few
//! dozen pixels and the drawn strokes are close to white. Images at a very
//! different scale usually need the area bounds and clustering radius adjusted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KolamError;

const ADAPTIVE_BLOCK_SIZE: u32 = 11;
const ADAPTIVE_OFFSET: i16 = 2;
const MIN_DOT_AREA: f64 = 5.0;
const MAX_DOT_AREA: f64 = 150.0;
const MIN_DOT_CIRCULARITY: f64 = 0.6;
const MIN_DOT_CONVEXITY: f64 = 0.85;
const MIN_DOT_INERTIA_RATIO: f64 = 0.1;

const STROKE_LOWER: u8 = 200;
const STROKE_UPPER: u8 = 255;
const MIN_CONTOUR_AREA: f64 = 50.0;

const CLUSTER_RADIUS: f32 = 10.0;
const CLUSTER_MIN_SAMPLES: usize = 1;

const SYMMETRY_MIN_TOLERANCE: f64 = 2.0;
const SYMMETRY_TOLERANCE_FRACTION: f64 = 0.10;

const STROKE_WIDTH: f32 = 2.0;
const LOOP_MIN_CIRCULARITY: f64 = 0.6;
const LOOP_MIN_AREA: f64 = 100.0;
const LOOP_MAX_AREA: f64 = 5000.0;
const DECORATION_RADIUS: f32 = 2.0;

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KolamConfig {
    pub dots: DotDetectorConfig,
    pub contours: ContourDetectorConfig,
    pub grid: GridConfig,
    pub symmetry: SymmetryConfig,
    pub recreate: RecreateConfig,
}

impl KolamConfig {
    /// Loads a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, KolamError> {
        let text = std::fs::read_to_string(path)?;
        let config: KolamConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), KolamError> {
        let d = &self.dots;
        if d.block_size < 3 || d.block_size % 2 == 0 {
            return Err(invalid(format!(
                "dots.block_size must be odd and >= 3, got {}",
                d.block_size
            )));
        }
        if d.min_area > d.max_area {
            return Err(invalid(format!(
                "dots.min_area ({}) exceeds dots.max_area ({})",
                d.min_area, d.max_area
            )));
        }
        if self.contours.lower > self.contours.upper {
            return Err(invalid(format!(
                "contours.lower ({}) exceeds contours.upper ({})",
                self.contours.lower, self.contours.upper
            )));
        }
        if self.grid.cluster_radius <= 0.0 {
            return Err(invalid("grid.cluster_radius must be positive".to_string()));
        }
        if self.grid.min_samples == 0 {
            return Err(invalid("grid.min_samples must be at least 1".to_string()));
        }
        let r = &self.recreate;
        if r.stroke_width <= 0.0 || r.decoration_radius <= 0.0 {
            return Err(invalid(
                "recreate.stroke_width and recreate.decoration_radius must be positive".to_string(),
            ));
        }
        if r.min_area >= r.max_area {
            return Err(invalid(format!(
                "recreate.min_area ({}) must be below recreate.max_area ({})",
                r.min_area, r.max_area
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> KolamError {
    KolamError::InvalidConfig(msg)
}

/// Adaptive thresholding and blob shape filters for pulli detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotDetectorConfig {
    /// Side of the Gaussian-weighted neighbourhood, in pixels. Must be odd.
    pub block_size: u32,
    /// Subtracted from the local mean before comparing.
    pub offset: i16,
    pub min_area: f64,
    pub max_area: f64,
    pub min_circularity: f64,
    pub min_convexity: f64,
    pub min_inertia_ratio: f64,
}

impl Default for DotDetectorConfig {
    fn default() -> Self {
        Self {
            block_size: ADAPTIVE_BLOCK_SIZE,
            offset: ADAPTIVE_OFFSET,
            min_area: MIN_DOT_AREA,
            max_area: MAX_DOT_AREA,
            min_circularity: MIN_DOT_CIRCULARITY,
            min_convexity: MIN_DOT_CONVEXITY,
            min_inertia_ratio: MIN_DOT_INERTIA_RATIO,
        }
    }
}

impl DotDetectorConfig {
    /// Gaussian sigma matching a kernel of `block_size` taps.
    pub fn gaussian_sigma(&self) -> f32 {
        0.3 * ((self.block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Normalised 1-D Gaussian weights, exactly `block_size` taps long.
    pub fn gaussian_kernel(&self) -> Vec<f32> {
        let taps = self.block_size as usize;
        let sigma = self.gaussian_sigma() as f64;
        let half = (taps as f64 - 1.0) / 2.0;
        let weights: Vec<f64> = (0..taps)
            .map(|i| {
                let d = i as f64 - half;
                (-(d * d) / (2.0 * sigma * sigma)).exp()
            })
            .collect();
        let sum: f64 = weights.iter().sum();
        weights.iter().map(|w| (w / sum) as f32).collect()
    }
}

/// Intensity band that isolates the drawn strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourDetectorConfig {
    pub lower: u8,
    pub upper: u8,
    /// Contours enclosing this area or less are dropped.
    pub min_area: f64,
}

impl Default for ContourDetectorConfig {
    fn default() -> Self {
        Self {
            lower: STROKE_LOWER,
            upper: STROKE_UPPER,
            min_area: MIN_CONTOUR_AREA,
        }
    }
}

/// Axis-wise density clustering used to count rows and columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cluster_radius: f32,
    pub min_samples: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cluster_radius: CLUSTER_RADIUS,
            min_samples: CLUSTER_MIN_SAMPLES,
        }
    }
}

/// Left/right balance tolerance: `max(min_tolerance, fraction * dot_count)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymmetryConfig {
    pub min_tolerance: f64,
    pub tolerance_fraction: f64,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        Self {
            min_tolerance: SYMMETRY_MIN_TOLERANCE,
            tolerance_fraction: SYMMETRY_TOLERANCE_FRACTION,
        }
    }
}

impl SymmetryConfig {
    pub fn tolerance(&self, dot_count: usize) -> f64 {
        self.min_tolerance
            .max(dot_count as f64 * self.tolerance_fraction)
    }
}

/// Stroke redraw and loop decoration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecreateConfig {
    pub stroke_width: f32,
    pub min_circularity: f64,
    /// Exclusive lower area bound for a decorated loop.
    pub min_area: f64,
    /// Exclusive upper area bound for a decorated loop.
    pub max_area: f64,
    pub decoration_radius: f32,
}

impl Default for RecreateConfig {
    fn default() -> Self {
        Self {
            stroke_width: STROKE_WIDTH,
            min_circularity: LOOP_MIN_CIRCULARITY,
            min_area: LOOP_MIN_AREA,
            max_area: LOOP_MAX_AREA,
            decoration_radius: DECORATION_RADIUS,
        }
    }
}

impl RecreateConfig {
    pub fn is_decorated(&self, area: f64, circularity: f64) -> bool {
        circularity > self.min_circularity && area > self.min_area && area < self.max_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_sigma_matches_eleven_tap_kernel() {
        let sigma = DotDetectorConfig::default().gaussian_sigma();
        assert!((sigma - 2.0).abs() < 1e-6);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: KolamConfig =
            serde_json::from_str(r#"{"grid": {"cluster_radius": 4.5}}"#).unwrap();
        assert_eq!(config.grid.cluster_radius, 4.5);
        assert_eq!(config.grid.min_samples, 1);
        assert_eq!(config.dots, DotDetectorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn kernel_spans_the_whole_block() {
        let mut dots = DotDetectorConfig::default();
        let kernel = dots.gaussian_kernel();
        assert_eq!(kernel.len(), 11);
        assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(kernel[0], kernel[10]);
        assert!(kernel[5] > kernel[4] && kernel[0] > 0.0);

        dots.block_size = 21;
        assert_eq!(dots.gaussian_kernel().len(), 21);
    }

    #[test]
    fn even_block_size_is_rejected() {
        let mut config = KolamConfig::default();
        config.dots.block_size = 10;
        assert!(matches!(config.validate(), Err(KolamError::InvalidConfig(_))));
    }

    #[test]
    fn symmetry_tolerance_grows_with_dot_count() {
        let s = SymmetryConfig::default();
        assert_eq!(s.tolerance(9), 2.0);
        assert_eq!(s.tolerance(50), 5.0);
    }

    #[test]
    fn decoration_bounds_are_exclusive() {
        let r = RecreateConfig::default();
        assert!(!r.is_decorated(100.0, 0.9));
        assert!(r.is_decorated(100.5, 0.9));
        assert!(!r.is_decorated(5000.0, 0.9));
        assert!(!r.is_decorated(500.0, 0.6));
    }
}
