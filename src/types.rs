use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// One detected pulli: sub-pixel centre and a diameter estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub center: (f32, f32),
    pub size: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            center: (x, y),
            size,
        }
    }
}

/// Closed boundary of a stroke region, in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn from_coords(coords: &[(i32, i32)]) -> Self {
        Self {
            points: coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

/// Structural summary of a kolam photograph.
///
/// For a rectangular layout `grid.rows * grid.cols == dot_count`. When the axis
/// clustering disagrees with the dot count the grid is forced square instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPrinciples {
    pub dot_count: usize,
    pub contour_count: usize,
    pub grid: GridSize,
    pub is_symmetric: bool,
    pub dots: Vec<[f32; 2]>,
}
