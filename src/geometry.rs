//! Polygon measurements on traced boundaries.
//!
//! Boundaries are treated as closed polygons through the boundary pixel
//! centres, so areas are slightly smaller than the pixel counts of the regions
//! they enclose.

use imageproc::geometry::convex_hull;
use imageproc::point::Point;

/// Spatial and central moments of a closed polygon, computed with Green's theorem.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
}

impl Moments {
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self::default();
        }
        let mut m = Self::default();
        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            let (xi, yi) = (p.x as f64, p.y as f64);
            let (xj, yj) = (q.x as f64, q.y as f64);
            let a = xi * yj - xj * yi;
            m.m00 += a;
            m.m10 += a * (xi + xj);
            m.m01 += a * (yi + yj);
            m.m20 += a * (xi * xi + xi * xj + xj * xj);
            m.m11 += a * (xi * (2.0 * yi + yj) + xj * (yi + 2.0 * yj));
            m.m02 += a * (yi * yi + yi * yj + yj * yj);
        }
        m.m00 /= 2.0;
        m.m10 /= 6.0;
        m.m01 /= 6.0;
        m.m20 /= 12.0;
        m.m11 /= 24.0;
        m.m02 /= 12.0;
        // Orientation-independent: clockwise boundaries come out negative.
        if m.m00 < 0.0 {
            m.m00 = -m.m00;
            m.m10 = -m.m10;
            m.m01 = -m.m01;
            m.m20 = -m.m20;
            m.m11 = -m.m11;
            m.m02 = -m.m02;
        }
        m
    }

    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }

    /// Central second moments `(mu20, mu11, mu02)`.
    pub fn central(&self) -> Option<(f64, f64, f64)> {
        let (cx, cy) = self.centroid()?;
        Some((
            self.m20 - cx * self.m10,
            self.m11 - cx * self.m01,
            self.m02 - cy * self.m01,
        ))
    }

    /// Ratio of the minor to the major principal inertia. 1.0 for a disc, near 0 for a line.
    pub fn inertia_ratio(&self) -> f64 {
        let Some((mu20, mu11, mu02)) = self.central() else {
            return 0.0;
        };
        let denom = ((mu20 - mu02).powi(2) + 4.0 * mu11 * mu11).sqrt();
        if denom <= 1e-2 {
            return 1.0;
        }
        let cos_min = (mu20 - mu02) / denom;
        let sin_min = 2.0 * mu11 / denom;
        let i_min = 0.5 * (mu20 + mu02) - 0.5 * (mu20 - mu02) * cos_min - mu11 * sin_min;
        let i_max = 0.5 * (mu20 + mu02) + 0.5 * (mu20 - mu02) * cos_min + mu11 * sin_min;
        if i_max <= 0.0 {
            return 0.0;
        }
        i_min / i_max
    }
}

/// Unsigned enclosed area of a closed polygon.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: i64 = (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64
        })
        .sum();
    twice.abs() as f64 / 2.0
}

/// Length of the closed polyline, including the closing segment.
pub fn closed_perimeter(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            let dx = (q.x - p.x) as f64;
            let dy = (q.y - p.y) as f64;
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// `4 * pi * area / perimeter^2`, or `None` for zero-perimeter geometry.
pub fn circularity(area: f64, perimeter: f64) -> Option<f64> {
    if perimeter == 0.0 {
        return None;
    }
    Some(4.0 * std::f64::consts::PI * area / (perimeter * perimeter))
}

pub fn convex_hull_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    polygon_area(&convex_hull(points))
}

/// Drops boundary points that sit in the middle of a straight horizontal,
/// vertical or diagonal run, keeping only the run endpoints.
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut points = points.to_vec();
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let n = points.len();
    if n < 3 {
        return points;
    }
    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());
    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            step(prev, cur) != step(cur, next)
        })
        .map(|i| points[i])
        .collect();
    // A closed run with no corners (degenerate back-and-forth trace) keeps its endpoints.
    if kept.is_empty() {
        return vec![points[0], points[n / 2]];
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x0: i32, y0: i32, side: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(x0, y0),
            Point::new(x0 + side, y0),
            Point::new(x0 + side, y0 + side),
            Point::new(x0, y0 + side),
        ]
    }

    #[test]
    fn square_measurements() {
        let pts = square(10, 20, 10);
        assert_relative_eq!(polygon_area(&pts), 100.0);
        assert_relative_eq!(closed_perimeter(&pts), 40.0);
        assert_relative_eq!(circularity(100.0, 40.0).unwrap(), std::f64::consts::PI / 4.0);
        let m = Moments::of_polygon(&pts);
        let (cx, cy) = m.centroid().unwrap();
        assert_relative_eq!(cx, 15.0, epsilon = 1e-9);
        assert_relative_eq!(cy, 25.0, epsilon = 1e-9);
        assert_relative_eq!(m.inertia_ratio(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn reversed_orientation_has_same_moments() {
        let pts = square(0, 0, 8);
        let mut rev = pts.clone();
        rev.reverse();
        assert_eq!(Moments::of_polygon(&pts), Moments::of_polygon(&rev));
    }

    #[test]
    fn elongated_rectangle_has_low_inertia_ratio() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(40, 0),
            Point::new(40, 4),
            Point::new(0, 4),
        ];
        let ratio = Moments::of_polygon(&pts).inertia_ratio();
        assert_relative_eq!(ratio, 0.01, epsilon = 1e-9);
    }

    #[test]
    fn zero_perimeter_has_no_circularity() {
        assert!(circularity(0.0, 0.0).is_none());
        assert_eq!(closed_perimeter(&[Point::new(3, 3)]), 0.0);
    }

    #[test]
    fn compress_keeps_only_corners() {
        let mut traced = Vec::new();
        for x in 0..5 {
            traced.push(Point::new(x, 0));
        }
        for y in 1..5 {
            traced.push(Point::new(4, y));
        }
        for x in (0..4).rev() {
            traced.push(Point::new(x, 4));
        }
        for y in (1..4).rev() {
            traced.push(Point::new(0, y));
        }
        let compressed = compress_chain(&traced);
        assert_eq!(compressed, square(0, 0, 4));
        assert_relative_eq!(polygon_area(&compressed), polygon_area(&traced));
    }

    #[test]
    fn hull_of_concave_polygon_is_larger() {
        let l_shape = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 4),
            Point::new(4, 4),
            Point::new(4, 10),
            Point::new(0, 10),
        ];
        let area = polygon_area(&l_shape);
        let hull = convex_hull_area(&l_shape);
        assert_relative_eq!(area, 64.0);
        assert_relative_eq!(hull, 82.0);
    }
}
