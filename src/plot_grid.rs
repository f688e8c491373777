use image::RgbImage;
use plotters::prelude::*;

use crate::config::GridConfig;
use crate::grid::cluster_axis;
use crate::types::Keypoint;

const GUIDE_COLOR: RGBColor = RGBColor(210, 210, 210);
const DOT_COLOR: RGBColor = RGBColor(200, 40, 40);

/// Renders the detected dots over the row/column guide lines the grid
/// inference found, on a white `width` x `height` canvas.
///
/// Guide lines sit at each cluster centre, so a missing line points at a row or
/// column that merged with its neighbour.
pub fn render_grid_plot(
    width: u32,
    height: u32,
    keypoints: &[Keypoint],
    config: &GridConfig,
) -> Result<RgbImage, String> {
    if width == 0 || height == 0 {
        return Ok(RgbImage::new(width, height));
    }

    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| "width*height overflow".to_string())?;
    let mut rgb = vec![255u8; pixel_count * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let xs: Vec<f32> = keypoints.iter().map(|k| k.center.0).collect();
        let ys: Vec<f32> = keypoints.iter().map(|k| k.center.1).collect();
        let cols = cluster_axis(&xs, config.cluster_radius, config.min_samples);
        let rows = cluster_axis(&ys, config.cluster_radius, config.min_samples);

        let max_x = width.saturating_sub(1) as i32;
        let max_y = height.saturating_sub(1) as i32;
        for x in cols.centers {
            let x = (x.round() as i32).clamp(0, max_x);
            root.draw(&PathElement::new([(x, 0), (x, max_y)], GUIDE_COLOR))
                .map_err(|e| e.to_string())?;
        }
        for y in rows.centers {
            let y = (y.round() as i32).clamp(0, max_y);
            root.draw(&PathElement::new([(0, y), (max_x, y)], GUIDE_COLOR))
                .map_err(|e| e.to_string())?;
        }

        for kp in keypoints {
            let x = (kp.center.0.round() as i32).clamp(0, max_x);
            let y = (kp.center.1.round() as i32).clamp(0, max_y);
            let r = (kp.size / 2.0).round().max(2.0) as i32;
            root.draw(&Circle::new((x, y), r, DOT_COLOR.filled()))
                .map_err(|e| e.to_string())?;
        }

        root.present().map_err(|e| e.to_string())?;
    }

    RgbImage::from_raw(width, height, rgb).ok_or_else(|| "plot buffer size mismatch".to_string())
}
