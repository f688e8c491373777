use kolam_principles::config::{DotDetectorConfig, GridConfig};
use kolam_principles::dots::{adaptive_mask, blob_shapes, detect_dots};
use kolam_principles::grey::to_gray;
use kolam_principles::principles::infer_grid;
use kolam_principles::synthetic::SyntheticKolam;
use kolam_principles::GridSize;

#[test]
fn evenly_spaced_grids_are_counted() {
    for (rows, cols) in [(3usize, 3usize), (3, 4), (2, 5), (4, 4)] {
        let img = SyntheticKolam::new(400, 320)
            .dot_grid(rows, cols, 60.0, (40.0, 40.0), 4.0)
            .build();
        let dots = detect_dots(&img, &DotDetectorConfig::default()).expect("detect failed");
        assert_eq!(dots.len(), rows * cols, "dot count for {rows}x{cols}");
        let grid = infer_grid(&dots, &GridConfig::default());
        assert_eq!(grid, GridSize { rows, cols });
    }
}

#[test]
fn keypoints_sit_on_dot_centres() {
    let img = SyntheticKolam::new(200, 200).dot((73.0, 121.0), 4.0).build();
    let dots = detect_dots(&img, &DotDetectorConfig::default()).expect("detect failed");
    assert_eq!(dots.len(), 1);
    let kp = dots[0];
    assert!((kp.center.0 - 73.0).abs() < 0.5, "x was {}", kp.center.0);
    assert!((kp.center.1 - 121.0).abs() < 0.5, "y was {}", kp.center.1);
    assert!(kp.size > 4.0 && kp.size < 10.0, "size was {}", kp.size);
}

#[test]
fn oversized_and_elongated_marks_are_rejected() {
    let img = SyntheticKolam::new(300, 200)
        .dot((50.0, 100.0), 4.0)
        // Too large: area far above the upper bound.
        .dot((150.0, 100.0), 12.0)
        .build();
    let dots = detect_dots(&img, &DotDetectorConfig::default()).expect("detect failed");
    assert_eq!(dots.len(), 1);
    assert!((dots[0].center.0 - 50.0).abs() < 0.5);

    // A thin dark bar fails circularity and inertia even with a generous area bound.
    let mut bar = SyntheticKolam::new(200, 100);
    for x in 0..40 {
        bar = bar.dot((60.0 + x as f32, 50.0), 1.0);
    }
    let bar = bar.build();
    let config = DotDetectorConfig {
        max_area: 10_000.0,
        ..DotDetectorConfig::default()
    };
    let gray = to_gray(&bar).expect("grey failed");
    let shapes = blob_shapes(&adaptive_mask(&gray, &config));
    assert!(!shapes.is_empty());
    assert!(shapes.iter().all(|s| !config.accepts(s)));
}

#[test]
fn blank_floor_has_no_dots() {
    let img = SyntheticKolam::new(120, 80).build();
    let dots = detect_dots(&img, &DotDetectorConfig::default()).expect("detect failed");
    assert!(dots.is_empty());
}

#[test]
fn empty_raster_has_no_dots() {
    let img = image::RgbImage::new(0, 0);
    let dots = detect_dots(&img, &DotDetectorConfig::default()).expect("detect failed");
    assert!(dots.is_empty());
}
