use kolam_principles::config::ContourDetectorConfig;
use kolam_principles::contours::detect_contours;
use kolam_principles::geometry::polygon_area;
use kolam_principles::synthetic::SyntheticKolam;

#[test]
fn small_fragments_are_discarded() {
    // Boundary areas: side 3 -> 4, 6 -> 25, 8 -> 49, 9 -> 64, 12 -> 121.
    let img = SyntheticKolam::new(300, 80)
        .bright_patch(10, 10, 3)
        .bright_patch(50, 10, 6)
        .bright_patch(100, 10, 8)
        .bright_patch(150, 10, 9)
        .bright_patch(200, 10, 12)
        .build();
    let contours = detect_contours(&img, &ContourDetectorConfig::default()).expect("detect failed");
    assert_eq!(contours.len(), 2);
    for c in &contours {
        assert!(polygon_area(&c.points) > 50.0);
    }
}

#[test]
fn loop_yields_outer_and_inner_boundary() {
    let img = SyntheticKolam::new(200, 200)
        .rect_loop(50, 60, 75, 84, 2)
        .build();
    let contours = detect_contours(&img, &ContourDetectorConfig::default()).expect("detect failed");
    assert_eq!(contours.len(), 2);

    let mut areas: Vec<f64> = contours.iter().map(|c| polygon_area(&c.points)).collect();
    areas.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(areas[1], 600.0);
    assert!(areas[0] > 400.0 && areas[0] < 600.0, "hole area was {}", areas[0]);

    // Straight runs collapse to their corners.
    let outer = contours
        .iter()
        .find(|c| polygon_area(&c.points) == 600.0)
        .expect("outer boundary missing");
    assert_eq!(outer.len(), 4);
}

#[test]
fn dark_marks_are_not_strokes() {
    let img = SyntheticKolam::new(200, 200)
        .dot_grid(3, 3, 50.0, (50.0, 50.0), 6.0)
        .build();
    let contours = detect_contours(&img, &ContourDetectorConfig::default()).expect("detect failed");
    assert!(contours.is_empty());
}

#[test]
fn threshold_band_is_configurable() {
    let img = SyntheticKolam::new(120, 120)
        .rect_loop(20, 20, 80, 80, 3)
        .build();
    let config = ContourDetectorConfig {
        lower: 251,
        ..ContourDetectorConfig::default()
    };
    let contours = detect_contours(&img, &config).expect("detect failed");
    assert!(contours.is_empty());
}
