//! End-to-end tests from shapefile on disk to rendered image.

use image::Rgba;
use renderer::{FontBook, Swatch};
use spc_outlook::{layout_from_shapefile, render_outlook, HazardType, OutlookBundle};
use test_utils::{require_test_file, write_outlook_shapefile, OutlookFeature, SAMPLE_INFO};

fn categorical_features() -> Vec<OutlookFeature> {
    vec![
        OutlookFeature::square(0, "No Risk", "#FFFFFF", "#FFFFFF", (-125.0, 25.0), 30.0),
        OutlookFeature::square(2, "Slight Risk", "#FFE066", "#DDAA00", (-100.0, 32.0), 6.0),
        OutlookFeature::square(
            6,
            "Significant Tornado Risk",
            "#FFFFFF",
            "#000000",
            (-98.0, 34.0),
            2.0,
        ),
    ]
}

// ============================================================================
// Layout tests
// ============================================================================

#[test]
fn test_slight_and_significant_tornado() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("day1otlk_cat.shp");
    write_outlook_shapefile(&path, &categorical_features());

    let layout = layout_from_shapefile(&path, HazardType::Categorical).unwrap();
    let labels: Vec<&str> = layout.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            HazardType::Categorical.legend_header(),
            "Slight",
            "Tornado (EF2 or stronger)",
        ]
    );

    assert_eq!(layout.geometries.len(), 2);
    assert!(layout.geometries[0].style.is_filled());
    assert!(!layout.geometries[1].style.is_filled());
    assert!(matches!(layout.legend[2].swatch, Swatch::Hatched { .. }));
}

#[test]
fn test_code_zero_only_yields_no_areas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("day3otlk_hail.shp");
    write_outlook_shapefile(
        &path,
        &[OutlookFeature::square(0, "No Risk", "#FFFFFF", "#FFFFFF", (-125.0, 25.0), 30.0)],
    );

    let layout = layout_from_shapefile(&path, HazardType::Hail).unwrap();
    assert!(layout.has_no_areas());
    assert!(layout.geometries.is_empty());
}

#[test]
fn test_bundle_scan_reads_window() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("day1otlk_20230618_1630.info"), SAMPLE_INFO).unwrap();
    write_outlook_shapefile(&dir.path().join("day1otlk_cat.shp"), &categorical_features());

    let bundle = OutlookBundle::scan(dir.path()).unwrap();
    assert_eq!(bundle.shapefiles.len(), 1);
    assert_eq!(bundle.window.begin.to_rfc3339(), "2023-06-18T16:30:00+00:00");
    assert_eq!(bundle.window.end.to_rfc3339(), "2023-06-19T12:00:00+00:00");
}

// ============================================================================
// Render tests
// ============================================================================

#[test]
fn test_render_paints_fill_color() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("day1otlk_cat.shp");
    write_outlook_shapefile(&path, &categorical_features());
    let layout = layout_from_shapefile(&path, HazardType::Categorical).unwrap();

    let image = render_outlook(&layout, None, &FontBook::embedded().unwrap()).unwrap();
    assert_eq!(image.dimensions(), (1920, 1080));
    let slight = Rgba([0xFF, 0xE0, 0x66, 0xFF]);
    assert!(image.pixels().any(|p| *p == slight));
}

#[test]
fn test_render_no_areas() {
    let layout = spc_outlook::OutlookLayout::build(HazardType::Wind, &[]).unwrap();
    let image = render_outlook(&layout, None, &FontBook::embedded().unwrap()).unwrap();
    // No legend box means the lower-right map corner stays white
    let (w, h) = image.dimensions();
    assert_eq!(image.get_pixel(w - 60, h - 140).0, [255, 255, 255, 255]);

    // The annotation text is drawn at the center of the map
    let center = renderer::canvas::static_plot_area().center();
    let (cx, cy) = (center.0 as u32, center.1 as u32);
    let dark = (cx - 50..cx + 50)
        .flat_map(|x| (cy - 10..cy + 10).map(move |y| (x, y)))
        .filter(|&(x, y)| image.get_pixel(x, y).0[0] < 100)
        .count();
    assert!(dark > 20, "no annotation text near the map center ({dark} dark pixels)");
}

#[test]
fn test_real_categorical_outlook() {
    let path = require_test_file!("day1otlk_cat.shp");
    let layout = layout_from_shapefile(&path, HazardType::Categorical).unwrap();
    assert!(!layout.legend.is_empty());
}
