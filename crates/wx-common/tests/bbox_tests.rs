//! Tests for BoundingBox operations.

use wx_common::bbox::{BoundingBox, CONUS_EXTENT};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_clone() {
    let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let bbox2 = bbox1;
    assert_eq!(bbox1, bbox2);
}

// ============================================================================
// Intersection tests
// ============================================================================

#[test]
fn test_intersects_overlapping() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn test_intersects_disjoint() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
    assert!(!a.intersects(&c));
}

#[test]
fn test_intersects_touching_edges_is_false() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
    assert!(!a.intersects(&b));
}

// ============================================================================
// Outline / expansion tests
// ============================================================================

#[test]
fn test_expanded() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).expanded(2.0);
    assert_eq!(bbox, BoundingBox::new(-2.0, -2.0, 12.0, 12.0));
}

#[test]
fn test_densified_outline_point_count() {
    let outline = CONUS_EXTENT.densified_outline(10);
    assert_eq!(outline.len(), 40);
    assert_eq!(outline[0], (-130.0, 20.0));
    // Every outline point lies on the box boundary
    for (x, y) in outline {
        assert!(CONUS_EXTENT.contains_point(x, y));
        let on_edge = (x - CONUS_EXTENT.min_x).abs() < 1e-9
            || (x - CONUS_EXTENT.max_x).abs() < 1e-9
            || (y - CONUS_EXTENT.min_y).abs() < 1e-9
            || (y - CONUS_EXTENT.max_y).abs() < 1e-9;
        assert!(on_edge, "({x}, {y}) is not on the outline");
    }
}

#[test]
fn test_densified_outline_zero_steps_clamped() {
    let outline = CONUS_EXTENT.densified_outline(0);
    assert_eq!(outline.len(), 4);
}
