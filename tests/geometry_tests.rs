#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use drive_evo::simulation::geometric_utils::{
    Point, Segment, edges, lerp, line_intersection, polygons_intersect, segment_intersection,
};

const EPS: f32 = 1e-5;

fn pt(x: f32, y: f32) -> Point {
    Point { x, y }
}

fn square(cx: f32, cy: f32, half: f32) -> Vec<Point> {
    vec![
        pt(cx - half, cy - half),
        pt(cx + half, cy - half),
        pt(cx + half, cy + half),
        pt(cx - half, cy + half),
    ]
}

#[test]
fn test_crossing_segments_intersect_at_known_point() {
    let touch = segment_intersection(pt(0.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0), pt(10.0, 0.0))
        .expect("diagonals should cross");

    assert!((touch.point.x - 5.0).abs() < EPS);
    assert!((touch.point.y - 5.0).abs() < EPS);
    assert!((touch.offset - 0.5).abs() < EPS);
}

#[test]
fn test_offset_measured_along_first_segment() {
    // vertical ray upwards, horizontal wall a quarter of the way along
    let touch = segment_intersection(pt(0.0, 100.0), pt(0.0, -100.0), pt(-5.0, 50.0), pt(5.0, 50.0))
        .expect("ray should hit the wall");

    assert!((touch.offset - 0.25).abs() < EPS);
    assert!((touch.point.y - 50.0).abs() < EPS);
}

#[test]
fn test_parallel_segments_do_not_intersect() {
    let result = segment_intersection(pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, 5.0), pt(10.0, 5.0));
    assert!(result.is_none());

    // collinear overlap has a zero denominator too
    let result = segment_intersection(pt(0.0, 0.0), pt(10.0, 0.0), pt(5.0, 0.0), pt(15.0, 0.0));
    assert!(result.is_none());
}

#[test]
fn test_degenerate_segment_does_not_intersect() {
    let result = segment_intersection(pt(3.0, 3.0), pt(3.0, 3.0), pt(0.0, 0.0), pt(10.0, 10.0));
    assert!(result.is_none());
}

#[test]
fn test_non_overlapping_segments_do_not_intersect() {
    // the lines cross at (5, 5) but the second segment stops short
    let result = segment_intersection(pt(0.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0), pt(4.0, 6.0));
    assert!(result.is_none());
}

#[test]
fn test_touching_endpoints_count_as_intersection() {
    let touch = segment_intersection(pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, -5.0), pt(10.0, 5.0))
        .expect("endpoint contact should count");
    assert!((touch.offset - 1.0).abs() < EPS);
}

#[test]
fn test_line_intersection_matches_point_form() {
    let ray = Segment::new(pt(0.0, 0.0), pt(10.0, 10.0));
    let wall = Segment::new(pt(0.0, 10.0), pt(10.0, 0.0));

    let a = line_intersection(&ray, &wall);
    let b = segment_intersection(ray.start, ray.end, wall.start, wall.end);
    assert_eq!(a, b);
}

#[test]
fn test_lerp() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert!((lerp(2.0, 6.0, 0.25) - 3.0).abs() < EPS);

    for t in [0.0, 0.1, 0.5, 0.9, 1.0] {
        assert_eq!(lerp(0.37, 0.37, t), 0.37);
    }
}

#[test]
fn test_edges_wrap_around() {
    let poly = square(0.0, 0.0, 1.0);
    let all: Vec<_> = edges(&poly).collect();

    assert_eq!(all.len(), 4);
    assert_eq!(all[3], (poly[3], poly[0]));
}

#[test]
fn test_polygons_far_apart_do_not_intersect() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(500.0, 500.0, 10.0);

    assert!(!polygons_intersect(&a, &b));
    assert!(!polygons_intersect(&b, &a));
}

#[test]
fn test_identical_polygons_intersect() {
    let a = square(0.0, 0.0, 10.0);
    let b = a.clone();

    assert!(polygons_intersect(&a, &b));
}

#[test]
fn test_polygon_intersection_is_symmetric() {
    let a = square(0.0, 0.0, 10.0);
    for (dx, dy) in [(5.0, 0.0), (15.0, 15.0), (19.0, -3.0), (25.0, 0.0), (0.0, -20.0)] {
        let b = square(dx, dy, 10.0);
        assert_eq!(
            polygons_intersect(&a, &b),
            polygons_intersect(&b, &a),
            "asymmetric at offset ({dx}, {dy})"
        );
    }
}

#[test]
fn test_polygon_against_two_point_border() {
    let body = square(0.0, 0.0, 10.0);
    let crossing = [pt(5.0, -100.0), pt(5.0, 100.0)];
    let clear = [pt(50.0, -100.0), pt(50.0, 100.0)];

    assert!(polygons_intersect(&body, &crossing));
    assert!(!polygons_intersect(&body, &clear));
}
