#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use drive_evo::simulation::geometric_utils::Point;
use drive_evo::simulation::road::Road;
use drive_evo::simulation::sensor::{Pose, Sensor};
use std::f32::consts::PI;

const EPS: f32 = 1e-4;

fn pt(x: f32, y: f32) -> Point {
    Point { x, y }
}

fn block(cx: f32, cy: f32, w: f32, h: f32) -> Vec<Point> {
    vec![
        pt(cx - w / 2.0, cy - h / 2.0),
        pt(cx + w / 2.0, cy - h / 2.0),
        pt(cx + w / 2.0, cy + h / 2.0),
        pt(cx - w / 2.0, cy + h / 2.0),
    ]
}

#[test]
fn test_road_edges_and_lane_width() {
    let road = Road::new(200.0, 360.0, 3).unwrap();

    assert_eq!(road.left(), 20.0);
    assert_eq!(road.right(), 380.0);
    assert_eq!(road.lane_width(), 120.0);
    assert_eq!(road.borders().len(), 2);
    assert_eq!(road.borders()[0].start.x, 20.0);
    assert_eq!(road.borders()[1].end.x, 380.0);
}

#[test]
fn test_lane_center_invariant() {
    for (width, lanes) in [(360.0, 3), (300.0, 4), (100.0, 1), (250.0, 5)] {
        let road = Road::new(150.0, width, lanes).unwrap();
        let half_lane = width / (2.0 * lanes as f32);

        assert!((road.lane_center(0) - (road.left() + half_lane)).abs() < EPS);
        assert!((road.lane_center(lanes - 1) - (road.right() - half_lane)).abs() < EPS);
    }
}

#[test]
fn test_lane_center_clamps_out_of_range_index() {
    let road = Road::new(200.0, 360.0, 3).unwrap();
    assert_eq!(road.lane_center(7), road.lane_center(2));
}

#[test]
fn test_lane_index() {
    let road = Road::new(200.0, 360.0, 3).unwrap();

    assert_eq!(road.lane_index(80.0), 0);
    assert_eq!(road.lane_index(200.0), 1);
    assert_eq!(road.lane_index(320.0), 2);
    assert_eq!(road.lane_index(139.0), 0);
    assert_eq!(road.lane_index(141.0), 1);

    // off the road clamps to the outer lanes
    assert_eq!(road.lane_index(-50.0), 0);
    assert_eq!(road.lane_index(1000.0), 2);
}

#[test]
fn test_invalid_road_is_rejected() {
    assert!(Road::new(200.0, 360.0, 0).is_err());
    assert!(Road::new(200.0, 0.0, 3).is_err());
    assert!(Road::new(200.0, f32::NAN, 3).is_err());
}

#[test]
fn test_sensor_needs_a_ray() {
    assert!(Sensor::new(0, 100.0, PI).is_err());
}

#[test]
fn test_ray_angles_spread_left_to_right() {
    let sensor = Sensor::new(5, 100.0, PI / 2.0).unwrap();

    assert!((sensor.ray_angle(0) - PI / 4.0).abs() < EPS);
    assert!(sensor.ray_angle(2).abs() < EPS);
    assert!((sensor.ray_angle(4) + PI / 4.0).abs() < EPS);

    let single = Sensor::new(1, 100.0, PI / 2.0).unwrap();
    assert!(single.ray_angle(0).abs() < EPS);
}

#[test]
fn test_rays_follow_pose() {
    let mut sensor = Sensor::new(3, 100.0, PI / 2.0).unwrap();
    sensor.cast_rays(Pose {
        pos: pt(50.0, 50.0),
        angle: 0.0,
    });

    let rays = sensor.rays();
    assert_eq!(rays.len(), 3);
    // centre ray points straight up
    assert!((rays[1].end.x - 50.0).abs() < EPS);
    assert!((rays[1].end.y + 50.0).abs() < EPS);
    // first ray leans left
    assert!(rays[0].end.x < 50.0);
    assert!(rays[2].end.x > 50.0);

    sensor.cast_rays(Pose {
        pos: pt(0.0, 0.0),
        angle: PI / 2.0,
    });
    // heading rotated a quarter turn to the left: centre ray points to -x
    assert!((sensor.rays()[1].end.x + 100.0).abs() < EPS);
    assert!(sensor.rays()[1].end.y.abs() < EPS);
}

#[test]
fn test_readings_keep_nearest_hit() {
    let road = Road::new(0.0, 1000.0, 1).unwrap();
    let mut sensor = Sensor::new(1, 100.0, 0.0).unwrap();

    let near = block(0.0, -30.0, 20.0, 20.0);
    let far = block(0.0, -70.0, 20.0, 20.0);
    let obstacles = vec![far.as_slice(), near.as_slice()];

    sensor.update(
        Pose {
            pos: pt(0.0, 0.0),
            angle: 0.0,
        },
        road.borders(),
        &obstacles,
    );

    let touch = sensor.readings()[0].expect("ray should hit the near block");
    // near block bottom edge at y = -20
    assert!((touch.offset - 0.2).abs() < EPS);
    assert!((touch.point.y + 20.0).abs() < EPS);
}

#[test]
fn test_readings_see_road_borders() {
    let road = Road::new(0.0, 100.0, 1).unwrap();
    let mut sensor = Sensor::new(1, 100.0, 0.0).unwrap();

    // facing left, border at x = -50
    sensor.update(
        Pose {
            pos: pt(0.0, 0.0),
            angle: PI / 2.0,
        },
        road.borders(),
        &[],
    );

    let touch = sensor.readings()[0].expect("ray should hit the left border");
    assert!((touch.offset - 0.5).abs() < EPS);
}

#[test]
fn test_inputs_are_one_minus_offset() {
    let road = Road::new(0.0, 1000.0, 1).unwrap();
    let mut sensor = Sensor::new(3, 100.0, PI / 2.0).unwrap();
    let ahead = block(0.0, -30.0, 10.0, 20.0);

    sensor.update(
        Pose {
            pos: pt(0.0, 0.0),
            angle: 0.0,
        },
        road.borders(),
        &[ahead.as_slice()],
    );

    let inputs = sensor.inputs();
    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs[0], 0.0);
    assert!((inputs[1] - 0.8).abs() < EPS);
    assert_eq!(inputs[2], 0.0);
}
