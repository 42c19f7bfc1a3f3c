//! Vehicle state, kinematics and damage assessment.

use geo::Coord;

use super::super::brain::Brain;
use super::super::error::Result;
use super::super::geometric_utils::{Point, polygons_intersect};
use super::super::params::{OvertakeParams, SensorParams, VehicleParams};
use super::super::road::Road;
use super::super::sensor::{Pose, Sensor};
use super::autopilot::{Autopilot, DrivingState};
use super::controls::{Behavior, Controls};

/// A vehicle on the road.
///
/// Vehicles can:
/// - Accelerate, brake, reverse and steer from their [`Controls`]
/// - Sense the road and traffic through an [`Autopilot`]
/// - Collide with road borders and other vehicles, which stops them for good
#[derive(Debug, Clone)]
pub struct Vehicle {
    pos: Point,
    angle: f32,
    speed: f32,
    acceleration: f32,
    friction: f32,
    max_speed: f32,
    steering_rate: f32,
    width: f32,
    height: f32,
    polygon: Vec<Point>,
    damaged: bool,
    fitness: f32,
    current_lane: usize,
    controls: Controls,
    behavior: Behavior,
}

impl Vehicle {
    /// Creates a stationary, undamaged vehicle facing forward.
    ///
    /// Negative or NaN speeds and rates are treated as 0.
    pub fn new(pos: Point, body: &VehicleParams, behavior: Behavior) -> Self {
        let mut vehicle = Self {
            pos,
            angle: 0.0,
            speed: 0.0,
            acceleration: body.acceleration.max(0.0),
            friction: body.friction.max(0.0),
            max_speed: body.max_speed.max(0.0),
            steering_rate: body.steering_rate,
            width: body.width,
            height: body.height,
            polygon: Vec::with_capacity(4),
            damaged: false,
            fitness: 0.0,
            current_lane: 0,
            controls: behavior.initial_controls(),
            behavior,
        };
        vehicle.refresh_polygon();
        vehicle
    }

    /// Creates a network-driven vehicle with its own sensor.
    pub fn networked(
        pos: Point,
        body: &VehicleParams,
        sensor: &SensorParams,
        thresholds: OvertakeParams,
        brain: Brain,
    ) -> Result<Self> {
        let sensor = Sensor::new(sensor.ray_count, sensor.ray_length, sensor.ray_spread)?;
        let autopilot = Autopilot::new(sensor, brain, thresholds)?;
        Ok(Self::new(pos, body, Behavior::Autopilot(Box::new(autopilot))))
    }

    /// Overrides the maximum forward speed. Negative or NaN values become 0.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed.max(0.0);
        self
    }

    /// Moves the vehicle to a new pose, keeping its other state.
    pub fn place(&mut self, pos: Point, angle: f32) {
        self.pos = pos;
        self.angle = angle;
        self.refresh_polygon();
    }

    /// Centre position.
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Heading in radians, 0 facing negative y.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Position and heading.
    pub fn pose(&self) -> Pose {
        Pose {
            pos: self.pos,
            angle: self.angle,
        }
    }

    /// Signed speed, negative when reversing.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Speed gained per tick while accelerating.
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Speed lost per tick to friction.
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Maximum forward speed.
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Maximum reverse speed, half the forward maximum.
    pub fn max_reverse_speed(&self) -> f32 {
        self.max_speed / 2.0
    }

    /// Body width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Body length.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Oriented bounding box corners for the current pose.
    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }

    /// `true` once the vehicle has hit a border or another vehicle.
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    /// Sum of the speed over every tick driven.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Lane the vehicle was in at the start of the last tick.
    pub fn current_lane(&self) -> usize {
        self.current_lane
    }

    /// Controls applied on the next move.
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Mutable controls, for manually driven vehicles.
    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    /// Who drives this vehicle.
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// The autopilot of a networked vehicle.
    pub fn autopilot(&self) -> Option<&Autopilot> {
        match &self.behavior {
            Behavior::Autopilot(autopilot) => Some(autopilot),
            _ => None,
        }
    }

    /// The network of a networked vehicle.
    pub fn brain(&self) -> Option<&Brain> {
        self.autopilot().map(Autopilot::brain)
    }

    /// The sensor of a networked vehicle.
    pub fn sensor(&self) -> Option<&Sensor> {
        self.autopilot().map(Autopilot::sensor)
    }

    /// Overtaking state; always cruising for vehicles without an autopilot.
    pub fn driving_state(&self) -> DrivingState {
        self.autopilot()
            .map_or(DrivingState::Cruising, Autopilot::state)
    }

    /// `true` while a lane change is in progress.
    pub fn is_overtaking(&self) -> bool {
        self.driving_state().is_overtaking()
    }

    /// Advances the vehicle by one tick.
    ///
    /// Damaged vehicles are left untouched.
    ///
    /// # Arguments
    ///
    /// * `road` - Road providing borders and lane geometry
    /// * `obstacles` - Polygons of the vehicles this one can hit and see
    pub fn update(&mut self, road: &Road, obstacles: &[&[Point]]) {
        if self.damaged {
            return;
        }

        self.current_lane = road.lane_index(self.pos.x);
        self.move_body();
        self.fitness += self.speed;
        self.refresh_polygon();
        self.damaged = self.assess_damage(road, obstacles);

        if self.damaged {
            return;
        }

        let pose = self.pose();
        if let Behavior::Autopilot(autopilot) = &mut self.behavior {
            autopilot.drive(pose, self.current_lane, road, obstacles, &mut self.controls);
        }
    }

    fn move_body(&mut self) {
        if self.controls.forward {
            self.speed += self.acceleration;
        }
        if self.controls.reverse {
            self.speed -= self.acceleration;
        }

        self.speed = self
            .speed
            .clamp(-self.max_reverse_speed(), self.max_speed);

        if self.speed > 0.0 {
            self.speed -= self.friction;
        }
        if self.speed < 0.0 {
            self.speed += self.friction;
        }
        if self.speed.abs() < self.friction {
            self.speed = 0.0;
        }

        if self.speed != 0.0 {
            let flip = if self.speed > 0.0 { 1.0 } else { -1.0 };
            if self.controls.left {
                self.angle += self.steering_rate * flip;
            }
            if self.controls.right {
                self.angle -= self.steering_rate * flip;
            }
        }

        self.pos.x -= self.angle.sin() * self.speed;
        self.pos.y -= self.angle.cos() * self.speed;
    }

    fn refresh_polygon(&mut self) {
        let rad = self.width.hypot(self.height) / 2.0;
        let alpha = self.width.atan2(self.height);
        let pi = std::f32::consts::PI;

        self.polygon.clear();
        for corner in [
            self.angle - alpha,
            self.angle + alpha,
            pi + self.angle - alpha,
            pi + self.angle + alpha,
        ] {
            self.polygon.push(Coord {
                x: self.pos.x - corner.sin() * rad,
                y: self.pos.y - corner.cos() * rad,
            });
        }
    }

    fn assess_damage(&self, road: &Road, obstacles: &[&[Point]]) -> bool {
        road.borders()
            .iter()
            .any(|border| polygons_intersect(&self.polygon, &[border.start, border.end]))
            || obstacles
                .iter()
                .any(|polygon| polygons_intersect(&self.polygon, polygon))
    }
}
