//! Network driving with a lane-change overtaking override.
//!
//! While cruising, the network's four outputs drive the vehicle. When the
//! centre ray sees something close ahead and an adjacent lane is clear, the
//! autopilot takes over steering until the vehicle reaches that lane's centre.

use tracing::debug;

use super::super::brain::Brain;
use super::super::error::{Result, SimError};
use super::super::geometric_utils::{Point, Touch};
use super::super::params::{CONTROL_OUTPUTS, OvertakeParams};
use super::super::road::Road;
use super::super::sensor::{Pose, Sensor};
use super::controls::Controls;

/// Overtaking state of a networked vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrivingState {
    /// The network drives.
    #[default]
    Cruising,
    /// Steering is forced towards `target_lane`.
    Overtaking {
        /// Lane being moved into.
        target_lane: usize,
    },
}

impl DrivingState {
    /// `true` while a lane change is in progress.
    pub fn is_overtaking(self) -> bool {
        matches!(self, DrivingState::Overtaking { .. })
    }

    /// Lane being moved into, if overtaking.
    pub fn target_lane(self) -> Option<usize> {
        match self {
            DrivingState::Overtaking { target_lane } => Some(target_lane),
            DrivingState::Cruising => None,
        }
    }
}

/// Obstacles derived from the ray fan.
///
/// The centre ray looks ahead, the left-most third of the rays covers the
/// left side and the right-most third the right side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObstacleFlags {
    /// Something close on the centre ray.
    pub ahead: bool,
    /// Something close on the left rays.
    pub left: bool,
    /// Something close on the right rays.
    pub right: bool,
}

impl ObstacleFlags {
    /// Classifies sensor readings against the overtaking thresholds.
    pub fn from_readings(readings: &[Option<Touch>], thresholds: &OvertakeParams) -> Self {
        let n = readings.len();
        let third = n / 3;
        let near = |rays: &[Option<Touch>], limit: f32| {
            rays.iter().flatten().any(|touch| touch.offset < limit)
        };

        Self {
            ahead: readings
                .get(n / 2)
                .copied()
                .flatten()
                .is_some_and(|touch| touch.offset < thresholds.ahead_offset),
            left: near(&readings[..third], thresholds.side_offset),
            right: near(&readings[2 * third..], thresholds.side_offset),
        }
    }
}

/// Sensor, network and overtaking state owned by a networked vehicle.
#[derive(Debug, Clone)]
pub struct Autopilot {
    sensor: Sensor,
    brain: Brain,
    state: DrivingState,
    thresholds: OvertakeParams,
}

impl Autopilot {
    /// Pairs a sensor with a network.
    ///
    /// Fails when the network does not take one input per ray or does not
    /// produce one output per control.
    pub fn new(sensor: Sensor, brain: Brain, thresholds: OvertakeParams) -> Result<Self> {
        if sensor.ray_count() != brain.input_count() {
            return Err(SimError::SensorMismatch {
                rays: sensor.ray_count(),
                inputs: brain.input_count(),
            });
        }
        if brain.output_count() != CONTROL_OUTPUTS {
            return Err(SimError::ControlMismatch {
                expected: CONTROL_OUTPUTS,
                found: brain.output_count(),
            });
        }

        Ok(Self {
            sensor,
            brain,
            state: DrivingState::Cruising,
            thresholds,
        })
    }

    /// The sensor with the readings of the last tick.
    pub fn sensor(&self) -> &Sensor {
        &self.sensor
    }

    /// The driving network.
    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    /// Current overtaking state.
    pub fn state(&self) -> DrivingState {
        self.state
    }

    /// Overtaking thresholds in use.
    pub fn thresholds(&self) -> &OvertakeParams {
        &self.thresholds
    }

    /// Senses the surroundings and decides this tick's controls.
    pub fn drive(
        &mut self,
        pose: Pose,
        current_lane: usize,
        road: &Road,
        obstacles: &[&[Point]],
        controls: &mut Controls,
    ) {
        self.sensor.update(pose, road.borders(), obstacles);
        let flags = ObstacleFlags::from_readings(self.sensor.readings(), &self.thresholds);

        if flags.ahead && !self.state.is_overtaking() {
            let target_lane = if !flags.left && current_lane > 0 {
                Some(current_lane - 1)
            } else if !flags.right && current_lane + 1 < road.lane_count() {
                Some(current_lane + 1)
            } else {
                None
            };

            if let Some(target_lane) = target_lane {
                debug!(from = current_lane, to = target_lane, "overtaking started");
                self.state = DrivingState::Overtaking { target_lane };
            }
        }

        match self.state {
            DrivingState::Overtaking { target_lane } => {
                let target_x = road.lane_center(target_lane);
                let dx = pose.pos.x - target_x;

                if dx.abs() < self.thresholds.lane_tolerance {
                    debug!(lane = target_lane, "overtaking finished");
                    self.state = DrivingState::Cruising;
                    controls.left = false;
                    controls.right = false;
                } else {
                    controls.left = dx > 0.0;
                    controls.right = dx <= 0.0;
                }
                controls.forward = true;
                controls.reverse = false;
            }
            DrivingState::Cruising => {
                let outputs = self.brain.think(&self.sensor.inputs());
                *controls = Controls::from_outputs(&outputs);
            }
        }
    }
}
