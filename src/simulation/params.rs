use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, SimError};

/// Number of network outputs: forward, left, right, reverse.
pub const CONTROL_OUTPUTS: usize = 4;

/// Road geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadParams {
    /// X coordinate of the road centre.
    pub center_x: f32,
    /// Total road width.
    pub width: f32,
    /// Number of lanes.
    pub lane_count: usize,
}

/// Physical properties shared by all vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    /// Body width.
    pub width: f32,
    /// Body length.
    pub height: f32,
    /// Speed gained per tick while accelerating.
    pub acceleration: f32,
    /// Speed lost per tick to friction.
    pub friction: f32,
    /// Maximum forward speed. Reverse is capped at half of this.
    pub max_speed: f32,
    /// Heading change per tick while steering, in radians.
    pub steering_rate: f32,
}

/// Sensor ray fan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorParams {
    /// Number of rays, also the network input size.
    pub ray_count: usize,
    /// Length of each ray.
    pub ray_length: f32,
    /// Angle between the outermost rays in radians.
    pub ray_spread: f32,
}

/// Thresholds driving the overtaking state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvertakeParams {
    /// Forward ray offset below which an obstacle counts as ahead.
    pub ahead_offset: f32,
    /// Side ray offset below which a side counts as blocked.
    pub side_offset: f32,
    /// Distance to the target lane centre at which a lane change completes.
    pub lane_tolerance: f32,
}

/// A fixed-forward traffic vehicle placed at simulation start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficParams {
    /// Lane the vehicle starts in.
    pub lane: usize,
    /// Starting y coordinate.
    pub y: f32,
    /// Cruising speed.
    pub max_speed: f32,
}

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Road geometry.
    pub road: RoadParams,
    /// Number of networked vehicles per generation.
    pub population_size: usize,
    /// Lane the networked vehicles start in.
    pub start_lane: usize,
    /// Starting y coordinate of networked vehicles.
    pub start_y: f32,
    /// Physical vehicle properties.
    pub vehicle: VehicleParams,
    /// Sensor configuration.
    pub sensor: SensorParams,
    /// Hidden layer sizes between the sensor inputs and the control outputs.
    pub hidden_layers: Vec<usize>,
    /// Overtaking thresholds.
    pub overtake: OvertakeParams,
    /// Mutation amount applied to copies of the best network.
    pub mutation_amount: f32,
    /// Traffic layout, rebuilt every generation.
    pub traffic: Vec<TrafficParams>,
    /// Adds a keyboard-driven vehicle next to the population.
    pub manual_vehicle: bool,
    /// Updates networked vehicles in parallel within a tick.
    pub parallel: bool,
}

impl Default for Params {
    fn default() -> Self {
        let traffic = [
            (1, -100.0, 1.5),
            (0, -300.0, 1.0),
            (2, -300.0, 1.2),
            (0, -500.0, 0.8),
            (1, -500.0, 1.3),
            (1, -700.0, 1.0),
            (2, -700.0, 0.9),
            (0, -900.0, 1.1),
            (1, -1100.0, 0.7),
            (2, -1300.0, 1.4),
        ]
        .into_iter()
        .map(|(lane, y, max_speed)| TrafficParams { lane, y, max_speed })
        .collect();

        Self {
            road: RoadParams {
                center_x: 200.0,
                width: 360.0,
                lane_count: 3,
            },
            population_size: 100,
            start_lane: 1,
            start_y: 100.0,
            vehicle: VehicleParams {
                width: 30.0,
                height: 50.0,
                acceleration: 0.2,
                friction: 0.05,
                max_speed: 3.0,
                steering_rate: 0.03,
            },
            sensor: SensorParams {
                ray_count: 9,
                ray_length: 200.0,
                ray_spread: std::f32::consts::PI / 1.5,
            },
            hidden_layers: vec![10, 6],
            overtake: OvertakeParams {
                ahead_offset: 0.5,
                side_offset: 0.3,
                lane_tolerance: 10.0,
            },
            mutation_amount: 0.2,
            traffic,
            manual_vehicle: false,
            parallel: false,
        }
    }
}

impl Params {
    /// Full network shape: sensor rays, hidden layers, then the four controls.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(self.sensor.ray_count);
        sizes.extend_from_slice(&self.hidden_layers);
        sizes.push(CONTROL_OUTPUTS);
        sizes
    }

    /// Rejects parameter combinations the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SimError::InvalidParams(msg));

        if self.road.lane_count == 0 {
            return invalid("road needs at least one lane".to_string());
        }
        if self.road.width.is_nan() || self.road.width <= 0.0 {
            return invalid(format!("road width must be positive, got {}", self.road.width));
        }
        if self.population_size == 0 {
            return invalid("population must hold at least one vehicle".to_string());
        }
        if self.sensor.ray_count == 0 {
            return invalid("sensor needs at least one ray".to_string());
        }
        if self.sensor.ray_length.is_nan() || self.sensor.ray_length <= 0.0 {
            return invalid(format!(
                "sensor ray length must be positive, got {}",
                self.sensor.ray_length
            ));
        }
        if self.sensor.ray_spread.is_nan() {
            return invalid("sensor ray spread must be a number".to_string());
        }
        if self.vehicle.acceleration.is_nan() || self.vehicle.acceleration < 0.0 {
            return invalid(format!(
                "vehicle acceleration must not be negative, got {}",
                self.vehicle.acceleration
            ));
        }
        if self.vehicle.friction.is_nan() || self.vehicle.friction < 0.0 {
            return invalid(format!(
                "vehicle friction must not be negative, got {}",
                self.vehicle.friction
            ));
        }
        if self.vehicle.max_speed.is_nan() || self.vehicle.max_speed <= 0.0 {
            return invalid(format!(
                "vehicle max speed must be positive, got {}",
                self.vehicle.max_speed
            ));
        }
        if let Some(t) = self
            .traffic
            .iter()
            .find(|t| t.max_speed.is_nan() || t.max_speed < 0.0)
        {
            return invalid(format!(
                "traffic max speed must not be negative, got {}",
                t.max_speed
            ));
        }
        if self.hidden_layers.contains(&0) {
            return invalid(format!(
                "hidden layers must be non-zero, got {:?}",
                self.hidden_layers
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_amount) {
            return invalid(format!(
                "mutation amount must lie in [0, 1], got {}",
                self.mutation_amount
            ));
        }

        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
